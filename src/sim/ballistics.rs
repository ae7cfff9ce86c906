//! Projectile integration and aim math
//!
//! Pure numeric functions over finite floats. Deterministic for identical dt
//! sequences, which is what makes trajectory tests possible.

use glam::Vec2;

use super::state::Projectile;

/// Advance a projectile by one step of gravity-affected motion. Clears the
/// alive flag when it reaches the ground plane.
pub fn integrate(p: &mut Projectile, dt: f32, ground_y: f32) {
    p.vel.y += p.gravity * dt;
    p.pos += p.vel * dt;
    if p.pos.y >= ground_y - 2.0 {
        p.alive = false;
    }
}

/// Unit vector from `origin` toward `target`. Degenerate input (coincident
/// points) falls back to +X rather than producing NaN.
pub fn aim_direction(origin: Vec2, target: Vec2) -> Vec2 {
    let v = target - origin;
    if v.length_squared() == 0.0 {
        Vec2::X
    } else {
        v.normalize()
    }
}

/// Rotate `v` by `angle` radians. Used for the triple-shot spread.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Whether an x coordinate is still inside the horizontal play band.
pub fn in_horizontal_bounds(x: f32, width: f32, margin: f32) -> bool {
    (-margin..=width + margin).contains(&x)
}
