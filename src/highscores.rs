//! High-score persistence
//!
//! One small JSON file next to the executable. A missing or corrupt file is
//! never an error; it just means a best of zero.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub high_score: u64,
}

impl HighScore {
    /// Load from `path`, falling back to zero on any read or parse failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(hs) => hs,
                Err(err) => {
                    log::warn!("ignoring corrupt high-score file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("could not read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, text)
    }

    /// Fold in a finished run's score. Returns true when it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("castle-archer-test-{name}-{}", std::process::id()));
        p
    }

    #[test]
    fn missing_file_is_zero() {
        let hs = HighScore::load(Path::new("/definitely/not/a/real/path.json"));
        assert_eq!(hs.high_score, 0);
    }

    #[test]
    fn corrupt_file_is_zero() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json {").unwrap();
        let hs = HighScore::load(&path);
        assert_eq!(hs.high_score, 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_round_trip() {
        let path = temp_path("roundtrip");
        let hs = HighScore { high_score: 4321 };
        hs.save(&path).unwrap();
        let back = HighScore::load(&path);
        assert_eq!(back.high_score, 4321);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn record_keeps_the_best() {
        let mut hs = HighScore { high_score: 100 };
        assert!(!hs.record(50));
        assert_eq!(hs.high_score, 100);
        assert!(hs.record(150));
        assert_eq!(hs.high_score, 150);
    }
}
