//! High score persistence
//!
//! The best score is stored as a single integer in a text file. Reads never
//! fail (missing or garbled files count as zero); write failures are reported
//! to the caller, which logs and moves on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory
pub const DEFAULT_PATH: &str = "archery_highscore.txt";

/// Location of the persisted high score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl Default for HighScoreFile {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score, falling back to 0
    pub fn load(&self) -> u32 {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                log::info!("No high score at {} ({}), starting fresh", self.path.display(), err);
                return 0;
            }
        };
        match parse_score(&contents) {
            Some(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            None => {
                log::info!("Unreadable high score file {}, ignoring", self.path.display());
                0
            }
        }
    }

    /// Overwrite the stored score
    pub fn save(&self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// Parse a stored score; surrounding whitespace is tolerated
fn parse_score(contents: &str) -> Option<u32> {
    contents.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> HighScoreFile {
        let path = std::env::temp_dir().join(format!(
            "archery_hs_{}_{}.txt",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        HighScoreFile::new(path)
    }

    #[test]
    fn test_missing_file_is_zero() {
        let file = scratch("missing");
        assert_eq!(file.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let file = scratch("roundtrip");
        file.save(150).unwrap();
        assert_eq!(file.load(), 150);
        file.save(90).unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "90");
        let _ = fs::remove_file(file.path());
    }

    #[test]
    fn test_garbage_is_zero() {
        let file = scratch("garbage");
        fs::write(file.path(), "not a number").unwrap();
        assert_eq!(file.load(), 0);
        fs::write(file.path(), "-5").unwrap();
        assert_eq!(file.load(), 0);
        let _ = fs::remove_file(file.path());
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        assert_eq!(parse_score(" 420\n"), Some(420));
        assert_eq!(parse_score(""), None);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let file = HighScoreFile::new(std::env::temp_dir().join("archery_no_such_dir/hs.txt"));
        assert!(file.save(10).is_err());
    }
}
