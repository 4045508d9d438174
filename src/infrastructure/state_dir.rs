//! Counter and delay files under the shared state directory.
//!
//! Each value is one text file holding a decimal integer. A missing file
//! reads as zero; anything else unreadable or unparsable is fatal. Writes
//! replace the whole file content. There is no locking against the serving
//! process touching the same files; the harness orders the two sides itself,
//! usually by polling the counters.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{Counter, Delay, Result, StateError};
use crate::infrastructure::config::state_dir_from_env;

/// Accessor for the counter and delay files of one state directory.
#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    /// Use an explicit directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the directory from the `MODEL_LOG_DIR` environment variable.
    ///
    /// # Errors
    /// Returns [`StateError::MissingEnv`] when the variable is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            root: state_dir_from_env()?,
        })
    }

    /// Directory the state files live in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current value of a counter. A counter that was never written reads 0.
    ///
    /// # Errors
    /// Returns error on unreadable or non-integer file content.
    pub fn get_count(&self, counter: Counter) -> Result<u64> {
        self.read_int(counter.file_name())
    }

    /// Increment a counter and return the new value.
    ///
    /// Read-modify-write without locking: two callers racing on the same
    /// file can lose an increment. Callers that care must serialize
    /// externally.
    ///
    /// # Errors
    /// Returns error on unreadable, unwritable, or non-integer file content.
    pub fn inc_count(&self, counter: Counter) -> Result<u64> {
        let count = self.read_int(counter.file_name())? + 1;
        self.write_int(counter.file_name(), count)?;
        Ok(count)
    }

    /// Reset a counter to 0 and return 0.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn reset_count(&self, counter: Counter) -> Result<u64> {
        self.write_int(counter.file_name(), 0)?;
        Ok(0)
    }

    /// Current value of a delay in seconds. An unset delay reads 0.
    ///
    /// # Errors
    /// Returns error on unreadable or non-integer file content.
    pub fn get_delay(&self, delay: Delay) -> Result<u64> {
        self.read_int(delay.file_name())
    }

    /// Set a delay in seconds and return the value written.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn set_delay(&self, delay: Delay, seconds: u64) -> Result<u64> {
        self.write_int(delay.file_name(), seconds)?;
        Ok(seconds)
    }

    fn read_int(&self, file_name: &str) -> Result<u64> {
        let path = self.root.join(file_name);
        let txt = match fs::read_to_string(&path) {
            Ok(txt) => txt,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(StateError::io(
                    format!("failed to read {}", path.display()),
                    e,
                ))
            }
        };

        txt.trim()
            .parse()
            .map_err(|source| StateError::Parse { path, source })
    }

    fn write_int(&self, file_name: &str, value: u64) -> Result<()> {
        let path = self.root.join(file_name);
        fs::write(&path, value.to_string())
            .map_err(|e| StateError::io(format!("failed to write {}", path.display()), e))?;

        tracing::debug!(path = %path.display(), value, "state file written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::STATE_DIR_ENV;
    use crate::test_support::ENV_MUTEX;
    use std::env;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_directory_reads_zero() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path());

        assert_eq!(state.get_count(Counter::Initialize).unwrap(), 0);
        assert_eq!(state.get_count(Counter::Finalize).unwrap(), 0);
        assert_eq!(state.get_delay(Delay::Initialize).unwrap(), 0);
        assert_eq!(state.get_delay(Delay::Infer).unwrap(), 0);
    }

    #[test]
    fn test_increment_sequence() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path());

        state.reset_count(Counter::Initialize).unwrap();
        for expected in 1..=5 {
            assert_eq!(state.inc_count(Counter::Initialize).unwrap(), expected);
        }
        assert_eq!(state.get_count(Counter::Initialize).unwrap(), 5);
    }

    #[test]
    fn test_reset_returns_zero_regardless_of_prior_value() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path());

        state.inc_count(Counter::Finalize).unwrap();
        state.inc_count(Counter::Finalize).unwrap();

        assert_eq!(state.reset_count(Counter::Finalize).unwrap(), 0);
        assert_eq!(state.get_count(Counter::Finalize).unwrap(), 0);
    }

    #[test]
    fn test_counters_are_independent() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path());

        state.inc_count(Counter::Initialize).unwrap();
        state.inc_count(Counter::Initialize).unwrap();
        state.inc_count(Counter::Finalize).unwrap();

        assert_eq!(state.get_count(Counter::Initialize).unwrap(), 2);
        assert_eq!(state.get_count(Counter::Finalize).unwrap(), 1);
    }

    #[test]
    fn test_delay_roundtrip() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path());

        assert_eq!(state.set_delay(Delay::Initialize, 7).unwrap(), 7);
        assert_eq!(state.get_delay(Delay::Initialize).unwrap(), 7);

        assert_eq!(state.set_delay(Delay::Infer, 0).unwrap(), 0);
        assert_eq!(state.get_delay(Delay::Infer).unwrap(), 0);
    }

    #[test]
    fn test_write_replaces_full_content() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path());

        state.set_delay(Delay::Infer, 100).unwrap();
        state.set_delay(Delay::Infer, 3).unwrap();

        let raw = fs::read_to_string(dir.path().join(Delay::Infer.file_name())).unwrap();
        assert_eq!(raw, "3");
    }

    #[test]
    fn test_malformed_content_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path());

        let path = dir.path().join(Counter::Initialize.file_name());
        fs::write(&path, "not-a-number").unwrap();

        let err = state.get_count(Counter::Initialize).unwrap_err();
        assert!(matches!(err, StateError::Parse { .. }));
    }

    #[test]
    fn test_negative_content_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path());

        let path = dir.path().join(Delay::Infer.file_name());
        fs::write(&path, "-3").unwrap();

        let err = state.get_delay(Delay::Infer).unwrap_err();
        assert!(matches!(err, StateError::Parse { .. }));
    }

    #[test]
    fn test_trailing_newline_is_tolerated() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path());

        let path = dir.path().join(Counter::Finalize.file_name());
        fs::write(&path, "42\n").unwrap();

        assert_eq!(state.get_count(Counter::Finalize).unwrap(), 42);
    }

    #[test]
    fn test_missing_directory_fails_on_write() {
        let dir = tempdir().unwrap();
        let state = StateDir::new(dir.path().join("does-not-exist"));

        let err = state.reset_count(Counter::Initialize).unwrap_err();
        assert!(matches!(err, StateError::Io { .. }));
    }

    #[test]
    fn test_from_env_requires_variable() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::remove_var(STATE_DIR_ENV);

        let err = StateDir::from_env().unwrap_err();
        assert!(matches!(err, StateError::MissingEnv { .. }));
    }

    #[test]
    fn test_from_env_uses_variable() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let dir = tempdir().unwrap();
        env::set_var(STATE_DIR_ENV, dir.path());

        let state = StateDir::from_env().unwrap();
        assert_eq!(state.root(), dir.path());
        assert_eq!(state.inc_count(Counter::Initialize).unwrap(), 1);

        env::remove_var(STATE_DIR_ENV);
    }
}
