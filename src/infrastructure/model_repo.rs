//! Model repository edits driven by the tests.
//!
//! The config descriptor and the model source are mutated as plain text with
//! literal markers. The serving process watches these files for changes, and
//! the exact bytes written are what its reload logic reacts to, so the edits
//! stay textual rather than going through a structured parser.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{Result, StateError};

/// Config descriptor file name under the repository root.
const CONFIG_FILE: &str = "config.pbtxt";

/// Version directory holding the model source.
const MODEL_VERSION_DIR: &str = "1";

/// Model source file name inside the version directory.
const MODEL_SOURCE_FILE: &str = "model.py";

/// Opening of the instance-group block in the descriptor.
const INSTANCE_GROUP_MARKER: &str = "instance_group [";

/// Batch-size settings toggled by the tests.
const BATCHING_OFF: &str = "max_batch_size: 0";
const BATCHING_ON: &str = "max_batch_size: 2";

/// Line appended to the model source to provoke a reload.
const MODEL_SOURCE_MARKER: &str = "\n# dummy model file update\n";

/// Editor for one model repository.
#[derive(Debug, Clone)]
pub struct ModelRepo {
    root: PathBuf,
}

impl ModelRepo {
    /// Use the repository rooted at `root` (the directory holding
    /// `config.pbtxt`).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the config descriptor.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Path of the versioned model source.
    #[must_use]
    pub fn model_source_path(&self) -> PathBuf {
        self.root.join(MODEL_VERSION_DIR).join(MODEL_SOURCE_FILE)
    }

    /// Replace the trailing `instance_group` block of the descriptor.
    ///
    /// Everything before the first `instance_group [` is kept (the whole
    /// file, when no block exists yet); from the marker onward the content
    /// becomes a fresh block holding `group_body`. Returns the new
    /// descriptor text.
    ///
    /// # Errors
    /// Returns error if the descriptor cannot be read or written.
    pub fn update_instance_group(&self, group_body: &str) -> Result<String> {
        let path = self.config_path();
        let txt = read_text(&path)?;

        let head = match txt.find(INSTANCE_GROUP_MARKER) {
            Some(idx) => &txt[..idx],
            None => txt.as_str(),
        };

        let mut updated = String::with_capacity(head.len() + group_body.len() + 32);
        updated.push_str(head);
        updated.push_str(INSTANCE_GROUP_MARKER);
        updated.push('\n');
        updated.push_str(group_body);
        updated.push_str("\n]\n");

        write_text(&path, &updated)?;

        tracing::debug!(path = %path.display(), "instance group replaced");

        Ok(updated)
    }

    /// Turn batching on by rewriting the batch-size setting.
    ///
    /// Substitutes every occurrence of `max_batch_size: 0` with
    /// `max_batch_size: 2`. A descriptor without the setting is written back
    /// unchanged. Returns the new descriptor text.
    ///
    /// # Errors
    /// Returns error if the descriptor cannot be read or written.
    pub fn enable_batching(&self) -> Result<String> {
        self.substitute(BATCHING_OFF, BATCHING_ON)
    }

    /// Turn batching off again.
    ///
    /// The reverse substitution of [`enable_batching`](Self::enable_batching),
    /// with the same no-op behavior when the setting is absent.
    ///
    /// # Errors
    /// Returns error if the descriptor cannot be read or written.
    pub fn disable_batching(&self) -> Result<String> {
        self.substitute(BATCHING_ON, BATCHING_OFF)
    }

    fn substitute(&self, from: &str, to: &str) -> Result<String> {
        let path = self.config_path();
        let updated = read_text(&path)?.replace(from, to);
        write_text(&path, &updated)?;

        tracing::debug!(path = %path.display(), from, to, "descriptor substitution");

        Ok(updated)
    }

    /// Append the update marker to the model source.
    ///
    /// Simulates an external edit so a watching process reloads the model.
    /// Appends only; prior content is never rewritten.
    ///
    /// # Errors
    /// Returns error if the model source cannot be opened or appended to.
    pub fn update_model_file(&self) -> Result<()> {
        let path = self.model_source_path();

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| StateError::io(format!("failed to open {}", path.display()), e))?;

        file.write_all(MODEL_SOURCE_MARKER.as_bytes())
            .map_err(|e| StateError::io(format!("failed to append to {}", path.display()), e))?;

        tracing::debug!(path = %path.display(), "model source touched");

        Ok(())
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| StateError::io(format!("failed to read {}", path.display()), e))
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| StateError::io(format!("failed to write {}", path.display()), e))
}
