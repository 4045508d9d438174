//! Test-only shared helpers.
//!
//! Rust tests run in parallel, but environment variables are per-process.
//! Any test that mutates or depends on `MODEL_LOG_DIR` must hold this lock.

use std::sync::Mutex;

pub(crate) static ENV_MUTEX: Mutex<()> = Mutex::new(());
