//! File-backed state coordination between a test process and a separately
//! running model-serving instance.
//!
//! Counters (initialize/finalize) and delay values live as plain text files
//! under a shared log directory taken from `MODEL_LOG_DIR`; the model's
//! config descriptor and source file are edited as plain text to provoke
//! reloads. Both processes poll the same files, and nothing here locks or
//! retries — ordering between the two sides belongs to the harness.
//!
//! ```no_run
//! use model_state_helper::{Counter, Delay, ModelRepo, StateDir};
//!
//! # fn main() -> model_state_helper::Result<()> {
//! let state = StateDir::from_env()?;
//! state.reset_count(Counter::Initialize)?;
//! state.set_delay(Delay::Infer, 3)?;
//!
//! let repo = ModelRepo::new("/models/instance_init_del");
//! repo.update_instance_group("count: 2\nkind: KIND_CPU")?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

pub use domain::{Counter, Delay, Result, StateError};
pub use infrastructure::{
    ensure_settings_exist, HarnessConfig, ModelRepo, PathConfig, StateDir, STATE_DIR_ENV,
};
