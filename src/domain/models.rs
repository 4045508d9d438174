//! Counter and delay kinds and their backing file names.
//!
//! Each kind maps to one fixed text file under the state directory. The
//! serving process reads the same files by these exact names, so the mapping
//! is part of the on-disk contract.

/// Lifecycle counters shared between the test and the serving process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// Bumped each time a model instance finishes `initialize`.
    Initialize,
    /// Bumped each time a model instance finishes `finalize`.
    Finalize,
}

impl Counter {
    /// Backing file name under the state directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Initialize => "instance_init_del_initialize_count.txt",
            Self::Finalize => "instance_init_del_finalize_count.txt",
        }
    }
}

/// Artificial delays (in seconds) injected into the model under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delay {
    /// Sleep applied inside `initialize`.
    Initialize,
    /// Sleep applied to each inference request.
    Infer,
}

impl Delay {
    /// Backing file name under the state directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Initialize => "instance_init_del_initialize_delay.txt",
            Self::Infer => "instance_init_del_infer_delay.txt",
        }
    }
}
