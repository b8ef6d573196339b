// src/exit.rs
//! Standardized process exit codes for `bladegraph`.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum BladeGraphExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (missing root, IO, bad config, unknown template).
    Error = 1,
    /// Command-line usage error (unknown flag, missing argument).
    InvalidInput = 2,
    /// `check` found an inheritance cycle.
    CheckFailed = 3,
}

impl BladeGraphExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for BladeGraphExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
