//! Coupling error kinds
//!
//! Failures are split along the fatal / recoverable line:
//!
//! - [`CouplingError`]: fatal. Configuration problems abort before the main
//!   loop; invocation and checkpoint failures abort mid-run without retry.
//! - [`DiagnosticsError`]: recoverable. Raised by reporting hooks, caught at
//!   the hook call site, logged and ignored. A diagnostics failure must never
//!   abort a numerically successful run.

use crate::coupling::domains::Phase;
use crate::engine::EngineError;

// =================================================================================================
// Fatal Errors
// =================================================================================================

/// Fatal failures of a coupled run.
#[derive(Debug, thiserror::Error)]
pub enum CouplingError {
    /// A required domain or parameter could not be validated or resolved at
    /// startup. The run never reaches the main loop.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A blocking solver invocation failed mid-run. Propagates immediately:
    /// a failed physics solve leaves domain state undefined, so there is no
    /// retry and no rollback of activation or limit state.
    #[error("solver invocation failed in {phase} phase, subcycle {subcycle}: {source}")]
    SolverInvocation {
        phase: Phase,
        subcycle: u32,
        #[source]
        source: EngineError,
    },

    /// A state snapshot could not be written. Fatal by design: a silently
    /// lost checkpoint defeats the purpose of periodic saving in a long
    /// unattended run.
    #[error("checkpoint at t = {time:.2} s failed: {source}")]
    Checkpoint {
        time: f64,
        #[source]
        source: EngineError,
    },
}

// =================================================================================================
// Recoverable Errors
// =================================================================================================

/// Failure inside an optional reporting hook. Logged and swallowed by the
/// scheduler; never unwinds past the hook call site.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct DiagnosticsError(pub String);

impl From<String> for DiagnosticsError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for DiagnosticsError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
