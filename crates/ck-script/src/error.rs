use std::path::PathBuf;

use ck_core::AgentRef;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script body failed.  Reported by the orchestrator; the drain
    /// continues with the next event.
    #[error("script fault: {0}")]
    Fault(String),

    #[error("cannot target a null agent")]
    NullTarget,

    #[error("script has no owner agent")]
    NoOwner,

    #[error("{0} is not alive")]
    DeadAgent(AgentRef),

    #[error("variable index {0} out of range")]
    BadVariable(usize),

    #[error("{}:{line}: {message}", path.display())]
    Compile {
        path:    PathBuf,
        line:    usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScriptResult<T> = Result<T, ScriptError>;
