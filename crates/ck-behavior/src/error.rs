use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// The update failed part-way.  The orchestrator reports it and moves on
    /// to the next agent.
    #[error("agent update failed: {0}")]
    Fault(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
