use crate::extract::TestUnit;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Evaluation failed: {message}")]
    Evaluation { message: String },

    #[error("Evaluator I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type RunnerResult<T> = Result<T, RunnerError>;

/// Handle to the external evaluation harness. One invocation per test unit:
/// the evaluator runs the unit's import lines, then its code lines, as a
/// single isolated snippet, and fails if evaluation or an embedded
/// assertion fails.
#[async_trait]
pub trait TestRunner: Send + Sync {
    async fn run_unit(&self, unit: &TestUnit) -> RunnerResult<()>;

    fn runner_name(&self) -> &'static str;
}
