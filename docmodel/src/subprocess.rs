use crate::config::RunnerConfig;
use crate::extract::TestUnit;
use crate::runner::{RunnerError, RunnerResult, TestRunner};
use async_trait::async_trait;
use serde::Serialize;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error};

/// Wire form of one test unit as the evaluator receives it on stdin.
#[derive(Serialize)]
struct UnitPayload<'a> {
    imports: &'a [String],
    code: &'a [String],
}

/// Runner backed by a local evaluator command. Each test unit is dispatched
/// as one child process; a nonzero exit status is an evaluation failure
/// carrying the child's stderr.
#[derive(Debug)]
pub struct SubprocessRunner {
    config: RunnerConfig,
}

impl SubprocessRunner {
    pub fn new(config: RunnerConfig) -> RunnerResult<Self> {
        config
            .validate()
            .map_err(|msg| RunnerError::InvalidConfig { message: msg })?;

        Ok(Self { config })
    }

    pub fn with_default_config() -> RunnerResult<Self> {
        Self::new(RunnerConfig::default())
    }
}

#[async_trait]
impl TestRunner for SubprocessRunner {
    async fn run_unit(&self, unit: &TestUnit) -> RunnerResult<()> {
        let payload = serde_json::to_vec(&UnitPayload {
            imports: &unit.imports,
            code: &unit.code,
        })?;

        debug!(
            "Dispatching test unit to {} ({} import lines, {} code lines)",
            self.config.command,
            unit.imports.len(),
            unit.code.len()
        );

        let mut child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is piped above, so take() only fails if the child already
        // went away.
        let mut stdin = child.stdin.take().ok_or_else(|| RunnerError::Evaluation {
            message: "evaluator closed stdin before the unit was written".to_string(),
        })?;
        stdin.write_all(&payload).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            format!("evaluator exited with {}", output.status)
        } else {
            stderr.trim().to_string()
        };
        error!("Evaluator {} rejected test unit: {}", self.config.command, message);
        Err(RunnerError::Evaluation { message })
    }

    fn runner_name(&self) -> &'static str {
        "subprocess"
    }
}
