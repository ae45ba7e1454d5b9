use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

/// What the optimizer printed while running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizerOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
}

/// Reads the optimizer input JSON at `input` and writes its result to `output`.
/// Only the presence of `output` afterwards tells whether it succeeded.
#[async_trait]
pub trait Optimizer: Send + Sync {
    async fn run(&self, input: &Path, output: &Path) -> std::io::Result<OptimizerOutput>;
}

/// Runs an external executable as `<executable> <input> <output>`.
#[derive(Debug, Clone)]
pub struct ProcessOptimizer {
    executable: PathBuf,
}

impl ProcessOptimizer {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

#[async_trait]
impl Optimizer for ProcessOptimizer {
    #[instrument(skip_all, fields(executable = %self.executable.display()))]
    async fn run(&self, input: &Path, output: &Path) -> std::io::Result<OptimizerOutput> {
        let result = Command::new(&self.executable)
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        debug!(status = %result.status, "Optimizer exited");

        Ok(OptimizerOutput {
            stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            exit_code: result.status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_runs_with_input_and_output_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run_in.json");
        let output = dir.path().join("run_out.json");
        std::fs::write(&input, r#"{"employees":{}}"#).unwrap();

        // cp stands in for an optimizer that echoes its input
        let result = ProcessOptimizer::new("cp").run(&input, &output).await.unwrap();

        assert_eq!(result.exit_code, Some(0));
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            r#"{"employees":{}}"#
        );
    }

    #[tokio::test]
    async fn test_captures_output_of_failed_runs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing_in.json");
        let output = dir.path().join("missing_out.json");

        let result = ProcessOptimizer::new("cp").run(&input, &output).await.unwrap();

        assert_ne!(result.exit_code, Some(0));
        assert!(!result.stderr.is_empty());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let optimizer = ProcessOptimizer::new(dir.path().join("no_such_optimizer"));

        let result = optimizer
            .run(&dir.path().join("in.json"), &dir.path().join("out.json"))
            .await;

        assert!(result.is_err());
    }
}
