//! External damage calculator run as a child process
//!
//! The program receives one [`CalcRequest`] as JSON on stdin and must print a
//! [`DamageRange`] as JSON on stdout, e.g. a small wrapper script around
//! `@smogon/calc`.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use espy_battle::{CalcError, CalcRequest, DamageCalculator, DamageRange};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub const DEFAULT_CALC_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ProcessCalculator {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessCalculator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_CALC_TIMEOUT,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, payload: &[u8]) -> Result<DamageRange, CalcError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    CalcError::Unavailable(format!("{}: {}", self.program.display(), e))
                }
                _ => CalcError::Failed(format!("failed to start calculator: {}", e)),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload)
                .await
                .map_err(|e| CalcError::Failed(format!("failed to write request: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| CalcError::Failed(e.to_string()))?;

        if !output.status.success() {
            return Err(CalcError::Failed(format!(
                "calculator exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| CalcError::Failed(format!("invalid calculator output: {}", e)))
    }
}

impl DamageCalculator for ProcessCalculator {
    async fn calculate(&self, request: &CalcRequest) -> Result<DamageRange, CalcError> {
        let payload = serde_json::to_vec(request).map_err(|e| CalcError::Failed(e.to_string()))?;

        let result = match tokio::time::timeout(self.timeout, self.run(&payload)).await {
            Ok(result) => result,
            Err(_) => Err(CalcError::TimedOut(self.timeout)),
        };

        if let Err(e) = &result {
            tracing::warn!(program = %self.program.display(), move_name = %request.move_name, error = %e, "damage calculation failed");
        }
        result
    }
}
