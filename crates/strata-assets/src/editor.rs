//! Mesh material editing seam.
//!
//! Parsing and rewriting 3D mesh files is delegated. Implementations take
//! the asset bytes and a target color and return the recolored bytes.

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::color::Rgb;
use crate::error::AssetError;

/// Recolors a binary 3D asset.
pub trait MaterialEditor: Send + Sync {
    /// Return a copy of `asset` with its base material painted `color`.
    fn recolor(
        &self,
        asset: Bytes,
        color: Rgb,
    ) -> impl Future<Output = Result<Bytes, AssetError>> + Send;
}

/// Default deadline for one editor run.
pub const DEFAULT_EDITOR_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs an external executable as the material editor.
///
/// Invoked as `<program> [args...] <r> <g> <b>` with the asset on stdin;
/// the recolored asset is read from stdout. A run that outlives the
/// timeout is killed and reported as an editor failure.
#[derive(Debug, Clone)]
pub struct CommandMaterialEditor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandMaterialEditor {
    #[must_use]
    pub const fn new(program: String, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            timeout: DEFAULT_EDITOR_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Split a whitespace-separated command line.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::NotConfigured` for a blank command line.
    pub fn from_command_line(command_line: &str) -> Result<Self, AssetError> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| AssetError::NotConfigured("editor command is empty".into()))?;
        Ok(Self::new(program, parts.collect()))
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl MaterialEditor for CommandMaterialEditor {
    async fn recolor(&self, asset: Bytes, color: Rgb) -> Result<Bytes, AssetError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(color.r.to_string())
            .arg(color.g.to_string())
            .arg(color.b.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AssetError::Editor("editor stdin unavailable".into()))?;
        let writer = tokio::spawn(async move {
            stdin.write_all(&asset).await?;
            stdin.shutdown().await
        });

        // Dropping the timed-out future drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                writer.abort();
                AssetError::Editor(format!(
                    "{} did not finish within {}s",
                    self.program,
                    self.timeout.as_secs_f64()
                ))
            })??;
        let written = writer
            .await
            .map_err(|e| AssetError::Editor(format!("stdin writer task failed: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AssetError::Editor(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        written?;
        if output.stdout.is_empty() {
            return Err(AssetError::Editor(format!(
                "{} produced no output",
                self.program
            )));
        }
        Ok(Bytes::from(output.stdout))
    }
}
