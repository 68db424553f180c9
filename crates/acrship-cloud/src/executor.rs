use crate::tool::{Tool, ToolError};

/// Abstraction over external CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Run a tool to completion with stdio attached to the terminal.
    ///
    /// Succeeds only when the process exits with status zero.
    async fn exec(&self, tool: Tool, args: &[String]) -> Result<(), ToolError>;
}

/// Runs the real `az` / `docker` binaries found on `PATH`.
pub struct RealExecutor;

impl CommandExecutor for RealExecutor {
    async fn exec(&self, tool: Tool, args: &[String]) -> Result<(), ToolError> {
        use std::process::Stdio;

        tracing::debug!(%tool, ?args, "exec");

        let status = tokio::process::Command::new(tool.program())
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ToolError::NotFound { tool, source: e },
                _ => ToolError::Spawn { tool, source: e },
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::CommandFailed {
                tool,
                args: args.to_vec(),
                status: status.to_string(),
            })
        }
    }
}
