use std::fmt;

/// External CLIs the deploy pipeline drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Az,
    Docker,
}

impl Tool {
    pub fn program(self) -> &'static str {
        match self {
            Self::Az => "az",
            Self::Docker => "docker",
        }
    }

    pub fn install_url(self) -> &'static str {
        match self {
            Self::Az => "https://learn.microsoft.com/cli/azure/install-azure-cli",
            Self::Docker => "https://docs.docker.com/get-docker/",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{tool} CLI not found, install: {}", tool.install_url())]
    NotFound { tool: Tool, source: std::io::Error },

    #[error("failed to start {tool}")]
    Spawn { tool: Tool, source: std::io::Error },

    #[error("{tool} command failed: {args:?}\n{status}")]
    CommandFailed {
        tool: Tool,
        args: Vec<String>,
        status: String,
    },
}
