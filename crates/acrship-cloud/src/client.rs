use crate::executor::{CommandExecutor, RealExecutor};
use crate::tool::{Tool, ToolError};

/// Target platform of every image build, independent of the host architecture.
pub const PLATFORM: &str = "linux/amd64";

/// Azure and Docker operations, parameterized over the executor for testability.
pub struct DeployClient<E: CommandExecutor = RealExecutor> {
    executor: E,
}

impl DeployClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for DeployClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> DeployClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Azure ──

    /// Interactive device-code login. Blocks until the user completes the
    /// out-of-band prompt or `az` gives up.
    pub async fn login(&self, tenant_id: Option<&str>) -> Result<(), AuthError> {
        let mut cmd = args(["login", "--use-device-code"]);
        if let Some(tenant) = tenant_id {
            cmd.extend(args(["--tenant", tenant]));
        }

        self.executor
            .exec(Tool::Az, &cmd)
            .await
            .map_err(|e| AuthError::CloudLogin { source: e })
    }

    /// Log the local Docker daemon into `<acr_name>.azurecr.io` using the
    /// current az session.
    pub async fn acr_login(&self, acr_name: &str) -> Result<(), AuthError> {
        self.executor
            .exec(Tool::Az, &args(["acr", "login", "--name", acr_name]))
            .await
            .map_err(|e| AuthError::RegistryLogin {
                registry: acr_name.to_owned(),
                source: e,
            })
    }

    // ── Docker ──

    /// Create a buildx builder and make it the active one.
    ///
    /// The builder is left in place after the run.
    pub async fn create_builder(&self) -> Result<(), BuildSetupError> {
        self.executor
            .exec(Tool::Docker, &args(["buildx", "create", "--use"]))
            .await
            .map_err(|e| BuildSetupError::Create { source: e })
    }

    /// Build `dockerfile` for [`PLATFORM`] and load the result into the local
    /// image store as `tag`.
    pub async fn build_image(&self, dockerfile: &str, tag: &str) -> Result<(), BuildError> {
        self.executor
            .exec(
                Tool::Docker,
                &args([
                    "buildx",
                    "build",
                    "--platform",
                    PLATFORM,
                    "-f",
                    dockerfile,
                    "-t",
                    tag,
                    "--load",
                    ".",
                ]),
            )
            .await
            .map_err(|e| BuildError::Build {
                tag: tag.to_owned(),
                source: e,
            })
    }

    pub async fn tag_image(&self, source: &str, target: &str) -> Result<(), ToolError> {
        self.executor
            .exec(Tool::Docker, &args(["tag", source, target]))
            .await
    }

    pub async fn push_image(&self, image: &str) -> Result<(), PushError> {
        self.executor
            .exec(Tool::Docker, &args(["push", image]))
            .await
            .map_err(|e| PushError::Push {
                image: image.to_owned(),
                source: e,
            })
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Azure login failed")]
    CloudLogin { source: ToolError },

    #[error("login to container registry '{registry}' failed")]
    RegistryLogin { registry: String, source: ToolError },
}

#[derive(Debug, thiserror::Error)]
pub enum BuildSetupError {
    #[error("failed to create buildx builder")]
    Create { source: ToolError },
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("docker build failed for {tag}")]
    Build { tag: String, source: ToolError },
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("failed to push {image}")]
    Push { image: String, source: ToolError },
}
