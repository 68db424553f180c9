use crate::client::{AuthError, BuildError, BuildSetupError, DeployClient, PushError};
use crate::executor::{CommandExecutor, RealExecutor};
use acrship_core::DeploymentConfig;
use std::fmt;

/// Stages of a deploy run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AuthCloud,
    AuthRegistry,
    PrepareBuilder,
    BuildImage,
    TagAndPush,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AuthCloud => "Azure login",
            Self::AuthRegistry => "registry login",
            Self::PrepareBuilder => "builder setup",
            Self::BuildImage => "image build",
            Self::TagAndPush => "tag and push",
        };
        f.write_str(label)
    }
}

/// Result of a successful pipeline run.
#[derive(Debug)]
pub struct DeployOutcome {
    /// Registry reference that was pushed.
    pub image: String,
    pub steps: Vec<String>,
}

/// Login → builder → build → tag → push, stopping at the first failure.
///
/// Nothing is cleaned up on failure or success: the buildx builder and the
/// local registry tag stay behind.
pub struct Pipeline<E: CommandExecutor = RealExecutor> {
    client: DeployClient<E>,
    tenant_id: Option<String>,
}

impl<E: CommandExecutor> Pipeline<E> {
    pub fn new(client: DeployClient<E>, tenant_id: Option<String>) -> Self {
        Self { client, tenant_id }
    }

    pub async fn run(&self, config: &DeploymentConfig) -> Result<DeployOutcome, PipelineError> {
        let image = config.registry_image();
        let mut steps = Vec::new();

        tracing::debug!(
            container_app = %config.container_app_name,
            resource_group = %config.resource_group,
            environment = %config.container_app_environment,
            "deployment target"
        );

        tracing::info!(stage = %Stage::AuthCloud, "logging in with device code");
        self.client.login(self.tenant_id.as_deref()).await?;
        steps.push("Logged in to Azure".to_string());

        tracing::info!(
            stage = %Stage::AuthRegistry,
            registry = %config.registry_host(),
            "logging in to registry"
        );
        self.client.acr_login(&config.acr_name).await?;
        steps.push(format!("Logged in to {}", config.registry_host()));

        tracing::info!(stage = %Stage::PrepareBuilder, "creating buildx builder");
        self.client.create_builder().await?;
        steps.push("Buildx builder ready".to_string());

        tracing::info!(
            stage = %Stage::BuildImage,
            dockerfile = %config.dockerfile_path,
            tag = %config.image_name,
            platform = crate::PLATFORM,
            "building image"
        );
        self.client
            .build_image(&config.dockerfile_path, &config.image_name)
            .await?;
        steps.push(format!("Built {} for {}", config.image_name, crate::PLATFORM));

        tracing::info!(stage = %Stage::TagAndPush, %image, "pushing image");
        // Only the push decides the outcome; a failed tag surfaces there.
        // arch-lint: allow(no-error-swallowing) reason="tag failures are logged and left to the push, matching the source script"
        if let Err(e) = self.client.tag_image(&config.image_name, &image).await {
            tracing::warn!(error = %e, "docker tag failed, continuing to push");
        }
        self.client.push_image(&image).await?;
        steps.push(format!("Pushed {image}"));

        Ok(DeployOutcome { image, steps })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    BuildSetup(#[from] BuildSetupError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Push(#[from] PushError),
}

impl PipelineError {
    /// Stage the run stopped at.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Auth(AuthError::CloudLogin { .. }) => Stage::AuthCloud,
            Self::Auth(AuthError::RegistryLogin { .. }) => Stage::AuthRegistry,
            Self::BuildSetup(_) => Stage::PrepareBuilder,
            Self::Build(_) => Stage::BuildImage,
            Self::Push(_) => Stage::TagAndPush,
        }
    }
}
