use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "acrship.toml";

/// Domain suffix of Azure Container Registry login servers.
pub const ACR_DOMAIN: &str = "azurecr.io";

/// acrship.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcrshipSettings {
    #[serde(default)]
    pub deployment: DeploymentConfig,
    #[serde(default)]
    pub azure: AzureSettings,
}

/// Parameters of a single deployment run.
///
/// Built once at startup (defaults, then `acrship.toml`, then command-line
/// overrides) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentConfig {
    /// Local image tag
    #[serde(default = "default_image_name")]
    pub image_name: String,
    /// Target Container App (pass-through)
    #[serde(default = "default_container_app_name")]
    pub container_app_name: String,
    /// Dockerfile used for the build
    #[serde(default = "default_dockerfile_path")]
    pub dockerfile_path: String,
    /// Azure resource group (pass-through)
    #[serde(default = "default_resource_group")]
    pub resource_group: String,
    /// Registry short name, without the `.azurecr.io` suffix
    #[serde(default = "default_acr_name")]
    pub acr_name: String,
    /// Container Apps environment (pass-through)
    #[serde(default = "default_container_app_environment")]
    pub container_app_environment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AzureSettings {
    /// Tenant the device-code login is pinned to.
    /// When unset, `az login` falls back to the account's home tenant.
    pub tenant_id: Option<String>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            image_name: default_image_name(),
            container_app_name: default_container_app_name(),
            dockerfile_path: default_dockerfile_path(),
            resource_group: default_resource_group(),
            acr_name: default_acr_name(),
            container_app_environment: default_container_app_environment(),
        }
    }
}

impl DeploymentConfig {
    /// Login server of the target registry, e.g. `myregistry.azurecr.io`.
    pub fn registry_host(&self) -> String {
        format!("{}.{ACR_DOMAIN}", self.acr_name)
    }

    /// Fully qualified reference the image is tagged and pushed as.
    pub fn registry_image(&self) -> String {
        format!("{}/{}", self.registry_host(), self.image_name)
    }
}

impl AcrshipSettings {
    /// Load from acrship.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &Path) -> crate::Result<Self> {
        let config_path = dir.join(SETTINGS_FILE);
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.clone(),
                source: e,
            })?;
        let settings = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings file");
        Ok(settings)
    }
}

fn default_image_name() -> String {
    "hr-ui:dev-uat".to_owned()
}

fn default_container_app_name() -> String {
    "hr-ui-app".to_owned()
}

fn default_dockerfile_path() -> String {
    "Dockerfile".to_owned()
}

fn default_resource_group() -> String {
    "arg-syd-ing-dev-shared".to_owned()
}

fn default_acr_name() -> String {
    "acrsydingdevkfpqjli23em5m".to_owned()
}

fn default_container_app_environment() -> String {
    "ingen-container-app-env".to_owned()
}
