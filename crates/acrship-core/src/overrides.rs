use crate::config::DeploymentConfig;
use std::ffi::OsString;

/// Convert raw process arguments to strings.
///
/// A token that is not valid UTF-8 fails as [`crate::Error::UnknownParameter`],
/// shown lossily.
pub fn utf8_args<I>(args: I) -> crate::Result<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                crate::Error::UnknownParameter(raw.to_string_lossy().into_owned())
            })
        })
        .collect()
}

/// Apply `--flag value` overrides to `base` in a single left-to-right pass.
///
/// Recognized flags: `--image-name`, `--container-app-name`, `--dockerfile-path`,
/// `--resource-group`, `--acr-name`, `--container-app-environment`.
/// The token following a flag is always its value, even when it looks like a flag.
/// A repeated flag overwrites the earlier value. A flag with nothing after it
/// sets its field to the empty string. Any other token fails with
/// [`crate::Error::UnknownParameter`].
pub fn parse_overrides<I, S>(base: DeploymentConfig, args: I) -> crate::Result<DeploymentConfig>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut config = base;
    let mut tokens = args.into_iter().map(Into::into);

    while let Some(flag) = tokens.next() {
        let field = match flag.as_str() {
            "--image-name" => &mut config.image_name,
            "--container-app-name" => &mut config.container_app_name,
            "--dockerfile-path" => &mut config.dockerfile_path,
            "--resource-group" => &mut config.resource_group,
            "--acr-name" => &mut config.acr_name,
            "--container-app-environment" => &mut config.container_app_environment,
            _ => return Err(crate::Error::UnknownParameter(flag)),
        };
        *field = match tokens.next() {
            Some(value) => value,
            None => String::new(),
        };
        tracing::debug!(%flag, value = %field, "override applied");
    }

    Ok(config)
}
