pub mod client;
pub mod executor;
pub mod pipeline;
pub mod tool;

pub use client::{AuthError, BuildError, BuildSetupError, DeployClient, PLATFORM, PushError};
pub use executor::{CommandExecutor, RealExecutor};
pub use pipeline::{DeployOutcome, Pipeline, PipelineError, Stage};
pub use tool::{Tool, ToolError};
