pub mod assembly;
pub mod config;
pub mod constructs;
pub mod error;
pub mod intrinsics;
pub mod stack;
pub mod stacks;
pub mod template;

pub use assembly::{render_template, write_assembly, AssemblyManifest, AwsTarget};
pub use config::{DeploymentEnv, EmailAddress, EnvSettings};
pub use error::SynthError;
pub use stack::Stack;
pub use stacks::{synthesize_app, App, AppProps};
