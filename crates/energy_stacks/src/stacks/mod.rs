pub mod data_pipeline;
pub mod hello_world;
pub mod shared_resources;

use clap::ValueEnum;

use crate::config::{DeploymentEnv, EmailAddress};
use crate::error::SynthError;
use crate::stack::Stack;

/// Description shared by every stack of the multi-stack app.
pub const APP_DESCRIPTION: &str = "Home energy coach application from Hands-on AWS CDK Book";

pub use data_pipeline::{data_pipeline_stack, DataPipelineProps};
pub use hello_world::hello_world_stack;
pub use shared_resources::{calculated_energy_table_ref, shared_resources_stack};

/// The two deployable units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum App {
    HelloLambda,
    MultiStacks,
}

impl App {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HelloLambda => "hello-lambda",
            Self::MultiStacks => "multi-stacks",
        }
    }
}

/// Inputs already validated at the entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct AppProps {
    pub env: DeploymentEnv,
    pub admin_email: Option<EmailAddress>,
}

pub fn synthesize_app(app: App, props: &AppProps) -> Result<Vec<Stack>, SynthError> {
    match app {
        App::HelloLambda => Ok(vec![hello_world_stack(props.env, props.env.settings())?]),
        App::MultiStacks => {
            let admin_email = props
                .admin_email
                .clone()
                .ok_or(SynthError::MissingAdminEmail {
                    app: App::MultiStacks.as_str(),
                })?;
            let shared = shared_resources_stack()?;
            let pipeline = data_pipeline_stack(&DataPipelineProps {
                admin_email,
                calculated_energy_table: calculated_energy_table_ref(),
            })?;
            Ok(vec![shared, pipeline])
        }
    }
}
