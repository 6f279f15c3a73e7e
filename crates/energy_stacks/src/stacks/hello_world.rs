use energy_core::env_vars;

use crate::config::{DeploymentEnv, EnvSettings};
use crate::constructs::function::{declare_function, FunctionProps};
use crate::error::SynthError;
use crate::stack::Stack;

pub const FUNCTION_LOGICAL_ID: &str = "HelloWorldLambda";
pub const ASSET: &str = "hello_lambda";

pub fn stack_name(env: DeploymentEnv) -> String {
    format!("HelloWorldStack-{env}")
}

/// One greeting function per environment, labelled with that environment's
/// settings.
pub fn hello_world_stack(env: DeploymentEnv, settings: EnvSettings) -> Result<Stack, SynthError> {
    let name = stack_name(env);
    let mut stack =
        Stack::new(name.clone()).with_description(format!("Hello world function ({env})"));

    declare_function(
        &mut stack,
        FUNCTION_LOGICAL_ID,
        FunctionProps::new(format!("hello-world-{env}"), ASSET)
            .with_description(format!("Greets from the {env} environment"))
            .with_env(env_vars::ENVIRONMENT, env.as_str())
            .with_env(env_vars::STACK_NAME, name)
            .with_env(env_vars::ANIMAL, settings.animal),
    )?;

    Ok(stack)
}
