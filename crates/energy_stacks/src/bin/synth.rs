use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use energy_stacks::{
    synthesize_app, write_assembly, App, AppProps, AwsTarget, DeploymentEnv, EmailAddress,
    SynthError,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "synth",
    about = "Synthesize the home energy coach CloudFormation templates"
)]
struct Cli {
    /// Deployable unit to synthesize
    #[arg(long, value_enum)]
    app: App,
    /// Deployment environment (test or prod); defaults to test
    #[arg(long)]
    env: Option<String>,
    /// Address subscribed to the pipeline topics (required for multi-stacks)
    #[arg(long, env = "ADMIN_EMAIL_ADDRESS")]
    admin_email: Option<String>,
    /// Assembly output directory
    #[arg(long, default_value = "cdk.out")]
    out: PathBuf,
}

fn run(cli: Cli) -> Result<(), SynthError> {
    let env = DeploymentEnv::from_context(cli.env.as_deref())?;
    let admin_email = cli
        .admin_email
        .as_deref()
        .map(EmailAddress::parse)
        .transpose()?;

    let stacks = synthesize_app(cli.app, &AppProps { env, admin_email })?;
    let manifest = write_assembly(&cli.out, &stacks, &AwsTarget::from_env())?;

    for (stack_name, artifact) in &manifest.artifacts {
        info!(
            event = "stack_synthesized",
            stack = %stack_name,
            template = %cli.out.join(&artifact.template_file).display(),
            sha256 = %artifact.template_sha256,
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(event = "synth_failed", error = %err);
            ExitCode::FAILURE
        }
    }
}
