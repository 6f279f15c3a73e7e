use std::fs;

use energy_core::item::{PARTITION_KEY_ATTRIBUTE, SORT_KEY_ATTRIBUTE};
use energy_stacks::assembly::{fingerprint, MANIFEST_FILE};
use energy_stacks::{
    render_template, synthesize_app, write_assembly, App, AppProps, AwsTarget, DeploymentEnv,
    EmailAddress, SynthError,
};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn multi_stack_props() -> AppProps {
    AppProps {
        env: DeploymentEnv::Test,
        admin_email: Some(EmailAddress::parse("admin@example.com").expect("email")),
    }
}

fn target() -> AwsTarget {
    AwsTarget::new(Some("123456789012".to_string()), Some("eu-central-1".to_string()))
}

#[test]
fn each_environment_gets_exactly_one_labelled_function() {
    for (value, animal) in [("test", "cat"), ("prod", "dog")] {
        let env = DeploymentEnv::from_context(Some(value)).expect("valid env");
        let stacks = synthesize_app(
            App::HelloLambda,
            &AppProps {
                env,
                admin_email: None,
            },
        )
        .expect("synth");

        assert_eq!(stacks.len(), 1);
        let functions: Vec<_> = stacks[0]
            .resources_of_type("AWS::Lambda::Function")
            .collect();
        assert_eq!(functions.len(), 1);
        let variables = &functions[0].1.properties["Environment"]["Variables"];
        assert_eq!(variables["ENVIRONMENT"], value);
        assert_eq!(variables["ANIMAL"], animal);
        assert_eq!(
            functions[0].1.properties["FunctionName"],
            format!("hello-world-{value}")
        );
    }
}

#[test]
fn invalid_environment_fails_before_synthesis() {
    let error = DeploymentEnv::from_context(Some("dev")).expect_err("dev is not allowed");

    assert!(matches!(error, SynthError::InvalidEnvironment(_)));
    assert!(error.to_string().contains("['test', 'prod']"));
}

#[test]
fn table_keys_match_the_persisted_summary_item() {
    let stacks = synthesize_app(App::MultiStacks, &multi_stack_props()).expect("synth");
    let template: Value =
        serde_json::from_str(&render_template(&stacks[0]).expect("render")).expect("json");

    let key_schema = &template["Resources"]["CalculatedEnergyTable"]["Properties"]["KeySchema"];
    assert_eq!(key_schema[0]["AttributeName"], PARTITION_KEY_ATTRIBUTE);
    assert_eq!(key_schema[1]["AttributeName"], SORT_KEY_ATTRIBUTE);
}

#[test]
fn invalid_admin_email_is_rejected() {
    assert!(matches!(
        EmailAddress::parse("not-an-address"),
        Err(SynthError::InvalidEmail { .. })
    ));
}

#[test]
fn assembly_is_byte_identical_across_runs() {
    let first = tempfile::tempdir().expect("tempdir");
    let second = tempfile::tempdir().expect("tempdir");

    for dir in [&first, &second] {
        let stacks = synthesize_app(App::MultiStacks, &multi_stack_props()).expect("synth");
        write_assembly(dir.path(), &stacks, &target()).expect("write assembly");
    }

    for file in [
        MANIFEST_FILE,
        "SharedResourcesStack.template.json",
        "DataPipelineStack.template.json",
    ] {
        let a = fs::read(first.path().join(file)).expect("first output");
        let b = fs::read(second.path().join(file)).expect("second output");
        assert_eq!(a, b, "{file} differs between runs");
    }
}

#[test]
fn manifest_fingerprints_the_written_templates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stacks = synthesize_app(App::MultiStacks, &multi_stack_props()).expect("synth");

    let manifest = write_assembly(dir.path(), &stacks, &target()).expect("write assembly");

    let artifact = &manifest.artifacts["DataPipelineStack"];
    assert_eq!(artifact.environment, "aws://123456789012/eu-central-1");
    assert_eq!(artifact.artifact_type, "aws:cloudformation:stack");
    let written = fs::read(dir.path().join(&artifact.template_file)).expect("template");
    assert_eq!(artifact.template_sha256, fingerprint(&written));

    let on_disk: Value = serde_json::from_slice(
        &fs::read(dir.path().join(MANIFEST_FILE)).expect("manifest"),
    )
    .expect("manifest json");
    assert_eq!(
        on_disk["artifacts"]["SharedResourcesStack"]["templateFile"],
        "SharedResourcesStack.template.json"
    );
}

#[test]
fn pipeline_template_imports_the_shared_table() {
    let stacks = synthesize_app(App::MultiStacks, &multi_stack_props()).expect("synth");
    let shared: Value =
        serde_json::from_str(&render_template(&stacks[0]).expect("render")).expect("json");
    let pipeline: Value =
        serde_json::from_str(&render_template(&stacks[1]).expect("render")).expect("json");

    let export = &shared["Outputs"]["CalculatedEnergyTableName"]["Export"]["Name"];
    let imported = &pipeline["Resources"]["CalculateAndNotifyFunction"]["Properties"]
        ["Environment"]["Variables"]["CALCULATED_ENERGY_TABLE_NAME"]["Fn::ImportValue"];
    assert_eq!(export, imported);
}
