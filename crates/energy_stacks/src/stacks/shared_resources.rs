use energy_core::item::{
    PARTITION_KEY_ATTRIBUTE, SECONDARY_INDEX_NAME, SORT_KEY_ATTRIBUTE, TTL_ATTRIBUTE,
};

use crate::constructs::table::{
    declare_table, GlobalSecondaryIndex, KeyAttribute, TableProps, TableRef,
};
use crate::error::SynthError;
use crate::stack::Stack;
use crate::stacks::APP_DESCRIPTION;
use crate::template::{Output, RemovalPolicy};

pub const STACK_NAME: &str = "SharedResourcesStack";
pub const TABLE_LOGICAL_ID: &str = "CalculatedEnergyTable";
pub const TABLE_NAME_OUTPUT: &str = "CalculatedEnergyTableName";
pub const TABLE_ARN_OUTPUT: &str = "CalculatedEnergyTableArn";

pub fn export_name(output: &str) -> String {
    format!("{STACK_NAME}:{output}")
}

/// How dependent stacks reach the calculated-energy table.
pub fn calculated_energy_table_ref() -> TableRef {
    TableRef::imported(
        &export_name(TABLE_NAME_OUTPUT),
        &export_name(TABLE_ARN_OUTPUT),
    )
}

pub fn shared_resources_stack() -> Result<Stack, SynthError> {
    let mut stack = Stack::new(STACK_NAME).with_description(APP_DESCRIPTION);

    let mut props = TableProps::new(KeyAttribute::string(PARTITION_KEY_ATTRIBUTE));
    props.sort_key = Some(KeyAttribute::string(SORT_KEY_ATTRIBUTE));
    props.ttl_attribute = Some(TTL_ATTRIBUTE.to_string());
    props.point_in_time_recovery = true;
    props.removal_policy = RemovalPolicy::Destroy;
    props.global_secondary_indexes.push(GlobalSecondaryIndex {
        index_name: SECONDARY_INDEX_NAME.to_string(),
        partition_key: KeyAttribute::string(PARTITION_KEY_ATTRIBUTE),
        sort_key: Some(KeyAttribute::string(SORT_KEY_ATTRIBUTE)),
    });
    let table = declare_table(&mut stack, TABLE_LOGICAL_ID, props)?;

    stack.add_output(
        TABLE_NAME_OUTPUT,
        Output::new(table.name_ref())
            .with_description("Calculated energy table name")
            .exported_as(export_name(TABLE_NAME_OUTPUT)),
    )?;
    stack.add_output(
        TABLE_ARN_OUTPUT,
        Output::new(table.arn())
            .with_description("Calculated energy table ARN")
            .exported_as(export_name(TABLE_ARN_OUTPUT)),
    )?;

    Ok(stack)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn table_is_keyed_like_the_summary_item() {
        let stack = shared_resources_stack().expect("synth");
        let table = stack.resource(TABLE_LOGICAL_ID).expect("table");

        assert_eq!(
            table.properties["KeySchema"],
            json!([
                {"AttributeName": "customerId", "KeyType": "HASH"},
                {"AttributeName": "timestamp", "KeyType": "RANGE"}
            ])
        );
        assert_eq!(
            table.properties["TimeToLiveSpecification"],
            json!({"AttributeName": "ttl", "Enabled": true})
        );
        assert_eq!(
            table.properties["GlobalSecondaryIndexes"][0]["IndexName"],
            "customerId-timestamp-index"
        );
    }

    #[test]
    fn table_is_destroyed_with_the_stack() {
        let stack = shared_resources_stack().expect("synth");

        assert_eq!(stack.description(), Some(APP_DESCRIPTION));
        assert_eq!(
            stack.resource(TABLE_LOGICAL_ID).expect("table").deletion_policy,
            Some(RemovalPolicy::Destroy)
        );
    }

    #[test]
    fn table_name_is_exported_for_other_stacks() {
        let stack = shared_resources_stack().expect("synth");
        let output = &stack.outputs()[TABLE_NAME_OUTPUT];

        assert_eq!(output.value, json!({"Ref": "CalculatedEnergyTable"}));
        assert_eq!(
            output.export.as_ref().map(|export| export.name.as_str()),
            Some("SharedResourcesStack:CalculatedEnergyTableName")
        );
        assert_eq!(
            calculated_energy_table_ref().name,
            json!({"Fn::ImportValue": "SharedResourcesStack:CalculatedEnergyTableName"})
        );
    }
}
