use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::constructs::function::FunctionHandle;
use crate::constructs::iam::{grant, PolicyStatement};
use crate::error::SynthError;
use crate::intrinsics::{get_att, import_value, join, reference};
use crate::stack::Stack;
use crate::template::{RemovalPolicy, Resource};

const WRITE_DATA_ACTIONS: &[&str] = &[
    "dynamodb:BatchWriteItem",
    "dynamodb:PutItem",
    "dynamodb:UpdateItem",
    "dynamodb:DeleteItem",
    "dynamodb:DescribeTable",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

impl AttributeType {
    fn as_str(self) -> &'static str {
        match self {
            Self::String => "S",
            Self::Number => "N",
            Self::Binary => "B",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::String,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
    Provisioned { read_capacity: u32, write_capacity: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalSecondaryIndex {
    pub index_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableProps {
    pub table_name: Option<String>,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub billing_mode: BillingMode,
    pub ttl_attribute: Option<String>,
    pub point_in_time_recovery: bool,
    pub removal_policy: RemovalPolicy,
    pub global_secondary_indexes: Vec<GlobalSecondaryIndex>,
}

impl TableProps {
    pub fn new(partition_key: KeyAttribute) -> Self {
        Self {
            table_name: None,
            partition_key,
            sort_key: None,
            billing_mode: BillingMode::PayPerRequest,
            ttl_attribute: None,
            point_in_time_recovery: false,
            removal_policy: RemovalPolicy::Retain,
            global_secondary_indexes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    pub logical_id: String,
}

impl TableHandle {
    pub fn name_ref(&self) -> Value {
        reference(&self.logical_id)
    }

    pub fn arn(&self) -> Value {
        get_att(&self.logical_id, "Arn")
    }
}

/// A table owned by another stack, reached through its exports.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub name: Value,
    pub arn: Value,
}

impl TableRef {
    pub fn imported(name_export: &str, arn_export: &str) -> Self {
        Self {
            name: import_value(name_export),
            arn: import_value(arn_export),
        }
    }

    pub fn grant_write_data(
        &self,
        stack: &mut Stack,
        grantee: &FunctionHandle,
    ) -> Result<(), SynthError> {
        grant(
            stack,
            grantee,
            PolicyStatement::allow(
                WRITE_DATA_ACTIONS,
                vec![self.arn.clone(), join("", [self.arn.clone(), json!("/index/*")])],
            ),
        )
    }
}

fn key_schema(partition_key: &KeyAttribute, sort_key: Option<&KeyAttribute>) -> Value {
    let mut schema = vec![json!({"AttributeName": partition_key.name, "KeyType": "HASH"})];
    if let Some(sort_key) = sort_key {
        schema.push(json!({"AttributeName": sort_key.name, "KeyType": "RANGE"}));
    }
    Value::Array(schema)
}

pub fn declare_table(
    stack: &mut Stack,
    logical_id: &str,
    props: TableProps,
) -> Result<TableHandle, SynthError> {
    // Every key attribute is defined once, whether it keys the table or an index.
    let mut attributes = BTreeMap::new();
    let index_keys = props
        .global_secondary_indexes
        .iter()
        .flat_map(|index| std::iter::once(&index.partition_key).chain(index.sort_key.as_ref()));
    for key in std::iter::once(&props.partition_key)
        .chain(props.sort_key.as_ref())
        .chain(index_keys)
    {
        attributes.insert(key.name.clone(), key.attribute_type.as_str());
    }
    let attribute_definitions: Vec<Value> = attributes
        .iter()
        .map(|(name, kind)| json!({"AttributeName": name, "AttributeType": kind}))
        .collect();

    let mut properties = json!({
        "AttributeDefinitions": attribute_definitions,
        "KeySchema": key_schema(&props.partition_key, props.sort_key.as_ref()),
    });
    if let Some(table_name) = &props.table_name {
        properties["TableName"] = json!(table_name);
    }
    match props.billing_mode {
        BillingMode::PayPerRequest => properties["BillingMode"] = json!("PAY_PER_REQUEST"),
        BillingMode::Provisioned {
            read_capacity,
            write_capacity,
        } => {
            properties["ProvisionedThroughput"] = json!({
                "ReadCapacityUnits": read_capacity,
                "WriteCapacityUnits": write_capacity,
            });
        }
    }
    if let Some(ttl_attribute) = &props.ttl_attribute {
        properties["TimeToLiveSpecification"] =
            json!({"AttributeName": ttl_attribute, "Enabled": true});
    }
    if props.point_in_time_recovery {
        properties["PointInTimeRecoverySpecification"] =
            json!({"PointInTimeRecoveryEnabled": true});
    }
    if !props.global_secondary_indexes.is_empty() {
        let indexes: Vec<Value> = props
            .global_secondary_indexes
            .iter()
            .map(|index| {
                json!({
                    "IndexName": index.index_name,
                    "KeySchema": key_schema(&index.partition_key, index.sort_key.as_ref()),
                    "Projection": {"ProjectionType": "ALL"},
                })
            })
            .collect();
        properties["GlobalSecondaryIndexes"] = Value::Array(indexes);
    }

    stack.add_resource(
        logical_id,
        Resource::new("AWS::DynamoDB::Table", properties).with_removal_policy(props.removal_policy),
    )?;
    Ok(TableHandle {
        logical_id: logical_id.to_string(),
    })
}
