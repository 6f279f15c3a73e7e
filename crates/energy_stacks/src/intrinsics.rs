use serde_json::{json, Value};

pub const ACCOUNT_ID: &str = "AWS::AccountId";
pub const PARTITION: &str = "AWS::Partition";
pub const REGION: &str = "AWS::Region";

pub fn reference(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, attribute] })
}

pub fn import_value(export_name: &str) -> Value {
    json!({ "Fn::ImportValue": export_name })
}

pub fn join(separator: &str, parts: impl IntoIterator<Item = Value>) -> Value {
    json!({ "Fn::Join": [separator, parts.into_iter().collect::<Vec<_>>()] })
}

pub fn sub(template: &str) -> Value {
    json!({ "Fn::Sub": template })
}

/// `arn:<partition>:<service>:::<resource>` for global resources such as buckets.
pub fn global_arn(service: &str, resource: &str) -> Value {
    sub(&format!("arn:${{{PARTITION}}}:{service}:::{resource}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsics_render_cloudformation_shapes() {
        assert_eq!(reference("Topic"), json!({"Ref": "Topic"}));
        assert_eq!(
            get_att("Table", "Arn"),
            json!({"Fn::GetAtt": ["Table", "Arn"]})
        );
        assert_eq!(
            join("", [get_att("Bucket", "Arn"), json!("/*")]),
            json!({"Fn::Join": ["", [{"Fn::GetAtt": ["Bucket", "Arn"]}, "/*"]]})
        );
        assert_eq!(
            import_value("Shared:TableName"),
            json!({"Fn::ImportValue": "Shared:TableName"})
        );
    }

    #[test]
    fn global_arn_substitutes_partition() {
        assert_eq!(
            global_arn("s3", "raw-bucket"),
            json!({"Fn::Sub": "arn:${AWS::Partition}:s3:::raw-bucket"})
        );
    }
}
