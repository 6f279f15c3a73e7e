//! Environment variable names shared by the function declarations and the
//! handlers that read them.

pub const ENVIRONMENT: &str = "ENVIRONMENT";
pub const STACK_NAME: &str = "STACK_NAME";
pub const ANIMAL: &str = "ANIMAL";
pub const TRANSFORMED_BUCKET: &str = "TRANSFORMED_BUCKET";
pub const SUMMARY_TOPIC: &str = "SNS_TOPIC_CALCULATOR_SUMMARY";
pub const TABLE_NAME: &str = "CALCULATED_ENERGY_TABLE_NAME";
