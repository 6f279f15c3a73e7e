//! Typed resource declarations rendered into a [`Stack`](crate::Stack).

pub mod bucket;
pub mod function;
pub mod iam;
pub mod table;
pub mod topic;

pub use bucket::{BucketHandle, BucketProps, NotificationTarget};
pub use function::{FunctionHandle, FunctionProps};
pub use iam::PolicyStatement;
pub use table::{AttributeType, BillingMode, KeyAttribute, TableHandle, TableProps, TableRef};
pub use topic::{TopicHandle, TopicProps};
