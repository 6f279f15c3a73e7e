pub mod aws;
pub mod notifier;
pub mod object_store;
pub mod summary_store;
