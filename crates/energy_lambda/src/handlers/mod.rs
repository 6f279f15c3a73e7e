pub mod calculate;
pub mod greeting;
pub mod transform;
