pub mod calculations;
pub mod generator;
pub mod models;
pub mod store;

pub use generator::{GenerateError, GenerateOutcome, PayrollGenerator};
pub use models::*;
pub use store::{PayrollStore, StoreConfig, StoreError, StoreFactory, StoreRegistry};
