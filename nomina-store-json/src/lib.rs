//! Flat-file JSON backend for the tenant payroll store.
//!
//! Each collection lives in one JSON file inside the tenant's data
//! directory, read and rewritten wholesale on every mutation. There is no
//! locking: concurrent writers are last-writer-wins, which matches how the
//! surrounding application treats these files.

mod factory;
mod store;

pub use factory::JsonStoreFactory;
pub use store::JsonStore;
