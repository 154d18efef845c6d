use async_trait::async_trait;

use nomina_core::store::{PayrollStore, StoreConfig, StoreError, StoreFactory};

use crate::store::JsonStore;

/// Registers the flat-file JSON backend under the name `json`.
pub struct JsonStoreFactory;

#[async_trait]
impl StoreFactory for JsonStoreFactory {
    fn backend_name(&self) -> &'static str {
        "json"
    }

    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn PayrollStore>, StoreError> {
        Ok(Box::new(JsonStore::new(&config.data_dir)))
    }
}
