use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{PayrollStore, StoreError};

/// Backend selection for opening a tenant store.
///
/// `backend` picks a registered [`StoreFactory`] by name; `data_dir` is
/// handed to that factory untouched. For the JSON backend it is the
/// directory holding the tenant's collection files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: String,
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "json".to_string(),
            data_dir: "./data".to_string(),
        }
    }
}

/// Implemented once per storage backend. Backend crates export a unit
/// struct implementing this trait; the application registers it at
/// startup.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Lowercase identifier the backend is registered under.
    fn backend_name(&self) -> &'static str;

    /// Open (or create) the tenant data and return a ready store.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn PayrollStore>, StoreError>;
}

/// Maps backend names to their factories.
///
/// Registered once at startup, consulted whenever a store is opened.
/// Registering a second factory under an existing name replaces the
/// first.
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register(&mut self, factory: Box<dyn StoreFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Sorted names of every registered backend, for error messages and
    /// `--help` text.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens a store through the factory matching `config.backend`.
    ///
    /// # Errors
    ///
    /// * [`StoreError::Configuration`] — no factory registered under the
    ///   requested name.
    /// * Whatever the matching factory returns.
    pub async fn create(&self, config: &StoreConfig) -> Result<Box<dyn PayrollStore>, StoreError> {
        let factory = self.factories.get(config.backend.as_str()).ok_or_else(|| {
            StoreError::Configuration(format!(
                "unknown backend '{}'; available: {:?}",
                config.backend,
                self.available_backends()
            ))
        })?;

        factory.create(config).await
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use crate::models::{AttendanceRecord, Employee, PayrollRecord, RatesConfig};

    use super::*;

    /// Store whose methods all panic. The registry tests never touch the
    /// data methods; they only care which factory produced the box.
    struct StubStore;

    #[async_trait]
    impl PayrollStore for StubStore {
        async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
            unimplemented!()
        }
        async fn get_employee(&self, _id: &str) -> Result<Employee, StoreError> {
            unimplemented!()
        }
        async fn upsert_employee(&self, _employee: Employee) -> Result<(), StoreError> {
            unimplemented!()
        }
        async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
            unimplemented!()
        }
        async fn load_rates(&self) -> Result<RatesConfig, StoreError> {
            unimplemented!()
        }
        async fn save_rates(&self, _config: &RatesConfig) -> Result<(), StoreError> {
            unimplemented!()
        }
        async fn list_payrolls(&self) -> Result<Vec<PayrollRecord>, StoreError> {
            unimplemented!()
        }
        async fn find_payroll(
            &self,
            _employee_id: &str,
            _period: &str,
        ) -> Result<Option<PayrollRecord>, StoreError> {
            unimplemented!()
        }
        async fn insert_payroll(&self, _record: PayrollRecord) -> Result<(), StoreError> {
            unimplemented!()
        }
    }

    /// Factory that records whether `create` ran, so dispatch can be
    /// observed from the outside.
    struct TracingFactory {
        name: &'static str,
        created: Arc<AtomicBool>,
    }

    impl TracingFactory {
        fn boxed(name: &'static str) -> (Box<dyn StoreFactory>, Arc<AtomicBool>) {
            let created = Arc::new(AtomicBool::new(false));
            (
                Box::new(Self {
                    name,
                    created: created.clone(),
                }),
                created,
            )
        }
    }

    #[async_trait]
    impl StoreFactory for TracingFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn PayrollStore>, StoreError> {
            self.created.store(true, Ordering::SeqCst);
            Ok(Box::new(StubStore))
        }
    }

    struct BrokenFactory;

    #[async_trait]
    impl StoreFactory for BrokenFactory {
        fn backend_name(&self) -> &'static str {
            "broken"
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn PayrollStore>, StoreError> {
            Err(StoreError::Io("disk on fire".to_string()))
        }
    }

    // =========================================================================
    // registration
    // =========================================================================

    #[test]
    fn default_config_targets_json_in_data() {
        let config = StoreConfig::default();

        assert_eq!(config.backend, "json");
        assert_eq!(config.data_dir, "./data");
    }

    #[test]
    fn empty_registry_lists_no_backends() {
        assert!(StoreRegistry::new().available_backends().is_empty());
        assert!(StoreRegistry::default().available_backends().is_empty());
    }

    #[test]
    fn available_backends_are_sorted_and_deduplicated() {
        let mut registry = StoreRegistry::new();
        let (sqlite, _) = TracingFactory::boxed("sqlite");
        let (json_old, _) = TracingFactory::boxed("json");
        let (json_new, _) = TracingFactory::boxed("json");
        registry.register(sqlite);
        registry.register(json_old);
        registry.register(json_new);

        assert_eq!(registry.available_backends(), vec!["json", "sqlite"]);
    }

    // =========================================================================
    // dispatch
    // =========================================================================

    #[tokio::test]
    async fn create_dispatches_to_the_matching_factory_only() {
        let mut registry = StoreRegistry::new();
        let (json, json_created) = TracingFactory::boxed("json");
        let (sqlite, sqlite_created) = TracingFactory::boxed("sqlite");
        registry.register(json);
        registry.register(sqlite);

        registry.create(&StoreConfig::default()).await.unwrap();

        assert!(json_created.load(Ordering::SeqCst));
        assert!(!sqlite_created.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_error_names_the_alternatives() {
        let mut registry = StoreRegistry::new();
        let (json, _) = TracingFactory::boxed("json");
        registry.register(json);
        let config = StoreConfig {
            backend: "sqlite".to_string(),
            data_dir: "x".to_string(),
        };

        match registry.create(&config).await {
            Err(StoreError::Configuration(message)) => {
                assert!(message.contains("sqlite"));
                assert!(message.contains("json"));
            }
            other => panic!("expected Configuration error, got {:#?}", other.err()),
        }
    }

    #[tokio::test]
    async fn factory_errors_pass_through_the_registry() {
        let mut registry = StoreRegistry::new();
        registry.register(Box::new(BrokenFactory));
        let config = StoreConfig {
            backend: "broken".to_string(),
            data_dir: "x".to_string(),
        };

        match registry.create(&config).await {
            Err(err) => assert_eq!(err, StoreError::Io("disk on fire".to_string())),
            Ok(_) => panic!("expected the factory error to surface"),
        }
    }
}
