//! Module registry mapping module ids to live instances.
//!
//! The registry is constructed once at application start, seeded with the
//! built-in module factories, and shared by reference with the orchestrator.
//! It constructs one [`ModuleInstance`] per registered factory and keeps it
//! for the lifetime of the process; lookups never construct on demand.

use crate::client::DataSource;
use crate::modules::{ExampleModule, JobsModule, Module, ModuleFactory, ModuleInstance};
use std::sync::{Arc, Mutex};

/// Registry of module instances, keyed by `descriptor.id`.
///
/// Registering the same id twice replaces the prior instance (last writer
/// wins); the prior instance is unmounted first so its poll task can never
/// outlive its registration.
pub struct ModuleRegistry {
    source: Arc<dyn DataSource>,
    entries: Mutex<Vec<(String, ModuleInstance)>>,
}

impl ModuleRegistry {
    /// Creates an empty registry whose instances fetch through `source`.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Creates a registry pre-populated with the built-in modules.
    pub fn with_defaults(source: Arc<dyn DataSource>) -> Self {
        let registry = Self::new(source);
        registry.register(|| Box::new(ExampleModule::new()));
        registry.register(|| Box::new(JobsModule::new()));
        registry
    }

    /// Constructs one instance from `factory` and stores it under its
    /// descriptor id.
    ///
    /// If an instance is already registered under that id it is unmounted
    /// and replaced; the replacement is logged.
    pub fn register(&self, factory: ModuleFactory) -> ModuleInstance {
        let module: Box<dyn Module> = factory();
        let instance = ModuleInstance::new(module, Arc::clone(&self.source));
        let id = instance.descriptor().id.clone();

        let mut entries = self.entries.lock().expect("registry lock poisoned");
        if let Some(slot) = entries.iter_mut().find(|(entry_id, _)| *entry_id == id) {
            tracing::warn!(module = %id, "replacing registered module instance");
            slot.1.unmount();
            slot.1 = instance.clone();
        } else {
            entries.push((id, instance.clone()));
        }
        instance
    }

    /// Returns the instance registered under `id`, if any.
    pub fn lookup(&self, id: &str) -> Option<ModuleInstance> {
        self.entries
            .lock()
            .expect("registry lock poisoned")
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, instance)| instance.clone())
    }

    /// All registered instances, in registration order.
    pub fn all(&self) -> Vec<ModuleInstance> {
        self.entries
            .lock()
            .expect("registry lock poisoned")
            .iter()
            .map(|(_, instance)| instance.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::StubSource;
    use crate::modules::surface::Surface;
    use crate::{ModuleDescriptor, ModuleSize};
    use serde_json::json;

    struct FixedModule {
        id: &'static str,
    }

    impl Module for FixedModule {
        fn descriptor(&self) -> ModuleDescriptor {
            ModuleDescriptor {
                id: self.id.to_string(),
                name: self.id.to_string(),
                icon: "f".to_string(),
                color: "#000000".to_string(),
                endpoint: "/api/fixed".to_string(),
                description: "fixed".to_string(),
                size: ModuleSize::Medium,
                refresh_interval_ms: 1000,
            }
        }
    }

    fn alpha_factory() -> Box<dyn Module> {
        Box::new(FixedModule { id: "alpha" })
    }

    fn beta_factory() -> Box<dyn Module> {
        Box::new(FixedModule { id: "beta" })
    }

    fn registry() -> ModuleRegistry {
        ModuleRegistry::new(Arc::new(
            StubSource::new().route("/api/fixed", json!({"ok": true})),
        ))
    }

    #[test]
    fn test_lookup_returns_the_same_instance_across_calls() {
        let reg = registry();
        reg.register(alpha_factory);

        let a = reg.lookup("alpha").expect("registered instance");
        let b = reg.lookup("alpha").expect("registered instance");
        assert!(a.same_instance(&b), "lookup identity must be stable");
    }

    #[test]
    fn test_lookup_unknown_id_is_none_and_never_constructs() {
        let reg = registry();
        assert!(reg.lookup("missing").is_none());
        assert!(reg.all().is_empty());
    }

    #[test]
    fn test_all_preserves_registration_order() {
        let reg = registry();
        reg.register(beta_factory);
        reg.register(alpha_factory);

        let ids: Vec<String> = reg
            .all()
            .iter()
            .map(|i| i.descriptor().id.clone())
            .collect();
        assert_eq!(ids, vec!["beta".to_string(), "alpha".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reregistration_unmounts_the_replaced_instance() {
        let reg = registry();
        let old = reg.register(alpha_factory);
        old.mount(Surface::shared()).await;
        assert!(old.is_polling());

        let new = reg.register(alpha_factory);

        assert!(!old.is_polling(), "replaced instance must lose its timer");
        assert!(!old.is_mounted());
        assert!(!new.same_instance(&old));
        let current = reg.lookup("alpha").expect("replacement registered");
        assert!(current.same_instance(&new));
        assert_eq!(reg.all().len(), 1);
    }

    #[test]
    fn test_with_defaults_registers_builtin_modules() {
        let reg = ModuleRegistry::with_defaults(Arc::new(StubSource::new()));
        assert!(reg.lookup("example").is_some());
        assert!(reg.lookup("job-scheduler").is_some());
    }
}
