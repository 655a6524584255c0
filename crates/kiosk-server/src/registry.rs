//! Explicit component registration.
//!
//! The host runtime discovers lifecycle-managed components through a
//! registry. Rather than relying on import-time side effects, the
//! registry is an ordinary value constructed during bootstrap and
//! passed by reference to whatever needs it.

use std::collections::BTreeMap;
use std::fmt;

use parking_lot::RwLock;
use serde::Serialize;

use crate::error::RegistryError;

/// Identity of a registrable component: `namespace:family:model`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    /// Organization or vendor namespace.
    pub namespace: String,
    /// Component family within the namespace.
    pub family: String,
    /// Concrete model name.
    pub model: String,
}

impl ComponentDescriptor {
    /// Build a descriptor from its triplet parts.
    pub fn new(
        namespace: impl Into<String>,
        family: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            family: family.into(),
            model: model.into(),
        }
    }
}

impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.family, self.model)
    }
}

/// Registry of components advertised to the host runtime.
///
/// Concurrent readers are expected once the host is running; writes
/// happen only during bootstrap.
#[derive(Default)]
pub struct ComponentRegistry {
    entries: RwLock<BTreeMap<String, ComponentDescriptor>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advertise a component.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Duplicate`] when the same identity triplet was
    /// already registered.
    pub fn register(&self, descriptor: ComponentDescriptor) -> Result<(), RegistryError> {
        let key = descriptor.to_string();
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return Err(RegistryError::Duplicate(key));
        }
        entries.insert(key, descriptor);
        Ok(())
    }

    /// Look up a descriptor by its triplet string.
    pub fn get(&self, triplet: &str) -> Option<ComponentDescriptor> {
        self.entries.read().get(triplet).cloned()
    }

    /// Whether the triplet is registered.
    pub fn contains(&self, triplet: &str) -> bool {
        self.entries.read().contains_key(triplet)
    }

    /// All registered descriptors, in triplet order.
    pub fn descriptors(&self) -> Vec<ComponentDescriptor> {
        self.entries.read().values().cloned().collect()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new("mattmacf98", "web-app", "sanding-history")
    }

    #[test]
    fn display_is_colon_joined_triplet() {
        assert_eq!(descriptor().to_string(), "mattmacf98:web-app:sanding-history");
    }

    #[test]
    fn register_and_look_up() {
        let registry = ComponentRegistry::new();
        assert!(registry.is_empty());

        registry.register(descriptor()).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("mattmacf98:web-app:sanding-history"));
        assert_eq!(
            registry.get("mattmacf98:web-app:sanding-history"),
            Some(descriptor())
        );
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let registry = ComponentRegistry::new();
        registry.register(descriptor()).unwrap();

        let err = registry.register(descriptor()).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(triplet)
            if triplet == "mattmacf98:web-app:sanding-history"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn descriptor_serializes_for_host_reporting() {
        let json = serde_json::to_value(descriptor()).unwrap();
        assert_eq!(json["namespace"], "mattmacf98");
        assert_eq!(json["family"], "web-app");
        assert_eq!(json["model"], "sanding-history");
    }
}
