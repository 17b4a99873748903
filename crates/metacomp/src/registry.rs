// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::composite::{CompositeTypeDescriptor, DescriptorOptions};
use crate::config::{ConfigError, RegistryConfig};
use crate::error::ConfigurationError;
use crate::model::RecordType;

// ---------------------------------------------------------------------------
// TypeCatalog
// ---------------------------------------------------------------------------

/// Caller-supplied lookup of record types by fully qualified name.
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
    types: HashMap<String, Arc<RecordType>>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type under its own name, replacing any previous entry.
    pub fn register(&mut self, record_type: Arc<RecordType>) -> Option<Arc<RecordType>> {
        self.types
            .insert(record_type.name().to_string(), record_type)
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&Arc<RecordType>> {
        self.types.get(name)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<Arc<RecordType>> for TypeCatalog {
    fn from_iter<I: IntoIterator<Item = Arc<RecordType>>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for ty in iter {
            catalog.register(ty);
        }
        catalog
    }
}

// ---------------------------------------------------------------------------
// CompositeTypeRegistry
// ---------------------------------------------------------------------------

/// Fixed set of known composite types.
///
/// The set cannot change after construction; build a new registry to
/// describe a different universe of types. Accessors hand out copies, so
/// callers may mutate what they receive.
#[derive(Debug, Clone, Default)]
pub struct CompositeTypeRegistry {
    types: HashSet<Arc<RecordType>>,
}

impl CompositeTypeRegistry {
    /// Create a registry holding its own copy of `types`.
    pub fn new<I>(types: I) -> Self
    where
        I: IntoIterator<Item = Arc<RecordType>>,
    {
        let types: HashSet<_> = types.into_iter().collect();
        log::debug!("composite type registry with {} types", types.len());
        CompositeTypeRegistry { types }
    }

    /// Select the composites named in `config` from `catalog`.
    pub fn from_config(config: &RegistryConfig, catalog: &TypeCatalog) -> Result<Self, ConfigError> {
        let types = config
            .composites
            .iter()
            .map(|name| {
                catalog
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownType(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(types))
    }

    /// Fresh copy of the registered types.
    pub fn composite_types(&self) -> HashSet<Arc<RecordType>> {
        self.types.clone()
    }

    pub fn contains(&self, record_type: &RecordType) -> bool {
        self.types.contains(record_type)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Build a descriptor for every registered type, stopping at the first
    /// invalid declaration.
    pub fn build_descriptors(
        &self,
        options: &DescriptorOptions,
    ) -> Result<Vec<CompositeTypeDescriptor>, ConfigurationError> {
        self.types
            .iter()
            .map(|ty| CompositeTypeDescriptor::with_options(ty, options))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, RecordTypeBuilder};

    fn composite(name: &str) -> Arc<RecordType> {
        let leaf = RecordTypeBuilder::new(format!("{}Leaf", name))
            .runtime()
            .target([ElementKind::Type])
            .build();
        RecordTypeBuilder::new(name)
            .runtime()
            .target([ElementKind::Type])
            .leaf_member("leaf", leaf)
            .build()
    }

    #[test]
    fn returns_defensive_copy() {
        let a = composite("A");
        let registry = CompositeTypeRegistry::new([a.clone()]);

        let mut copy = registry.composite_types();
        copy.insert(composite("B"));
        copy.remove(&a);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&a));
        assert_eq!(registry.composite_types(), HashSet::from([a]));
    }

    #[test]
    fn input_is_copied() {
        let mut input = vec![composite("A")];
        let registry = CompositeTypeRegistry::new(input.clone());
        input.push(composite("B"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicates_collapse() {
        let registry = CompositeTypeRegistry::new([composite("A"), composite("A")]);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn from_config_selects_by_name() {
        let catalog: TypeCatalog = [composite("A"), composite("B")].into_iter().collect();
        let config = RegistryConfig {
            composites: vec!["B".to_string()],
        };

        let registry = CompositeTypeRegistry::from_config(&config, &catalog).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&composite("B")));
    }

    #[test]
    fn from_config_unknown_type() {
        let catalog = TypeCatalog::new();
        let config = RegistryConfig {
            composites: vec!["Missing".to_string()],
        };

        let err = CompositeTypeRegistry::from_config(&config, &catalog).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownType(ref name) if name == "Missing"));
    }

    #[test]
    fn build_descriptors_fails_fast() {
        let good = CompositeTypeRegistry::new([composite("A"), composite("B")]);
        let descriptors = good.build_descriptors(&DescriptorOptions::default()).unwrap();
        assert_eq!(descriptors.len(), 2);

        let broken = RecordTypeBuilder::new("Broken").build();
        let bad = CompositeTypeRegistry::new([composite("A"), broken]);
        let err = bad.build_descriptors(&DescriptorOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingRuntimeRetention { ref composite, .. } if composite == "Broken"
        ));
    }

    #[test]
    fn catalog_register_replaces() {
        let mut catalog = TypeCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.register(composite("A")).is_none());
        assert!(catalog.register(composite("A")).is_some());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("A").is_some());
        assert!(catalog.get("Z").is_none());
    }
}
