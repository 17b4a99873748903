// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Composite type descriptors.
//!
//! A [`CompositeTypeDescriptor`] is built once per composite type. Building
//! validates the whole declaration and either yields a complete descriptor
//! or the first violation found; nothing partial is ever returned. A built
//! descriptor is immutable and may be shared freely between threads.

use crate::error::{ConfigurationError, LookupError};
use crate::leaf::{DispatchAccessor, InstanceAccessor, LeafDescriptor, LeafValueFactory};
use crate::model::{RecordType, TargetSet};
use crate::record::{RecordInstance, RecordView};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Options applied while building descriptors.
#[derive(Clone)]
pub struct DescriptorOptions {
    /// Accessor used by member-value leaves.
    pub accessor: Arc<dyn InstanceAccessor>,
    /// Reject factory results whose record type differs from the leaf type.
    pub verify_factory_results: bool,
}

impl DescriptorOptions {
    /// Replace the instance accessor.
    pub fn with_accessor(mut self, accessor: Arc<dyn InstanceAccessor>) -> Self {
        self.accessor = accessor;
        self
    }

    /// Enable or disable result verification.
    pub fn verify_factory_results(mut self, verify: bool) -> Self {
        self.verify_factory_results = verify;
        self
    }
}

impl Default for DescriptorOptions {
    fn default() -> Self {
        Self {
            accessor: Arc::new(DispatchAccessor),
            verify_factory_results: true,
        }
    }
}

impl fmt::Debug for DescriptorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorOptions")
            .field("verify_factory_results", &self.verify_factory_results)
            .finish_non_exhaustive()
    }
}

/// Validated description of a composite record type and its leaves.
#[derive(Debug)]
pub struct CompositeTypeDescriptor {
    composite_type: Arc<RecordType>,
    target: TargetSet,
    leaves: HashMap<Arc<RecordType>, LeafValueFactory>,
    verify_factory_results: bool,
}

impl CompositeTypeDescriptor {
    /// Build with default options.
    pub fn new(composite_type: &Arc<RecordType>) -> Result<Self, ConfigurationError> {
        Self::with_options(composite_type, &DescriptorOptions::default())
    }

    /// Build, validating every rule of the declaration.
    pub fn with_options(
        composite_type: &Arc<RecordType>,
        options: &DescriptorOptions,
    ) -> Result<Self, ConfigurationError> {
        let result = Self::build(composite_type, options);
        if let Err(err) = &result {
            log::warn!("rejected composite type {}: {}", composite_type.name(), err);
        }
        result
    }

    fn build(
        composite_type: &Arc<RecordType>,
        options: &DescriptorOptions,
    ) -> Result<Self, ConfigurationError> {
        let retention = composite_type.retention();
        if !retention.is_runtime_visible() {
            return Err(ConfigurationError::MissingRuntimeRetention {
                composite: composite_type.name().to_string(),
                retention,
            });
        }

        let target = composite_type.target();
        let mut leaves = HashMap::new();
        let mut declared_by: HashMap<Arc<RecordType>, &str> = HashMap::new();

        for member in composite_type.leaf_members() {
            let leaf = LeafDescriptor::new(composite_type, member, &options.accessor)?;

            if leaf.target() != &target {
                return Err(ConfigurationError::InconsistentTarget {
                    composite: composite_type.name().to_string(),
                    leaf: leaf.leaf_type().name().to_string(),
                    leaf_target: leaf.target().clone(),
                    composite_target: target,
                });
            }

            if let Some(first) = declared_by.get(leaf.leaf_type()) {
                return Err(ConfigurationError::DuplicateLeafType {
                    composite: composite_type.name().to_string(),
                    leaf: leaf.leaf_type().name().to_string(),
                    first: (*first).to_string(),
                    second: member.name.clone(),
                });
            }

            let (leaf_type, _, factory) = leaf.into_parts();
            declared_by.insert(leaf_type.clone(), member.name.as_str());
            leaves.insert(leaf_type, factory);
        }

        log::debug!(
            "composite type {}: {} leaves, target {}",
            composite_type.name(),
            leaves.len(),
            target
        );

        Ok(Self {
            composite_type: composite_type.clone(),
            target,
            leaves,
            verify_factory_results: options.verify_factory_results,
        })
    }

    pub fn composite_type(&self) -> &Arc<RecordType> {
        &self.composite_type
    }

    /// Element kinds the composite (and therefore every leaf) applies to.
    pub fn target(&self) -> &TargetSet {
        &self.target
    }

    /// Leaf value types, each exactly once.
    pub fn leaf_types(&self) -> HashSet<Arc<RecordType>> {
        self.leaves.keys().cloned().collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn contains_leaf(&self, leaf_type: &RecordType) -> bool {
        self.leaves.contains_key(leaf_type)
    }

    /// Factory registered for `leaf_type`.
    pub fn leaf_factory(&self, leaf_type: &RecordType) -> Option<&LeafValueFactory> {
        self.leaves.get(leaf_type)
    }

    /// Value of the leaf of type `leaf_type` for `instance`.
    ///
    /// `Ok(None)` when the composite declares no such leaf. An instance of
    /// another type is an error, never a `None`.
    pub fn leaf_value(
        &self,
        instance: &dyn RecordView,
        leaf_type: &RecordType,
    ) -> Result<Option<RecordInstance>, LookupError> {
        self.check_instance(instance)?;
        match self.leaves.get(leaf_type) {
            None => Ok(None),
            Some(factory) => self.produce(leaf_type, factory, instance).map(Some),
        }
    }

    /// Values of every leaf for `instance`, in no particular order.
    pub fn leaf_values(
        &self,
        instance: &dyn RecordView,
    ) -> Result<HashSet<RecordInstance>, LookupError> {
        self.check_instance(instance)?;
        self.leaves
            .iter()
            .map(|(leaf_type, factory)| self.produce(leaf_type, factory, instance))
            .collect()
    }

    fn check_instance(&self, instance: &dyn RecordView) -> Result<(), LookupError> {
        let actual = instance.record_type();
        if actual.is_subtype_of(&self.composite_type) {
            Ok(())
        } else {
            Err(LookupError::TypeMismatch {
                expected: self.composite_type.name().to_string(),
                actual: actual.name().to_string(),
            })
        }
    }

    fn produce(
        &self,
        leaf_type: &RecordType,
        factory: &LeafValueFactory,
        instance: &dyn RecordView,
    ) -> Result<RecordInstance, LookupError> {
        let value = factory.new_instance(instance)?;
        if self.verify_factory_results && !value.record_type().is_subtype_of(leaf_type) {
            return Err(LookupError::UnexpectedLeafType {
                factory: factory.name().to_string(),
                expected: leaf_type.name().to_string(),
                actual: value.record_type().name().to_string(),
            });
        }
        Ok(value)
    }
}
