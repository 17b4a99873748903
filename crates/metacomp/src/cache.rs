// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-lifetime cache of composite descriptors.
//!
//! Building a descriptor validates the whole declaration, so callers build
//! each one once and keep it. [`DescriptorCache`] does that bookkeeping:
//! lookups are served from a concurrent map and only misses pay for
//! validation. Failed builds are not cached; the next lookup reports the
//! same error again.

use crate::composite::{CompositeTypeDescriptor, DescriptorOptions};
use crate::error::ConfigurationError;
use crate::model::RecordType;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent get-or-build cache keyed by composite type.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    options: DescriptorOptions,
    descriptors: DashMap<Arc<RecordType>, Arc<CompositeTypeDescriptor>>,
}

impl DescriptorCache {
    /// Create an empty cache building descriptors with `options`.
    pub fn new(options: DescriptorOptions) -> Self {
        Self {
            options,
            descriptors: DashMap::new(),
        }
    }

    /// Cached descriptor for `composite_type`, building it on first use.
    ///
    /// Two threads missing at the same time may both build; the first
    /// descriptor inserted wins and both callers receive it.
    pub fn get_or_build(
        &self,
        composite_type: &Arc<RecordType>,
    ) -> Result<Arc<CompositeTypeDescriptor>, ConfigurationError> {
        if let Some(found) = self.get(composite_type) {
            return Ok(found);
        }

        let built = Arc::new(CompositeTypeDescriptor::with_options(
            composite_type,
            &self.options,
        )?);
        let entry = self
            .descriptors
            .entry(composite_type.clone())
            .or_insert(built);
        Ok(entry.value().clone())
    }

    /// Cached descriptor, without building.
    pub fn get(&self, composite_type: &RecordType) -> Option<Arc<CompositeTypeDescriptor>> {
        self.descriptors
            .get(composite_type)
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Drop every cached descriptor.
    pub fn clear(&self) {
        self.descriptors.clear();
    }
}
