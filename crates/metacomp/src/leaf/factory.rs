// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf value factories.

use crate::error::{ConfigurationError, LookupError};
use crate::model::{RecordType, Value};
use crate::record::{RecordInstance, RecordView};
use std::fmt;
use std::sync::Arc;

/// Reads member values off the concrete representation of an instance.
pub trait InstanceAccessor: Send + Sync {
    /// Current value of `member` on `instance`, `None` if absent.
    fn read(&self, instance: &dyn RecordView, member: &str) -> Option<Value>;
}

/// Accessor dispatching to [`RecordView::member_value`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DispatchAccessor;

impl InstanceAccessor for DispatchAccessor {
    fn read(&self, instance: &dyn RecordView, member: &str) -> Option<Value> {
        instance.member_value(member)
    }
}

/// User logic computing a leaf value from a composite instance.
///
/// One factory instance serves every lookup for its leaf, from any thread,
/// so implementations must be safe under concurrent invocation. Results are
/// never cached.
pub trait CustomLeafFactory: Send + Sync {
    fn new_instance(&self, composite: &dyn RecordView)
        -> Result<RecordInstance, ConfigurationError>;
}

impl<F> CustomLeafFactory for F
where
    F: Fn(&dyn RecordView) -> Result<RecordInstance, ConfigurationError> + Send + Sync,
{
    fn new_instance(
        &self,
        composite: &dyn RecordView,
    ) -> Result<RecordInstance, ConfigurationError> {
        self(composite)
    }
}

/// Returns the value of a bound member of the composite instance.
#[derive(Clone)]
pub struct MemberValueFactory {
    member: String,
    leaf_type: Arc<RecordType>,
    accessor: Arc<dyn InstanceAccessor>,
}

impl MemberValueFactory {
    pub fn new(
        member: impl Into<String>,
        leaf_type: Arc<RecordType>,
        accessor: Arc<dyn InstanceAccessor>,
    ) -> Self {
        Self {
            member: member.into(),
            leaf_type,
            accessor,
        }
    }

    /// Name of the bound member.
    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn new_instance(&self, composite: &dyn RecordView) -> Result<RecordInstance, LookupError> {
        let value = self.accessor.read(composite, &self.member).ok_or_else(|| {
            LookupError::InternalInconsistency(format!(
                "member {} missing on instance of {}",
                self.member,
                composite.record_type().name()
            ))
        })?;

        match value {
            Value::Record(record) => Ok(record),
            other => Err(LookupError::InternalInconsistency(format!(
                "member {} of {} holds {} instead of {}",
                self.member,
                composite.record_type().name(),
                other.kind_name(),
                self.leaf_type.name()
            ))),
        }
    }
}

impl fmt::Debug for MemberValueFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberValueFactory")
            .field("member", &self.member)
            .field("leaf_type", &self.leaf_type.name())
            .finish_non_exhaustive()
    }
}

/// Wraps an instantiated [`CustomLeafFactory`].
#[derive(Clone)]
pub struct CustomFactory {
    name: String,
    factory: Arc<dyn CustomLeafFactory>,
}

impl CustomFactory {
    pub fn new(name: impl Into<String>, factory: Arc<dyn CustomLeafFactory>) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }

    /// Declared factory class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn new_instance(&self, composite: &dyn RecordView) -> Result<RecordInstance, LookupError> {
        self.factory
            .new_instance(composite)
            .map_err(|source| LookupError::Factory {
                factory: self.name.clone(),
                source,
            })
    }
}

impl fmt::Debug for CustomFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Produces one leaf value from a composite instance.
#[derive(Debug, Clone)]
pub enum LeafValueFactory {
    /// The composite member's own value.
    Member(MemberValueFactory),
    /// User-supplied logic.
    Custom(CustomFactory),
}

impl LeafValueFactory {
    /// Produce the leaf value. Every call re-invokes the factory.
    pub fn new_instance(&self, composite: &dyn RecordView) -> Result<RecordInstance, LookupError> {
        match self {
            Self::Member(f) => f.new_instance(composite),
            Self::Custom(f) => f.new_instance(composite),
        }
    }

    /// Member name or factory class name, for diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Self::Member(f) => f.member(),
            Self::Custom(f) => f.name(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}
