// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for RecordType.

use crate::model::{
    ElementKind, FactoryClass, LeafTag, MemberDescriptor, RecordType, Retention, TargetSet,
    Value, ValueType,
};
use std::sync::Arc;

/// Builder for creating RecordType declarations.
#[derive(Debug)]
pub struct RecordTypeBuilder {
    name: String,
    members: Vec<MemberDescriptor>,
    target: Option<TargetSet>,
    retention: Retention,
    supertypes: Vec<Arc<RecordType>>,
}

impl RecordTypeBuilder {
    /// Create a new builder. Retention defaults to [`Retention::Class`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            target: None,
            retention: Retention::default(),
            supertypes: Vec::new(),
        }
    }

    /// Set retention.
    pub fn retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    /// Shorthand for [`Retention::Runtime`].
    pub fn runtime(self) -> Self {
        self.retention(Retention::Runtime)
    }

    /// Declare the target set. Without this the type applies everywhere.
    pub fn target<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = ElementKind>,
    {
        self.target = Some(kinds.into_iter().collect());
        self
    }

    /// Add a supertype.
    pub fn extends(mut self, supertype: Arc<RecordType>) -> Self {
        self.supertypes.push(supertype);
        self
    }

    /// Add a plain member.
    pub fn member(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.members.push(MemberDescriptor::new(name, value_type));
        self
    }

    /// Add a member with a declared default.
    pub fn member_with_default(
        mut self,
        name: impl Into<String>,
        value_type: ValueType,
        default: impl Into<Value>,
    ) -> Self {
        self.members
            .push(MemberDescriptor::new(name, value_type).with_default(default.into()));
        self
    }

    /// Add a leaf member whose leaf value is the member's own value.
    pub fn leaf_member(mut self, name: impl Into<String>, leaf_type: Arc<RecordType>) -> Self {
        self.members.push(
            MemberDescriptor::new(name, ValueType::Record(leaf_type)).with_leaf(LeafTag::member()),
        );
        self
    }

    /// Add a leaf member computed by a custom factory.
    pub fn custom_leaf_member(
        mut self,
        name: impl Into<String>,
        leaf_type: Arc<RecordType>,
        factory: FactoryClass,
    ) -> Self {
        self.members.push(
            MemberDescriptor::new(name, ValueType::Record(leaf_type))
                .with_leaf(LeafTag::custom(factory)),
        );
        self
    }

    /// Add a fully specified member.
    pub fn member_descriptor(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Build the RecordType.
    pub fn build(self) -> Arc<RecordType> {
        Arc::new(RecordType {
            name: self.name,
            members: self.members,
            target: self.target,
            retention: self.retention,
            supertypes: self.supertypes,
        })
    }
}
