// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Validation of a single leaf member.

use crate::error::ConfigurationError;
use crate::leaf::{CustomFactory, InstanceAccessor, LeafValueFactory, MemberValueFactory};
use crate::model::{FactoryClass, LeafTag, MemberDescriptor, RecordType, TargetSet};
use std::sync::Arc;

/// A validated leaf member of a composite type.
///
/// Only lives while its composite descriptor is being built; the factory is
/// then moved into the composite's leaf map.
#[derive(Debug)]
pub struct LeafDescriptor {
    leaf_type: Arc<RecordType>,
    target: TargetSet,
    factory: LeafValueFactory,
}

impl LeafDescriptor {
    /// Validate `member` of `composite` and resolve its factory.
    pub fn new(
        composite: &Arc<RecordType>,
        member: &MemberDescriptor,
        accessor: &Arc<dyn InstanceAccessor>,
    ) -> Result<Self, ConfigurationError> {
        let leaf_type = member.value_type.as_record().cloned().ok_or_else(|| {
            ConfigurationError::NonRecordLeafType {
                composite: composite.name().to_string(),
                member: member.name.clone(),
                value_type: member.value_type.to_string(),
            }
        })?;

        if !leaf_type.retention().is_runtime_visible() {
            return Err(ConfigurationError::LeafNotRuntimeRetained {
                composite: composite.name().to_string(),
                member: member.name.clone(),
                leaf: leaf_type.name().to_string(),
            });
        }

        let target = leaf_type.target();

        let factory = match member.leaf.as_ref().and_then(LeafTag::factory) {
            None => LeafValueFactory::Member(MemberValueFactory::new(
                member.name.clone(),
                leaf_type.clone(),
                accessor.clone(),
            )),
            Some(class) => {
                LeafValueFactory::Custom(Self::instantiate(composite, &leaf_type, class)?)
            }
        };

        log::trace!(
            "leaf {} of {}: type {}, factory {}",
            member.name,
            composite.name(),
            leaf_type.name(),
            factory.name()
        );

        Ok(Self {
            leaf_type,
            target,
            factory,
        })
    }

    fn instantiate(
        composite: &RecordType,
        leaf_type: &RecordType,
        class: &FactoryClass,
    ) -> Result<CustomFactory, ConfigurationError> {
        let not_instantiable = |reason: String| ConfigurationError::FactoryNotInstantiable {
            composite: composite.name().to_string(),
            leaf: leaf_type.name().to_string(),
            factory: class.name().to_string(),
            reason,
        };

        let constructor = class
            .constructor()
            .ok_or_else(|| not_instantiable("no accessible no-argument constructor".to_string()))?;

        if !class.signature().matches(leaf_type, composite) {
            return Err(ConfigurationError::FactoryTypeMismatch {
                composite: composite.name().to_string(),
                leaf: leaf_type.name().to_string(),
                factory: class.name().to_string(),
                declared: class.signature().clone(),
            });
        }

        let instance = (constructor.as_ref())().map_err(not_instantiable)?;
        Ok(CustomFactory::new(class.name(), instance))
    }

    pub fn leaf_type(&self) -> &Arc<RecordType> {
        &self.leaf_type
    }

    pub fn target(&self) -> &TargetSet {
        &self.target
    }

    pub fn factory(&self) -> &LeafValueFactory {
        &self.factory
    }

    pub fn into_parts(self) -> (Arc<RecordType>, TargetSet, LeafValueFactory) {
        (self.leaf_type, self.target, self.factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::DispatchAccessor;
    use crate::model::{
        ElementKind, FactorySignature, RecordTypeBuilder, Retention, Value, ValueType,
    };
    use crate::record::{synthesize, RecordView};

    fn accessor() -> Arc<dyn InstanceAccessor> {
        Arc::new(DispatchAccessor)
    }

    fn leaf() -> Arc<RecordType> {
        RecordTypeBuilder::new("Leaf")
            .runtime()
            .target([ElementKind::Method])
            .member("value", ValueType::I32)
            .build()
    }

    fn composite_with(member: MemberDescriptor) -> Arc<RecordType> {
        RecordTypeBuilder::new("Composite")
            .runtime()
            .target([ElementKind::Method])
            .member_descriptor(member)
            .build()
    }

    fn fixed_class(name: &str, signature: FactorySignature, leaf: Arc<RecordType>) -> FactoryClass {
        FactoryClass::from_factory(name, signature, move |_: &dyn RecordView| {
            synthesize(&leaf, [("value", Value::I32(1))])
        })
    }

    #[test]
    fn member_leaf_uses_member_factory() {
        let leaf = leaf();
        let member = MemberDescriptor::new("leaf", ValueType::Record(leaf.clone()))
            .with_leaf(LeafTag::member());
        let composite = composite_with(member.clone());

        let desc = LeafDescriptor::new(&composite, &member, &accessor()).unwrap();
        assert_eq!(desc.leaf_type(), &leaf);
        assert_eq!(desc.target(), &TargetSet::from([ElementKind::Method]));
        assert!(!desc.factory().is_custom());
        assert_eq!(desc.factory().name(), "leaf");
    }

    #[test]
    fn scalar_leaf_rejected() {
        let member = MemberDescriptor::new("count", ValueType::I32).with_leaf(LeafTag::member());
        let composite = composite_with(member.clone());

        let err = LeafDescriptor::new(&composite, &member, &accessor()).unwrap_err();
        assert!(matches!(err, ConfigurationError::NonRecordLeafType { .. }));
    }

    #[test]
    fn leaf_without_runtime_retention_rejected() {
        let hidden = RecordTypeBuilder::new("Hidden")
            .retention(Retention::Class)
            .build();
        let member =
            MemberDescriptor::new("hidden", ValueType::Record(hidden)).with_leaf(LeafTag::member());
        let composite = composite_with(member.clone());

        let err = LeafDescriptor::new(&composite, &member, &accessor()).unwrap_err();
        assert!(matches!(err, ConfigurationError::LeafNotRuntimeRetained { .. }));
    }

    #[test]
    fn undeclared_leaf_target_is_all() {
        let anywhere = RecordTypeBuilder::new("Anywhere").runtime().build();
        let member = MemberDescriptor::new("anywhere", ValueType::Record(anywhere))
            .with_leaf(LeafTag::member());
        let composite = composite_with(member.clone());

        let desc = LeafDescriptor::new(&composite, &member, &accessor()).unwrap();
        assert_eq!(desc.target(), &TargetSet::all());
    }

    #[test]
    fn custom_factory_instantiated() {
        let leaf = leaf();
        let class = fixed_class(
            "FixedLeaf",
            FactorySignature::new("Leaf", "Composite"),
            leaf.clone(),
        );
        let member = MemberDescriptor::new("leaf", ValueType::Record(leaf))
            .with_leaf(LeafTag::custom(class));
        let composite = composite_with(member.clone());

        let desc = LeafDescriptor::new(&composite, &member, &accessor()).unwrap();
        assert!(desc.factory().is_custom());
        assert_eq!(desc.factory().name(), "FixedLeaf");
    }

    #[test]
    fn factory_without_constructor_rejected() {
        let leaf = leaf();
        let class = FactoryClass::without_constructor(
            "Private",
            FactorySignature::new("Leaf", "Composite"),
        );
        let member = MemberDescriptor::new("leaf", ValueType::Record(leaf))
            .with_leaf(LeafTag::custom(class));
        let composite = composite_with(member.clone());

        let err = LeafDescriptor::new(&composite, &member, &accessor()).unwrap_err();
        assert!(matches!(err, ConfigurationError::FactoryNotInstantiable { .. }));
    }

    #[test]
    fn failing_constructor_wrapped() {
        let leaf = leaf();
        let class = FactoryClass::new(
            "Exploding",
            FactorySignature::new("Leaf", "Composite"),
            || Err("constructor threw".to_string()),
        );
        let member = MemberDescriptor::new("leaf", ValueType::Record(leaf))
            .with_leaf(LeafTag::custom(class));
        let composite = composite_with(member.clone());

        match LeafDescriptor::new(&composite, &member, &accessor()) {
            Err(ConfigurationError::FactoryNotInstantiable { reason, factory, .. }) => {
                assert_eq!(factory, "Exploding");
                assert_eq!(reason, "constructor threw");
            }
            other => panic!("expected FactoryNotInstantiable, got {:?}", other),
        }
    }

    #[test]
    fn swapped_signature_rejected() {
        let leaf = leaf();
        let class = fixed_class(
            "Swapped",
            FactorySignature::new("Composite", "Leaf"),
            leaf.clone(),
        );
        let member = MemberDescriptor::new("leaf", ValueType::Record(leaf))
            .with_leaf(LeafTag::custom(class));
        let composite = composite_with(member.clone());

        let err = LeafDescriptor::new(&composite, &member, &accessor()).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::FactoryTypeMismatch { ref declared, .. }
                if declared == &FactorySignature::new("Composite", "Leaf")
        ));
    }
}
