// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types.
//!
//! [`ConfigurationError`] reports a defect in a static declaration and is
//! raised while building descriptors or synthesizing records. It is never
//! worth retrying. [`LookupError`] reports misuse of a built descriptor.

use crate::model::{FactorySignature, Retention, TargetSet};
use std::fmt;
use thiserror::Error;

/// Structural rule a composite declaration must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The composite type is retained at runtime.
    RuntimeRetention,
    /// Every leaf member is a runtime-retained record type.
    LeafRecordType,
    /// Every leaf targets exactly what the composite targets.
    TargetConsistency,
    /// No leaf type is declared twice.
    UniqueLeafType,
    /// Custom factories are instantiable and typed `(leaf, composite)`.
    FactoryContract,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuntimeRetention => "runtime-retention",
            Self::LeafRecordType => "leaf-record-type",
            Self::TargetConsistency => "target-consistency",
            Self::UniqueLeafType => "unique-leaf-type",
            Self::FactoryContract => "factory-contract",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defect in a record or composite declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("composite type {composite} has {retention} retention, RUNTIME required")]
    MissingRuntimeRetention {
        composite: String,
        retention: Retention,
    },

    #[error("leaf member {member} of {composite} has non-record type {value_type}")]
    NonRecordLeafType {
        composite: String,
        member: String,
        value_type: String,
    },

    #[error("leaf type {leaf} (member {member} of {composite}) is not retained at runtime")]
    LeafNotRuntimeRetained {
        composite: String,
        member: String,
        leaf: String,
    },

    #[error("leaf type {leaf} targets {leaf_target} but composite {composite} targets {composite_target}")]
    InconsistentTarget {
        composite: String,
        leaf: String,
        leaf_target: TargetSet,
        composite_target: TargetSet,
    },

    #[error("composite {composite} declares leaf type {leaf} twice (members {first} and {second})")]
    DuplicateLeafType {
        composite: String,
        leaf: String,
        first: String,
        second: String,
    },

    #[error("factory {factory} for leaf {leaf} of {composite} cannot be instantiated: {reason}")]
    FactoryNotInstantiable {
        composite: String,
        leaf: String,
        factory: String,
        reason: String,
    },

    #[error("factory {factory} is typed {declared}, expected <{leaf}, {composite}>")]
    FactoryTypeMismatch {
        composite: String,
        leaf: String,
        factory: String,
        declared: FactorySignature,
    },

    #[error("member set of {record} does not match: missing {missing:?}, unexpected {unexpected:?}")]
    MemberSetMismatch {
        record: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("invalid value for member {member} of {record}: {reason}")]
    InvalidMemberValue {
        record: String,
        member: String,
        reason: String,
    },
}

impl ConfigurationError {
    /// Composite rule violated, `None` for record synthesis errors.
    pub fn rule(&self) -> Option<Rule> {
        match self {
            Self::MissingRuntimeRetention { .. } => Some(Rule::RuntimeRetention),
            Self::NonRecordLeafType { .. } | Self::LeafNotRuntimeRetained { .. } => {
                Some(Rule::LeafRecordType)
            }
            Self::InconsistentTarget { .. } => Some(Rule::TargetConsistency),
            Self::DuplicateLeafType { .. } => Some(Rule::UniqueLeafType),
            Self::FactoryNotInstantiable { .. } | Self::FactoryTypeMismatch { .. } => {
                Some(Rule::FactoryContract)
            }
            Self::MemberSetMismatch { .. } | Self::InvalidMemberValue { .. } => None,
        }
    }
}

/// Failure while reading leaf values through a built descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The instance is not of the descriptor's composite type.
    #[error("instance of {actual} passed to descriptor of {expected}")]
    TypeMismatch { expected: String, actual: String },

    /// A validated member disappeared. Indicates a bug, never retried.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),

    /// A custom factory rejected the instance.
    #[error("factory {factory} failed: {source}")]
    Factory {
        factory: String,
        #[source]
        source: ConfigurationError,
    },

    /// A custom factory produced a record of the wrong type.
    #[error("factory {factory} produced {actual}, expected {expected}")]
    UnexpectedLeafType {
        factory: String,
        expected: String,
        actual: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKind;

    #[test]
    fn rules_cover_declaration_errors() {
        let err = ConfigurationError::MissingRuntimeRetention {
            composite: "C".into(),
            retention: Retention::Class,
        };
        assert_eq!(err.rule(), Some(Rule::RuntimeRetention));
        assert!(err.to_string().contains("CLASS"));

        let err = ConfigurationError::MemberSetMismatch {
            record: "R".into(),
            missing: vec!["b".into()],
            unexpected: vec![],
        };
        assert_eq!(err.rule(), None);
    }

    #[test]
    fn inconsistent_target_names_both_sides() {
        let err = ConfigurationError::InconsistentTarget {
            composite: "C".into(),
            leaf: "L".into(),
            leaf_target: TargetSet::from([ElementKind::Field]),
            composite_target: TargetSet::from([ElementKind::Method]),
        };
        let msg = err.to_string();
        assert!(msg.contains("L targets {FIELD}"));
        assert!(msg.contains("C targets {METHOD}"));
        assert_eq!(err.rule(), Some(Rule::TargetConsistency));
    }

    #[test]
    fn factory_error_keeps_source() {
        use std::error::Error as _;

        let err = LookupError::Factory {
            factory: "F".into(),
            source: ConfigurationError::InvalidMemberValue {
                record: "R".into(),
                member: "m".into(),
                reason: "null".into(),
            },
        };
        assert!(err.source().is_some());
    }
}
