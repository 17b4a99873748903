// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declaration-site kinds, target sets and retention.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// Kind of declaration a metadata record may be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    /// Type declaration (class, interface, enum, record).
    Type,
    Field,
    Method,
    Parameter,
    Constructor,
    LocalVariable,
    /// Declaration of another metadata record type.
    AnnotationType,
    Package,
    TypeParameter,
    TypeUse,
    Module,
    RecordComponent,
}

impl ElementKind {
    /// Every element kind, in declaration order.
    pub const ALL: [ElementKind; 12] = [
        Self::Type,
        Self::Field,
        Self::Method,
        Self::Parameter,
        Self::Constructor,
        Self::LocalVariable,
        Self::AnnotationType,
        Self::Package,
        Self::TypeParameter,
        Self::TypeUse,
        Self::Module,
        Self::RecordComponent,
    ];

    /// Upper snake case name (`ANNOTATION_TYPE`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "TYPE",
            Self::Field => "FIELD",
            Self::Method => "METHOD",
            Self::Parameter => "PARAMETER",
            Self::Constructor => "CONSTRUCTOR",
            Self::LocalVariable => "LOCAL_VARIABLE",
            Self::AnnotationType => "ANNOTATION_TYPE",
            Self::Package => "PACKAGE",
            Self::TypeParameter => "TYPE_PARAMETER",
            Self::TypeUse => "TYPE_USE",
            Self::Module => "MODULE",
            Self::RecordComponent => "RECORD_COMPONENT",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of element kinds a record type may be attached to.
///
/// Comparison is plain set equality: `{METHOD}` and `{METHOD, FIELD}` are
/// different targets even though one contains the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TargetSet {
    kinds: BTreeSet<ElementKind>,
}

impl TargetSet {
    /// Empty target set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target set containing every element kind.
    pub fn all() -> Self {
        ElementKind::ALL.into_iter().collect()
    }

    pub fn contains(&self, kind: ElementKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn insert(&mut self, kind: ElementKind) -> bool {
        self.kinds.insert(kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, ElementKind> {
        self.kinds.iter()
    }
}

impl FromIterator<ElementKind> for TargetSet {
    fn from_iter<I: IntoIterator<Item = ElementKind>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[ElementKind; N]> for TargetSet {
    fn from(kinds: [ElementKind; N]) -> Self {
        kinds.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a ElementKind;
    type IntoIter = btree_set::Iter<'a, ElementKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.kinds.iter()
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, kind) in self.kinds.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", kind)?;
        }
        f.write_str("}")
    }
}

/// How long values of a record type survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Retention {
    /// Discarded after compilation.
    Source,
    /// Recorded in compiled output but not visible at runtime.
    #[default]
    Class,
    /// Visible to the running program.
    Runtime,
}

impl Retention {
    /// Whether values survive into the running program.
    pub fn is_runtime_visible(&self) -> bool {
        matches!(self, Self::Runtime)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "SOURCE",
            Self::Class => "CLASS",
            Self::Runtime => "RUNTIME",
        }
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_kind() {
        let all = TargetSet::all();
        assert_eq!(all.len(), ElementKind::ALL.len());
        for kind in ElementKind::ALL {
            assert!(all.contains(kind));
        }
    }

    #[test]
    fn target_equality_is_set_equality() {
        let method = TargetSet::from([ElementKind::Method]);
        let field = TargetSet::from([ElementKind::Field]);
        let both = TargetSet::from([ElementKind::Field, ElementKind::Method]);
        let both_reordered = TargetSet::from([ElementKind::Method, ElementKind::Field]);

        assert_eq!(method, TargetSet::from([ElementKind::Method]));
        assert_ne!(method, field);
        assert_ne!(method, both);
        assert_eq!(both, both_reordered);
    }

    #[test]
    fn target_display() {
        let set = TargetSet::from([ElementKind::Method, ElementKind::AnnotationType]);
        assert_eq!(set.to_string(), "{METHOD, ANNOTATION_TYPE}");
        assert_eq!(TargetSet::new().to_string(), "{}");
    }

    #[test]
    fn only_runtime_is_visible() {
        assert!(Retention::Runtime.is_runtime_visible());
        assert!(!Retention::Class.is_runtime_visible());
        assert!(!Retention::Source.is_runtime_visible());
        assert_eq!(Retention::default(), Retention::Class);
    }
}
