// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record type declarations.
//!
//! A [`RecordType`] is the runtime description of a metadata record type:
//! its ordered members, where it may be attached and how long its values are
//! retained. Members tagged with a [`LeafTag`] make the type a composite.

use crate::leaf::CustomLeafFactory;
use crate::model::{ElementKind, Retention, TargetSet, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Scalar kinds a member may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
        }
    }
}

/// Enumeration type usable as a member type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    /// Fully qualified enum name.
    pub name: String,
    /// Declared constants, in order.
    pub constants: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            constants: constants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_constant(&self, constant: &str) -> bool {
        self.constants.iter().any(|c| c == constant)
    }

    /// Value for a declared constant, `None` if the enum has no such constant.
    pub fn value(&self, constant: &str) -> Option<Value> {
        self.has_constant(constant)
            .then(|| Value::enum_value(&self.name, constant))
    }
}

/// Declared type of a record member.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Primitive(PrimitiveKind),
    String,
    Enum(Arc<EnumType>),
    /// Nested metadata record.
    Record(Arc<RecordType>),
    Array(Box<ValueType>),
}

impl ValueType {
    pub const BOOL: ValueType = ValueType::Primitive(PrimitiveKind::Bool);
    pub const I32: ValueType = ValueType::Primitive(PrimitiveKind::I32);
    pub const I64: ValueType = ValueType::Primitive(PrimitiveKind::I64);

    /// Array of `element`.
    pub fn array(element: ValueType) -> Self {
        Self::Array(Box::new(element))
    }

    /// The record type, if this is a record-valued type.
    pub fn as_record(&self) -> Option<&Arc<RecordType>> {
        match self {
            Self::Record(ty) => Some(ty),
            _ => None,
        }
    }

    /// Check that `value` may be stored in a member of this type.
    ///
    /// `Null` is never accepted. Records accept instances of the declared
    /// type or of a subtype.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match (self, value) {
            (_, Value::Null) => Err("null is not a valid member value".to_string()),
            (Self::Primitive(kind), v) => {
                let ok = matches!(
                    (kind, v),
                    (PrimitiveKind::Bool, Value::Bool(_))
                        | (PrimitiveKind::I8, Value::I8(_))
                        | (PrimitiveKind::I16, Value::I16(_))
                        | (PrimitiveKind::I32, Value::I32(_))
                        | (PrimitiveKind::I64, Value::I64(_))
                        | (PrimitiveKind::F32, Value::F32(_))
                        | (PrimitiveKind::F64, Value::F64(_))
                        | (PrimitiveKind::Char, Value::Char(_))
                );
                if ok {
                    Ok(())
                } else {
                    Err(self.mismatch(v))
                }
            }
            (Self::String, Value::String(_)) => Ok(()),
            (Self::Enum(ty), Value::Enum(e)) => {
                if e.type_name() != ty.name {
                    Err(self.mismatch(value))
                } else if !ty.has_constant(e.constant()) {
                    Err(format!("{} has no constant {}", ty.name, e.constant()))
                } else {
                    Ok(())
                }
            }
            (Self::Record(ty), Value::Record(instance)) => {
                if instance.record_type().is_subtype_of(ty) {
                    Ok(())
                } else {
                    Err(self.mismatch(value))
                }
            }
            (Self::Array(element), Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    element
                        .check(item)
                        .map_err(|reason| format!("element {}: {}", i, reason))?;
                }
                Ok(())
            }
            (_, v) => Err(self.mismatch(v)),
        }
    }

    fn mismatch(&self, value: &Value) -> String {
        format!("expected {}, got {}", self, value.kind_name())
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.as_str()),
            Self::String => f.write_str("string"),
            Self::Enum(ty) => f.write_str(&ty.name),
            Self::Record(ty) => f.write_str(ty.name()),
            Self::Array(element) => write!(f, "{}[]", element),
        }
    }
}

/// Constructor of a custom leaf factory.
pub type FactoryConstructor =
    Arc<dyn Fn() -> Result<Arc<dyn CustomLeafFactory>, String> + Send + Sync>;

/// Declared type parameters of a custom factory: `(leaf, composite)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FactorySignature {
    /// Name of the leaf record type the factory produces.
    pub leaf: String,
    /// Name of the composite record type the factory reads.
    pub composite: String,
}

impl FactorySignature {
    pub fn new(leaf: impl Into<String>, composite: impl Into<String>) -> Self {
        Self {
            leaf: leaf.into(),
            composite: composite.into(),
        }
    }

    /// Exact match against a leaf and its declaring composite.
    pub fn matches(&self, leaf: &RecordType, composite: &RecordType) -> bool {
        self.leaf == leaf.name() && self.composite == composite.name()
    }
}

impl fmt::Display for FactorySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.leaf, self.composite)
    }
}

/// A user-supplied leaf factory declaration.
///
/// The engine instantiates the factory through its no-argument constructor
/// exactly once per leaf member. A declaration without a constructor cannot
/// be instantiated.
#[derive(Clone)]
pub struct FactoryClass {
    name: String,
    signature: FactorySignature,
    constructor: Option<FactoryConstructor>,
}

impl FactoryClass {
    /// Declare a factory with a no-argument constructor.
    pub fn new<F>(name: impl Into<String>, signature: FactorySignature, constructor: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn CustomLeafFactory>, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature,
            constructor: Some(Arc::new(constructor)),
        }
    }

    /// Declare a factory whose constructor always yields a clone of `factory`.
    pub fn from_factory<T>(name: impl Into<String>, signature: FactorySignature, factory: T) -> Self
    where
        T: CustomLeafFactory + Clone + 'static,
    {
        Self::new(name, signature, move || {
            Ok(Arc::new(factory.clone()) as Arc<dyn CustomLeafFactory>)
        })
    }

    /// Declare a factory that exposes no accessible no-argument constructor.
    pub fn without_constructor(name: impl Into<String>, signature: FactorySignature) -> Self {
        Self {
            name: name.into(),
            signature,
            constructor: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &FactorySignature {
        &self.signature
    }

    pub fn constructor(&self) -> Option<&FactoryConstructor> {
        self.constructor.as_ref()
    }
}

impl fmt::Debug for FactoryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryClass")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("has_constructor", &self.constructor.is_some())
            .finish()
    }
}

/// Marks a member as contributing a leaf value.
#[derive(Debug, Clone, Default)]
pub struct LeafTag {
    factory: Option<Arc<FactoryClass>>,
}

impl LeafTag {
    /// Leaf whose value is the member's own value.
    pub fn member() -> Self {
        Self::default()
    }

    /// Leaf whose value is computed by a custom factory.
    pub fn custom(factory: FactoryClass) -> Self {
        Self {
            factory: Some(Arc::new(factory)),
        }
    }

    /// Custom factory, `None` for the default member-value factory.
    pub fn factory(&self) -> Option<&Arc<FactoryClass>> {
        self.factory.as_ref()
    }
}

/// A declared member of a record type.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    /// Member name.
    pub name: String,
    /// Declared value type.
    pub value_type: ValueType,
    /// Declared default, used when building instances with omitted members.
    pub default: Option<Value>,
    /// Leaf tag, if the member contributes a leaf value.
    pub leaf: Option<LeafTag>,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: None,
            leaf: None,
        }
    }

    /// Set default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Tag as a leaf member.
    pub fn with_leaf(mut self, tag: LeafTag) -> Self {
        self.leaf = Some(tag);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }
}

/// A metadata record type.
///
/// Identity is the fully qualified name: two handles with the same name
/// compare and hash equal.
#[derive(Debug, Clone)]
pub struct RecordType {
    pub(crate) name: String,
    pub(crate) members: Vec<MemberDescriptor>,
    pub(crate) target: Option<TargetSet>,
    pub(crate) retention: Retention,
    pub(crate) supertypes: Vec<Arc<RecordType>>,
}

impl RecordType {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared members, in declaration order.
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Member by name.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Member names, in declaration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Members tagged as leaves, in declaration order.
    pub fn leaf_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().filter(|m| m.is_leaf())
    }

    /// Explicitly declared target set.
    pub fn declared_target(&self) -> Option<&TargetSet> {
        self.target.as_ref()
    }

    /// Effective target set; every element kind when none is declared.
    pub fn target(&self) -> TargetSet {
        self.target.clone().unwrap_or_else(TargetSet::all)
    }

    /// Whether values may be attached to `kind`.
    pub fn applies_to(&self, kind: ElementKind) -> bool {
        self.target.as_ref().map_or(true, |t| t.contains(kind))
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    pub fn supertypes(&self) -> &[Arc<RecordType>] {
        &self.supertypes
    }

    /// `true` if `self` is `other` or transitively extends it.
    pub fn is_subtype_of(&self, other: &RecordType) -> bool {
        self == other || self.supertypes.iter().any(|s| s.is_subtype_of(other))
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for RecordType {}

impl Hash for RecordType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}
