// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declarative model of metadata record types.
//!
//! Runtime description of record-shaped declarations: members and their
//! declared types, target sets, retention and leaf tags.
//!
//! # Example
//!
//! ```rust
//! use metacomp::model::{ElementKind, RecordTypeBuilder, ValueType};
//!
//! let marker = RecordTypeBuilder::new("com.example.Audited")
//!     .runtime()
//!     .target([ElementKind::Method])
//!     .member("level", ValueType::I32)
//!     .build();
//!
//! assert!(marker.retention().is_runtime_visible());
//! assert_eq!(marker.member_names().collect::<Vec<_>>(), vec!["level"]);
//! ```

mod builder;
mod element;
mod types;
mod value;

pub use builder::RecordTypeBuilder;
pub use element::{ElementKind, Retention, TargetSet};
pub use types::{
    EnumType, FactoryClass, FactoryConstructor, FactorySignature, LeafTag, MemberDescriptor,
    PrimitiveKind, RecordType, ValueType,
};
pub use value::{EnumValue, Value};

pub(crate) use value::string_hash;
