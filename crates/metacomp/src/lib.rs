// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Composite metadata records.
//!
//! A *composite* record type stands in for a fixed bundle of other metadata
//! records, its *leaves*. Ordinary declaration tooling only sees the
//! composite; the leaves are recovered at runtime through a
//! [`CompositeTypeDescriptor`].
//!
//! # Features
//!
//! - **Descriptors**: validate a composite declaration once, then look up
//!   leaf values for any instance
//! - **Leaf factories**: re-expose a member's value or compute the leaf with
//!   user logic shared across threads
//! - **Structural records**: synthesize record instances from member maps,
//!   with value equality, hashing and printing
//! - **Registry and cache**: fixed sets of known composites and a concurrent
//!   descriptor cache
//!
//! # Architecture
//!
//! ```text
//!   RecordType (composite declaration)
//!        |
//!        v
//!   CompositeTypeDescriptor ---> LeafDescriptor (one per leaf member)
//!        |                            |
//!        v                            v
//!   leaf_value(instance) -----> LeafValueFactory ---> synthesize()
//! ```
//!
//! # Example
//!
//! ```rust
//! use metacomp::model::{ElementKind, RecordTypeBuilder, Value, ValueType};
//! use metacomp::{synthesize, CompositeTypeDescriptor};
//!
//! let audited = RecordTypeBuilder::new("Audited")
//!     .runtime()
//!     .target([ElementKind::Method])
//!     .member("level", ValueType::I32)
//!     .build();
//! let service = RecordTypeBuilder::new("Service")
//!     .runtime()
//!     .target([ElementKind::Method])
//!     .leaf_member("audited", audited.clone())
//!     .build();
//!
//! let descriptor = CompositeTypeDescriptor::new(&service).unwrap();
//!
//! let level = synthesize(&audited, [("level", Value::I32(2))]).unwrap();
//! let instance = synthesize(&service, [("audited", Value::Record(level.clone()))]).unwrap();
//!
//! assert_eq!(descriptor.leaf_value(&instance, &audited).unwrap(), Some(level));
//! ```

pub mod cache;
pub mod composite;
pub mod config;
pub mod error;
pub mod leaf;
pub mod model;
pub mod record;
pub mod registry;

pub use cache::DescriptorCache;
pub use composite::{CompositeTypeDescriptor, DescriptorOptions};
pub use config::{ConfigError, EngineConfig, RegistryConfig};
pub use error::{ConfigurationError, LookupError, Rule};
pub use leaf::{
    CustomFactory, CustomLeafFactory, DispatchAccessor, InstanceAccessor, LeafDescriptor,
    LeafValueFactory, MemberValueFactory,
};
pub use record::{synthesize, RecordInstance, RecordInstanceBuilder, RecordView};
pub use registry::{CompositeTypeRegistry, TypeCatalog};
