// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural record instances.
//!
//! [`synthesize`] manufactures an instance of a record type from a member
//! map. Instances are plain values: two instances built from the same type
//! and the same member values are equal, hash the same and print the same,
//! whichever code path produced them.

use crate::error::ConfigurationError;
use crate::model::{string_hash, RecordType, Value};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Runtime view of a record instance.
///
/// Composite instances reach the engine through this trait. Member values
/// are read from the concrete representation by name.
pub trait RecordView {
    /// Record type of this instance.
    fn record_type(&self) -> &Arc<RecordType>;

    /// Current value of a member, `None` if the instance has no such member.
    fn member_value(&self, name: &str) -> Option<Value>;

    /// Concrete representation, for accessors that read it directly.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// Synthesized instance of a record type backed by an immutable member map.
#[derive(Debug, Clone)]
pub struct RecordInstance {
    record_type: Arc<RecordType>,
    values: Arc<BTreeMap<String, Value>>,
}

impl RecordInstance {
    /// Synthesize an instance; see [`synthesize`].
    pub fn new<I, K>(record_type: &Arc<RecordType>, values: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        synthesize(record_type, values)
    }

    /// Start building an instance; omitted members fall back to defaults.
    pub fn builder(record_type: &Arc<RecordType>) -> RecordInstanceBuilder {
        RecordInstanceBuilder::new(record_type)
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    /// Member value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Members and values, in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.record_type
            .members()
            .iter()
            .filter_map(move |m| self.values.get(&m.name).map(|v| (m.name.as_str(), v)))
    }

    /// Structural hash: sum over members of `(127 * hash(name)) ^ hash(value)`.
    pub fn hash_code(&self) -> i32 {
        self.values.iter().fold(0i32, |acc, (name, value)| {
            let member = 127i32.wrapping_mul(string_hash(name)) ^ value.value_hash();
            acc.wrapping_add(member)
        })
    }
}

impl RecordView for RecordInstance {
    fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    fn member_value(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl PartialEq for RecordInstance {
    fn eq(&self, other: &Self) -> bool {
        self.record_type == other.record_type && self.values == other.values
    }
}

impl Eq for RecordInstance {}

impl Hash for RecordInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for RecordInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}(", self.record_type.name())?;
        for (i, (name, value)) in self.members().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str(")")
    }
}

/// Build a structural instance of `record_type` from a member map.
///
/// The keys must be exactly the declared member names, and every value must
/// be assignable to its member's declared type. `Value::Null` is rejected.
pub fn synthesize<I, K>(
    record_type: &Arc<RecordType>,
    values: I,
) -> Result<RecordInstance, ConfigurationError>
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let values: BTreeMap<String, Value> =
        values.into_iter().map(|(k, v)| (k.into(), v)).collect();

    let missing: Vec<String> = record_type
        .member_names()
        .filter(|name| !values.contains_key(*name))
        .map(str::to_string)
        .collect();
    let unexpected: Vec<String> = values
        .keys()
        .filter(|key| record_type.member(key).is_none())
        .cloned()
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(ConfigurationError::MemberSetMismatch {
            record: record_type.name().to_string(),
            missing,
            unexpected,
        });
    }

    for member in record_type.members() {
        if let Some(value) = values.get(&member.name) {
            member
                .value_type
                .check(value)
                .map_err(|reason| ConfigurationError::InvalidMemberValue {
                    record: record_type.name().to_string(),
                    member: member.name.clone(),
                    reason,
                })?;
        }
    }

    Ok(RecordInstance {
        record_type: record_type.clone(),
        values: Arc::new(values),
    })
}

/// Builder that fills omitted members from their declared defaults.
#[derive(Debug)]
pub struct RecordInstanceBuilder {
    record_type: Arc<RecordType>,
    values: HashMap<String, Value>,
}

impl RecordInstanceBuilder {
    pub fn new(record_type: &Arc<RecordType>) -> Self {
        Self {
            record_type: record_type.clone(),
            values: HashMap::new(),
        }
    }

    /// Set a member value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Fill defaults, then synthesize with the usual strict checks.
    pub fn build(mut self) -> Result<RecordInstance, ConfigurationError> {
        for member in self.record_type.members() {
            if let Some(default) = &member.default {
                self.values
                    .entry(member.name.clone())
                    .or_insert_with(|| default.clone());
            }
        }
        synthesize(&self.record_type, self.values)
    }
}
