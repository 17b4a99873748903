// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf members and the factories producing their values.
//!
//! A leaf either re-exposes the composite member's own value
//! ([`MemberValueFactory`]) or runs user logic ([`CustomFactory`]).

mod descriptor;
mod factory;

pub use descriptor::LeafDescriptor;
pub use factory::{
    CustomFactory, CustomLeafFactory, DispatchAccessor, InstanceAccessor, LeafValueFactory,
    MemberValueFactory,
};
