// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! One descriptor, one factory instance, many threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use metacomp::model::{
    ElementKind, FactoryClass, FactorySignature, RecordTypeBuilder, Value, ValueType,
};
use metacomp::{
    synthesize, CompositeTypeDescriptor, CustomLeafFactory, DescriptorCache, RecordInstance,
    RecordView,
};

const THREADS: usize = 8;
const LOOKUPS: usize = 250;

#[test]
fn shared_factory_under_concurrent_lookups() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let invoked = Arc::new(AtomicUsize::new(0));

    let doubled = RecordTypeBuilder::new("Doubled")
        .runtime()
        .target([ElementKind::Field])
        .member("value", ValueType::I64)
        .build();

    let factory_type = doubled.clone();
    let counter = invoked.clone();
    let built = constructed.clone();
    let composite = RecordTypeBuilder::new("Source")
        .runtime()
        .target([ElementKind::Field])
        .member("value", ValueType::I64)
        .custom_leaf_member(
            "doubled",
            doubled.clone(),
            FactoryClass::new(
                "Doubler",
                FactorySignature::new("Doubled", "Source"),
                move || {
                    built.fetch_add(1, Ordering::SeqCst);
                    let counter = counter.clone();
                    let ty = factory_type.clone();
                    Ok(Arc::new(move |src: &dyn RecordView| {
                        counter.fetch_add(1, Ordering::SeqCst);
                        let v = src.member_value("value").and_then(|v| v.as_i64()).unwrap_or(0);
                        synthesize(&ty, [("value", Value::I64(v * 2))])
                    }) as Arc<dyn CustomLeafFactory>)
                },
            ),
        )
        .build();

    let descriptor = Arc::new(CompositeTypeDescriptor::new(&composite).unwrap());
    assert_eq!(constructed.load(Ordering::SeqCst), 1);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let descriptor = descriptor.clone();
            let composite = composite.clone();
            let doubled = doubled.clone();
            thread::spawn(move || {
                for i in 0..LOOKUPS {
                    let n = (t * LOOKUPS + i) as i64;
                    let instance = RecordInstance::builder(&composite)
                        .set("value", n)
                        .set(
                            "doubled",
                            synthesize(&doubled, [("value", Value::I64(0))]).unwrap(),
                        )
                        .build()
                        .unwrap();
                    let leaf = descriptor
                        .leaf_value(&instance, &doubled)
                        .unwrap()
                        .unwrap();
                    assert_eq!(leaf.get("value"), Some(&Value::I64(n * 2)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    assert_eq!(invoked.load(Ordering::SeqCst), THREADS * LOOKUPS);
}

#[test]
fn cache_builds_each_composite_once_across_threads() {
    let leaf = RecordTypeBuilder::new("Leaf")
        .runtime()
        .target([ElementKind::Method])
        .build();
    let composites: Vec<_> = (0..4)
        .map(|i| {
            RecordTypeBuilder::new(format!("Composite{}", i))
                .runtime()
                .target([ElementKind::Method])
                .leaf_member("leaf", leaf.clone())
                .build()
        })
        .collect();

    let cache = Arc::new(DescriptorCache::default());
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = cache.clone();
            let composites = composites.clone();
            thread::spawn(move || {
                for ty in &composites {
                    let descriptor = cache.get_or_build(ty).unwrap();
                    assert_eq!(descriptor.leaf_count(), 1);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.len(), composites.len());
}
