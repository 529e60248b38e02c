// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Documents are kept as JSON values grouped by collection and ordered by
//! document ID, matching the default ordering of a Firestore collection scan.
//! Used for local development without the emulator and for tests.

use crate::db::PendingDocument;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<&'static str, BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Value> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned())
    }

    /// All documents of a collection in document ID order.
    pub fn list(&self, collection: &str) -> Vec<Value> {
        self.collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Documents whose top-level string `field` equals `value`.
    pub fn find_eq(&self, collection: &str, field: &str, value: &str) -> Vec<Value> {
        self.collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| doc.get(field).and_then(Value::as_str) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    pub fn put(&self, collection: &'static str, id: String, doc: Value) {
        self.collections
            .entry(collection)
            .or_default()
            .insert(id, doc);
    }

    /// Remove a document. Returns `true` if it existed.
    pub fn delete(&self, collection: &str, id: &str) -> bool {
        self.collections
            .get_mut(collection)
            .map(|mut docs| docs.remove(id).is_some())
            .unwrap_or(false)
    }

    /// Clear `collections` and store `documents` in their place.
    ///
    /// Returns the number of documents removed.
    pub fn replace_all(&self, collections: &[&'static str], documents: Vec<PendingDocument>) -> usize {
        let mut fresh: BTreeMap<&'static str, BTreeMap<String, Value>> = collections
            .iter()
            .map(|&name| (name, BTreeMap::new()))
            .collect();

        for doc in documents {
            fresh
                .entry(doc.collection)
                .or_default()
                .insert(doc.id, doc.body);
        }

        let mut removed = 0;
        for (name, docs) in fresh {
            if let Some(old) = self.collections.insert(name, docs) {
                removed += old.len();
            }
        }
        removed
    }
}
