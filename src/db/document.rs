// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed document store handle.
//!
//! Provides high-level operations for:
//! - Generic CRUD on any [`Document`] (teams, users, activities, leaderboard, workouts)
//! - Email lookup for users
//! - Atomic replacement of whole collections (seeding)

use crate::config::{Config, StorageBackend};
use crate::db::memory::MemoryStore;
use crate::db::{collections, firestore, Document};
use crate::error::AppError;
use crate::models::User;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
enum Backend {
    Firestore(::firestore::FirestoreDb),
    Memory(Arc<MemoryStore>),
}

/// Document database client.
#[derive(Clone)]
pub struct DocumentDb {
    backend: Backend,
}

/// A serialized document waiting to be written.
#[derive(Debug, Clone)]
pub struct PendingDocument {
    pub collection: &'static str,
    pub id: String,
    pub body: serde_json::Value,
}

impl PendingDocument {
    pub fn from_document<T: Document>(doc: &T) -> Result<Self, AppError> {
        Ok(Self {
            collection: T::COLLECTION,
            id: doc.document_id().to_string(),
            body: to_json(doc)?,
        })
    }
}

/// Result of [`DocumentDb::replace_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub deleted: usize,
    pub written: usize,
}

fn to_json<T: Serialize>(doc: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(doc)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize document: {}", e)))
}

fn from_json<T: Document>(value: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| {
        AppError::Database(format!(
            "Malformed document in {}: {}",
            T::COLLECTION,
            e
        ))
    })
}

impl DocumentDb {
    /// Open the store selected by the configuration.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage {
            StorageBackend::Firestore => Self::new_firestore(&config.gcp_project_id).await,
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on exit");
                Ok(Self::new_in_memory())
            }
        }
    }

    /// Create a Firestore-backed client.
    pub async fn new_firestore(project_id: &str) -> Result<Self, AppError> {
        let client = firestore::connect(project_id).await?;
        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create an empty in-memory store.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    // ─── Generic Document Operations ─────────────────────────────

    /// Get a document by ID.
    pub async fn get<T: Document>(&self, id: &str) -> Result<Option<T>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => firestore::get(client, T::COLLECTION, id).await,
            Backend::Memory(store) => store
                .get(T::COLLECTION, id)
                .map(from_json)
                .transpose(),
        }
    }

    /// Get a document by ID, failing with `NotFound` if absent.
    pub async fn require<T: Document>(&self, id: &str) -> Result<T, AppError> {
        self.get(id).await?.ok_or_else(|| {
            AppError::NotFound(format!("No document {} in {}", id, T::COLLECTION))
        })
    }

    /// List a whole collection in creation order.
    pub async fn list<T: Document>(&self) -> Result<Vec<T>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => firestore::list(client, T::COLLECTION).await,
            Backend::Memory(store) => store
                .list(T::COLLECTION)
                .into_iter()
                .map(from_json)
                .collect(),
        }
    }

    /// Create or overwrite a document.
    pub async fn put<T: Document>(&self, doc: &T) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                firestore::put(client, T::COLLECTION, doc.document_id(), doc).await
            }
            Backend::Memory(store) => {
                store.put(T::COLLECTION, doc.document_id().to_string(), to_json(doc)?);
                Ok(())
            }
        }
    }

    /// Delete a document, failing with `NotFound` if absent.
    pub async fn delete<T: Document>(&self, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                // Firestore deletes are no-ops for missing documents
                self.require::<T>(id).await?;
                firestore::delete(client, T::COLLECTION, id).await
            }
            Backend::Memory(store) => {
                if store.delete(T::COLLECTION, id) {
                    Ok(())
                } else {
                    Err(AppError::NotFound(format!(
                        "No document {} in {}",
                        id,
                        T::COLLECTION
                    )))
                }
            }
        }
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &'static str) -> Result<usize, AppError> {
        match &self.backend {
            Backend::Firestore(client) => Ok(firestore::list_ids(client, collection).await?.len()),
            Backend::Memory(store) => Ok(store.count(collection)),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Find the user registered with an email address.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let mut users: Vec<User> = match &self.backend {
            Backend::Firestore(client) => {
                firestore::find_eq(client, collections::USERS, "email", email).await?
            }
            Backend::Memory(store) => store
                .find_eq(collections::USERS, "email", email)
                .into_iter()
                .map(from_json)
                .collect::<Result<_, _>>()?,
        };

        if users.len() > 1 {
            tracing::warn!(email, count = users.len(), "Duplicate email in users collection");
        }
        Ok(users.pop())
    }

    // ─── Bulk Replacement ────────────────────────────────────────

    /// Atomically replace every application collection with `documents`.
    ///
    /// Either all of `documents` become the new contents of the store, or
    /// the store is left as it was.
    pub async fn replace_all(
        &self,
        documents: Vec<PendingDocument>,
    ) -> Result<ReplaceOutcome, AppError> {
        let written = documents.len();
        let deleted = match &self.backend {
            Backend::Firestore(client) => {
                firestore::replace_all(client, &collections::ALL, &documents).await?
            }
            Backend::Memory(store) => store.replace_all(&collections::ALL, documents),
        };

        tracing::info!(deleted, written, "Replaced all collections");

        Ok(ReplaceOutcome { deleted, written })
    }
}
