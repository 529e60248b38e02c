// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore backend: connection setup and document operations.

use crate::db::PendingDocument;
use crate::error::AppError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
pub const BATCH_SIZE: usize = 400;

/// Only the `id` field of a stored document.
#[derive(Debug, Deserialize)]
struct DocumentRef {
    id: String,
}

/// Connect to Firestore.
///
/// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
pub async fn connect(project_id: &str) -> Result<firestore::FirestoreDb, AppError> {
    // If the emulator environment variable is set, use unauthenticated connection
    // to avoid local credential warnings and leakage.
    if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
        return connect_emulator(project_id).await;
    }

    let client = firestore::FirestoreDb::new(project_id)
        .await
        .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

    tracing::info!(project = project_id, "Connected to Firestore");

    Ok(client)
}

/// Connect to the emulator with unauthenticated access.
async fn connect_emulator(project_id: &str) -> Result<firestore::FirestoreDb, AppError> {
    tracing::info!("Using unauthenticated connection for Firestore Emulator");

    let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
        Ok(gcloud_sdk::Token {
            token_type: "Bearer".to_string(),
            token: gcloud_sdk::SecretValue::new(
                "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                    .to_string()
                    .into(),
            ),
            expiry: chrono::Utc::now() + chrono::Duration::hours(1),
        })
    });

    let options = firestore::FirestoreDbOptions::new(project_id.to_string());

    let client = firestore::FirestoreDb::with_options_token_source(
        options,
        gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
        gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
    )
    .await
    .map_err(|e| AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e)))?;

    tracing::info!(
        project = project_id,
        "Connected to Firestore (Emulator/Unauthenticated)"
    );

    Ok(client)
}

pub async fn get<T>(
    client: &firestore::FirestoreDb,
    collection: &str,
    id: &str,
) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Send,
{
    client
        .fluent()
        .select()
        .by_id_in(collection)
        .obj()
        .one(id)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// All documents of a collection, in document ID order.
pub async fn list<T>(client: &firestore::FirestoreDb, collection: &str) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Send,
{
    client
        .fluent()
        .select()
        .from(collection)
        .obj()
        .query()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Documents whose string `field` equals `value`.
pub async fn find_eq<T>(
    client: &firestore::FirestoreDb,
    collection: &str,
    field: &str,
    value: &str,
) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Send,
{
    client
        .fluent()
        .select()
        .from(collection)
        .filter(|q| q.for_all([q.field(field).eq(value)]))
        .obj()
        .query()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Create or overwrite a document.
pub async fn put<T>(
    client: &firestore::FirestoreDb,
    collection: &str,
    id: &str,
    doc: &T,
) -> Result<(), AppError>
where
    T: Serialize + DeserializeOwned + Sync + Send,
{
    let _: () = client
        .fluent()
        .update()
        .in_col(collection)
        .document_id(id)
        .object(doc)
        .execute()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    Ok(())
}

pub async fn delete(
    client: &firestore::FirestoreDb,
    collection: &str,
    id: &str,
) -> Result<(), AppError> {
    client
        .fluent()
        .delete()
        .from(collection)
        .document_id(id)
        .execute()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    Ok(())
}

/// IDs of every document in a collection.
pub async fn list_ids(client: &firestore::FirestoreDb, collection: &str) -> Result<Vec<String>, AppError> {
    let refs: Vec<DocumentRef> = list(client, collection).await?;
    Ok(refs.into_iter().map(|r| r.id).collect())
}

/// Delete documents in chunks, one transaction per chunk.
async fn batch_delete(
    client: &firestore::FirestoreDb,
    collection: &str,
    ids: &[String],
) -> Result<(), AppError> {
    for chunk in ids.chunks(BATCH_SIZE) {
        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        for doc_id in chunk {
            client
                .fluent()
                .delete()
                .from(collection)
                .document_id(doc_id)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!(
                        "Failed to add deletion to transaction for {}: {}",
                        collection, e
                    ))
                })?;
        }

        transaction.commit().await.map_err(|e| {
            AppError::Database(format!("Failed to commit batch deletion: {}", e))
        })?;
    }

    Ok(())
}

/// Replace the contents of `collections` with `documents` in one transaction.
///
/// When the existing documents plus the new ones exceed what a single
/// transaction can hold, the existing documents are cleared in batches
/// first; the new documents are still committed together.
///
/// Returns the number of documents deleted.
pub async fn replace_all(
    client: &firestore::FirestoreDb,
    collections: &[&'static str],
    documents: &[PendingDocument],
) -> Result<usize, AppError> {
    if documents.len() > BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "Cannot write {} documents in one transaction (limit {})",
            documents.len(),
            BATCH_SIZE
        )));
    }

    let mut existing = Vec::with_capacity(collections.len());
    for &collection in collections {
        existing.push((collection, list_ids(client, collection).await?));
    }
    let deleted: usize = existing.iter().map(|(_, ids)| ids.len()).sum();

    let delete_in_transaction = deleted + documents.len() <= BATCH_SIZE;
    if !delete_in_transaction {
        tracing::warn!(
            deleted,
            written = documents.len(),
            "Too many documents for a single transaction; clearing existing data in batches"
        );
        for (collection, ids) in &existing {
            batch_delete(client, collection, ids).await?;
        }
    }

    let mut transaction = client
        .begin_transaction()
        .await
        .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

    if delete_in_transaction {
        for (collection, ids) in &existing {
            for doc_id in ids {
                client
                    .fluent()
                    .delete()
                    .from(*collection)
                    .document_id(doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }
        }
    }

    for doc in documents {
        client
            .fluent()
            .update()
            .in_col(doc.collection)
            .document_id(&doc.id)
            .object(&doc.body)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!(
                    "Failed to add {} document to transaction: {}",
                    doc.collection, e
                ))
            })?;
    }

    transaction
        .commit()
        .await
        .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

    Ok(deleted)
}
