use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use registrar_auth::access::{AccessEnforcer, Action, ResourceKind};
use registrar_core::error::AppError;
use registrar_core::result::AppResult;
use registrar_core::types::RecordId;
use registrar_entity::document::Document;
use registrar_store::JsonCollection;

use crate::context::RequestContext;

/// Metadata for a document upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    /// Display title.
    pub title: String,
    /// Stored file name.
    pub file_name: String,
}

/// Handles shared document metadata.
#[derive(Clone)]
pub struct DocumentService {
    /// Documents collection.
    documents: Arc<JsonCollection<Document>>,
    /// Access enforcer.
    access: Arc<AccessEnforcer>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(documents: Arc<JsonCollection<Document>>, access: Arc<AccessEnforcer>) -> Self {
        Self { documents, access }
    }

    /// Records an uploaded document's metadata.
    pub async fn upload(&self, ctx: &RequestContext, upload: DocumentUpload) -> AppResult<Document> {
        self.access
            .authorize_write(Some(&ctx.claims), ResourceKind::Documents, Action::Create)?;

        let title = upload.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::validation("Document title must not be empty"));
        }
        let file_name = upload.file_name.trim().to_string();
        if file_name.is_empty() {
            return Err(AppError::validation("Document file name must not be empty"));
        }

        let document = self
            .documents
            .create(Document {
                id: 0,
                title,
                file_name,
                uploaded_by: ctx.account_id(),
                upload_date: Utc::now(),
            })
            .await?;

        info!(
            document_id = document.id,
            uploaded_by = ctx.account_id(),
            "Document uploaded"
        );
        Ok(document)
    }

    /// All shared documents.
    ///
    /// The listing is public, so `caller` may be `None`.
    pub async fn list(&self, caller: Option<&RequestContext>) -> AppResult<Vec<Document>> {
        let scope = self
            .access
            .read_scope(caller.map(|ctx| &ctx.claims), ResourceKind::Documents)?;
        self.documents
            .find_where(move |document| scope.permits(document.uploaded_by, None))
            .await
    }

    /// Deletes a document's metadata record.
    pub async fn delete(&self, ctx: &RequestContext, id: RecordId) -> AppResult<()> {
        self.access
            .authorize_write(Some(&ctx.claims), ResourceKind::Documents, Action::Delete)?;
        self.documents.delete(id).await?;

        info!(document_id = id, "Document deleted");
        Ok(())
    }
}
