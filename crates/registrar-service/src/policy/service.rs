use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use registrar_auth::access::{AccessEnforcer, Action, ResourceKind};
use registrar_core::error::AppError;
use registrar_core::result::AppResult;
use registrar_core::types::RecordId;
use registrar_entity::policy::{Policy, PolicyFileType};
use registrar_store::JsonCollection;

use crate::context::RequestContext;

/// Metadata for a policy upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyUpload {
    /// Display title.
    pub title: String,
    /// Stored file name; must end in `.pdf` or `.docx`.
    pub file_name: String,
}

/// Handles school policy publication.
#[derive(Clone)]
pub struct PolicyService {
    /// Policies collection.
    policies: Arc<JsonCollection<Policy>>,
    /// Access enforcer.
    access: Arc<AccessEnforcer>,
}

impl PolicyService {
    /// Creates a new policy service.
    pub fn new(policies: Arc<JsonCollection<Policy>>, access: Arc<AccessEnforcer>) -> Self {
        Self { policies, access }
    }

    /// Publishes a school policy document.
    ///
    /// The file type is derived from the file name's extension; anything
    /// other than PDF or DOCX is rejected.
    pub async fn publish(&self, ctx: &RequestContext, upload: PolicyUpload) -> AppResult<Policy> {
        self.access
            .authorize_write(Some(&ctx.claims), ResourceKind::Policies, Action::Create)?;

        let title = upload.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::validation("Policy title must not be empty"));
        }
        let file_name = upload.file_name.trim().to_string();
        let file_type = PolicyFileType::from_file_name(&file_name)?;

        let policy = self
            .policies
            .create(Policy {
                id: 0,
                title,
                file_name,
                file_type,
                uploaded_by: ctx.account_id(),
                upload_date: Utc::now(),
            })
            .await?;

        info!(policy_id = policy.id, file_type = %policy.file_type, "Policy published");
        Ok(policy)
    }

    /// All published policies.
    ///
    /// The listing is public, so `caller` may be `None`.
    pub async fn list(&self, caller: Option<&RequestContext>) -> AppResult<Vec<Policy>> {
        let scope = self
            .access
            .read_scope(caller.map(|ctx| &ctx.claims), ResourceKind::Policies)?;
        self.policies
            .find_where(move |policy| scope.permits(policy.uploaded_by, None))
            .await
    }

    /// Withdraws a published policy.
    pub async fn delete(&self, ctx: &RequestContext, id: RecordId) -> AppResult<()> {
        self.access
            .authorize_write(Some(&ctx.claims), ResourceKind::Policies, Action::Delete)?;
        self.policies.delete(id).await?;

        info!(policy_id = id, "Policy withdrawn");
        Ok(())
    }
}
