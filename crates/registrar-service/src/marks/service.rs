use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use registrar_auth::access::{AccessEnforcer, Action, ResourceKind};
use registrar_core::error::AppError;
use registrar_core::result::AppResult;
use registrar_core::types::RecordId;
use registrar_entity::account::Account;
use registrar_entity::marks::{Grade, Mark};
use registrar_entity::subject::Subject;
use registrar_store::JsonCollection;

use crate::context::RequestContext;

/// One mark entry for one student and subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksSubmission {
    /// The student the marks belong to.
    pub user_id: RecordId,
    /// Subject the marks were earned in.
    pub subject: Subject,
    /// Score out of 100.
    pub marks: u8,
}

/// Handles marks submission and scoped reads.
#[derive(Clone)]
pub struct MarksService {
    /// Marks collection.
    marks: Arc<JsonCollection<Mark>>,
    /// Accounts collection, for validating submission targets.
    accounts: Arc<JsonCollection<Account>>,
    /// Access enforcer.
    access: Arc<AccessEnforcer>,
}

impl MarksService {
    /// Creates a new marks service.
    pub fn new(
        marks: Arc<JsonCollection<Mark>>,
        accounts: Arc<JsonCollection<Account>>,
        access: Arc<AccessEnforcer>,
    ) -> Self {
        Self {
            marks,
            accounts,
            access,
        }
    }

    /// Records a student's marks for a subject.
    ///
    /// One record exists per student and subject; resubmitting overwrites
    /// the previous score. The letter grade is derived from the score, never
    /// supplied by the caller.
    pub async fn submit(&self, ctx: &RequestContext, submission: MarksSubmission) -> AppResult<Mark> {
        self.access
            .authorize_write(Some(&ctx.claims), ResourceKind::Marks, Action::Create)?;

        if submission.marks > 100 {
            return Err(AppError::validation("Marks must be between 0 and 100"));
        }
        self.require_student(submission.user_id).await?;

        let grade = Grade::from_marks(submission.marks);
        let recorded_by = ctx.account_id();
        let now = Utc::now();

        let record = self
            .marks
            .upsert_by_key(
                |mark| mark.user_id == submission.user_id && mark.subject == submission.subject,
                |mark| {
                    mark.marks = submission.marks;
                    mark.grade = grade;
                    mark.updated_by = recorded_by;
                    mark.updated_at = now;
                },
                || Mark {
                    user_id: submission.user_id,
                    subject: submission.subject,
                    marks: submission.marks,
                    grade,
                    updated_by: recorded_by,
                    updated_at: now,
                },
            )
            .await?;

        info!(
            user_id = submission.user_id,
            subject = %submission.subject,
            grade = %record.grade,
            "Marks recorded"
        );
        Ok(record)
    }

    /// All mark records visible to the caller.
    ///
    /// Admins and teachers see every student; students see only their own
    /// marks.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Mark>> {
        let scope = self
            .access
            .read_scope(Some(&ctx.claims), ResourceKind::Marks)?;
        self.marks
            .find_where(move |mark| scope.permits(mark.user_id, None))
            .await
    }

    /// One student's marks across subjects, if the caller may see them.
    pub async fn for_student(
        &self,
        ctx: &RequestContext,
        user_id: RecordId,
    ) -> AppResult<Vec<Mark>> {
        let scope = self
            .access
            .read_scope(Some(&ctx.claims), ResourceKind::Marks)?;
        if !scope.permits(user_id, None) {
            return Err(AppError::authorization("You may only view your own marks"));
        }

        self.marks
            .find_where(move |mark| mark.user_id == user_id)
            .await
    }

    async fn require_student(&self, user_id: RecordId) -> AppResult<()> {
        let account = self
            .accounts
            .find_where(|account| account.id == user_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Account {user_id} not found")))?;

        if !account.role.is_student() {
            return Err(AppError::validation(
                "Marks can only be submitted for student accounts",
            ));
        }
        Ok(())
    }
}
