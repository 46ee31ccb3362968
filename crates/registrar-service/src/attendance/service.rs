use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use registrar_auth::access::{AccessEnforcer, Action, ResourceKind};
use registrar_core::error::AppError;
use registrar_core::result::AppResult;
use registrar_core::types::RecordId;
use registrar_entity::account::Account;
use registrar_entity::attendance::{Attendance, AttendanceStatus};
use registrar_store::JsonCollection;

use crate::context::RequestContext;

/// A full attendance upload for one student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSubmission {
    /// The student the upload covers.
    pub user_id: RecordId,
    /// Date-keyed statuses; replaces the student's whole day map.
    pub days: BTreeMap<NaiveDate, AttendanceStatus>,
}

/// Handles attendance submissions and reads.
#[derive(Clone)]
pub struct AttendanceService {
    /// Attendance collection.
    attendance: Arc<JsonCollection<Attendance>>,
    /// Accounts collection, for validating submission targets.
    accounts: Arc<JsonCollection<Account>>,
    /// Access enforcer.
    access: Arc<AccessEnforcer>,
}

impl AttendanceService {
    /// Creates a new attendance service.
    pub fn new(
        attendance: Arc<JsonCollection<Attendance>>,
        accounts: Arc<JsonCollection<Account>>,
        access: Arc<AccessEnforcer>,
    ) -> Self {
        Self {
            attendance,
            accounts,
            access,
        }
    }

    /// Records a student's attendance.
    ///
    /// One record exists per student. A resubmission replaces the whole day
    /// map rather than merging into it, so the upload is always the source
    /// of truth for that student.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        submission: AttendanceSubmission,
    ) -> AppResult<Attendance> {
        self.access
            .authorize_write(Some(&ctx.claims), ResourceKind::Attendance, Action::Create)?;

        if submission.days.is_empty() {
            return Err(AppError::validation(
                "Attendance submission must cover at least one day",
            ));
        }
        self.require_student(submission.user_id).await?;

        let user_id = submission.user_id;
        let days = submission.days;
        let recorded_by = ctx.account_id();
        let now = Utc::now();

        let record = self
            .attendance
            .upsert_by_key(
                |record| record.user_id == user_id,
                |record| {
                    record.days = days.clone();
                    record.updated_by = recorded_by;
                    record.updated_at = now;
                },
                || Attendance {
                    user_id,
                    days: days.clone(),
                    updated_by: recorded_by,
                    updated_at: now,
                },
            )
            .await?;

        info!(user_id, days = record.days.len(), "Attendance recorded");
        Ok(record)
    }

    /// All attendance records visible to the caller.
    ///
    /// Admins and teachers see every student; students see only their own
    /// record.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Attendance>> {
        let scope = self
            .access
            .read_scope(Some(&ctx.claims), ResourceKind::Attendance)?;
        self.attendance
            .find_where(move |record| scope.permits(record.user_id, None))
            .await
    }

    /// One student's attendance record, if the caller may see it.
    pub async fn for_student(
        &self,
        ctx: &RequestContext,
        user_id: RecordId,
    ) -> AppResult<Attendance> {
        let scope = self
            .access
            .read_scope(Some(&ctx.claims), ResourceKind::Attendance)?;
        if !scope.permits(user_id, None) {
            return Err(AppError::authorization(
                "You may only view your own attendance",
            ));
        }

        self.attendance
            .find_where(|record| record.user_id == user_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::not_found(format!("No attendance recorded for account {user_id}"))
            })
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
                "Attendance can only be recorded for student accounts",
            ));
        }
        Ok(())
    }
}
