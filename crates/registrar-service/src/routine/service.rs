use std::sync::Arc;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use registrar_auth::access::{AccessEnforcer, Action, ResourceKind};
use registrar_core::error::AppError;
use registrar_core::result::AppResult;
use registrar_core::types::RecordId;
use registrar_entity::account::Account;
use registrar_entity::routine::{Routine, Weekday};
use registrar_entity::subject::Subject;
use registrar_store::JsonCollection;

use crate::context::RequestContext;

/// Fields for creating or updating a routine period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineDraft {
    /// Class section the period belongs to.
    pub section: String,
    /// Day of the week.
    pub day: Weekday,
    /// Subject taught.
    pub subject: Subject,
    /// Period start time.
    pub start_time: NaiveTime,
    /// Period end time.
    pub end_time: NaiveTime,
    /// Account id of the assigned teacher.
    pub teacher_id: RecordId,
}

/// Handles routine creation, updates, and scoped reads.
#[derive(Clone)]
pub struct RoutineService {
    /// Routines collection.
    routines: Arc<JsonCollection<Routine>>,
    /// Accounts collection, for validating teacher references.
    accounts: Arc<JsonCollection<Account>>,
    /// Access enforcer.
    access: Arc<AccessEnforcer>,
}

impl RoutineService {
    /// Creates a new routine service.
    pub fn new(
        routines: Arc<JsonCollection<Routine>>,
        accounts: Arc<JsonCollection<Account>>,
        access: Arc<AccessEnforcer>,
    ) -> Self {
        Self {
            routines,
            accounts,
            access,
        }
    }

    /// Creates a routine period.
    pub async fn create(&self, ctx: &RequestContext, draft: RoutineDraft) -> AppResult<Routine> {
        self.access
            .authorize_write(Some(&ctx.claims), ResourceKind::Routines, Action::Create)?;
        let draft = self.validate(draft).await?;

        let routine = self
            .routines
            .create(Routine {
                id: 0,
                section: draft.section,
                day: draft.day,
                subject: draft.subject,
                start_time: draft.start_time,
                end_time: draft.end_time,
                teacher_id: draft.teacher_id,
            })
            .await?;

        info!(routine_id = routine.id, section = %routine.section, "Routine created");
        Ok(routine)
    }

    /// Replaces an existing routine period.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: RecordId,
        draft: RoutineDraft,
    ) -> AppResult<Routine> {
        self.access
            .authorize_write(Some(&ctx.claims), ResourceKind::Routines, Action::Update)?;
        let draft = self.validate(draft).await?;

        let routine = self
            .routines
            .update(Routine {
                id,
                section: draft.section,
                day: draft.day,
                subject: draft.subject,
                start_time: draft.start_time,
                end_time: draft.end_time,
                teacher_id: draft.teacher_id,
            })
            .await?;

        info!(routine_id = id, "Routine updated");
        Ok(routine)
    }

    /// Deletes a routine period.
    pub async fn delete(&self, ctx: &RequestContext, id: RecordId) -> AppResult<()> {
        self.access
            .authorize_write(Some(&ctx.claims), ResourceKind::Routines, Action::Delete)?;
        self.routines.delete(id).await?;

        info!(routine_id = id, "Routine deleted");
        Ok(())
    }

    /// Fetches one routine, if the caller may see it.
    pub async fn get(&self, ctx: &RequestContext, id: RecordId) -> AppResult<Routine> {
        let scope = self
            .access
            .read_scope(Some(&ctx.claims), ResourceKind::Routines)?;
        let routine = self.routines.find_by_id(id).await?;

        if !scope.permits(routine.teacher_id, Some(&routine.section)) {
            return Err(AppError::authorization(
                "You do not have access to this routine",
            ));
        }
        Ok(routine)
    }

    /// All routines visible to the caller.
    ///
    /// Admins see every routine, teachers the periods assigned to them,
    /// and students their own section's schedule.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Routine>> {
        let scope = self
            .access
            .read_scope(Some(&ctx.claims), ResourceKind::Routines)?;
        self.routines
            .find_where(move |routine| scope.permits(routine.teacher_id, Some(&routine.section)))
            .await
    }

    async fn validate(&self, draft: RoutineDraft) -> AppResult<RoutineDraft> {
        let section = draft.section.trim().to_string();
        if section.is_empty() {
            return Err(AppError::validation("Routine section must not be empty"));
        }
        if draft.start_time >= draft.end_time {
            return Err(AppError::validation(
                "Routine start time must be before its end time",
            ));
        }

        let teacher = self
            .accounts
            .find_where(|account| account.id == draft.teacher_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Account {} not found", draft.teacher_id)))?;
        if !teacher.role.is_teacher() {
            return Err(AppError::validation(
                "Routines must reference a teacher account",
            ));
        }

        Ok(RoutineDraft { section, ..draft })
    }
}
