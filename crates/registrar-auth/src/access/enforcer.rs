//! Access enforcement — answers authorization questions from the policy table.

use registrar_core::error::AppError;
use registrar_core::result::AppResult;
use registrar_core::types::RecordId;
use registrar_entity::account::Role;

use crate::token::Claims;

use super::policies::{AccessPolicies, Action, ReadAccess, ResourceKind, WriteAccess};

/// Visibility scope granted to a caller for reads of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every record.
    All,
    /// Records owned by the given account.
    Owner(RecordId),
    /// Records belonging to the given section.
    Section(String),
}

impl Scope {
    /// Whether a record with this owner and section is visible.
    ///
    /// Resources without a section pass `None`. A `Section` scope then
    /// never matches, which is correct: section scopes are only handed out
    /// for sectioned resources.
    pub fn permits(&self, owner: RecordId, section: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Owner(account_id) => *account_id == owner,
            Self::Section(own_section) => section == Some(own_section.as_str()),
        }
    }
}

/// Enforces the access policy table.
#[derive(Debug, Clone)]
pub struct AccessEnforcer {
    /// The policy configuration.
    policies: AccessPolicies,
}

impl AccessEnforcer {
    /// Creates a new enforcer with the default policy table.
    pub fn new() -> Self {
        Self {
            policies: AccessPolicies::new(),
        }
    }

    /// Checks whether the caller may perform a mutating action.
    ///
    /// `None` stands for an unauthenticated caller. Protected resources
    /// answer that with an authentication failure, not a denial; the
    /// caller's problem is a missing identity, not an insufficient role.
    pub fn authorize_write(
        &self,
        identity: Option<&Claims>,
        resource: ResourceKind,
        action: Action,
    ) -> AppResult<()> {
        match self.policies.rules_for(resource).write {
            WriteAccess::Open => {
                if matches!(action, Action::Create) {
                    Ok(())
                } else {
                    Err(AppError::authorization(format!(
                        "{resource} cannot be modified"
                    )))
                }
            }
            WriteAccess::Roles(allowed) => {
                let claims = identity
                    .ok_or_else(|| AppError::authentication("Authentication required"))?;
                if allowed.contains(&claims.role) {
                    Ok(())
                } else {
                    Err(AppError::authorization(format!(
                        "Only {} can {} {}",
                        allowed_roles(allowed),
                        action.verb(),
                        resource.noun()
                    )))
                }
            }
        }
    }

    /// Resolves the caller's visibility scope for reads of a resource.
    pub fn read_scope(
        &self,
        identity: Option<&Claims>,
        resource: ResourceKind,
    ) -> AppResult<Scope> {
        match self.policies.rules_for(resource).read {
            ReadAccess::Public => Ok(Scope::All),
            ReadAccess::Denied => Err(AppError::authorization(format!(
                "{resource} cannot be listed"
            ))),
            ReadAccess::Scoped => {
                let claims = identity
                    .ok_or_else(|| AppError::authentication("Authentication required"))?;
                Ok(match claims.role {
                    Role::Admin => Scope::All,
                    Role::Teacher => match resource {
                        ResourceKind::Routines => Scope::Owner(claims.sub),
                        _ => Scope::All,
                    },
                    Role::Student => match resource {
                        ResourceKind::Routines => {
                            let section = claims.section.as_ref().ok_or_else(|| {
                                AppError::authorization(
                                    "Student account has no section assigned",
                                )
                            })?;
                            Scope::Section(section.clone())
                        }
                        _ => Scope::Owner(claims.sub),
                    },
                })
            }
        }
    }
}

impl Default for AccessEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders an allowed-role list for denial messages.
fn allowed_roles(roles: &[Role]) -> String {
    let names: Vec<&str> = roles
        .iter()
        .map(|role| match role {
            Role::Admin => "Admins",
            Role::Teacher => "Teachers",
            Role::Student => "Students",
        })
        .collect();
    names.join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use registrar_core::error::ErrorKind;

    fn claims(role: Role, section: Option<&str>) -> Claims {
        Claims {
            sub: 7,
            email: "someone@school.edu".to_string(),
            role,
            section: section.map(str::to_string),
            iat: 0,
            exp: 3600,
        }
    }

    fn enforcer() -> AccessEnforcer {
        AccessEnforcer::new()
    }

    #[test]
    fn test_routine_writes_are_admin_only() {
        let e = enforcer();
        let admin = claims(Role::Admin, None);
        let teacher = claims(Role::Teacher, None);
        let student = claims(Role::Student, Some("A"));

        for action in [Action::Create, Action::Update, Action::Delete] {
            assert!(e
                .authorize_write(Some(&admin), ResourceKind::Routines, action)
                .is_ok());
            assert!(e
                .authorize_write(Some(&teacher), ResourceKind::Routines, action)
                .is_err());
            assert!(e
                .authorize_write(Some(&student), ResourceKind::Routines, action)
                .is_err());
        }
    }

    #[test]
    fn test_denial_message_names_roles_verb_and_resource() {
        let err = enforcer()
            .authorize_write(
                Some(&claims(Role::Student, Some("A"))),
                ResourceKind::Routines,
                Action::Create,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(err.message, "Only Admins can create routines");

        let err = enforcer()
            .authorize_write(
                Some(&claims(Role::Student, Some("A"))),
                ResourceKind::Marks,
                Action::Create,
            )
            .unwrap_err();
        assert_eq!(err.message, "Only Admins and Teachers can create marks");
    }

    #[test]
    fn test_attendance_and_marks_writes_admit_staff_only() {
        let e = enforcer();
        for resource in [ResourceKind::Attendance, ResourceKind::Marks] {
            assert!(e
                .authorize_write(Some(&claims(Role::Admin, None)), resource, Action::Create)
                .is_ok());
            assert!(e
                .authorize_write(Some(&claims(Role::Teacher, None)), resource, Action::Create)
                .is_ok());
            assert!(e
                .authorize_write(
                    Some(&claims(Role::Student, Some("A"))),
                    resource,
                    Action::Create
                )
                .is_err());
        }
    }

    #[test]
    fn test_document_writes_are_teacher_only() {
        let e = enforcer();
        assert!(e
            .authorize_write(
                Some(&claims(Role::Teacher, None)),
                ResourceKind::Documents,
                Action::Create
            )
            .is_ok());
        // Admins do not share teaching documents.
        assert!(e
            .authorize_write(
                Some(&claims(Role::Admin, None)),
                ResourceKind::Documents,
                Action::Create
            )
            .is_err());
    }

    #[test]
    fn test_policy_writes_are_admin_only() {
        let e = enforcer();
        assert!(e
            .authorize_write(
                Some(&claims(Role::Admin, None)),
                ResourceKind::Policies,
                Action::Create
            )
            .is_ok());
        assert!(e
            .authorize_write(
                Some(&claims(Role::Teacher, None)),
                ResourceKind::Policies,
                Action::Delete
            )
            .is_err());
    }

    #[test]
    fn test_missing_identity_on_protected_resource_is_authentication() {
        let err = enforcer()
            .authorize_write(None, ResourceKind::Routines, Action::Create)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        let err = enforcer()
            .read_scope(None, ResourceKind::Marks)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_signup_is_open_but_accounts_stay_immutable() {
        let e = enforcer();
        assert!(e
            .authorize_write(None, ResourceKind::Accounts, Action::Create)
            .is_ok());
        assert!(e
            .authorize_write(
                Some(&claims(Role::Admin, None)),
                ResourceKind::Accounts,
                Action::Update
            )
            .is_err());
    }

    #[test]
    fn test_account_reads_are_denied_for_everyone() {
        let err = enforcer()
            .read_scope(Some(&claims(Role::Admin, None)), ResourceKind::Accounts)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_documents_and_policies_read_publicly() {
        let e = enforcer();
        assert_eq!(e.read_scope(None, ResourceKind::Documents).unwrap(), Scope::All);
        assert_eq!(e.read_scope(None, ResourceKind::Policies).unwrap(), Scope::All);
    }

    #[test]
    fn test_routine_read_scopes_per_role() {
        let e = enforcer();
        assert_eq!(
            e.read_scope(Some(&claims(Role::Admin, None)), ResourceKind::Routines)
                .unwrap(),
            Scope::All
        );
        assert_eq!(
            e.read_scope(Some(&claims(Role::Teacher, None)), ResourceKind::Routines)
                .unwrap(),
            Scope::Owner(7)
        );
        assert_eq!(
            e.read_scope(
                Some(&claims(Role::Student, Some("B"))),
                ResourceKind::Routines
            )
            .unwrap(),
            Scope::Section("B".to_string())
        );
    }

    #[test]
    fn test_student_without_section_cannot_read_routines() {
        let err = enforcer()
            .read_scope(Some(&claims(Role::Student, None)), ResourceKind::Routines)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_attendance_and_marks_read_scopes() {
        let e = enforcer();
        for resource in [ResourceKind::Attendance, ResourceKind::Marks] {
            assert_eq!(
                e.read_scope(Some(&claims(Role::Teacher, None)), resource)
                    .unwrap(),
                Scope::All
            );
            assert_eq!(
                e.read_scope(Some(&claims(Role::Student, Some("A"))), resource)
                    .unwrap(),
                Scope::Owner(7)
            );
        }
    }

    #[test]
    fn test_scope_permits() {
        assert!(Scope::All.permits(99, None));
        assert!(Scope::Owner(7).permits(7, None));
        assert!(!Scope::Owner(7).permits(8, None));
        assert!(Scope::Section("A".to_string()).permits(99, Some("A")));
        assert!(!Scope::Section("A".to_string()).permits(99, Some("B")));
        assert!(!Scope::Section("A".to_string()).permits(99, None));
    }
}
