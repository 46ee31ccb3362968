//! Per-resource access rule definitions.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use registrar_entity::account::Role;

/// Record collections guarded by the policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Accounts,
    Attendance,
    Routines,
    Documents,
    Policies,
    Marks,
}

impl ResourceKind {
    /// Plural noun used mid-sentence in denial messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Attendance => "attendance records",
            Self::Routines => "routines",
            Self::Documents => "documents",
            Self::Policies => "policies",
            Self::Marks => "marks",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Accounts => "Accounts",
            Self::Attendance => "Attendance records",
            Self::Routines => "Routines",
            Self::Documents => "Documents",
            Self::Policies => "Policies",
            Self::Marks => "Marks",
        };
        write!(f, "{name}")
    }
}

/// Mutating actions a caller can request on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    /// Verb used in denial messages.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Who may write a resource.
#[derive(Debug, Clone, Copy)]
pub enum WriteAccess {
    /// Anyone may create, including unauthenticated callers. The only open
    /// resource is accounts (signup); its records are otherwise immutable.
    Open,
    /// Only the listed roles, for all mutating actions.
    Roles(&'static [Role]),
}

/// How reads of a resource are answered.
#[derive(Debug, Clone, Copy)]
pub enum ReadAccess {
    /// Anyone may list, no identity required.
    Public,
    /// Authenticated callers get a role-dependent visibility scope.
    Scoped,
    /// Nobody may list.
    Denied,
}

/// The rules for one resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceRules {
    /// Write rule, uniform across create/update/delete.
    pub write: WriteAccess,
    /// Read rule.
    pub read: ReadAccess,
}

/// The full access policy table.
///
/// Every rule the system applies lives in this one table; the enforcer
/// only interprets it. Changing who may do what is an edit here, not a
/// hunt through the services.
#[derive(Debug, Clone)]
pub struct AccessPolicies {
    /// Resource → rules.
    rules: HashMap<ResourceKind, ResourceRules>,
}

impl AccessPolicies {
    /// Creates the default policy table.
    pub fn new() -> Self {
        let mut rules = HashMap::new();

        rules.insert(
            ResourceKind::Accounts,
            ResourceRules {
                write: WriteAccess::Open,
                read: ReadAccess::Denied,
            },
        );
        rules.insert(
            ResourceKind::Attendance,
            ResourceRules {
                write: WriteAccess::Roles(&[Role::Admin, Role::Teacher]),
                read: ReadAccess::Scoped,
            },
        );
        rules.insert(
            ResourceKind::Routines,
            ResourceRules {
                write: WriteAccess::Roles(&[Role::Admin]),
                read: ReadAccess::Scoped,
            },
        );
        rules.insert(
            ResourceKind::Documents,
            ResourceRules {
                write: WriteAccess::Roles(&[Role::Teacher]),
                read: ReadAccess::Public,
            },
        );
        rules.insert(
            ResourceKind::Policies,
            ResourceRules {
                write: WriteAccess::Roles(&[Role::Admin]),
                read: ReadAccess::Public,
            },
        );
        rules.insert(
            ResourceKind::Marks,
            ResourceRules {
                write: WriteAccess::Roles(&[Role::Admin, Role::Teacher]),
                read: ReadAccess::Scoped,
            },
        );

        Self { rules }
    }

    /// Returns the rules for the given resource.
    pub fn rules_for(&self, resource: ResourceKind) -> ResourceRules {
        self.rules.get(&resource).copied().unwrap_or(ResourceRules {
            write: WriteAccess::Roles(&[]),
            read: ReadAccess::Denied,
        })
    }
}

impl Default for AccessPolicies {
    fn default() -> Self {
        Self::new()
    }
}
