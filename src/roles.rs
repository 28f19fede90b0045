// Role capability model
//
// Every permission check in the crate goes through `Role::allows`; the
// `can_*` predicates are thin named views over it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::WorkflowError;

/// Resolved role of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
    /// Any role string we do not know. Holds no capabilities.
    #[serde(other)]
    Unrecognized,
}

/// Actions a role may be allowed to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Edit,
    Delete,
    Publish,
    ApproveReview,
    SubmitForReview,
    Archive,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::Edit,
        Capability::Delete,
        Capability::Publish,
        Capability::ApproveReview,
        Capability::SubmitForReview,
        Capability::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Edit => "edit",
            Capability::Delete => "delete",
            Capability::Publish => "publish",
            Capability::ApproveReview => "approve_review",
            Capability::SubmitForReview => "submit_for_review",
            Capability::Archive => "archive",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Role {
    /// Single source of truth for the capability lattice (admin ⊇ editor ⊇ viewer)
    pub fn allows(&self, capability: Capability) -> bool {
        match self {
            Role::Admin => true,
            Role::Editor => matches!(
                capability,
                Capability::Edit | Capability::SubmitForReview
            ),
            Role::Viewer | Role::Unrecognized => false,
        }
    }

    /// All capabilities held by this role, in declaration order
    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.allows(*capability))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
            Role::Unrecognized => "unrecognized",
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "editor" => Role::Editor,
            "viewer" => Role::Viewer,
            _ => Role::Unrecognized,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn can_edit(role: Role) -> bool {
    role.allows(Capability::Edit)
}

pub fn can_delete(role: Role) -> bool {
    role.allows(Capability::Delete)
}

pub fn can_publish(role: Role) -> bool {
    role.allows(Capability::Publish)
}

pub fn can_approve_review(role: Role) -> bool {
    role.allows(Capability::ApproveReview)
}

pub fn can_submit_for_review(role: Role) -> bool {
    role.allows(Capability::SubmitForReview)
}

pub fn can_archive(role: Role) -> bool {
    role.allows(Capability::Archive)
}

/// Fails with `PermissionDenied` naming the missing capability
pub fn require(role: Role, capability: Capability) -> Result<(), WorkflowError> {
    if role.allows(capability) {
        Ok(())
    } else {
        Err(WorkflowError::PermissionDenied { role, capability })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_holds_every_capability() {
        assert_eq!(Role::Admin.capabilities(), Capability::ALL.to_vec());
    }

    #[test]
    fn test_editor_can_edit_and_submit_only() {
        assert!(can_edit(Role::Editor));
        assert!(can_submit_for_review(Role::Editor));
        assert!(!can_delete(Role::Editor));
        assert!(!can_publish(Role::Editor));
        assert!(!can_approve_review(Role::Editor));
        assert!(!can_archive(Role::Editor));
    }

    #[test]
    fn test_viewer_and_unknown_roles_fail_closed() {
        assert!(Role::Viewer.capabilities().is_empty());
        assert_eq!(Role::from("superuser"), Role::Unrecognized);
        assert!(Role::from("superuser").capabilities().is_empty());
    }

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!(Role::from(" Admin "), Role::Admin);
        assert_eq!(Role::from("EDITOR"), Role::Editor);
    }

    #[test]
    fn test_unknown_role_deserializes_as_unrecognized() {
        let role: Role = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, Role::Unrecognized);
    }

    #[test]
    fn test_require_reports_missing_capability() {
        let err = require(Role::Editor, Capability::Archive).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::PermissionDenied {
                role: Role::Editor,
                capability: Capability::Archive
            }
        ));
        assert!(err.to_string().contains("archive"));
        assert!(require(Role::Admin, Capability::Archive).is_ok());
    }
}
