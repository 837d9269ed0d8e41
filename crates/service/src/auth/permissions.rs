//! Closed role -> permission table.
//!
//! Every role maps to a `const` slice; route scopes (`/api/user`, `/api/trainer`, `/api/admin`)
//! name the permissions a caller must hold. Adding a role or permission is a compile-time change.

use models::user::Role;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewSessions,
    ManageOwnReservations,
    TrackProgress,
    ManageSessions,
    ViewAllReservations,
    ManageReports,
    ManageUsers,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewSessions => "VIEW_SESSIONS",
            Permission::ManageOwnReservations => "MANAGE_OWN_RESERVATIONS",
            Permission::TrackProgress => "TRACK_PROGRESS",
            Permission::ManageSessions => "MANAGE_SESSIONS",
            Permission::ViewAllReservations => "VIEW_ALL_RESERVATIONS",
            Permission::ManageReports => "MANAGE_REPORTS",
            Permission::ManageUsers => "MANAGE_USERS",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const STUDENT: &[Permission] = &[
    Permission::ViewSessions,
    Permission::ManageOwnReservations,
    Permission::TrackProgress,
];

const TRAINER: &[Permission] = &[
    Permission::ViewSessions,
    Permission::ManageOwnReservations,
    Permission::TrackProgress,
    Permission::ManageSessions,
    Permission::ViewAllReservations,
    Permission::ManageReports,
];

const ADMIN: &[Permission] = &[
    Permission::ViewSessions,
    Permission::ManageOwnReservations,
    Permission::TrackProgress,
    Permission::ManageSessions,
    Permission::ViewAllReservations,
    Permission::ManageReports,
    Permission::ManageUsers,
];

pub const fn permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Student => STUDENT,
        Role::Trainer => TRAINER,
        Role::Admin => ADMIN,
    }
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions(role).contains(&permission)
}

/// Route areas under `/api/{scope}/...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    User,
    Trainer,
    Admin,
}

impl Scope {
    pub const fn required(&self) -> &'static [Permission] {
        match self {
            Scope::User => &[Permission::ViewSessions, Permission::ManageOwnReservations, Permission::TrackProgress],
            Scope::Trainer => &[Permission::ManageSessions, Permission::ViewAllReservations, Permission::ManageReports],
            Scope::Admin => &[Permission::ManageUsers],
        }
    }

    /// Scope for a request path, `None` for paths outside `/api/{scope}`.
    pub fn from_path(path: &str) -> Option<Scope> {
        let rest = path.strip_prefix("/api/")?;
        let segment = rest.split('/').next()?;
        match segment {
            "user" => Some(Scope::User),
            "trainer" => Some(Scope::Trainer),
            "admin" => Some(Scope::Admin),
            _ => None,
        }
    }

    /// First permission of this scope that `role` lacks.
    pub fn missing_for(&self, role: Role) -> Option<Permission> {
        self.required().iter().copied().find(|p| !has_permission(role, *p))
    }

    pub fn allows(&self, role: Role) -> bool {
        self.missing_for(role).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_cumulative() {
        for p in permissions(Role::Student) {
            assert!(has_permission(Role::Trainer, *p));
        }
        for p in permissions(Role::Trainer) {
            assert!(has_permission(Role::Admin, *p));
        }
        assert!(!has_permission(Role::Student, Permission::ManageSessions));
        assert!(!has_permission(Role::Trainer, Permission::ManageUsers));
    }

    #[test]
    fn scopes_by_role() {
        assert!(Scope::User.allows(Role::Student));
        assert!(!Scope::Trainer.allows(Role::Student));
        assert!(Scope::Trainer.allows(Role::Trainer));
        assert!(!Scope::Admin.allows(Role::Trainer));
        assert!(Scope::Admin.allows(Role::Admin));
        assert_eq!(Scope::Admin.missing_for(Role::Student), Some(Permission::ManageUsers));
    }

    #[test]
    fn scope_from_path() {
        assert_eq!(Scope::from_path("/api/user/reservations/1"), Some(Scope::User));
        assert_eq!(Scope::from_path("/api/trainer/sessions"), Some(Scope::Trainer));
        assert_eq!(Scope::from_path("/api/admin"), Some(Scope::Admin));
        assert_eq!(Scope::from_path("/api/other/x"), None);
        assert_eq!(Scope::from_path("/health"), None);
    }
}
