use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

/// Account role, resolved once at authentication time. Stored as its
/// string form in the `users` table and never branched on by raw string
/// comparison downstream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[strum(serialize = "STUDENT")]
    Student,
    #[strum(serialize = "PROFESSOR")]
    Professor,
    #[strum(serialize = "STAFF")]
    Staff,
    #[strum(serialize = "ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Staff and admins may manage catalog data, facilities and accounts.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }

    pub fn all() -> Vec<Role> {
        Role::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trips_through_column_form() {
        for role in Role::all() {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn staff_check_covers_staff_and_admin_only() {
        assert!(Role::Staff.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(!Role::Student.is_staff());
        assert!(!Role::Professor.is_staff());
    }
}
