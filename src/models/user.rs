use serde::{Deserialize, Serialize};

use super::Id;

pub const ADMIN_ROLE: &str = "admin";
pub const ADMIN_ROLE_ID: i64 = 1;

/// The server-asserted identity of the logged-in user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: Id,
    pub email: String,
    #[serde(default)]
    pub fio: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub role_id: i64,
}

impl UserProfile {
    /// Administrator rights need both the role name and the role tier to agree.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE && self.role_id == ADMIN_ROLE_ID
    }
}

/// A row of the admin user list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: Id,
    pub email: String,
    #[serde(default)]
    pub fio: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: String,
    pub created_at: Option<String>,
}

/// Admin user list payload. Older servers name the list `allUsers`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UserPage {
    pub users: Option<Vec<UserSummary>>,
    #[serde(rename = "allUsers")]
    pub all_users: Option<Vec<UserSummary>>,
    pub count: Option<u64>,
}

impl UserPage {
    pub fn into_users(self) -> (Vec<UserSummary>, u64) {
        let users = self.users.or(self.all_users).unwrap_or_default();
        let count = self.count.unwrap_or(users.len() as u64);
        (users, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: &str, role_id: i64) -> UserProfile {
        UserProfile {
            id: Id::from("u-1"),
            email: "doctor@example.com".to_string(),
            fio: "Иванов Иван".to_string(),
            phone_number: "+79990000000".to_string(),
            role: role.to_string(),
            role_id,
        }
    }

    #[test]
    fn test_admin_requires_role_and_tier() {
        assert!(profile("admin", 1).is_admin());
        assert!(!profile("admin", 2).is_admin());
        assert!(!profile("user", 1).is_admin());
    }

    #[test]
    fn test_user_page_falls_back_to_all_users() {
        let page: UserPage = serde_json::from_str(
            r#"{"allUsers": [{"id": 1, "email": "a@b.c"}, {"id": 2, "email": "d@e.f"}]}"#,
        )
        .unwrap();
        let (users, count) = page.into_users();
        assert_eq!(users.len(), 2);
        assert_eq!(count, 2);
    }
}
