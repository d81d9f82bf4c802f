use serde::{Deserialize, Serialize};

/// Portal role. Each role has its own login route and dashboard area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
    Student,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "parent" => Some(Role::Parent),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }

    /// Literal login route for this role area (rendered by the web client)
    pub fn login_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/login",
            Role::Teacher => "/teacher/login",
            Role::Parent => "/parent/login",
            Role::Student => "/student/login",
        }
    }

    /// Dashboard path the session gate protects
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/dashboard/admin",
            Role::Teacher => "/dashboard/teacher",
            Role::Parent => "/dashboard/parent",
            Role::Student => "/dashboard/student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated principal, populated by the session gate from a live session
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub account_id: String,
    pub email: String,
    pub role: Role,
}
