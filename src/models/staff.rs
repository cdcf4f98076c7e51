use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::assignment::StaffId;
use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    #[serde(default)]
    pub id: StaffId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient::names")]
    pub roles_assigned: Vec<String>,
    #[serde(default = "lenient::default_true", deserialize_with = "lenient::flag")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StaffMember {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles_assigned.iter().any(|r| r == role)
    }
}

/// The identity a request runs as. `id` is `None` when nobody is signed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Option<StaffId>,
    pub email: String,
    pub full_name: String,
    pub roles_assigned: Vec<String>,
}

impl CurrentUser {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles_assigned.iter().any(|r| r == role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.id.as_ref().is_some_and(|id| !id.is_empty())
    }
}

impl From<&StaffMember> for CurrentUser {
    fn from(s: &StaffMember) -> Self {
        Self {
            id: Some(s.id.clone()),
            email: s.email.clone(),
            full_name: s.full_name.clone(),
            roles_assigned: s.roles_assigned.clone(),
        }
    }
}
