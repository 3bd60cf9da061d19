use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub success: bool,
    pub error: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleBody {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct NavigateBody {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct AdvanceBody {
    pub stage: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StaffQuery {
    pub search: Option<String>,
    pub department: Option<String>,
    pub employee: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkRenewBody {
    pub ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NavigationQuery {
    pub path: Option<String>,
}
