use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fullpage {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenceKey {
    pub id: String,
    #[serde(rename = "handbookType", default)]
    pub handbook_type: String,
    #[serde(rename = "userID", default)]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialUpdateJson {
    pub id: String,
    #[serde(rename = "updateJson")]
    pub update_json: String,
}

/// Free-form update message; decoded only to prove it is valid JSON before it
/// is re-encoded into an envelope field.
pub type UpdateJsonMessage = serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdateStatus {
    pub id: String,
    #[serde(rename = "updateNeeded")]
    pub update_needed: bool,
    #[serde(rename = "updateJson")]
    pub update_json: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppLog {
    #[serde(rename = "userID", default)]
    pub user_id: String,
    #[serde(rename = "logDateTime", default)]
    pub log_date_time: String,
    #[serde(rename = "logName", default)]
    pub log_name: String,
    #[serde(rename = "logDataJson", default)]
    pub log_data_json: String,
}

/// Paginated list envelope returned by table GET endpoints.
///
/// The backend spells the keys lowercase; the capitalized aliases keep older
/// deployments readable as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(alias = "Results")]
    pub results: Vec<T>,
    #[serde(alias = "Count")]
    pub count: u64,
}
