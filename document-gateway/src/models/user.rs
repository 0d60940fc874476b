use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Department {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A user as the backend returns it, with names nested under `account`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub account: Option<Account>,
    pub department: Option<Department>,
    pub department_id: Option<String>,
}

/// Flat user shape handed to the browser.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
}

impl From<BackendUser> for UserSummary {
    fn from(user: BackendUser) -> Self {
        let account = user.account.unwrap_or_default();
        let first_name = account.first_name.or(user.first_name).unwrap_or_default();
        let last_name = account.last_name.or(user.last_name).unwrap_or_default();

        let full_name = [
            Some(first_name.as_str()),
            account.middle_name.as_deref(),
            Some(last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
        let full_name = if full_name.is_empty() {
            user.email.clone()
        } else {
            full_name
        };

        let (department_ref_id, department_name) = match user.department {
            Some(department) => (department.id, department.name),
            None => (None, None),
        };

        Self {
            id: user.id,
            email: user.email,
            first_name,
            last_name,
            full_name,
            role: user.role,
            department_id: user.department_id.or(department_ref_id),
            department_name,
        }
    }
}

/// Accepts a bare array or `{users: [...]}`.
pub fn user_list(data: Value) -> Result<Vec<UserSummary>, serde_json::Error> {
    let users: Vec<BackendUser> = match data {
        Value::Object(mut map) if map.contains_key("users") => {
            serde_json::from_value(map.remove("users").unwrap_or(Value::Null))?
        }
        Value::Null => Vec::new(),
        other => serde_json::from_value(other)?,
    };
    Ok(users.into_iter().map(UserSummary::from).collect())
}
