use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// An authenticated account as reported by the auth provider.
/// The workflow observes it but never owns or mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
}

impl AuthUser {
    pub fn new(uid: impl Into<String>, email: Option<&str>) -> Self {
        AuthUser {
            uid: uid.into(),
            email: email.map(str::to_string),
        }
    }
}
