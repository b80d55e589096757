use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stored user record
///
/// `password_hash` never leaves the process: it is skipped on serialization,
/// so every response built from a `User` omits it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User data handed to the store on registration
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    /// Already normalized (trimmed, lowercase)
    pub email: String,
    pub password_hash: String,
}

/// One submitted request field
///
/// Anything that is not a string (numbers, booleans, arrays, objects)
/// deserializes to `Invalid` instead of failing the whole body, so the
/// validator can report it against its field. JSON `null` is a missing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Invalid,
}

impl FieldInput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldInput::Text(text) => Some(text),
            FieldInput::Invalid => None,
        }
    }
}

impl From<&str> for FieldInput {
    fn from(text: &str) -> Self {
        FieldInput::Text(text.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => FieldInput::Text(text),
            _ => FieldInput::Invalid,
        })
    }
}

/// Body of `POST /api/register`
///
/// Every field is optional at the type level; presence is a validation rule.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<FieldInput>,
    #[serde(default)]
    pub email: Option<FieldInput>,
    #[serde(default)]
    pub password: Option<FieldInput>,
    #[serde(default)]
    pub password_confirmation: Option<FieldInput>,
}

/// Body of `POST /api/login`
#[derive(Deserialize, Debug, Default, Clone)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<FieldInput>,
    #[serde(default)]
    pub password: Option<FieldInput>,
}

/// `{"user": {...}}` envelope returned by both endpoints
#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub user: User,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self { user }
    }
}
