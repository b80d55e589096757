//! Input validation for the registration and login endpoints
//!
//! Rules run per field and every failing rule is collected, so a single
//! response lists everything wrong with the request. A field that arrived
//! as something other than a string fails its own rule instead of the whole
//! body. `validate_registration` is the only rule set that reads storage.

use email_address::EmailAddress;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::backend::UserBackend;
use crate::error::{AppError, AppResult};
use crate::models::{FieldInput, LoginRequest, RegisterRequest};

/// Top-level message of every 422 response
pub const INVALID_DATA_MESSAGE: &str = "The given data was invalid.";

/// Upper bound for `name` and `email`, counted in characters
pub const MAX_FIELD_LENGTH: usize = 255;

const NAME: &str = "name";
const EMAIL: &str = "email";
const PASSWORD: &str = "password";

/// Field name to messages, in the order fields were checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error for a value the store already holds
    pub fn taken(field: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, taken_message(field));
        errors
    }

    /// Append a message for `field`, keeping the field's first position
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn fields(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

fn display_name(field: &str) -> String {
    field.replace('_', " ")
}

pub fn required_message(field: &str) -> String {
    format!("The {} field is required.", display_name(field))
}

pub fn invalid_email_message(field: &str) -> String {
    format!("The {} must be a valid email address.", display_name(field))
}

pub fn taken_message(field: &str) -> String {
    format!("The {} has already been taken.", display_name(field))
}

pub fn confirmation_message(field: &str) -> String {
    format!("The {} confirmation does not match.", display_name(field))
}

pub fn string_message(field: &str) -> String {
    format!("The {} must be a string.", display_name(field))
}

pub fn too_long_message(field: &str, max: usize) -> String {
    format!(
        "The {} must not be greater than {} characters.",
        display_name(field),
        max
    )
}

/// Registration input that passed every rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    /// Trimmed and lowercased
    pub email: String,
    pub password: String,
}

/// Login input that passed every rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLogin {
    /// Trimmed and lowercased
    pub email: String,
    pub password: String,
}

/// A request field as the rules see it
enum Field<'a> {
    Missing,
    NotText,
    Text(&'a str),
}

/// Trim a text field; blank counts as missing
fn text_field(value: Option<&FieldInput>) -> Field<'_> {
    match value {
        None => Field::Missing,
        Some(FieldInput::Invalid) => Field::NotText,
        Some(FieldInput::Text(text)) => match text.trim() {
            "" => Field::Missing,
            trimmed => Field::Text(trimmed),
        },
    }
}

/// Passwords are taken verbatim; only the empty string counts as missing
fn secret_field(value: Option<&FieldInput>) -> Field<'_> {
    match value {
        None => Field::Missing,
        Some(FieldInput::Invalid) => Field::NotText,
        Some(FieldInput::Text(text)) if text.is_empty() => Field::Missing,
        Some(FieldInput::Text(text)) => Field::Text(text),
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_name(errors: &mut ValidationErrors, value: Option<&FieldInput>) -> Option<String> {
    let name = match text_field(value) {
        Field::Missing => {
            errors.add(NAME, required_message(NAME));
            return None;
        }
        Field::NotText => {
            errors.add(NAME, string_message(NAME));
            return None;
        }
        Field::Text(name) => name,
    };

    if name.chars().count() > MAX_FIELD_LENGTH {
        errors.add(NAME, too_long_message(NAME, MAX_FIELD_LENGTH));
        return None;
    }

    Some(name.to_string())
}

/// Presence, syntax and length; the normalized address when all pass
fn email_rules(value: Option<&FieldInput>) -> Result<String, Vec<String>> {
    let email = match text_field(value) {
        Field::Missing => return Err(vec![required_message(EMAIL)]),
        Field::NotText => return Err(vec![invalid_email_message(EMAIL)]),
        Field::Text(email) => normalize_email(email),
    };

    let mut messages = Vec::new();
    if !EmailAddress::is_valid(&email) {
        messages.push(invalid_email_message(EMAIL));
    }
    if email.chars().count() > MAX_FIELD_LENGTH {
        messages.push(too_long_message(EMAIL, MAX_FIELD_LENGTH));
    }

    if messages.is_empty() {
        Ok(email)
    } else {
        Err(messages)
    }
}

fn check_email(errors: &mut ValidationErrors, value: Option<&FieldInput>) -> Option<String> {
    match email_rules(value) {
        Ok(email) => Some(email),
        Err(messages) => {
            for message in messages {
                errors.add(EMAIL, message);
            }
            None
        }
    }
}

fn check_password(errors: &mut ValidationErrors, value: Option<&FieldInput>) -> Option<String> {
    match secret_field(value) {
        Field::Text(password) => Some(password.to_string()),
        Field::NotText => {
            errors.add(PASSWORD, string_message(PASSWORD));
            None
        }
        Field::Missing => {
            errors.add(PASSWORD, required_message(PASSWORD));
            None
        }
    }
}

/// A missing confirmation is a mismatch
fn check_confirmed_password(
    errors: &mut ValidationErrors,
    password: Option<&FieldInput>,
    confirmation: Option<&FieldInput>,
) -> Option<String> {
    let password = check_password(errors, password)?;

    if confirmation.and_then(FieldInput::as_text) != Some(password.as_str()) {
        errors.add(PASSWORD, confirmation_message(PASSWORD));
        return None;
    }

    Some(password)
}

/// The registration rule sequence; `email_taken` is the store's answer for
/// the normalized email
fn registration_rules(
    request: &RegisterRequest,
    email_taken: bool,
) -> Result<ValidRegistration, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = check_name(&mut errors, request.name.as_ref());
    let mut email = check_email(&mut errors, request.email.as_ref());
    if email.is_some() && email_taken {
        errors.add(EMAIL, taken_message(EMAIL));
        email = None;
    }
    let password = check_confirmed_password(
        &mut errors,
        request.password.as_ref(),
        request.password_confirmation.as_ref(),
    );

    match (name, email, password) {
        (Some(name), Some(email), Some(password)) if errors.is_empty() => Ok(ValidRegistration {
            name,
            email,
            password,
        }),
        _ => Err(errors),
    }
}

/// Full registration validation including the email uniqueness lookup.
///
/// The lookup only runs for an email that passed its other rules. It is a
/// read-only pre-check; the store's unique constraint stays authoritative.
pub async fn validate_registration(
    backend: &dyn UserBackend,
    request: &RegisterRequest,
) -> AppResult<ValidRegistration> {
    let email_taken = match email_rules(request.email.as_ref()) {
        Ok(email) => backend.email_exists(&email).await?,
        Err(_) => false,
    };

    registration_rules(request, email_taken).map_err(AppError::Validation)
}

/// Login rules: presence and email syntax only
pub fn check_login(request: &LoginRequest) -> Result<ValidLogin, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let email = check_email(&mut errors, request.email.as_ref());
    let password = check_password(&mut errors, request.password.as_ref());

    match (email, password) {
        (Some(email), Some(password)) if errors.is_empty() => Ok(ValidLogin { email, password }),
        _ => Err(errors),
    }
}
