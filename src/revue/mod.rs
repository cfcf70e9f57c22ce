//! Revue API wire contract
//!
//! Endpoint paths, request payloads, and a tolerant helper for pulling the
//! resource identifier out of listing responses. The server names the id
//! field inconsistently across responses ("revueId" vs "id", with varying
//! casing), so extraction matches aliases case-insensitively instead of
//! deserializing into a fixed struct.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Authentication endpoint
pub const AUTH_PATH: &str = "/api/User/Authentication";
/// Create a revue
pub const CREATE_PATH: &str = "/api/Revue/Create";
/// List all revues
pub const ALL_PATH: &str = "/api/Revue/All";
/// Edit a revue (query param `revueId`)
pub const EDIT_PATH: &str = "/api/Revue/Edit";
/// Delete a revue (query param `revueId`)
pub const DELETE_PATH: &str = "/api/Revue/Delete";

/// Query parameter naming the target revue for edit/delete
pub const REVUE_ID_PARAM: &str = "revueId";

/// Accepted aliases for the identifier field in listing responses
pub const ID_ALIASES: &[&str] = &["revueId", "id"];

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Create/edit request body. The server expects PascalCase field names.
#[derive(Debug, Clone, Serialize)]
pub struct RevuePayload {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Url")]
    pub url: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Field extraction errors
#[derive(Error, Debug, PartialEq)]
pub enum FieldError {
    #[error("No field matching any of {aliases:?}")]
    Missing { aliases: Vec<String> },

    #[error("Field '{name}' matched but is not a string")]
    WrongType { name: String },
}

/// Find the first string-valued property whose name matches one of the
/// given aliases, ignoring case. The result does not depend on how the
/// source document ordered its properties.
///
/// A name match with a non-string value is reported as [`FieldError::WrongType`]
/// rather than being silently skipped; "field absent" and "field has the
/// wrong type" are different bugs in the server under test.
pub fn string_field_ci<'a>(
    object: &'a Map<String, Value>,
    aliases: &[&str],
) -> Result<&'a str, FieldError> {
    let mut wrong_type: Option<&str> = None;

    for (name, value) in object {
        if !aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name)) {
            continue;
        }
        match value.as_str() {
            Some(s) => return Ok(s),
            None => wrong_type = wrong_type.or(Some(name.as_str())),
        }
    }

    match wrong_type {
        Some(name) => Err(FieldError::WrongType { name: name.into() }),
        None => Err(FieldError::Missing {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }),
    }
}
