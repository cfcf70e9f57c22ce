//! Case bodies
//!
//! Each case issues exactly one HTTP call and checks status and body
//! against the API's documented contract. The call is authoritative; a
//! transport error is a failure, never retried.

use super::{CaseId, SuiteContext};
use crate::client::{ApiClient, ApiResponse, ClientError};
use crate::revue;
use reqwest::StatusCode;
use thiserror::Error;

/// Why a case failed
#[derive(Error, Debug)]
pub enum CaseFailure {
    #[error("{0}")]
    Assertion(String),

    #[error("transport error: {0}")]
    Transport(#[from] ClientError),
}

fn assert_fail(reason: impl Into<String>) -> CaseFailure {
    CaseFailure::Assertion(reason.into())
}

fn expect_status(response: &ApiResponse, expected: StatusCode) -> Result<(), CaseFailure> {
    if response.status != expected {
        return Err(assert_fail(format!(
            "expected status {}, got {}: {}",
            expected, response.status, response.body
        )));
    }
    Ok(())
}

fn expect_message(response: &ApiResponse, expected: &str) -> Result<(), CaseFailure> {
    match response.message() {
        Some(msg) if msg == expected => Ok(()),
        Some(msg) => Err(assert_fail(format!(
            "expected message {expected:?}, got {msg:?}"
        ))),
        None => Err(assert_fail(format!(
            "expected message {expected:?}, body had no msg field: {}",
            response.body
        ))),
    }
}

fn expect_body_contains(response: &ApiResponse, fragment: &str) -> Result<(), CaseFailure> {
    if !response.body_contains(fragment) {
        return Err(assert_fail(format!(
            "expected body to contain {fragment:?}, got: {}",
            response.body
        )));
    }
    Ok(())
}

/// Dispatch a case by id
pub(super) async fn run(
    id: CaseId,
    client: &ApiClient,
    context: &mut SuiteContext,
) -> Result<(), CaseFailure> {
    match id {
        CaseId::CreateRevue => create_revue(client).await,
        CaseId::ListRevues => list_revues(client, context).await,
        CaseId::EditRevue => edit_revue(client, context).await,
        CaseId::DeleteRevue => delete_revue(client, context).await,
        CaseId::CreateRevueWithoutRequiredFields => create_revue_without_required_fields(client).await,
        CaseId::EditUnknownRevue => edit_unknown_revue(client).await,
        CaseId::DeleteUnknownRevue => delete_unknown_revue(client).await,
    }
}

fn captured_id(context: &SuiteContext) -> Result<String, CaseFailure> {
    // The sequencer skips dependent cases before this can be empty.
    context
        .last_created_revue_id
        .clone()
        .ok_or_else(|| assert_fail("no revue id in context"))
}

/// Case 1: create with valid fields, expect 200 and the creation message
async fn create_revue(client: &ApiClient) -> Result<(), CaseFailure> {
    let payload = revue::RevuePayload {
        title: "New Revue".into(),
        url: String::new(),
        description: "Revue Description.".into(),
    };

    let response = client.post_json(revue::CREATE_PATH, &[], &payload).await?;
    expect_status(&response, StatusCode::OK)?;
    expect_message(&response, "Successfully created!")
}

/// Case 2: list all revues, expect a non-empty array, and capture the id of
/// the first element into the context for the dependent cases
async fn list_revues(client: &ApiClient, context: &mut SuiteContext) -> Result<(), CaseFailure> {
    let response = client.get(revue::ALL_PATH, &[]).await?;
    expect_status(&response, StatusCode::OK)?;

    let value = response
        .json()
        .map_err(|e| assert_fail(format!("listing body is not JSON: {e}")))?;
    let items = value
        .as_array()
        .ok_or_else(|| assert_fail("listing body is not a JSON array"))?;
    let first = items
        .first()
        .ok_or_else(|| assert_fail("listing returned an empty array"))?;
    let object = first
        .as_object()
        .ok_or_else(|| assert_fail("first listing element is not a JSON object"))?;

    let id = revue::string_field_ci(object, revue::ID_ALIASES)
        .map_err(|e| assert_fail(format!("could not extract revue id: {e}")))?;
    if id.is_empty() {
        return Err(assert_fail("extracted revue id is empty"));
    }

    context.last_created_revue_id = Some(id.to_string());
    Ok(())
}

/// Case 3: edit the captured revue, expect 200 and the edit message
async fn edit_revue(client: &ApiClient, context: &SuiteContext) -> Result<(), CaseFailure> {
    let revue_id = captured_id(context)?;
    let payload = revue::RevuePayload {
        title: "Edited".into(),
        url: String::new(),
        description: "Edit revue description.".into(),
    };

    let response = client
        .put_json(
            revue::EDIT_PATH,
            &[(revue::REVUE_ID_PARAM, revue_id.as_str())],
            &payload,
        )
        .await?;
    expect_status(&response, StatusCode::OK)?;
    expect_message(&response, "Edited successfully")
}

/// Case 4: delete the captured revue, expect 200 and the deletion message
async fn delete_revue(client: &ApiClient, context: &SuiteContext) -> Result<(), CaseFailure> {
    let revue_id = captured_id(context)?;

    let response = client
        .delete(
            revue::DELETE_PATH,
            &[(revue::REVUE_ID_PARAM, revue_id.as_str())],
        )
        .await?;
    expect_status(&response, StatusCode::OK)?;
    expect_body_contains(&response, "The revue is deleted!")
}

/// Case 5: create with empty required fields, expect 400
async fn create_revue_without_required_fields(client: &ApiClient) -> Result<(), CaseFailure> {
    let payload = revue::RevuePayload {
        title: String::new(),
        url: String::new(),
        description: String::new(),
    };

    let response = client.post_json(revue::CREATE_PATH, &[], &payload).await?;
    expect_status(&response, StatusCode::BAD_REQUEST)
}

/// Case 6: edit a revue id that does not exist, expect 400 and the
/// unknown-revue message
async fn edit_unknown_revue(client: &ApiClient) -> Result<(), CaseFailure> {
    let payload = revue::RevuePayload {
        title: "Edited fake revue".into(),
        url: String::new(),
        description: "Description for a edited fake revue.".into(),
    };

    let response = client
        .put_json(revue::EDIT_PATH, &[(revue::REVUE_ID_PARAM, "tsve")], &payload)
        .await?;
    expect_status(&response, StatusCode::BAD_REQUEST)?;
    expect_body_contains(&response, "There is no such revue!")
}

/// Case 7: delete a revue id that does not exist, expect 400 and the
/// unknown-revue message
async fn delete_unknown_revue(client: &ApiClient) -> Result<(), CaseFailure> {
    let response = client
        .delete(revue::DELETE_PATH, &[(revue::REVUE_ID_PARAM, "tsv")])
        .await?;
    expect_status(&response, StatusCode::BAD_REQUEST)?;
    expect_body_contains(&response, "There is no such revue!")
}
