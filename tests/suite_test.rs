//! Full Suite Integration Tests
//!
//! Drives the complete seven-case sequence against a mock Revue API:
//! happy path, failure variants, dependency skips, and identifier-casing
//! tolerance.

use revuecheck::client::ApiClient;
use revuecheck::suite::{CaseOutcome, Suite, SuiteReport};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REVUE_ID: &str = "d4e5f6a7-1234-5678-9abc-def012345678";

/// Mount a healthy fake Revue API. `id_field` controls how the listing
/// names the identifier so casing tolerance can be exercised.
async fn mount_revue_api(server: &MockServer, id_field: &str) {
    Mock::given(method("POST"))
        .and(path("/api/Revue/Create"))
        .and(body_json(json!({
            "Title": "New Revue",
            "Url": "",
            "Description": "Revue Description."
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"msg": "Successfully created!"})),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/Revue/Create"))
        .and(body_json(json!({"Title": "", "Url": "", "Description": ""})))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"msg": "Title and Description are required!"})),
        )
        .mount(server)
        .await;

    let mut item = serde_json::Map::new();
    item.insert(id_field.to_string(), json!(REVUE_ID));
    item.insert("title".into(), json!("New Revue"));
    item.insert("description".into(), json!("Revue Description."));
    Mock::given(method("GET"))
        .and(path("/api/Revue/All"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([item])))
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/Revue/Edit"))
        .and(query_param("revueId", REVUE_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Edited successfully"})))
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/Revue/Edit"))
        .and(query_param("revueId", "tsve"))
        .respond_with(ResponseTemplate::new(400).set_body_string("There is no such revue!"))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/Revue/Delete"))
        .and(query_param("revueId", REVUE_ID))
        .respond_with(ResponseTemplate::new(200).set_body_string("The revue is deleted!"))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/Revue/Delete"))
        .and(query_param("revueId", "tsv"))
        .respond_with(ResponseTemplate::new(400).set_body_string("There is no such revue!"))
        .mount(server)
        .await;
}

async fn run_suite(server: &MockServer) -> SuiteReport {
    let client =
        ApiClient::new(server.uri(), "test-token", Duration::from_secs(5)).expect("client");
    Suite::new(client).run().await
}

fn outcome_of<'a>(report: &'a SuiteReport, name: &str) -> &'a CaseOutcome {
    &report
        .cases()
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no case named {name}"))
        .outcome
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_suite_passes_against_healthy_api() {
        let mock_server = MockServer::start().await;
        mount_revue_api(&mock_server, "revueId").await;

        let report = run_suite(&mock_server).await;

        assert_eq!(report.passed(), 7, "report:\n{report}");
        assert_eq!(report.failed(), 0);
        assert_eq!(report.skipped(), 0);
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_id_extraction_tolerates_casing_variants() {
        for id_field in ["RevueId", "REVUEID", "id", "ID"] {
            let mock_server = MockServer::start().await;
            mount_revue_api(&mock_server, id_field).await;

            let report = run_suite(&mock_server).await;

            assert_eq!(
                outcome_of(&report, "edit_existing_revue"),
                &CaseOutcome::Passed,
                "id field {id_field}: {report}"
            );
            assert_eq!(
                outcome_of(&report, "delete_existing_revue"),
                &CaseOutcome::Passed,
                "id field {id_field}: {report}"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_listing_skips_dependent_cases() {
        let mock_server = MockServer::start().await;

        // Listing succeeds but has nothing in it, so no id is captured.
        Mock::given(method("GET"))
            .and(path("/api/Revue/All"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let report = run_suite(&mock_server).await;

        assert!(matches!(
            outcome_of(&report, "list_revues_captures_latest_id"),
            CaseOutcome::Failed(_)
        ));
        assert!(
            matches!(
                outcome_of(&report, "edit_existing_revue"),
                CaseOutcome::Skipped(_)
            ),
            "dependent case must be skipped, not failed: {report}"
        );
        assert!(matches!(
            outcome_of(&report, "delete_existing_revue"),
            CaseOutcome::Skipped(_)
        ));
        assert_eq!(report.skipped(), 2);
    }

    #[tokio::test]
    async fn test_missing_id_field_is_a_listing_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/Revue/All"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"title": "No id here"}])),
            )
            .mount(&mock_server)
            .await;

        let report = run_suite(&mock_server).await;

        match outcome_of(&report, "list_revues_captures_latest_id") {
            CaseOutcome::Failed(reason) => {
                assert!(
                    reason.contains("revue id"),
                    "reason should name the extraction: {reason}"
                );
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(report.skipped(), 2);
    }

    #[tokio::test]
    async fn test_wrong_typed_id_field_is_reported_distinctly() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/Revue/All"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"revueId": 42}])))
            .mount(&mock_server)
            .await;

        let report = run_suite(&mock_server).await;

        match outcome_of(&report, "list_revues_captures_latest_id") {
            CaseOutcome::Failed(reason) => {
                assert!(
                    reason.contains("not a string"),
                    "wrong type must not be reported as absence: {reason}"
                );
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_status_mismatch_fails_only_that_case() {
        let mock_server = MockServer::start().await;

        // Mount a misbehaving unknown-delete variant first; wiremock matches
        // mocks in mount order, so this one shadows the healthy variant.
        Mock::given(method("DELETE"))
            .and(path("/api/Revue/Delete"))
            .and(query_param("revueId", "tsv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("The revue is deleted!"))
            .mount(&mock_server)
            .await;

        mount_revue_api(&mock_server, "revueId").await;

        let report = run_suite(&mock_server).await;

        assert!(matches!(
            outcome_of(&report, "delete_unknown_revue"),
            CaseOutcome::Failed(_)
        ));
        // Independent cases are unaffected.
        assert_eq!(report.failed(), 1, "report:\n{report}");
        assert_eq!(report.passed(), 6);
    }

    #[tokio::test]
    async fn test_delete_unknown_revue_is_idempotent() {
        let mock_server = MockServer::start().await;
        mount_revue_api(&mock_server, "revueId").await;

        let client =
            ApiClient::new(mock_server.uri(), "test-token", Duration::from_secs(5)).unwrap();

        let first = client
            .delete("/api/Revue/Delete", &[("revueId", "tsv")])
            .await
            .unwrap();
        let second = client
            .delete("/api/Revue/Delete", &[("revueId", "tsv")])
            .await
            .unwrap();

        assert_eq!(first.status, second.status);
        assert_eq!(first.body, second.body);
        assert_eq!(first.status.as_u16(), 400);
        assert!(first.body_contains("There is no such revue!"));
    }

    #[tokio::test]
    async fn test_suite_runs_cases_in_fixed_order() {
        let mock_server = MockServer::start().await;
        mount_revue_api(&mock_server, "revueId").await;

        let report = run_suite(&mock_server).await;
        let names: Vec<_> = report.cases().iter().map(|c| c.name).collect();

        assert_eq!(
            names,
            [
                "create_revue_with_valid_fields",
                "list_revues_captures_latest_id",
                "edit_existing_revue",
                "delete_existing_revue",
                "create_revue_without_required_fields",
                "edit_unknown_revue",
                "delete_unknown_revue",
            ]
        );
    }
}
