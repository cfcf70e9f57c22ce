//! Test suite sequencing
//!
//! The seven cases run in a fixed total order. Dependencies between cases
//! are declared data on the case table rather than an implicit convention:
//! the sequencer refuses tables whose edges point forward, skips any case
//! whose dependency did not pass, and threads an explicit [`SuiteContext`]
//! through the run instead of relying on process-wide mutable state. A
//! skipped case is inconclusive, never a failure.

use crate::client::ApiClient;
use std::fmt;
use tracing::{error, info, warn};

mod cases;

pub use cases::CaseFailure;

/// Identifies one case in the suite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseId {
    CreateRevue,
    ListRevues,
    EditRevue,
    DeleteRevue,
    CreateRevueWithoutRequiredFields,
    EditUnknownRevue,
    DeleteUnknownRevue,
}

/// Declarative case entry: name, dependency edges, and whether the case
/// reads the captured revue id from the context.
pub struct CaseDef {
    pub id: CaseId,
    pub name: &'static str,
    pub depends_on: &'static [CaseId],
    pub needs_revue_id: bool,
}

/// The suite, in execution order. Edit and delete consume the id captured
/// by the listing case, so both depend on it.
pub const CASES: &[CaseDef] = &[
    CaseDef {
        id: CaseId::CreateRevue,
        name: "create_revue_with_valid_fields",
        depends_on: &[],
        needs_revue_id: false,
    },
    CaseDef {
        id: CaseId::ListRevues,
        name: "list_revues_captures_latest_id",
        depends_on: &[],
        needs_revue_id: false,
    },
    CaseDef {
        id: CaseId::EditRevue,
        name: "edit_existing_revue",
        depends_on: &[CaseId::ListRevues],
        needs_revue_id: true,
    },
    CaseDef {
        id: CaseId::DeleteRevue,
        name: "delete_existing_revue",
        depends_on: &[CaseId::ListRevues],
        needs_revue_id: true,
    },
    CaseDef {
        id: CaseId::CreateRevueWithoutRequiredFields,
        name: "create_revue_without_required_fields",
        depends_on: &[],
        needs_revue_id: false,
    },
    CaseDef {
        id: CaseId::EditUnknownRevue,
        name: "edit_unknown_revue",
        depends_on: &[],
        needs_revue_id: false,
    },
    CaseDef {
        id: CaseId::DeleteUnknownRevue,
        name: "delete_unknown_revue",
        depends_on: &[],
        needs_revue_id: false,
    },
];

/// Check that every dependency edge points at an earlier table entry, so
/// running in declared order is a valid topological order.
fn case_table_is_well_ordered(cases: &[CaseDef]) -> bool {
    for (index, case) in cases.iter().enumerate() {
        for dep in case.depends_on {
            let dep_index = cases.iter().position(|c| c.id == *dep);
            match dep_index {
                Some(i) if i < index => {}
                _ => return false,
            }
        }
    }
    true
}

/// Outcome of one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

/// One case's name and outcome
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: &'static str,
    pub outcome: CaseOutcome,
}

/// Shared state threaded through the run
///
/// Written by the listing case, read by edit and delete. There is exactly
/// one writer and the fixed order puts it before both readers.
#[derive(Debug, Default)]
pub struct SuiteContext {
    pub last_created_revue_id: Option<String>,
}

/// Results for a full run, in execution order
#[derive(Debug)]
pub struct SuiteReport {
    cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn cases(&self) -> &[CaseReport] {
        &self.cases
    }

    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Skipped(_)))
    }

    /// True when no case failed. Skipped cases are inconclusive and do not
    /// fail the run.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&CaseOutcome) -> bool) -> usize {
        self.cases.iter().filter(|c| pred(&c.outcome)).count()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for case in &self.cases {
            match &case.outcome {
                CaseOutcome::Passed => writeln!(f, "PASS {}", case.name)?,
                CaseOutcome::Failed(reason) => writeln!(f, "FAIL {}: {}", case.name, reason)?,
                CaseOutcome::Skipped(reason) => writeln!(f, "SKIP {}: {}", case.name, reason)?,
            }
        }
        write!(
            f,
            "{} cases: {} passed, {} failed, {} skipped",
            self.cases.len(),
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }
}

/// Runs the case table against one API deployment
pub struct Suite {
    client: ApiClient,
}

impl Suite {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Execute all cases in order and collect their outcomes.
    ///
    /// Execution is strictly sequential; each case blocks on its single
    /// HTTP call before the next one starts.
    pub async fn run(&self) -> SuiteReport {
        debug_assert!(case_table_is_well_ordered(CASES));

        let mut context = SuiteContext::default();
        let mut reports: Vec<CaseReport> = Vec::with_capacity(CASES.len());

        for case in CASES {
            let outcome = match self.precondition(case, &reports, &context) {
                Some(reason) => CaseOutcome::Skipped(reason),
                None => {
                    info!(case = case.name, "running case");
                    match cases::run(case.id, &self.client, &mut context).await {
                        Ok(()) => CaseOutcome::Passed,
                        Err(failure) => CaseOutcome::Failed(failure.to_string()),
                    }
                }
            };

            match &outcome {
                CaseOutcome::Passed => info!(case = case.name, "case passed"),
                CaseOutcome::Skipped(reason) => {
                    warn!(case = case.name, reason = %reason, "case skipped")
                }
                CaseOutcome::Failed(reason) => {
                    error!(case = case.name, reason = %reason, "case failed")
                }
            }

            reports.push(CaseReport {
                name: case.name,
                outcome,
            });
        }

        SuiteReport { cases: reports }
    }

    /// Returns a skip reason when a precondition does not hold. These are
    /// assumptions about earlier cases, not assertions about the server.
    fn precondition(
        &self,
        case: &CaseDef,
        reports: &[CaseReport],
        context: &SuiteContext,
    ) -> Option<String> {
        for dep in case.depends_on {
            let Some(dep_def) = CASES.iter().find(|c| c.id == *dep) else {
                return Some(format!("dependency {:?} is not in the case table", dep));
            };
            let dep_passed = reports
                .iter()
                .any(|r| r.name == dep_def.name && r.outcome == CaseOutcome::Passed);
            if !dep_passed {
                return Some(format!("dependency '{}' did not pass", dep_def.name));
            }
        }

        if case.needs_revue_id && context.last_created_revue_id.is_none() {
            return Some("no revue id was captured by an earlier case".into());
        }

        None
    }
}
