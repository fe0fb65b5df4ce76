use crmsuite_core::config::{AppConfig, LoadOptions};
use crmsuite_db::{ConfigPresence, StoreHandle, StoreStatus};
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            serde_json::json!({
                "overall_status": "fail",
                "summary": "doctor serialization failed",
                "error": error.to_string(),
            })
            .to_string()
        });
        return CommandResult::rendered(exit_code, output);
    }

    CommandResult::rendered(exit_code, render_human(&report))
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: format!(
                    "configuration loaded and validated (backend {:?}, database `{}`)",
                    config.database.backend,
                    config.database.store_name()
                ),
            });
            match inspect_store(&config) {
                Ok(status) => {
                    checks.push(check_connectivity(&status));
                    checks.push(check_collection_listing(&status));
                }
                Err(details) => {
                    checks.push(DoctorCheck {
                        name: "store_connectivity",
                        status: CheckStatus::Fail,
                        details,
                    });
                    checks.push(skipped("collection_listing", "store inspection did not run"));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("store_connectivity", "configuration did not load"));
            checks.push(skipped("collection_listing", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck { name, status: CheckStatus::Skipped, details: format!("skipped because {reason}") }
}

fn inspect_store(config: &AppConfig) -> Result<StoreStatus, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| format!("failed to initialize async runtime: {error}"))?;

    Ok(runtime.block_on(async { StoreHandle::open(&config.database).await.status().await }))
}

fn check_connectivity(status: &StoreStatus) -> DoctorCheck {
    match &status.unavailable_reason {
        None => DoctorCheck {
            name: "store_connectivity",
            status: CheckStatus::Pass,
            details: format!(
                "connected to {:?} store `{}` (DATABASE_URL {}, DATABASE_NAME {})",
                status.backend,
                status.database_name,
                presence_text(status.url),
                presence_text(status.name)
            ),
        },
        Some(reason) => DoctorCheck {
            name: "store_connectivity",
            status: CheckStatus::Fail,
            details: reason.clone(),
        },
    }
}

fn check_collection_listing(status: &StoreStatus) -> DoctorCheck {
    if !status.connected {
        return skipped("collection_listing", "the store is not connected");
    }

    match &status.collections_error {
        None => DoctorCheck {
            name: "collection_listing",
            status: CheckStatus::Pass,
            details: format!("{} collection(s) sampled", status.collections.len()),
        },
        Some(error) => DoctorCheck {
            name: "collection_listing",
            status: CheckStatus::Fail,
            details: error.clone(),
        },
    }
}

fn presence_text(presence: ConfigPresence) -> &'static str {
    match presence {
        ConfigPresence::Set => "set",
        ConfigPresence::NotSet => "not set",
        ConfigPresence::NotApplicable => "not applicable",
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}
