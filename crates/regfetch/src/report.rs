//! Per-entry outcomes and the aggregate run report.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::FileListing;

/// Longest error or content-type text kept in a failure record.
pub const MAX_DETAIL_CHARS: usize = 50;

/// What happened to one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// Fetched and stored a new copy.
    Downloaded { bytes: u64 },
    /// A valid-looking local copy already existed.
    Skipped { bytes: u64 },
    /// Nothing written for this entry.
    Failed { reason: FailureReason },
}

impl EntryOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Why an entry failed. None of these abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// HTTP 200 but neither the content type nor the body looked like a PDF.
    NotPdf { content_type: String },
    /// Any status other than 200.
    HttpStatus { status: u16 },
    /// Connection, timeout, or body read error.
    Network { message: String },
    /// The payload was valid but could not be stored.
    Write { message: String },
}

impl FailureReason {
    pub fn not_pdf(content_type: Option<&str>) -> Self {
        Self::NotPdf {
            content_type: truncate(content_type.unwrap_or(""), MAX_DETAIL_CHARS),
        }
    }

    pub fn network(err: impl fmt::Display) -> Self {
        Self::Network {
            message: truncate(&err.to_string(), MAX_DETAIL_CHARS),
        }
    }

    pub fn write(err: impl fmt::Display) -> Self {
        Self::Write {
            message: truncate(&err.to_string(), MAX_DETAIL_CHARS),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPdf { content_type } => write!(f, "non PDF: {content_type}"),
            Self::HttpStatus { status } => write!(f, "{status}"),
            Self::Network { message } => write!(f, "{message}"),
            Self::Write { message } => write!(f, "write: {message}"),
        }
    }
}

/// Outcome for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReport {
    pub id: String,
    pub filename: String,
    pub url: String,
    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

/// Summary of a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchReport {
    pub output_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One record per catalog entry, in catalog order.
    pub entries: Vec<EntryReport>,
    /// Files in the output directory after the run.
    pub files: Vec<FileListing>,
}

impl FetchReport {
    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Downloaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(EntryOutcome::is_failed)
    }

    /// `Completato: X nuovi, Y già presenti, Z falliti`
    pub fn summary_line(&self) -> String {
        format!(
            "Completato: {} nuovi, {} già presenti, {} falliti",
            self.downloaded(),
            self.skipped(),
            self.failed()
        )
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

/// Truncate to at most `max` characters on a char boundary.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, outcome: EntryOutcome) -> EntryReport {
        EntryReport {
            id: id.to_string(),
            filename: format!("{id}.pdf"),
            url: format!("https://www.fipsas.it/{id}"),
            outcome,
        }
    }

    fn report(entries: Vec<EntryReport>) -> FetchReport {
        let now = Utc::now();
        FetchReport {
            output_dir: PathBuf::from("out"),
            started_at: now,
            finished_at: now,
            entries,
            files: Vec::new(),
        }
    }

    #[test]
    fn test_counters_and_summary() {
        let r = report(vec![
            entry("a", EntryOutcome::Downloaded { bytes: 40_000 }),
            entry("b", EntryOutcome::Skipped { bytes: 50_000 }),
            entry("c", EntryOutcome::Skipped { bytes: 12_000 }),
            entry(
                "d",
                EntryOutcome::Failed {
                    reason: FailureReason::HttpStatus { status: 404 },
                },
            ),
        ]);
        assert_eq!(r.downloaded(), 1);
        assert_eq!(r.skipped(), 2);
        assert_eq!(r.failed(), 1);
        assert_eq!(r.summary_line(), "Completato: 1 nuovi, 2 già presenti, 1 falliti");
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(
            report(Vec::new()).summary_line(),
            "Completato: 0 nuovi, 0 già presenti, 0 falliti"
        );
    }

    #[test]
    fn test_truncate_is_char_safe() {
        let long = "è".repeat(80);
        let cut = truncate(&long, MAX_DETAIL_CHARS);
        assert_eq!(cut.chars().count(), 50);
        assert_eq!(truncate("short", 50), "short");
    }

    #[test]
    fn test_failure_reason_constructors() {
        let reason = FailureReason::network("x".repeat(200));
        match reason {
            FailureReason::Network { message } => assert_eq!(message.len(), 50),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            FailureReason::not_pdf(None),
            FailureReason::NotPdf {
                content_type: String::new()
            }
        );
    }

    #[test]
    fn test_entry_report_json_shape() {
        let e = entry(
            "a",
            EntryOutcome::Failed {
                reason: FailureReason::HttpStatus { status: 500 },
            },
        );
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"]["kind"], "http_status");
        assert_eq!(json["reason"]["status"], 500);
    }
}
