//! Console rendering for runs, catalog listings, and local status.

use std::io::Write;
use std::path::Path;

use regfetch::progress::{FetchEvent, FetchEventKind, ProgressReceiver};
use regfetch::{Catalog, EntryOutcome, FailureReason, FetchConfig, FetchReport, LocalArtifact};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// Header printed before a run.
pub fn banner(output_dir: &Path, total: usize) -> String {
    format!(
        "{rule}\nDownload Regolamenti FIPSAS\n{rule}\nOutput: {}\nDocumenti da scaricare: {total}\n",
        output_dir.display(),
        rule = rule()
    )
}

/// Text for an entry outcome once it is known.
pub fn outcome_text(outcome: &EntryOutcome) -> String {
    match outcome {
        EntryOutcome::Downloaded { bytes } => format!("OK ({:.1} KB)", kb(*bytes)),
        EntryOutcome::Skipped { bytes } => format!("SKIP (già presente, {:.1} KB)", kb(*bytes)),
        EntryOutcome::Failed { reason } => match reason {
            FailureReason::NotPdf { content_type } => format!("SKIP (non PDF: {content_type})"),
            FailureReason::HttpStatus { status } => format!("ERRORE ({status})"),
            FailureReason::Network { message } => format!("ERRORE ({message})"),
            FailureReason::Write { message } => format!("ERRORE (scrittura: {message})"),
        },
    }
}

/// Console fragment for one progress event. Network attempts print a
/// prefix when they start and the outcome when they finish, on one line.
pub fn render_event(event: &FetchEvent) -> Option<String> {
    match &event.event {
        FetchEventKind::EntryStarted { id, .. } => Some(format!("  Scaricando {id}... ")),
        FetchEventKind::EntryFinished { id, outcome } => match outcome {
            EntryOutcome::Skipped { .. } => Some(format!("  {id}: {}\n", outcome_text(outcome))),
            _ => Some(format!("{}\n", outcome_text(outcome))),
        },
        FetchEventKind::RunStarted { .. } | FetchEventKind::RunFinished { .. } => None,
    }
}

/// Print events as they arrive until the sender side is dropped.
pub async fn print_events(rx: ProgressReceiver) {
    let mut stdout = std::io::stdout();
    print_events_to(rx, &mut stdout).await;
}

/// Render every event into `out`. Returns the number of entry lines
/// completed. Console write errors are ignored.
pub async fn print_events_to<W: Write>(mut rx: ProgressReceiver, out: &mut W) -> usize {
    let mut finished = 0;
    while let Some(event) = rx.recv().await {
        if matches!(event.event, FetchEventKind::EntryFinished { .. }) {
            finished += 1;
        }
        if let Some(text) = render_event(&event) {
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    }
    finished
}

/// Summary line and directory listing printed after a run.
pub fn summary(report: &FetchReport) -> String {
    let mut out = format!("\n{rule}\n{}\n{rule}\n", report.summary_line(), rule = rule());
    out.push_str("\nFile presenti:\n");
    for file in &report.files {
        out.push_str(&format!("  - {} ({:.1} KB)\n", file.name, file.size_kb()));
    }
    out
}

/// Catalog table for `regfetch list`.
pub fn catalog_listing(catalog: &Catalog, config: &FetchConfig) -> String {
    let mut out = String::new();
    for entry in catalog {
        out.push_str(&format!(
            "  {:<28} {}\n  {:<28} {}\n",
            entry.id,
            entry.filename,
            "",
            config.url_for(&entry.remote_path)
        ));
    }
    out.push_str(&format!("\n{} documenti\n", catalog.len()));
    out
}

/// One status row per entry for `regfetch status`.
pub fn status_listing(rows: &[(String, LocalArtifact)]) -> String {
    let mut out = String::new();
    for (id, state) in rows {
        let text = match state {
            LocalArtifact::Present { bytes } => format!("presente ({:.1} KB)", kb(*bytes)),
            LocalArtifact::Undersized { bytes } => {
                format!("troppo piccolo ({:.1} KB), verrà riscaricato", kb(*bytes))
            }
            LocalArtifact::Missing => "mancante".to_string(),
        };
        out.push_str(&format!("  {id}: {text}\n"));
    }
    let present = rows.iter().filter(|(_, s)| s.is_present()).count();
    out.push_str(&format!("\n{present}/{} presenti\n", rows.len()));
    out
}

pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: {e}"),
    }
}
