//! The regulation fetcher: walk the catalog, skip what is already on disk,
//! download the rest one at a time.
//!
//! Every entry gets exactly one attempt per run. Per-entry failures are
//! recorded and the walk continues; only an output directory that cannot be
//! created (or listed afterwards) aborts the run.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogEntry};
use crate::http::HttpClient;
use crate::pdf::looks_like_pdf;
use crate::progress::{self, FetchEventKind, ProgressSender};
use crate::report::{EntryOutcome, EntryReport, FailureReason, FetchReport};
use crate::storage::{self, LocalArtifact};
use crate::types::{FetchConfig, FetchResult};

/// Sequential best-effort downloader.
pub struct Fetcher {
    config: FetchConfig,
    client: HttpClient,
    progress: Option<ProgressSender>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> FetchResult<Self> {
        let client = HttpClient::new(&config)?;
        Ok(Self {
            config,
            client,
            progress: None,
        })
    }

    /// Attach a progress channel.
    pub fn with_progress(mut self, tx: ProgressSender) -> Self {
        self.progress = Some(tx);
        self
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch into the configured output directory.
    pub async fn run(&self, catalog: &Catalog) -> FetchResult<FetchReport> {
        self.fetch_all(catalog, &self.config.output_dir).await
    }

    /// Ensure every catalog entry has a plausible PDF under `output_dir`.
    pub async fn fetch_all(
        &self,
        catalog: &Catalog,
        output_dir: &Path,
    ) -> FetchResult<FetchReport> {
        storage::ensure_dir(output_dir)?;

        let started_at = Utc::now();
        let mut seq = 0u64;
        progress::emit(
            &self.progress,
            &mut seq,
            FetchEventKind::RunStarted {
                total: catalog.len(),
                output_dir: output_dir.to_path_buf(),
            },
        );
        info!(
            total = catalog.len(),
            output_dir = %output_dir.display(),
            "starting regulation fetch"
        );

        let mut entries = Vec::with_capacity(catalog.len());
        let mut attempted = false;

        for entry in catalog {
            let path = entry.local_path(output_dir);
            let url = self.config.url_for(&entry.remote_path);

            let outcome = match LocalArtifact::inspect(&path, self.config.min_valid_size) {
                LocalArtifact::Present { bytes } => {
                    debug!(id = %entry.id, bytes, "already present, skipping");
                    EntryOutcome::Skipped { bytes }
                }
                _ => {
                    if attempted && !self.config.delay.is_zero() {
                        tokio::time::sleep(self.config.delay).await;
                    }
                    attempted = true;

                    progress::emit(
                        &self.progress,
                        &mut seq,
                        FetchEventKind::EntryStarted {
                            id: entry.id.clone(),
                            url: url.clone(),
                        },
                    );
                    self.fetch_one(entry, &url, &path).await
                }
            };

            progress::emit(
                &self.progress,
                &mut seq,
                FetchEventKind::EntryFinished {
                    id: entry.id.clone(),
                    outcome: outcome.clone(),
                },
            );
            entries.push(EntryReport {
                id: entry.id.clone(),
                filename: entry.filename.clone(),
                url,
                outcome,
            });
        }

        let files = storage::list_dir(output_dir)?;
        let report = FetchReport {
            output_dir: output_dir.to_path_buf(),
            started_at,
            finished_at: Utc::now(),
            entries,
            files,
        };

        progress::emit(
            &self.progress,
            &mut seq,
            FetchEventKind::RunFinished {
                downloaded: report.downloaded(),
                skipped: report.skipped(),
                failed: report.failed(),
            },
        );
        info!(
            downloaded = report.downloaded(),
            skipped = report.skipped(),
            failed = report.failed(),
            "regulation fetch complete"
        );

        Ok(report)
    }

    /// Single attempt for one entry. Never fails the run.
    async fn fetch_one(&self, entry: &CatalogEntry, url: &str, path: &Path) -> EntryOutcome {
        debug!(id = %entry.id, %url, "requesting");

        let resp = match self.client.get(url).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(id = %entry.id, error = %e, "request failed");
                return EntryOutcome::Failed {
                    reason: FailureReason::network(e),
                };
            }
        };

        if resp.status != 200 {
            warn!(id = %entry.id, status = resp.status, "unexpected HTTP status");
            return EntryOutcome::Failed {
                reason: FailureReason::HttpStatus {
                    status: resp.status,
                },
            };
        }

        if !looks_like_pdf(resp.content_type.as_deref(), &resp.body) {
            warn!(
                id = %entry.id,
                content_type = resp.content_type.as_deref().unwrap_or(""),
                final_url = %resp.final_url,
                "response is not a PDF, not saving"
            );
            return EntryOutcome::Failed {
                reason: FailureReason::not_pdf(resp.content_type.as_deref()),
            };
        }

        if let Err(e) = storage::write_atomic(path, &resp.body) {
            warn!(id = %entry.id, path = %path.display(), error = %e, "could not store PDF");
            return EntryOutcome::Failed {
                reason: FailureReason::write(e),
            };
        }

        let bytes = resp.body.len() as u64;
        info!(id = %entry.id, bytes, "downloaded");
        EntryOutcome::Downloaded { bytes }
    }
}
