//! regfetch — best-effort downloader for a fixed catalog of regulation PDFs.

pub mod catalog;
pub mod fetcher;
pub mod http;
pub mod pdf;
pub mod progress;
pub mod report;
pub mod storage;
pub mod types;

pub use catalog::{Catalog, CatalogEntry};
pub use fetcher::Fetcher;
pub use http::{HttpClient, HttpResponse};
pub use pdf::{looks_like_pdf, PDF_MAGIC};
pub use progress::{FetchEvent, FetchEventKind};
pub use report::{EntryOutcome, EntryReport, FailureReason, FetchReport};
pub use storage::{FileListing, LocalArtifact};
pub use types::*;
