//! Subcommand implementations for the `regfetch` binary.

use anyhow::{Context, Result};
use regfetch::{progress, Catalog, FetchConfig, FetchReport, Fetcher, LocalArtifact};

use crate::config::{self, Overrides};
use crate::output;

/// Resolve configuration and catalog, applying an optional id filter.
pub fn prepare(overrides: &Overrides, only: &[String]) -> Result<(FetchConfig, Catalog)> {
    let cfg = config::build_config(overrides);
    let catalog = config::load_catalog(overrides.catalog.as_deref())
        .context("failed to load catalog")?;
    let catalog = if only.is_empty() {
        catalog
    } else {
        catalog.select(only)?
    };
    Ok((cfg, catalog))
}

/// Download every missing document and print progress plus the summary.
pub async fn fetch(overrides: &Overrides, only: &[String], json: bool) -> Result<FetchReport> {
    let (cfg, catalog) = prepare(overrides, only)?;
    let fetcher = Fetcher::new(cfg).context("failed to build HTTP client")?;

    if json {
        let report = fetcher.run(&catalog).await?;
        output::print_json(&serde_json::to_value(&report)?);
        return Ok(report);
    }

    print!("{}", output::banner(&fetcher.config().output_dir, catalog.len()));
    println!();

    let (tx, rx) = progress::channel();
    let fetcher = fetcher.with_progress(tx);
    let printer = tokio::spawn(output::print_events(rx));

    let result = fetcher.run(&catalog).await;
    // Dropping the fetcher closes the channel so the printer drains and exits.
    drop(fetcher);
    let _ = printer.await;

    let report = result?;
    print!("{}", output::summary(&report));
    Ok(report)
}

/// Print the catalog without touching the network.
pub fn list(overrides: &Overrides, json: bool) -> Result<()> {
    let (cfg, catalog) = prepare(overrides, &[])?;
    if json {
        let entries: Vec<_> = catalog
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id,
                    "filename": e.filename,
                    "url": cfg.url_for(&e.remote_path),
                })
            })
            .collect();
        output::print_json(&serde_json::Value::Array(entries));
    } else {
        print!("{}", output::catalog_listing(&catalog, &cfg));
    }
    Ok(())
}

/// Local state of every catalog entry, in catalog order.
pub fn local_status(cfg: &FetchConfig, catalog: &Catalog) -> Vec<(String, LocalArtifact)> {
    catalog
        .iter()
        .map(|e| {
            let state = LocalArtifact::inspect(&e.local_path(&cfg.output_dir), cfg.min_valid_size);
            (e.id.clone(), state)
        })
        .collect()
}

/// Report which documents are already on disk.
pub fn status(overrides: &Overrides, json: bool) -> Result<()> {
    let (cfg, catalog) = prepare(overrides, &[])?;
    let rows = local_status(&cfg, &catalog);

    if json {
        let entries: Vec<_> = rows
            .iter()
            .map(|(id, state)| serde_json::json!({ "id": id, "local": state }))
            .collect();
        output::print_json(&serde_json::json!({
            "output_dir": cfg.output_dir,
            "entries": entries,
        }));
    } else {
        println!("Output: {}", cfg.output_dir.display());
        println!();
        print!("{}", output::status_listing(&rows));
    }
    Ok(())
}
