//! Configuration loading and resolution.
//!
//! Every setting resolves as explicit flag, then environment variable, then
//! the library default.

use std::path::PathBuf;
use std::time::Duration;

use regfetch::{Catalog, FetchConfig, FetchResult, DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR};

pub const OUTPUT_DIR_ENV: &str = "REGFETCH_OUTPUT_DIR";
pub const BASE_URL_ENV: &str = "REGFETCH_BASE_URL";
pub const CATALOG_ENV: &str = "REGFETCH_CATALOG";

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<String>,
    pub base_url: Option<String>,
    pub catalog: Option<String>,
    pub delay_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Resolve the output directory.
pub fn resolve_output_dir(explicit: Option<&str>) -> PathBuf {
    let dir =
        pick(explicit, env_var(OUTPUT_DIR_ENV)).unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());
    PathBuf::from(dir)
}

/// Resolve the regulation host.
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    pick(explicit, env_var(BASE_URL_ENV)).unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Resolve a catalog file, if any. `None` means the builtin catalog.
pub fn resolve_catalog_path(explicit: Option<&str>) -> Option<PathBuf> {
    pick(explicit, env_var(CATALOG_ENV)).map(PathBuf::from)
}

/// Load the catalog named by flag or environment, or the builtin one.
pub fn load_catalog(explicit: Option<&str>) -> FetchResult<Catalog> {
    match resolve_catalog_path(explicit) {
        Some(path) => {
            tracing::info!("Catalog: {}", path.display());
            Catalog::load(&path)
        }
        None => Ok(Catalog::builtin()),
    }
}

/// Build the fetch configuration from command-line overrides.
pub fn build_config(overrides: &Overrides) -> FetchConfig {
    let mut cfg = FetchConfig {
        output_dir: resolve_output_dir(overrides.output.as_deref()),
        ..FetchConfig::default()
    };
    cfg.set_base_url(resolve_base_url(overrides.base_url.as_deref()));
    if let Some(ms) = overrides.delay_ms {
        cfg.delay = Duration::from_millis(ms);
    }
    if let Some(secs) = overrides.timeout_secs {
        cfg.timeout = Duration::from_secs(secs);
    }
    cfg
}

/// First non-empty of the explicit value and the environment value.
fn pick(explicit: Option<&str>, env: Option<String>) -> Option<String> {
    explicit
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .or_else(|| env.filter(|s| !s.is_empty()))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_precedence() {
        assert_eq!(pick(Some("flag"), Some("env".into())).as_deref(), Some("flag"));
        assert_eq!(pick(None, Some("env".into())).as_deref(), Some("env"));
        assert_eq!(pick(Some(""), Some("env".into())).as_deref(), Some("env"));
        assert_eq!(pick(None, Some(String::new())), None);
        assert_eq!(pick(None, None), None);
    }

    #[test]
    fn test_build_config_overrides() {
        let cfg = build_config(&Overrides {
            output: Some("/tmp/regs".into()),
            base_url: Some("http://127.0.0.1:9000/".into()),
            catalog: None,
            delay_ms: Some(0),
            timeout_secs: Some(5),
        });
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/regs"));
        assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
        assert_eq!(cfg.delay, Duration::ZERO);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.min_valid_size, regfetch::MIN_VALID_SIZE);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id": "x", "remote_path": "/x/file", "filename": "x.pdf"}]"#,
        )
        .unwrap();

        let catalog = load_catalog(path.to_str()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].id, "x");
    }
}
