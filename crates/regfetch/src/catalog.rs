//! The document catalog: which regulations to fetch and where they land.
//!
//! The builtin catalog is a static table. A replacement can be loaded from a
//! JSON array of `{ "id", "remote_path", "filename" }` objects.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{FetchError, FetchResult};

/// One named remote document and its local filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Discipline/document key, e.g. `big-game-2025`.
    pub id: String,
    /// Path on the regulation host, starting with `/`.
    pub remote_path: String,
    /// File name inside the output directory.
    pub filename: String,
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        remote_path: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            remote_path: remote_path.into(),
            filename: filename.into(),
        }
    }

    /// Local path of this entry under `output_dir`.
    pub fn local_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.filename)
    }
}

/// (id, remote path, filename)
const BUILTIN: &[(&str, &str, &str)] = &[
    // Sea
    (
        "big-game-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/mare/big-game/circolare-normativa-big-game/5789-circolare-normativa-2025-big-game/file",
        "circolare_normativa_2025_big_game.pdf",
    ),
    (
        "big-game-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/mare/big-game/circolare-normativa-big-game/5219-circolare-normativa-2024-big-game/file",
        "circolare_normativa_2024_big_game.pdf",
    ),
    (
        "surf-casting-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/mare/surf-casting/circolare-normativa-surf-casting/5812-circolare-normativa-2025-surf-casting/file",
        "circolare_normativa_2025_surf_casting.pdf",
    ),
    (
        "surf-casting-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/mare/surf-casting/circolare-normativa-surf-casting/5271-circolare-normativa-2024-surf-casting/file",
        "circolare_normativa_2024_surf_casting.pdf",
    ),
    (
        "bolentino-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/mare/bolentino/circolare-normativa-bolentino/5775-circolare-normativa-2025-bolentino/file",
        "circolare_normativa_2025_bolentino.pdf",
    ),
    (
        "bolentino-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/mare/bolentino/circolare-normativa-bolentino/5220-circolare-normativa-2024-bolentino/file",
        "circolare_normativa_2024_bolentino.pdf",
    ),
    // Inland waters
    (
        "bass-fishing-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/bass-fishing/circolare-normativa-bass-fishing/5819-circolare-normativa-2025-bass-fishing/file",
        "circolare_normativa_2025_bass_fishing.pdf",
    ),
    (
        "bass-fishing-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/bass-fishing/circolare-normativa-bass-fishing/5217-circolare-normativa-2024-bass-fishing/file",
        "circolare_normativa_2024_bass_fishing.pdf",
    ),
    (
        "pesca-colpo-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/pesca-al-colpo/circolare-normativa-pesca-al-colpo/5805-circolare-normativa-2025-pesca-al-colpo/file",
        "circolare_normativa_2025_pesca_al_colpo.pdf",
    ),
    (
        "pesca-colpo-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/pesca-al-colpo/circolare-normativa-pesca-al-colpo/5266-circolare-normativa-2024-pesca-al-colpo/file",
        "circolare_normativa_2024_pesca_al_colpo.pdf",
    ),
    (
        "feeder-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/feeder/circolare-normativa-feeder/5799-circolare-normativa-2025-pesca-a-feeder/file",
        "circolare_normativa_2025_feeder.pdf",
    ),
    (
        "feeder-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/feeder/circolare-normativa-feeder/5224-circolare-normativa-2024-pesca-a-feeder/file",
        "circolare_normativa_2024_feeder.pdf",
    ),
    (
        "fly-fishing-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/pesca-con-la-mosca/circolare-normativa-pesca-con-la-mosca/5883-circolare-normativa-2025-pesca-con-la-mosca/file",
        "circolare_normativa_2025_pesca_mosca.pdf",
    ),
    (
        "fly-fishing-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/pesca-con-la-mosca/circolare-normativa-pesca-con-la-mosca/5272-circolare-normativa-2024-pesca-con-la-mosca/file",
        "circolare_normativa_2024_pesca_mosca.pdf",
    ),
    (
        "carp-fishing-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/carp-fishing/circolare-normativa-carp-fishing/5833-circolare-normativa-2025-carp-fishing/file",
        "circolare_normativa_2025_carpfishing.pdf",
    ),
    (
        "carp-fishing-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/carp-fishing/circolare-normativa-carp-fishing/5223-circolare-normativa-2024-carp-fishing/file",
        "circolare_normativa_2024_carpfishing.pdf",
    ),
    (
        "trout-area-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/trout-area/circolare-normativa-trout-area/5785-circolare-normativa-2025-trout-area/file",
        "circolare_normativa_2025_trout_area.pdf",
    ),
    (
        "trout-area-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/acque-interne/trout-area/circolare-normativa-trout-area/5262-circolare-normativa-2024-trout-area/file",
        "circolare_normativa_2024_trout_area.pdf",
    ),
    // Casting
    (
        "long-casting-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/casting/long-casting/circolare-normativa-long-casting/5889-circolare-normativa-2025-long-casting/file",
        "circolare_normativa_2025_long_casting.pdf",
    ),
    (
        "long-casting-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/casting/long-casting/circolare-normativa-long-casting/5315-circolare-normativa-2024-long-casting/file",
        "circolare_normativa_2024_long_casting.pdf",
    ),
    (
        "fly-casting-2025",
        "/pesca-di-superficie/discipline-pesca-di-superficie/casting/fly-casting/circolare-normativa-fly-casting/5890-circolare-normativa-2025-fly-casting/file",
        "circolare_normativa_2025_fly_casting.pdf",
    ),
    (
        "fly-casting-2024",
        "/pesca-di-superficie/discipline-pesca-di-superficie/casting/fly-casting/circolare-normativa-fly-casting/5316-circolare-normativa-2024-fly-casting/file",
        "circolare_normativa_2024_fly_casting.pdf",
    ),
    // Generic documents
    (
        "squadre-nazionali",
        "/pesca-di-superficie/documenti/5743-regolamento-delle-squadre-nazionali/file",
        "regolamento_squadre_nazionali.pdf",
    ),
    (
        "traina-costiera-cartellino",
        "/pesca-di-superficie/documenti/4098-foglio-gara-traina-costiera/file",
        "cartellino_traina_costiera.pdf",
    ),
    (
        "long-casting-massafra",
        "/pesca-di-superficie/documenti/4683-regolamento-campo-gara-di-long-casting-massafra-taranto/file",
        "regolamento_long_casting_massafra.pdf",
    ),
    (
        "long-casting-coltano",
        "/pesca-di-superficie/documenti/4673-regolamento-campo-long-casting-coltano-pisa/file",
        "regolamento_long_casting_coltano.pdf",
    ),
    (
        "long-casting-cinelli",
        "/pesca-di-superficie/documenti/4672-regolamento-campo-long-casting-cinelli-viterbo/file",
        "regolamento_long_casting_cinelli.pdf",
    ),
    (
        "casting-cartellini",
        "/pesca-di-superficie/documenti/5939-disciplina-casting-cartellini-eventi-da-1-a-9/file",
        "casting_cartellini_eventi.pdf",
    ),
    (
        "tabella-punteggio-a4",
        "/pesca-di-superficie/documenti/328-tabella-punteggio-centimetri-peso-formato-a4-ver-14-09-2017/file",
        "tabella_punteggio_cm_peso_a4.pdf",
    ),
    (
        "tabella-punteggio-a3",
        "/pesca-di-superficie/documenti/327-tabella-punteggio-centimetri-peso-formato-a3-14-09-2017/file",
        "tabella_punteggio_cm_peso_a3.pdf",
    ),
    (
        "scheda-tonno-tag",
        "/pesca-di-superficie/documenti/333-scheda-tonno-tag/file",
        "scheda_tonno_tag.pdf",
    ),
    (
        "manuale-rog",
        "/pesca-di-superficie/documenti/329-rog-richiesta-organizzazione-gara/file",
        "manuale_rog.pdf",
    ),
];

/// Ordered, immutable list of catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from entries, validating them.
    pub fn new(entries: Vec<CatalogEntry>) -> FetchResult<Self> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The FIPSAS regulation catalog.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(id, path, filename)| CatalogEntry::new(*id, *path, *filename))
            .collect();
        Self { entries }
    }

    /// Parse a JSON catalog.
    pub fn from_json(json: &str) -> FetchResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Read and parse a JSON catalog file.
    pub fn load(path: &Path) -> FetchResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| FetchError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check ids, filenames and remote paths.
    pub fn validate(&self) -> FetchResult<()> {
        let mut ids = HashSet::new();
        let mut filenames = HashSet::new();

        for entry in &self.entries {
            if entry.id.trim().is_empty() {
                return Err(FetchError::InvalidCatalog("empty entry id".into()));
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(FetchError::InvalidCatalog(format!(
                    "duplicate id '{}'",
                    entry.id
                )));
            }
            if !is_plain_filename(&entry.filename) {
                return Err(FetchError::InvalidCatalog(format!(
                    "entry '{}' has invalid filename '{}'",
                    entry.id, entry.filename
                )));
            }
            if !filenames.insert(entry.filename.as_str()) {
                return Err(FetchError::InvalidCatalog(format!(
                    "duplicate filename '{}'",
                    entry.filename
                )));
            }
            if !entry.remote_path.starts_with('/') {
                return Err(FetchError::InvalidCatalog(format!(
                    "entry '{}' remote path must start with '/'",
                    entry.id
                )));
            }
        }

        Ok(())
    }

    /// Keep only the given ids, preserving catalog order.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> FetchResult<Self> {
        for id in ids {
            let id = id.as_ref();
            if self.get(id).is_none() {
                return Err(FetchError::InvalidCatalog(format!("unknown id '{id}'")));
            }
        }

        let entries = self
            .entries
            .iter()
            .filter(|e| ids.iter().any(|id| id.as_ref() == e.id))
            .cloned()
            .collect();
        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
