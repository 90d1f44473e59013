//! Host configuration: environment variables and JSON piece catalogs.
//!
//! | Variable              | Default            |
//! |-----------------------|--------------------|
//! | `BLOCKFALL_WIDTH`     | 10                 |
//! | `BLOCKFALL_HEIGHT`    | 20                 |
//! | `BLOCKFALL_LOW_WATER` | 3                  |
//! | `BLOCKFALL_SEED`      | derived from clock |
//! | `BLOCKFALL_CATALOG`   | standard pieces    |

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Catalog, GameConfig, Mask, PieceTemplate};
use crate::types::{Color, DEFAULT_HEIGHT, DEFAULT_LOW_WATER_MARK, DEFAULT_WIDTH};

/// One piece in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceEntry {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Row-major cells, `X`/`#` solid and `.`/`_`/space empty.
    pub mask: String,
    pub color: [u8; 3],
}

/// A catalog file: `{"pieces": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub pieces: Vec<PieceEntry>,
}

impl CatalogFile {
    pub fn into_catalog(self) -> Result<Catalog> {
        let templates = self
            .pieces
            .into_iter()
            .map(|entry| {
                let mask = Mask::parse_flat(entry.width, entry.height, &entry.mask)
                    .with_context(|| format!("piece {:?}", entry.name))?;
                let [r, g, b] = entry.color;
                Ok(PieceTemplate::from_mask(entry.name, mask, Color::new(r, g, b)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Catalog::new(templates)?)
    }
}

/// Parse a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let file: CatalogFile = serde_json::from_str(json).context("malformed catalog JSON")?;
    file.into_catalog()
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    parse_catalog(&json).with_context(|| format!("loading catalog {}", path.display()))
}

/// Settings the binary reads at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub width: u16,
    pub height: u16,
    pub low_water_mark: usize,
    pub seed: u32,
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            low_water_mark: DEFAULT_LOW_WATER_MARK,
            seed: clock_seed(),
            catalog_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys keep their defaults;
    /// values that fail to parse are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            width: parse_var(&get, "BLOCKFALL_WIDTH")?.unwrap_or(defaults.width),
            height: parse_var(&get, "BLOCKFALL_HEIGHT")?.unwrap_or(defaults.height),
            low_water_mark: parse_var(&get, "BLOCKFALL_LOW_WATER")?
                .unwrap_or(defaults.low_water_mark),
            seed: parse_var(&get, "BLOCKFALL_SEED")?.unwrap_or(defaults.seed),
            catalog_path: get("BLOCKFALL_CATALOG").map(PathBuf::from),
        })
    }

    /// Resolve into a core config, loading the catalog file if one is set.
    pub fn game_config(&self) -> Result<GameConfig> {
        let catalog = match &self.catalog_path {
            Some(path) => load_catalog(path)?,
            None => Catalog::standard(),
        };
        Ok(GameConfig {
            width: self.width,
            height: self.height,
            low_water_mark: self.low_water_mark,
            seed: self.seed,
            catalog,
        })
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow!("{}={:?}: {}", key, raw, e))
        })
        .transpose()
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
