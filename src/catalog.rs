use std::fs::File;
use std::io::Read;
use std::path::Path;

use include_dir::{include_dir, Dir};
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::round::Round;

static CATALOG_DIR: Dir = include_dir!("src/catalogs");

/// Catalog shipped inside the binary.
pub const DEFAULT_CATALOG: &str = "default.csv";

/// One catalog row as stored on disk: `category,description,keys`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotKey {
    pub category: String,
    pub description: String,
    pub keys: String,
}

/// All known shortcuts, parsed and grouped by category.
#[derive(Debug, Clone, Default)]
pub struct HotKeyCatalog {
    hotkeys: Vec<Round>,
}

impl HotKeyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_hotkey(&mut self, category: &str, description: &str, keys: &str) -> Result<()> {
        self.hotkeys.push(Round::parse(category, description, keys)?);
        Ok(())
    }

    /// Read `category,description,keys` records. Rows missing a field are
    /// skipped; rows whose keys do not parse are an error.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut catalog = HotKeyCatalog::new();
        let mut record = csv::StringRecord::new();
        while rdr.read_record(&mut record)? {
            let line = record.position().map_or(0, |p| p.line());
            let hotkey: HotKey = record.deserialize(Some(&headers))?;

            if hotkey.category.is_empty() || hotkey.description.is_empty() || hotkey.keys.is_empty()
            {
                warn!("skipping incomplete catalog record on line {line}");
                continue;
            }
            let round = Round::parse(hotkey.category, hotkey.description, &hotkey.keys)
                .map_err(|source| Error::CatalogRecord { line, source })?;
            catalog.hotkeys.push(round);
        }

        debug!("loaded {} hotkeys", catalog.len());
        Ok(catalog)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("loading catalog from {}", path.as_ref().display());
        Self::from_csv_reader(File::open(path)?)
    }

    pub fn bundled() -> Result<Self> {
        Self::bundled_named(DEFAULT_CATALOG)
    }

    pub fn bundled_named(file_name: &str) -> Result<Self> {
        let file = CATALOG_DIR
            .get_file(file_name)
            .ok_or_else(|| Error::MissingCatalog(file_name.to_string()))?;
        Self::from_csv_reader(file.contents())
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        self.hotkeys
            .iter()
            .map(|hk| hk.category.as_str())
            .unique()
            .collect()
    }

    pub fn all(&self) -> &[Round] {
        &self.hotkeys
    }

    pub fn in_category(&self, category: &str) -> Vec<&Round> {
        if category.is_empty() {
            return Vec::new();
        }
        self.hotkeys
            .iter()
            .filter(|hk| hk.category == category)
            .collect()
    }

    pub fn in_categories<S: AsRef<str>>(&self, categories: &[S]) -> Vec<&Round> {
        self.hotkeys
            .iter()
            .filter(|hk| categories.iter().any(|c| c.as_ref() == hk.category))
            .collect()
    }

    /// Fresh rounds for a new game; an empty selection means every category.
    pub fn rounds<S: AsRef<str>>(&self, categories: &[S]) -> Vec<Round> {
        if categories.is_empty() {
            self.hotkeys.clone()
        } else {
            self.in_categories(categories).into_iter().cloned().collect()
        }
    }

    pub fn len(&self) -> usize {
        self.hotkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotkeys.is_empty()
    }
}
