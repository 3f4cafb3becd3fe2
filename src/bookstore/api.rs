//! # API Facade
//!
//! [`BookstoreApi`] is the single entry point for UIs. It owns the
//! [`Catalog`] and the [`BookstoreConfig`], dispatches each call to the
//! matching `commands::*::run`, and saves snapshots after every command that
//! changed the catalog.
//!
//! The facade does no printing and holds no business rules; those live in
//! the command modules and in the store.
//!
//! An unreadable snapshot at startup does not stop the facade from opening.
//! The failure is kept and returned by every command that reads or changes
//! the catalog, so nothing overwrites the bad file. `import` and `config`
//! still run, which is how the catalog gets repaired.

use crate::commands;
use crate::config::BookstoreConfig;
use crate::error::{BookstoreError, Result};
use crate::model::BookPatch;
use crate::store::{Catalog, SnapshotFormat};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct BookstoreApi {
    catalog: Catalog,
    config: BookstoreConfig,
    data_dir: PathBuf,
    startup_error: Option<BookstoreError>,
}

impl BookstoreApi {
    pub fn new(catalog: Catalog, config: BookstoreConfig, data_dir: PathBuf) -> Self {
        Self {
            catalog,
            config,
            data_dir,
            startup_error: None,
        }
    }

    /// Opens the catalog kept in `data_dir`.
    ///
    /// Reads the config, then the snapshot in the configured default format.
    /// A missing snapshot yields an empty catalog; an unreadable one is
    /// reported through [`BookstoreApi::startup_error`].
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = BookstoreConfig::load(&data_dir)?;
        let mut catalog = Catalog::new(data_dir.join(&config.base_name));

        let startup_error = match catalog.load(config.default_format, None) {
            Ok(true) => {
                info!(books = catalog.len(), "catalog loaded");
                None
            }
            Ok(false) => {
                info!(dir = %data_dir.display(), "starting with an empty catalog");
                None
            }
            Err(e @ BookstoreError::Persistence { .. }) => {
                warn!(error = %e, "catalog snapshot is unreadable");
                Some(e)
            }
            Err(e) => return Err(e),
        };

        let mut api = Self::new(catalog, config, data_dir);
        api.startup_error = startup_error;
        Ok(api)
    }

    /// The snapshot failure met by [`BookstoreApi::open`], until an import
    /// replaces the catalog.
    pub fn startup_error(&self) -> Option<&BookstoreError> {
        self.startup_error.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &BookstoreConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn add_book(&mut self, new_book: NewBook) -> Result<CmdResult> {
        self.ensure_loaded()?;
        let result = commands::add::run(&mut self.catalog, new_book)?;
        self.persist(result)
    }

    pub fn list_books(&self) -> Result<CmdResult> {
        self.ensure_loaded()?;
        commands::list::run(&self.catalog)
    }

    pub fn view_books(&self, ids: &[u64]) -> Result<CmdResult> {
        self.ensure_loaded()?;
        commands::view::run(&self.catalog, ids)
    }

    pub fn search_books(&self, term: &str) -> Result<CmdResult> {
        self.ensure_loaded()?;
        commands::search::run(&self.catalog, term)
    }

    pub fn update_book(&mut self, id: u64, patch: &BookPatch) -> Result<CmdResult> {
        self.ensure_loaded()?;
        let result = commands::update::run(&mut self.catalog, id, patch)?;
        self.persist(result)
    }

    pub fn delete_books(&mut self, ids: &[u64]) -> Result<CmdResult> {
        self.ensure_loaded()?;
        let result = commands::delete::run(&mut self.catalog, ids)?;
        self.persist(result)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        self.ensure_loaded()?;
        commands::stats::run(&self.catalog)
    }

    pub fn export(&self, format: SnapshotFormat, path: Option<&Path>) -> Result<CmdResult> {
        self.ensure_loaded()?;
        commands::export::run(&self.catalog, format, path)
    }

    pub fn import(&mut self, format: SnapshotFormat, path: Option<&Path>) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.catalog, format, path)?;
        if result.is_mutation() {
            self.startup_error = None;
        }
        self.persist(result)
    }

    pub fn config_action(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            if config.base_name != self.config.base_name {
                self.catalog
                    .set_base_path(self.data_dir.join(&config.base_name));
            }
            self.config = config.clone();
        }
        Ok(result)
    }

    fn ensure_loaded(&self) -> Result<()> {
        match &self.startup_error {
            Some(BookstoreError::Persistence {
                context,
                path,
                message,
            }) => Err(BookstoreError::persistence(
                context.as_str(),
                path.as_path(),
                message,
            )),
            _ => Ok(()),
        }
    }

    /// Saves the catalog in every configured format if `result` changed it.
    fn persist(&self, mut result: CmdResult) -> Result<CmdResult> {
        if !result.is_mutation() {
            return Ok(result);
        }

        let formats = self.config.write_formats();
        for format in &formats {
            let path = self.catalog.save(*format, None)?;
            result.snapshot_paths.push(path);
        }

        let names: Vec<String> = formats.iter().map(|f| f.to_string()).collect();
        result.add_message(CmdMessage::info(format!(
            "Saved {} snapshot(s)",
            names.join(", ")
        )));
        Ok(result)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, NewBook};
