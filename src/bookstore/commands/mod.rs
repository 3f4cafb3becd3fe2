use crate::config::BookstoreConfig;
use crate::model::Book;
use crate::store::CatalogStats;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod search;
pub mod stats;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub listed_books: Vec<Book>,
    pub stats: Option<CatalogStats>,
    pub snapshot_paths: Vec<PathBuf>,
    pub config: Option<BookstoreConfig>,
    pub messages: Vec<CmdMessage>,
    /// Set by commands that modified the catalog, even if no book is left
    /// to report (an import of an empty snapshot).
    pub changed: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<Book>) -> Self {
        self.listed_books = books;
        self
    }

    pub fn with_stats(mut self, stats: CatalogStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_config(mut self, config: BookstoreConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    /// True when the command changed the catalog and it should be saved.
    pub fn is_mutation(&self) -> bool {
        self.changed
    }
}

/// A book as entered by a user, before it has an id.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub quantity: i64,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            price,
            quantity,
        }
    }
}
