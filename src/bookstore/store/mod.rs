//! # Catalog Store
//!
//! [`Catalog`] owns the ordered list of [`Book`]s and is the only way to
//! change it. It assigns ids, enforces id uniqueness, answers aggregate
//! queries, and persists the whole list as a snapshot.
//!
//! ## Id Assignment
//!
//! A new book gets `max(existing ids) + 1`, or `1` for an empty catalog.
//! Freed ids below the maximum are never handed out again, but deleting the
//! book holding the maximum makes that id available to the next add.
//!
//! ## Snapshots
//!
//! Persistence is whole-catalog: every save writes all books and every load
//! replaces all books. Two formats are supported, see [`SnapshotFormat`]:
//!
//! ```text
//! <base>.json   # {"books": [{"id": 1, "title": ..., ...}]}
//! <base>.xml    # <bookstore><book><id>1</id>...</book></bookstore>
//! ```
//!
//! Writes go through a temp file and a rename ([`fs::write_atomic`]). Loads
//! re-validate every record and reject duplicate ids before touching the
//! in-memory list, so a bad file never leaves the catalog half-replaced.

use crate::error::{BookstoreError, Result};
use crate::model::{Book, BookPatch, BookRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub mod fs;
pub mod json;
pub mod xml;

/// Why a snapshot could not be encoded or decoded.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid XML: {0}")]
    Xml(String),

    #[error("unexpected root element <{0}>")]
    UnexpectedRoot(String),

    #[error("book is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("field '{field}' has non-numeric value '{value}'")]
    BadField { field: &'static str, value: String },
}

/// On-disk snapshot formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    Json,
    Xml,
}

impl SnapshotFormat {
    pub const ALL: [SnapshotFormat; 2] = [SnapshotFormat::Json, SnapshotFormat::Xml];

    pub fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Xml => "xml",
        }
    }

    pub fn encode(self, books: &[Book]) -> std::result::Result<String, SnapshotError> {
        match self {
            SnapshotFormat::Json => json::encode(books),
            SnapshotFormat::Xml => xml::encode(books),
        }
    }

    pub fn decode(self, content: &str) -> std::result::Result<Vec<BookRecord>, SnapshotError> {
        match self {
            SnapshotFormat::Json => json::decode(content),
            SnapshotFormat::Xml => xml::decode(content),
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SnapshotFormat {
    type Err = BookstoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "xml" => Ok(SnapshotFormat::Xml),
            other => Err(BookstoreError::Config(format!(
                "unknown snapshot format '{}' (expected json or xml)",
                other
            ))),
        }
    }
}

/// Aggregate figures over the whole catalog.
///
/// Each quantity fits in an `i64`, so the total is widened to keep large
/// catalogs from overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total_quantity: u128,
    pub total_value: f64,
    pub distinct_count: usize,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    base_path: PathBuf,
}

impl Catalog {
    /// An empty catalog whose default snapshot paths derive from `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            books: Vec::new(),
            base_path: base_path.into(),
        }
    }

    /// A catalog pre-filled with `books`, which must have distinct ids.
    pub fn with_books(base_path: impl Into<PathBuf>, books: Vec<Book>) -> Result<Self> {
        ensure_unique_ids(&books)?;
        Ok(Self {
            books,
            base_path: base_path.into(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Points default snapshot paths at a new base; the books are untouched.
    pub fn set_base_path(&mut self, base_path: impl Into<PathBuf>) {
        self.base_path = base_path.into();
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.books.iter().map(Book::id).collect()
    }

    fn next_id(&self) -> Result<i64> {
        let max = self.books.iter().map(Book::id).max().unwrap_or(0);
        max.checked_add(1)
            .and_then(|id| i64::try_from(id).ok())
            .ok_or_else(|| BookstoreError::validation("id", max))
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.books
            .iter()
            .position(|b| b.id() == id)
            .ok_or(BookstoreError::NotFound(id))
    }

    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Result<Book> {
        let book = Book::new(self.next_id()?, title, author, price, quantity)?;
        debug!(id = book.id(), title = book.title(), "added book");
        self.books.push(book.clone());
        Ok(book)
    }

    pub fn get_book(&self, id: u64) -> Result<&Book> {
        self.position(id).map(|i| &self.books[i])
    }

    /// All books in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Case-insensitive substring match on title or author.
    pub fn search(&self, term: &str) -> Vec<&Book> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .filter(|b| {
                b.title().to_lowercase().contains(&needle)
                    || b.author().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn update_book(&mut self, id: u64, patch: &BookPatch) -> Result<Book> {
        let index = self.position(id)?;
        let updated = self.books[index].apply(patch)?;
        debug!(id, "updated book");
        self.books[index] = updated.clone();
        Ok(updated)
    }

    pub fn delete_book(&mut self, id: u64) -> Result<bool> {
        let index = self.position(id)?;
        let removed = self.books.remove(index);
        debug!(id, title = removed.title(), "deleted book");
        Ok(true)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_quantity: self
                .books
                .iter()
                .map(|b| u128::from(b.quantity()))
                .sum(),
            total_value: self.books.iter().fold(0.0, |acc, b| acc + b.value()),
            distinct_count: self.books.len(),
        }
    }

    /// `<base>.<ext>`; the extension is appended, never substituted.
    pub fn default_path(&self, format: SnapshotFormat) -> PathBuf {
        let mut name = OsString::from(self.base_path.as_os_str());
        name.push(".");
        name.push(format.extension());
        PathBuf::from(name)
    }

    /// Writes every book to `path` (or the default path) and returns the
    /// path written.
    pub fn save(&self, format: SnapshotFormat, path: Option<&Path>) -> Result<PathBuf> {
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_path(format));
        let context = format!("save {} snapshot", format);

        let content = format
            .encode(&self.books)
            .map_err(|e| BookstoreError::persistence(&context, &target, e))?;
        fs::write_atomic(&target, content.as_bytes())
            .map_err(|e| BookstoreError::persistence(&context, &target, e))?;

        info!(path = %target.display(), books = self.books.len(), %format, "saved snapshot");
        Ok(target)
    }

    /// Replaces every book with the contents of `path` (or the default path).
    ///
    /// Returns `Ok(false)` and leaves the catalog as it was when the file does
    /// not exist.
    pub fn load(&mut self, format: SnapshotFormat, path: Option<&Path>) -> Result<bool> {
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_path(format));
        let context = format!("load {} snapshot", format);

        let content = match fs::read_if_exists(&target)
            .map_err(|e| BookstoreError::persistence(&context, &target, e))?
        {
            Some(content) => content,
            None => {
                debug!(path = %target.display(), "no snapshot to load");
                return Ok(false);
            }
        };

        let books = format
            .decode(&content)
            .map_err(|e| BookstoreError::persistence(&context, &target, e))?
            .into_iter()
            .map(Book::try_from)
            .collect::<Result<Vec<_>>>()
            .and_then(|books| ensure_unique_ids(&books).map(|_| books))
            .map_err(|e| BookstoreError::persistence(&context, &target, e))?;

        info!(path = %target.display(), books = books.len(), %format, "loaded snapshot");
        self.books = books;
        Ok(true)
    }
}

fn ensure_unique_ids(books: &[Book]) -> Result<()> {
    let mut seen = HashSet::with_capacity(books.len());
    for book in books {
        if !seen.insert(book.id()) {
            return Err(BookstoreError::validation("id", book.id()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new("bookstore_data")
    }

    fn sample() -> Catalog {
        let mut catalog = catalog();
        catalog.add_book("Dune", "Herbert", 15.5, 3).unwrap();
        catalog.add_book("Foundation", "Asimov", 12.0, 5).unwrap();
        catalog
    }

    #[test]
    fn first_id_is_one() {
        let mut catalog = catalog();
        let book = catalog.add_book("Dune", "Herbert", 15.5, 3).unwrap();
        assert_eq!(book.id(), 1);
    }

    #[test]
    fn ids_follow_current_maximum() {
        let mut catalog = sample();
        assert_eq!(catalog.ids(), vec![1, 2]);

        catalog.delete_book(1).unwrap();
        let book = catalog.add_book("Neuromancer", "Gibson", 10.0, 2).unwrap();
        assert_eq!(book.id(), 3);
    }

    #[test]
    fn deleting_the_maximum_frees_its_id() {
        let mut catalog = sample();
        catalog.delete_book(2).unwrap();
        let book = catalog.add_book("Neuromancer", "Gibson", 10.0, 2).unwrap();
        assert_eq!(book.id(), 2);
    }

    #[test]
    fn invalid_add_leaves_catalog_unchanged() {
        let mut catalog = sample();
        assert!(matches!(
            catalog.add_book("", "Nobody", 1.0, 1),
            Err(BookstoreError::Validation { field: "title", .. })
        ));
        assert!(matches!(
            catalog.add_book("T", "A", -1.0, 1),
            Err(BookstoreError::Validation { field: "price", .. })
        ));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn get_book_by_id() {
        let catalog = sample();
        assert_eq!(catalog.get_book(2).unwrap().title(), "Foundation");
        assert!(matches!(catalog.get_book(9), Err(BookstoreError::NotFound(9))));
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let mut catalog = sample();
        let patch = BookPatch {
            quantity: Some(10),
            ..Default::default()
        };
        let updated = catalog.update_book(1, &patch).unwrap();
        assert_eq!(updated.quantity(), 10);
        assert_eq!(catalog.get_book(1).unwrap().quantity(), 10);
        assert_eq!(catalog.get_book(1).unwrap().title(), "Dune");
        assert_eq!(catalog.get_book(1).unwrap().price(), 15.5);
    }

    #[test]
    fn failed_update_does_not_partially_apply() {
        let mut catalog = sample();
        let patch = BookPatch {
            title: Some("Dune Messiah".into()),
            price: Some(-2.0),
            ..Default::default()
        };
        assert!(catalog.update_book(1, &patch).is_err());
        assert_eq!(catalog.get_book(1).unwrap().title(), "Dune");
    }

    #[test]
    fn missing_ids_are_not_found() {
        let mut catalog = sample();
        assert!(matches!(
            catalog.update_book(42, &BookPatch::default()),
            Err(BookstoreError::NotFound(42))
        ));
        assert!(matches!(catalog.delete_book(42), Err(BookstoreError::NotFound(42))));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn delete_preserves_order() {
        let mut catalog = sample();
        catalog.add_book("Neuromancer", "Gibson", 10.0, 2).unwrap();
        assert!(catalog.delete_book(2).unwrap());
        assert_eq!(catalog.ids(), vec![1, 3]);
    }

    #[test]
    fn stats() {
        assert_eq!(catalog().stats(), CatalogStats::default());

        let stats = sample().stats();
        assert_eq!(stats.total_quantity, 8);
        assert_eq!(stats.total_value, 106.5);
        assert_eq!(stats.distinct_count, 2);
    }

    #[test]
    fn stats_total_quantity_does_not_overflow() {
        let mut catalog = catalog();
        for title in ["A", "B", "C"] {
            catalog.add_book(title, "Author", 0.0, i64::MAX).unwrap();
        }

        let stats = catalog.stats();
        assert_eq!(stats.total_quantity, 3 * i64::MAX as u128);
        assert_eq!(stats.total_value, 0.0);
        assert_eq!(stats.distinct_count, 3);
    }

    #[test]
    fn search_matches_title_or_author() {
        let catalog = sample();
        let found: Vec<u64> = catalog.search("ASIM").iter().map(|b| b.id()).collect();
        assert_eq!(found, vec![2]);
        let found: Vec<u64> = catalog.search("un").iter().map(|b| b.id()).collect();
        assert_eq!(found, vec![1, 2]);
        assert!(catalog.search("tolkien").is_empty());
    }

    #[test]
    fn with_books_rejects_duplicate_ids() {
        let books = vec![
            Book::new(1, "A", "A", 1.0, 1).unwrap(),
            Book::new(1, "B", "B", 1.0, 1).unwrap(),
        ];
        assert!(Catalog::with_books("x", books).is_err());
    }

    #[test]
    fn default_path_appends_extension() {
        let catalog = Catalog::new("data/my.catalog");
        assert_eq!(
            catalog.default_path(SnapshotFormat::Json),
            PathBuf::from("data/my.catalog.json")
        );
        assert_eq!(
            catalog.default_path(SnapshotFormat::Xml),
            PathBuf::from("data/my.catalog.xml")
        );
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("JSON".parse::<SnapshotFormat>().unwrap(), SnapshotFormat::Json);
        assert_eq!(" xml ".parse::<SnapshotFormat>().unwrap(), SnapshotFormat::Xml);
        assert!("yaml".parse::<SnapshotFormat>().is_err());
    }

    #[test]
    fn round_trips_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut original = Catalog::new(dir.path().join("bookstore_data"));
        original.add_book("Мастер и Маргарита", "Булгаков", 450.0, 2).unwrap();
        original.add_book("Dune", "Herbert", 15.5, 3).unwrap();
        original.add_book("Tom & Jerry", "<Hanna>", 0.1, 0).unwrap();
        original.delete_book(2).unwrap();

        for format in SnapshotFormat::ALL {
            let path = original.save(format, None).unwrap();
            assert_eq!(path, original.default_path(format));

            let mut loaded = Catalog::new(dir.path().join("bookstore_data"));
            assert!(loaded.load(format, None).unwrap());
            assert_eq!(loaded.books(), original.books());
        }
    }

    #[test]
    fn load_missing_file_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = sample();
        let missing = dir.path().join("absent.json");
        assert!(!catalog.load(SnapshotFormat::Json, Some(&missing)).unwrap());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn load_replaces_instead_of_merging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        let mut single = catalog();
        single.add_book("Solaris", "Lem", 9.0, 1).unwrap();
        single.save(SnapshotFormat::Json, Some(&path)).unwrap();

        let mut catalog = sample();
        assert!(catalog.load(SnapshotFormat::Json, Some(&path)).unwrap());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_book(1).unwrap().title(), "Solaris");
    }

    #[test]
    fn corrupt_snapshot_fails_and_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xml");
        std::fs::write(&path, "<bookstore><book><id>1</id>").unwrap();

        let mut catalog = sample();
        let err = catalog.load(SnapshotFormat::Xml, Some(&path)).unwrap_err();
        match err {
            BookstoreError::Persistence { path: p, context, .. } => {
                assert_eq!(p, path);
                assert_eq!(context, "load xml snapshot");
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn load_revalidates_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edited.json");
        std::fs::write(
            &path,
            r#"{"books": [{"id": 1, "title": "", "author": "A", "price": 1.0, "quantity": 1}]}"#,
        )
        .unwrap();

        let mut catalog = sample();
        assert!(matches!(
            catalog.load(SnapshotFormat::Json, Some(&path)),
            Err(BookstoreError::Persistence { .. })
        ));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn load_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dupes.json");
        std::fs::write(
            &path,
            r#"{"books": [
                {"id": 1, "title": "A", "author": "A", "price": 1.0, "quantity": 1},
                {"id": 1, "title": "B", "author": "B", "price": 2.0, "quantity": 2}
            ]}"#,
        )
        .unwrap();

        let mut catalog = catalog();
        assert!(catalog.load(SnapshotFormat::Json, Some(&path)).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn save_into_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let target = blocker.join("catalog.json");

        let catalog = sample();
        assert!(matches!(
            catalog.save(SnapshotFormat::Json, Some(&target)),
            Err(BookstoreError::Persistence { .. })
        ));
    }
}
