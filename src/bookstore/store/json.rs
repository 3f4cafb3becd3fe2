//! Structured text snapshots: `{"books": [{...}, ...]}`.

use super::SnapshotError;
use crate::model::{Book, BookRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    books: Vec<BookRecord>,
}

pub fn encode(books: &[Book]) -> Result<String, SnapshotError> {
    let snapshot = Snapshot {
        books: books.iter().map(BookRecord::from).collect(),
    };
    let mut content = serde_json::to_string_pretty(&snapshot)?;
    content.push('\n');
    Ok(content)
}

pub fn decode(content: &str) -> Result<Vec<BookRecord>, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_str(content)?;
    Ok(snapshot.books)
}
