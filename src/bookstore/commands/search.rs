use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Catalog;

pub fn run(catalog: &Catalog, term: &str) -> Result<CmdResult> {
    let books: Vec<_> = catalog.search(term).into_iter().cloned().collect();
    let mut result = CmdResult::default();
    if books.is_empty() {
        result.add_message(CmdMessage::info(format!("No books match '{}'.", term)));
    }
    Ok(result.with_listed_books(books))
}
