use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Book;
use crate::store::Catalog;

/// Deletes every listed book, or none of them if any id is unknown.
pub fn run(catalog: &mut Catalog, ids: &[u64]) -> Result<CmdResult> {
    let books = ids
        .iter()
        .map(|id| catalog.get_book(*id).cloned())
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    let mut deleted: Vec<Book> = Vec::with_capacity(books.len());
    for book in books {
        // Repeated ids in the input resolve to the same book.
        if deleted.iter().any(|b| b.id() == book.id()) {
            continue;
        }
        catalog.delete_book(book.id())?;
        result.add_message(CmdMessage::success(format!(
            "Book deleted ({}): {}",
            book.id(),
            book.title()
        )));
        deleted.push(book);
    }

    Ok(result.with_affected_books(deleted).mark_changed())
}
