use crate::commands::{CmdMessage, CmdResult, NewBook};
use crate::error::Result;
use crate::store::Catalog;

pub fn run(catalog: &mut Catalog, new_book: NewBook) -> Result<CmdResult> {
    let book = catalog.add_book(
        new_book.title,
        new_book.author,
        new_book.price,
        new_book.quantity,
    )?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book added ({}): {}",
        book.id(),
        book.title()
    )));
    Ok(result.with_affected_books(vec![book]).mark_changed())
}
