use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookPatch;
use crate::store::Catalog;

pub fn run(catalog: &mut Catalog, id: u64, patch: &BookPatch) -> Result<CmdResult> {
    if patch.is_empty() {
        // Still resolve the id so a typo is reported.
        let book = catalog.get_book(id)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(format!(
            "Nothing to update for book {}: {}",
            id,
            book.title()
        )));
        return Ok(result);
    }

    let book = catalog.update_book(id, patch)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book updated ({}): {}",
        book.id(),
        book.title()
    )));
    Ok(result.with_affected_books(vec![book]).mark_changed())
}
