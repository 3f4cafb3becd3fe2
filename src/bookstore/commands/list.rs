use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Catalog;

pub fn run(catalog: &Catalog) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_listed_books(catalog.books().to_vec());
    if catalog.is_empty() {
        result.add_message(CmdMessage::info("No books in the catalog."));
    }
    Ok(result)
}
