use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::Catalog;

pub fn run(catalog: &Catalog, ids: &[u64]) -> Result<CmdResult> {
    let books = ids
        .iter()
        .map(|id| catalog.get_book(*id).cloned())
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_books(books))
}
