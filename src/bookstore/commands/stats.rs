use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::Catalog;

pub fn run(catalog: &Catalog) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(catalog.stats()))
}
