use anyhow::Context;
use csv::Writer;
use std::path::Path;

use crate::processing::table::SdsTable;

/// Writes the calculations table as a header row followed by one value row.
pub fn write_table_to_csv<P: AsRef<Path>>(path: P, table: &SdsTable) -> anyhow::Result<()> {
    let mut wtr = Writer::from_path(&path)
        .with_context(|| format!("failed to create table file {:?}", path.as_ref()))?;

    wtr.write_record(SdsTable::headings())?;
    wtr.write_record(table.text_values())?;

    wtr.flush()?;
    log::info!("SDS table written to {}", path.as_ref().display());
    Ok(())
}
