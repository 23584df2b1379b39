use engine_logging::engine_warn;
use tradeview_core::{Record, ViewType, RECORD_CELLS};

use crate::{DriverError, PageDriver, Selectors};

/// Extracts the records of the page currently shown, in row order.
///
/// Columns are mapped by position. Rows with fewer than four data cells are
/// skipped with a warning.
pub async fn extract_page(
    driver: &dyn PageDriver,
    view: ViewType,
    selectors: &Selectors,
) -> Result<Vec<Record>, DriverError> {
    let rows = driver.locate_all(&selectors.data_rows).await?;
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let cells = driver.locate_within(row, &selectors.data_cells).await?;
        if cells.len() < RECORD_CELLS {
            engine_warn!(
                "skipping row {} with {} of {} data cells",
                index,
                cells.len(),
                RECORD_CELLS
            );
            continue;
        }
        let mut texts = Vec::with_capacity(RECORD_CELLS);
        for cell in &cells[..RECORD_CELLS] {
            texts.push(driver.text(cell).await?);
        }
        if let Some(record) = Record::from_cells(view, &texts) {
            records.push(record);
        }
    }
    Ok(records)
}
