use super::model::Table;
use crate::error::Result;

/// Project `table` down to `required`, in that order.
///
/// Every absent column is reported at once, before any later stage runs.
/// Row count and row order are unchanged.
pub fn select_features<S: AsRef<str>>(table: &Table, required: &[S]) -> Result<Table> {
    let names: Vec<&str> = required.iter().map(|s| s.as_ref()).collect();
    let selected = table.project(&names)?;
    log::info!(
        "Selected {} of {} columns: {:?}",
        selected.num_columns(),
        table.num_columns(),
        selected.column_names()
    );
    Ok(selected)
}
