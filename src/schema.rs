/// Column-name constants for the diet dataset.
/// Single source of truth for the loader, the transforms and both charts.

// ── Categorical columns ─────────────────────────────────────────────────────
pub const DIET_GROUP: &str = "diet_group";
pub const SEX: &str = "sex";
pub const AGE_GROUP: &str = "age_group";

// ── Environmental mean columns ──────────────────────────────────────────────
pub const MEAN_GHGS: &str = "mean_ghgs";
pub const MEAN_LAND: &str = "mean_land";
pub const MEAN_WATSCAR: &str = "mean_watscar";
pub const MEAN_BIO: &str = "mean_bio";
pub const MEAN_WATUSE: &str = "mean_watuse";

/// Prefix shared by every environmental mean column.
pub const ENV_PREFIX: &str = "mean_";

// ── Derived columns ─────────────────────────────────────────────────────────
pub const DIET_CODE: &str = "diet_code";

/// Columns kept by the feature selector, in output order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    DIET_GROUP,
    SEX,
    AGE_GROUP,
    MEAN_GHGS,
    MEAN_LAND,
    MEAN_WATSCAR,
    MEAN_BIO,
    MEAN_WATUSE,
];

/// Indicators shown in the scatter matrix (diet and water focus).
pub const SCATTER_VARS: [&str; 3] = [MEAN_WATSCAR, MEAN_WATUSE, MEAN_GHGS];

/// Short axis labels for the environmental columns.
pub const DISPLAY_LABELS: [(&str, &str); 5] = [
    (MEAN_GHGS, "GHGs"),
    (MEAN_LAND, "Land Use"),
    (MEAN_WATSCAR, "Water Scarcity"),
    (MEAN_BIO, "Biodiversity"),
    (MEAN_WATUSE, "Water Use"),
];

/// Display label for a column, falling back to the raw name.
pub fn display_label(column: &str) -> &str {
    DISPLAY_LABELS
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, label)| *label)
        .unwrap_or(column)
}

/// Whether the column is one of the environmental mean indicators.
pub fn is_environmental(column: &str) -> bool {
    column.starts_with(ENV_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_columns_get_short_labels() {
        assert_eq!(display_label(MEAN_GHGS), "GHGs");
        assert_eq!(display_label(MEAN_WATSCAR), "Water Scarcity");
    }

    #[test]
    fn unknown_column_keeps_raw_name() {
        assert_eq!(display_label("mean_eut"), "mean_eut");
    }

    #[test]
    fn required_columns_hold_five_indicators() {
        let env: Vec<_> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| is_environmental(c))
            .collect();
        assert_eq!(env.len(), 5);
    }
}
