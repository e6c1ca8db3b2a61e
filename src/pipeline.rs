use crate::config::PipelineConfig;
use crate::data::dimensions::{build_dimensions, Dimension};
use crate::data::encode::CategoryEncoder;
use crate::data::loader::load_file;
use crate::data::model::{Column, ColumnData, Table};
use crate::data::normalize::{environmental_columns, MinMaxScaler};
use crate::data::select::select_features;
use crate::error::Result;
use crate::schema;

// ---------------------------------------------------------------------------
// Prepared chart inputs
// ---------------------------------------------------------------------------

/// Everything the two renderers need, produced once per run.
#[derive(Debug, Clone)]
pub struct PreparedData {
    /// Selected columns, `mean_*` scaled to [0, 1], plus `diet_code`.
    pub table: Table,
    pub encoder: CategoryEncoder,
    /// `diet_code` per row.
    pub codes: Vec<i64>,
    pub dimensions: Vec<Dimension>,
}

/// Load `config.input_path` and run every transform stage.
pub fn run(config: &PipelineConfig) -> Result<PreparedData> {
    let raw = load_file(&config.input_path)?;
    prepare(raw, config)
}

/// select → normalize → encode → dimensions, printing a preview after each.
pub fn prepare(raw: Table, config: &PipelineConfig) -> Result<PreparedData> {
    let n = config.preview_rows;
    println!("Raw data:\n{}", raw.head(n));

    let mut table = select_features(&raw, &config.required_columns)?;
    println!("\nData after retaining relevant features:\n{}", table.head(n));

    let env = environmental_columns(&table);
    let mut scaler = MinMaxScaler::new();
    scaler.fit_transform(&mut table, &env)?;
    if let Ok(ranges) = serde_json::to_string(scaler.ranges()) {
        log::debug!("Fitted ranges: {ranges}");
    }
    let env_refs: Vec<&str> = env.iter().map(String::as_str).collect();
    println!(
        "\nNormalized environmental indicators:\n{}",
        table.project(&env_refs)?.head(n)
    );

    let groups = table.text(schema::DIET_GROUP)?;
    let encoder = CategoryEncoder::fit(&groups);
    let categories = (0..encoder.len() as i64)
        .map(|code| encoder.decode(code))
        .collect::<Result<Vec<_>>>()?;
    println!("\n{} categories: {:?}", schema::DIET_GROUP, categories);

    let mapping: serde_json::Map<String, serde_json::Value> = encoder
        .mapping()
        .map(|(label, code)| (label.to_string(), code.into()))
        .collect();
    println!(
        "{} encoding mapping: {}",
        schema::DIET_GROUP,
        serde_json::Value::Object(mapping)
    );

    let codes = encoder.encode(&groups)?;
    table.push_column(Column::new(schema::DIET_CODE, ColumnData::Integer(codes.clone())))?;
    println!(
        "\nData after adding {}:\n{}",
        schema::DIET_CODE,
        table.project(&[schema::DIET_GROUP, schema::DIET_CODE])?.head(n)
    );
    log::info!("Encoded {} diet groups over {} rows", encoder.len(), codes.len());

    let dimensions = build_dimensions(&table, &env)?;
    println!("\nDimension information of parallel coordinates plot:");
    for dim in &dimensions {
        println!("{}", dim.preview(n));
    }

    Ok(PreparedData {
        table,
        encoder,
        codes,
        dimensions,
    })
}
