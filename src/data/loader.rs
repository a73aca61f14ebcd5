use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::{DataError, DataResult};
use super::model::{
    CategoricalField, HousingDataset, HousingRecord, NumericField, STORIES_COLUMN,
};

// ---------------------------------------------------------------------------
// Memoized loader
// ---------------------------------------------------------------------------

/// Reads the source once and hands out the same shared dataset afterwards.
///
/// Failed loads are not cached, so a later call retries the read.
#[derive(Debug)]
pub struct DatasetLoader {
    path: PathBuf,
    cached: Option<Arc<HousingDataset>>,
    reads: usize,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
            reads: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the dataset, reading the source only on the first call.
    pub fn load(&mut self) -> DataResult<Arc<HousingDataset>> {
        if let Some(dataset) = &self.cached {
            log::debug!("Serving cached dataset for {}", self.path.display());
            return Ok(Arc::clone(dataset));
        }

        self.reads += 1;
        let dataset = Arc::new(load_file(&self.path)?);
        log::info!(
            "Loaded {} housing records from {}",
            dataset.len(),
            self.path.display()
        );
        self.cached = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.is_some()
    }

    /// How many times the source file has been read.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Drop the cached dataset; the next `load` re-reads the source.
    pub fn reset(&mut self) {
        self.cached = None;
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalize a housing dataset.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the six known columns
/// * `.json`    – `[{ "price": ..., "area": ..., ... }, ...]`
/// * `.parquet` – flat columns with numeric / Utf8 types
pub fn load_file(path: &Path) -> DataResult<HousingDataset> {
    read_file(path).map_err(|err| DataError::from_load(path, err))
}

/// Parse CSV from any reader (used for in-memory sources).
pub fn load_csv_reader<R: Read>(reader: R) -> DataResult<HousingDataset> {
    let rdr = csv::Reader::from_reader(reader);
    parse_csv(rdr)
        .map(finish)
        .map_err(|err| DataError::from_load(Path::new("<reader>"), err))
}

fn read_file(path: &Path) -> Result<HousingDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => {
            let rdr = csv::Reader::from_path(path).context("opening CSV")?;
            parse_csv(rdr)?
        }
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(finish(records))
}

/// Normalize categorical columns and build the dataset indices.
fn finish(mut records: Vec<HousingRecord>) -> HousingDataset {
    for rec in &mut records {
        rec.normalize();
    }
    HousingDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// Cell helpers shared by all formats
// ---------------------------------------------------------------------------

fn parse_number(s: &str, row: usize, col: &str) -> Result<f64> {
    let value = s
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))?;
    if !value.is_finite() {
        bail!("Row {row}, {col}: '{s}' is not a finite number");
    }
    Ok(value)
}

fn integral(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

fn parse_stories(s: &str, row: usize) -> Result<i64> {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(i);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(integral)
        .with_context(|| format!("Row {row}, {STORIES_COLUMN}: '{s}' is not an integer"))
}

/// A categorical cell must be non-empty text.
fn check_category(s: &str, row: usize, field: CategoricalField) -> Result<String> {
    if s.trim().is_empty() {
        return Err(DataError::schema(field.column(), format!("row {row} is empty")).into());
    }
    if looks_numeric(s) {
        return Err(DataError::schema(
            field.column(),
            format!("row {row} holds the number '{s}', expected text"),
        )
        .into());
    }
    Ok(s.to_string())
}

/// Digits that parse as a number; words like "nan" or "inf" stay text.
fn looks_numeric(s: &str) -> bool {
    let t = s.trim();
    t.bytes().any(|b| b.is_ascii_digit()) && t.parse::<f64>().is_ok()
}

fn missing_category(field: CategoricalField) -> anyhow::Error {
    DataError::schema(field.column(), "column is missing").into()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column positions of the known fields within a CSV header.
struct CsvColumns {
    price: usize,
    area: usize,
    stories: usize,
    categories: [usize; 3],
}

impl CsvColumns {
    fn locate(headers: &[String]) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| {
            position(name).with_context(|| format!("CSV missing '{name}' column"))
        };

        let mut categories = [0; 3];
        for (slot, field) in categories.iter_mut().zip(CategoricalField::ALL) {
            *slot = position(field.column()).ok_or_else(|| missing_category(field))?;
        }

        Ok(CsvColumns {
            price: required(NumericField::Price.column())?,
            area: required(NumericField::Area.column())?,
            stories: required(STORIES_COLUMN)?,
            categories,
        })
    }
}

/// CSV layout: header row with column names; extra columns are ignored.
fn parse_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<HousingRecord>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let cols = CsvColumns::locate(&headers)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let [basement, airconditioning, furnishingstatus] = cols.categories;
        records.push(HousingRecord {
            price: parse_number(cell(cols.price), row_no, NumericField::Price.column())?,
            area: parse_number(cell(cols.area), row_no, NumericField::Area.column())?,
            stories: parse_stories(cell(cols.stories), row_no)?,
            basement: check_category(cell(basement), row_no, CategoricalField::Basement)?,
            airconditioning: check_category(
                cell(airconditioning),
                row_no,
                CategoricalField::AirConditioning,
            )?,
            furnishingstatus: check_category(
                cell(furnishingstatus),
                row_no,
                CategoricalField::FurnishingStatus,
            )?,
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "price": 13300000, "area": 7420, "stories": 3,
///     "basement": "no", "airconditioning": "yes", "furnishingstatus": "furnished" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<HousingRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            json_record(obj, i)
        })
        .collect()
}

fn json_record(obj: &Map<String, JsonValue>, row: usize) -> Result<HousingRecord> {
    let number = |col: &str| -> Result<f64> {
        obj.get(col)
            .with_context(|| format!("Row {row}: missing '{col}'"))?
            .as_f64()
            .with_context(|| format!("Row {row}, {col}: not a number"))
    };
    let category = |field: CategoricalField| -> Result<String> {
        match obj.get(field.column()) {
            None => Err(missing_category(field)),
            Some(JsonValue::String(s)) => check_category(s, row, field),
            Some(other) => Err(DataError::schema(
                field.column(),
                format!("row {row} holds {other}, expected a string"),
            )
            .into()),
        }
    };

    let stories = number(STORIES_COLUMN)?;
    Ok(HousingRecord {
        price: number(NumericField::Price.column())?,
        area: number(NumericField::Area.column())?,
        stories: integral(stories)
            .with_context(|| format!("Row {row}, {STORIES_COLUMN}: {stories} is not an integer"))?,
        basement: category(CategoricalField::Basement)?,
        airconditioning: category(CategoricalField::AirConditioning)?,
        furnishingstatus: category(CategoricalField::FurnishingStatus)?,
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat housing columns.
///
/// Numeric columns may be Int32/Int64/Float32/Float64; categorical columns
/// must be Utf8, LargeUtf8, or a dictionary of either (Pandas `category`).
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<HousingRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let price = batch_column(&batch, NumericField::Price.column())?;
        let area = batch_column(&batch, NumericField::Area.column())?;
        let stories = batch_column(&batch, STORIES_COLUMN)?;
        let basement = batch_category(&batch, CategoricalField::Basement)?;
        let airconditioning = batch_category(&batch, CategoricalField::AirConditioning)?;
        let furnishingstatus = batch_category(&batch, CategoricalField::FurnishingStatus)?;

        for row in 0..batch.num_rows() {
            let row_no = offset + row;
            let stories_value = numeric_at(stories, row)
                .with_context(|| format!("Row {row_no}: failed to read '{STORIES_COLUMN}'"))?;

            records.push(HousingRecord {
                price: numeric_at(price, row)
                    .with_context(|| format!("Row {row_no}: failed to read 'price'"))?,
                area: numeric_at(area, row)
                    .with_context(|| format!("Row {row_no}: failed to read 'area'"))?,
                stories: integral(stories_value).with_context(|| {
                    format!("Row {row_no}, {STORIES_COLUMN}: {stories_value} is not an integer")
                })?,
                basement: text_at(&basement, row_no, row, CategoricalField::Basement)?,
                airconditioning: text_at(
                    &airconditioning,
                    row_no,
                    row,
                    CategoricalField::AirConditioning,
                )?,
                furnishingstatus: text_at(
                    &furnishingstatus,
                    row_no,
                    row,
                    CategoricalField::FurnishingStatus,
                )?,
            });
        }
        offset += batch.num_rows();
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Categorical column, with dictionary-encoded text decoded to plain Utf8.
fn batch_category(batch: &RecordBatch, field: CategoricalField) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(field.column())
        .map_err(|_| missing_category(field))?;
    let col = Arc::clone(batch.column(idx));
    match col.data_type() {
        DataType::Dictionary(_, values)
            if matches!(values.as_ref(), DataType::Utf8 | DataType::LargeUtf8) =>
        {
            cast(&col, &DataType::Utf8)
                .with_context(|| format!("decoding dictionary column '{field}'"))
        }
        _ => Ok(col),
    }
}

/// Read a numeric cell as `f64` regardless of the column's integer/float width.
fn numeric_at(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    let value = match col.data_type() {
        DataType::Int32 => col.as_primitive_opt::<Int32Type>().map(|a| a.value(row) as f64),
        DataType::Int64 => col.as_primitive_opt::<Int64Type>().map(|a| a.value(row) as f64),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| a.value(row) as f64),
        DataType::Float64 => col.as_primitive_opt::<Float64Type>().map(|a| a.value(row)),
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    let value = value.context("numeric column has an unexpected array layout")?;
    if !value.is_finite() {
        bail!("'{value}' is not a finite number");
    }
    Ok(value)
}

/// Read a categorical cell; anything but non-null text is a schema error.
fn text_at(col: &ArrayRef, row_no: usize, row: usize, field: CategoricalField) -> Result<String> {
    if col.is_null(row) {
        return Err(DataError::schema(field.column(), format!("row {row_no} is null")).into());
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string_opt::<i32>().map(|a| a.value(row)),
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|a| a.value(row)),
        other => {
            return Err(DataError::schema(
                field.column(),
                format!("expected a text column, got {other:?}"),
            )
            .into());
        }
    };
    let value = value.with_context(|| format!("'{field}' has an unexpected array layout"))?;
    check_category(value, row_no, field)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    static TEMP_SEQ: AtomicUsize = AtomicUsize::new(0);

    const SAMPLE_CSV: &str = "\
price,area,bedrooms,stories,basement,airconditioning,furnishingstatus
13300000,7420,4,3,no,YES,Furnished
12250000,8960,4,4,No,yes,SEMI-FURNISHED
9100000,6000,3,2,yes,no,unfurnished
";

    fn temp_path(ext: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "house-explorer-{}-{}-{}.{ext}",
            std::process::id(),
            TEMP_SEQ.fetch_add(1, Ordering::Relaxed),
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default()
        ))
    }

    fn write_temp(ext: &str, contents: &str) -> PathBuf {
        let path = temp_path(ext);
        std::fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn csv_loads_and_normalizes_categoricals() {
        let ds = load_csv_reader(SAMPLE_CSV.as_bytes()).expect("load csv");
        assert_eq!(ds.len(), 3);

        let furnishing: Vec<&str> = ds
            .records()
            .iter()
            .map(|r| r.furnishingstatus.as_str())
            .collect();
        assert_eq!(furnishing, vec!["furnished", "semi-furnished", "unfurnished"]);
        assert_eq!(ds.records()[0].airconditioning, "yes");
        assert_eq!(ds.records()[1].basement, "no");
        assert_eq!(ds.records()[1].stories, 4);
        assert_eq!(ds.records()[2].price, 9_100_000.0);
    }

    #[test]
    fn normalization_keeps_every_row() {
        let ds = load_csv_reader(SAMPLE_CSV.as_bytes()).expect("load csv");
        let raw_rows = SAMPLE_CSV.lines().count() - 1;
        assert_eq!(ds.len(), raw_rows);
        assert_eq!(
            ds.distinct_values(CategoricalField::Basement)
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>(),
            vec!["no", "yes"]
        );
    }

    #[test]
    fn missing_categorical_column_is_schema_error() {
        let csv = "price,area,stories,basement,airconditioning\n1,2,1,no,no\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(&err, DataError::Schema { column, .. } if column == "furnishingstatus"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn numeric_categorical_value_is_schema_error() {
        let csv = "price,area,stories,basement,airconditioning,furnishingstatus\n\
                   1,2,1,no,1,furnished\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(&err, DataError::Schema { column, .. } if column == "airconditioning"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn missing_numeric_column_is_data_source_error() {
        let csv = "area,stories,basement,airconditioning,furnishingstatus\n2,1,no,no,furnished\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::DataSource { .. }), "unexpected error: {err}");
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn unparseable_price_is_data_source_error() {
        let csv = "price,area,stories,basement,airconditioning,furnishingstatus\n\
                   cheap,2,1,no,no,furnished\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::DataSource { .. }), "unexpected error: {err}");
    }

    #[test]
    fn integral_float_stories_are_accepted() {
        let csv = "price,area,stories,basement,airconditioning,furnishingstatus\n\
                   1,2,2.0,no,no,furnished\n";
        let ds = load_csv_reader(csv.as_bytes()).expect("load csv");
        assert_eq!(ds.records()[0].stories, 2);

        let csv = "price,area,stories,basement,airconditioning,furnishingstatus\n\
                   1,2,2.5,no,no,furnished\n";
        assert!(load_csv_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_data_source_error() {
        let path = temp_path("csv");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataError::DataSource { .. }), "unexpected error: {err}");
    }

    #[test]
    fn unsupported_extension_is_data_source_error() {
        let path = write_temp("txt", SAMPLE_CSV);
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataError::DataSource { .. }));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn json_records_load() {
        let path = write_temp(
            "json",
            r#"[
                {"price": 4000000, "area": 3000, "stories": 2,
                 "basement": "Yes", "airconditioning": "NO", "furnishingstatus": "Furnished"},
                {"price": 5000000.5, "area": 3500.0, "stories": 1.0,
                 "basement": "no", "airconditioning": "yes", "furnishingstatus": "unfurnished"}
            ]"#,
        );
        let ds = load_file(&path).expect("load json");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].basement, "yes");
        assert_eq!(ds.records()[0].airconditioning, "no");
        assert_eq!(ds.records()[1].stories, 1);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn json_non_string_category_is_schema_error() {
        let path = write_temp(
            "json",
            r#"[{"price": 1, "area": 2, "stories": 1,
                 "basement": true, "airconditioning": "no", "furnishingstatus": "furnished"}]"#,
        );
        let err = load_file(&path).unwrap_err();
        assert!(
            matches!(&err, DataError::Schema { column, .. } if column == "basement"),
            "unexpected error: {err}"
        );
        let _ = std::fs::remove_file(path);
    }

    fn write_parquet(path: &Path, basement: ArrayRef) {
        use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("price", DataType::Float64, false),
            Field::new("area", DataType::Int64, false),
            Field::new("stories", DataType::Int32, false),
            Field::new("basement", basement.data_type().clone(), false),
            Field::new("airconditioning", DataType::Utf8, false),
            Field::new("furnishingstatus", DataType::Utf8, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Float64Array::from(vec![4_000_000.0, 5_500_000.0])),
            Arc::new(Int64Array::from(vec![3000, 4200])),
            Arc::new(Int32Array::from(vec![2, 1])),
            basement,
            Arc::new(StringArray::from(vec!["No", "YES"])),
            Arc::new(StringArray::from(vec!["Unfurnished", "furnished"])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).expect("record batch");

        let file = std::fs::File::create(path).expect("create parquet file");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("parquet writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");
    }

    #[test]
    fn parquet_columns_load_with_mixed_widths() {
        let path = temp_path("parquet");
        write_parquet(
            &path,
            Arc::new(arrow::array::StringArray::from(vec!["Yes", "no"])),
        );
        let ds = load_file(&path).expect("load parquet");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].area, 3000.0);
        assert_eq!(ds.records()[0].stories, 2);
        assert_eq!(ds.records()[0].basement, "yes");
        assert_eq!(ds.records()[1].airconditioning, "yes");
        assert_eq!(ds.records()[0].furnishingstatus, "unfurnished");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn parquet_dictionary_categorical_loads() {
        use arrow::array::DictionaryArray;

        let path = temp_path("parquet");
        let basement: DictionaryArray<Int32Type> = vec!["Yes", "NO"].into_iter().collect();
        write_parquet(&path, Arc::new(basement));
        let ds = load_file(&path).expect("load parquet");
        assert_eq!(ds.records()[0].basement, "yes");
        assert_eq!(ds.records()[1].basement, "no");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn parquet_nan_price_is_data_source_error() {
        use arrow::array::{Float64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use parquet::arrow::ArrowWriter;

        let path = temp_path("parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("price", DataType::Float64, false),
            Field::new("area", DataType::Float64, false),
            Field::new("stories", DataType::Int64, false),
            Field::new("basement", DataType::Utf8, false),
            Field::new("airconditioning", DataType::Utf8, false),
            Field::new("furnishingstatus", DataType::Utf8, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Float64Array::from(vec![f64::NAN, 2e6, 3e6])),
            Arc::new(Float64Array::from(vec![1000.0, 2000.0, 3000.0])),
            Arc::new(arrow::array::Int64Array::from(vec![1, 2, 3])),
            Arc::new(StringArray::from(vec!["no", "no", "yes"])),
            Arc::new(StringArray::from(vec!["no", "yes", "yes"])),
            Arc::new(StringArray::from(vec!["furnished", "furnished", "unfurnished"])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).expect("record batch");
        let file = std::fs::File::create(&path).expect("create parquet file");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("parquet writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataError::DataSource { .. }), "unexpected error: {err}");
        assert!(err.to_string().contains("price"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn word_like_categoricals_are_text() {
        let csv = "price,area,stories,basement,airconditioning,furnishingstatus\n\
                   1,2,1,NaN,inf,Infinity\n";
        let ds = load_csv_reader(csv.as_bytes()).expect("load csv");
        assert_eq!(ds.records()[0].basement, "nan");
        assert_eq!(ds.records()[0].airconditioning, "inf");
        assert_eq!(ds.records()[0].furnishingstatus, "infinity");

        let csv = "price,area,stories,basement,airconditioning,furnishingstatus\n\
                   1,2,1,no,no,-2.5e3\n";
        assert!(matches!(
            load_csv_reader(csv.as_bytes()).unwrap_err(),
            DataError::Schema { .. }
        ));
    }

    #[test]
    fn parquet_numeric_categorical_is_schema_error() {
        let path = temp_path("parquet");
        write_parquet(&path, Arc::new(arrow::array::Int64Array::from(vec![1, 0])));
        let err = load_file(&path).unwrap_err();
        assert!(
            matches!(&err, DataError::Schema { column, .. } if column == "basement"),
            "unexpected error: {err}"
        );
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn loader_reads_source_once() {
        let path = write_temp("csv", SAMPLE_CSV);
        let mut loader = DatasetLoader::new(&path);
        assert!(!loader.is_loaded());

        let first = loader.load().expect("first load");
        let second = loader.load().expect("second load");
        assert_eq!(loader.reads(), 1);
        assert!(Arc::ptr_eq(&first, &second));

        loader.reset();
        let third = loader.load().expect("reload");
        assert_eq!(loader.reads(), 2);
        assert_eq!(*first, *third);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let path = temp_path("csv");
        let mut loader = DatasetLoader::new(&path);
        assert!(loader.load().is_err());
        assert!(!loader.is_loaded());

        std::fs::write(&path, SAMPLE_CSV).expect("write temp file");
        let ds = loader.load().expect("load after file appears");
        assert_eq!(ds.len(), 3);
        assert_eq!(loader.reads(), 2);

        let _ = std::fs::remove_file(path);
    }
}
