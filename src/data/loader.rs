use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::error::ArrowError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Employee, EmployeeDataset};

/// Accepted headers for the seniority column, in lookup order. The dataset
/// this tool was written for spells it `Senority`.
pub const SENIORITY_COLUMNS: &[&str] = &["Senority", "Seniority"];
pub const SALARY_COLUMN: &str = "salary";
pub const AREA_COLUMN: &str = "Area";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),
    #[error("malformed parquet file")]
    Parquet(#[from] ParquetError),
    #[error("malformed arrow data")]
    Arrow(#[from] ArrowError),
    #[error("{format} input is missing the '{column}' column")]
    MissingColumn {
        format: &'static str,
        column: &'static str,
    },
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("row {row} is not a JSON object")]
    NotAnObject { row: usize },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("loader task did not complete")]
    Task(#[from] tokio::task::JoinError),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset on tokio's blocking pool. This is the only suspension
/// point of a render.
pub async fn load_dataset(path: impl Into<PathBuf>) -> Result<EmployeeDataset, LoadError> {
    let path = path.into();
    let dataset = tokio::task::spawn_blocking(move || load_file(&path)).await??;
    Ok(dataset)
}

/// Load an employee dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Senority`, `salary`, `Area` (the default input)
/// * `.json`    – `[{ "Senority": 4, "salary": "52000", "Area": "Production" }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<EmployeeDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<EmployeeDataset, LoadError> {
    // Short rows are kept; their missing cells coerce to NaN.
    let reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    read_csv(reader)
}

/// Parse CSV from any reader. Fields are typed by [`CellValue::guess`]; the
/// seniority and salary cells are coerced to numbers only when rendering.
pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<EmployeeDataset, LoadError> {
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = ColumnIndex::resolve("CSV", |name| headers.iter().position(|h| h == name))?;

    let mut employees = Vec::new();
    for result in reader.records() {
        let record = result?;

        let mut extra = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if columns.contains(col_idx) {
                continue;
            }
            extra.insert(headers[col_idx].clone(), CellValue::guess(value));
        }

        employees.push(Employee {
            seniority: record.get(columns.seniority).map_or(CellValue::Null, CellValue::guess),
            salary: record.get(columns.salary).map_or(CellValue::Null, CellValue::guess),
            area: record.get(columns.area).unwrap_or("").to_string(),
            extra,
        });
    }

    Ok(EmployeeDataset::from_employees(employees))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the shape `df.to_json(orient='records')` produces.
fn load_json(path: &Path) -> Result<EmployeeDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<EmployeeDataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut employees = Vec::with_capacity(records.len());
    for (row, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(LoadError::NotAnObject { row })?;

        let seniority_key = SENIORITY_COLUMNS
            .iter()
            .copied()
            .find(|k| obj.contains_key(*k));

        let mut extra = BTreeMap::new();
        for (key, val) in obj {
            if Some(key.as_str()) == seniority_key || key == SALARY_COLUMN || key == AREA_COLUMN {
                continue;
            }
            extra.insert(key.clone(), json_to_cell(val));
        }

        employees.push(Employee {
            seniority: seniority_key
                .and_then(|k| obj.get(k))
                .map(json_to_cell)
                .unwrap_or(CellValue::Null),
            salary: obj.get(SALARY_COLUMN).map(json_to_cell).unwrap_or(CellValue::Null),
            area: obj
                .get(AREA_COLUMN)
                .map(|v| json_to_cell(v).to_label())
                .unwrap_or_default(),
            extra,
        });
    }

    Ok(EmployeeDataset::from_employees(employees))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat `Senority`, `salary` and `Area` columns.
/// Column types may be strings or numbers; they go through the same
/// coercion as CSV cells.
fn load_parquet(path: &Path) -> Result<EmployeeDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut employees = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        if log::log_enabled!(log::Level::Trace) {
            if let Ok(table) = arrow::util::pretty::pretty_format_batches(std::slice::from_ref(&batch)) {
                log::trace!("parquet batch:\n{table}");
            }
        }

        let schema = batch.schema();
        let columns = ColumnIndex::resolve("parquet", |name| schema.index_of(name).ok())?;

        let extra_cols: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, _)| !columns.contains(*i))
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for row in 0..batch.num_rows() {
            let mut extra = BTreeMap::new();
            for (col_idx, col_name) in &extra_cols {
                extra.insert(col_name.clone(), extract_cell(batch.column(*col_idx), row));
            }

            employees.push(Employee {
                seniority: extract_cell(batch.column(columns.seniority), row),
                salary: extract_cell(batch.column(columns.salary), row),
                area: extract_cell(batch.column(columns.area), row).to_label(),
                extra,
            });
        }
    }

    Ok(EmployeeDataset::from_employees(employees))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        _ => arrow::util::display::array_value_to_string(col.as_ref(), row)
            .map(CellValue::Text)
            .unwrap_or(CellValue::Null),
    }
}

// ---------------------------------------------------------------------------
// Column lookup shared by the tabular formats
// ---------------------------------------------------------------------------

struct ColumnIndex {
    seniority: usize,
    salary: usize,
    area: usize,
}

impl ColumnIndex {
    fn resolve(
        format: &'static str,
        position: impl Fn(&str) -> Option<usize>,
    ) -> Result<Self, LoadError> {
        let seniority = SENIORITY_COLUMNS
            .iter()
            .find_map(|name| position(name))
            .ok_or(LoadError::MissingColumn {
                format,
                column: SENIORITY_COLUMNS[0],
            })?;
        let salary = position(SALARY_COLUMN).ok_or(LoadError::MissingColumn {
            format,
            column: SALARY_COLUMN,
        })?;
        let area = position(AREA_COLUMN).ok_or(LoadError::MissingColumn {
            format,
            column: AREA_COLUMN,
        })?;
        Ok(Self {
            seniority,
            salary,
            area,
        })
    }

    fn contains(&self, idx: usize) -> bool {
        idx == self.seniority || idx == self.salary || idx == self.area
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const COMPANY_CSV: &str = "\
Senority,salary,Area,Name
2,24000,Janitorial,Ann
15,61000,Production,Bo
31,150000,Executive,Cy
";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_rows_keep_order_and_extra_columns() {
        let file = write_temp(".csv", COMPANY_CSV);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.employees[1].seniority(), 15.0);
        assert_eq!(ds.employees[1].salary(), 61000.0);
        assert_eq!(ds.employees[2].area, "Executive");
        assert_eq!(
            ds.employees[0].extra.get("Name"),
            Some(&CellValue::Text("Ann".into()))
        );
        assert_eq!(ds.areas, vec!["Janitorial", "Production", "Executive"]);
    }

    #[test]
    fn csv_accepts_corrected_seniority_header() {
        let reader = csv::Reader::from_reader("Seniority,salary,Area\n4,30000,Management\n".as_bytes());
        let ds = read_csv(reader).unwrap();
        assert_eq!(ds.employees[0].seniority(), 4.0);
    }

    #[test]
    fn csv_missing_salary_column_is_an_error() {
        let reader = csv::Reader::from_reader("Senority,Area\n4,Management\n".as_bytes());
        let err = read_csv(reader).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "salary",
                ..
            }
        ));
    }

    #[test]
    fn csv_malformed_numbers_are_kept() {
        let reader = csv::Reader::from_reader("Senority,salary,Area\nten,,Production\n".as_bytes());
        let ds = read_csv(reader).unwrap();
        assert!(ds.employees[0].seniority().is_nan());
        // An empty cell reads as zero, a missing one as NaN.
        assert_eq!(ds.employees[0].salary(), 0.0);
    }

    #[test]
    fn csv_short_rows_load_with_nan_coordinates() {
        let file = write_temp(".csv", "Senority,salary,Area\n4,30000,Production\n7\n9,41000\n");
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.employees[0].salary(), 30000.0);
        assert_eq!(ds.employees[1].seniority(), 7.0);
        assert!(ds.employees[1].salary().is_nan());
        assert_eq!(ds.employees[1].area, "");
        assert_eq!(ds.employees[2].salary(), 41000.0);
        assert_eq!(ds.max_seniority(), 9.0);
    }

    #[test]
    fn json_records_mix_strings_and_numbers() {
        let ds = parse_json(
            r#"[
                {"Senority": "3", "salary": "50000", "Area": "Production"},
                {"Senority": 7, "salary": 50000, "Area": "Management", "office": "B2"}
            ]"#,
        )
        .unwrap();

        assert_eq!(ds.employees[0].salary(), ds.employees[1].salary());
        assert_eq!(ds.employees[0].seniority(), 3.0);
        assert_eq!(
            ds.employees[1].extra.get("office"),
            Some(&CellValue::Text("B2".into()))
        );
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(matches!(parse_json(r#"{"a": 1}"#), Err(LoadError::NotAnArray)));
        assert!(matches!(
            parse_json(r#"[{"salary": 1}, 4]"#),
            Err(LoadError::NotAnObject { row: 1 })
        ));
    }

    #[test]
    fn parquet_columns_are_read() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Senority", DataType::Int64, false),
            Field::new("salary", DataType::Utf8, false),
            Field::new("Area", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![5, 20])),
                Arc::new(StringArray::from(vec!["40000", "90000"])),
                Arc::new(StringArray::from(vec!["Production", "Management"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.employees[1].seniority(), 20.0);
        assert_eq!(ds.employees[1].salary(), 90000.0);
        assert_eq!(ds.areas, vec!["Production", "Management"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("data/CompanyData.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        assert!(load_file(Path::new("does/not/exist.csv")).is_err());
    }
}
