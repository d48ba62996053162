use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the employee table
// ---------------------------------------------------------------------------

/// A loosely typed table cell. Numeric columns arrive as text from CSV and
/// as numbers from JSON / Parquet; both coerce through [`CellValue::to_number`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw CSV field.
    pub fn guess(s: &str) -> Self {
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(s.to_string())
    }

    /// Numeric coercion. Blank text reads as `0`. Unparseable text and nulls
    /// become `NaN` and are carried through to the rendered coordinates
    /// unchanged.
    pub fn to_number(&self) -> f64 {
        match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(v) => *v,
            CellValue::Text(s) => match s.trim() {
                "" => 0.0,
                t => t.parse::<f64>().unwrap_or(f64::NAN),
            },
            CellValue::Null => f64::NAN,
        }
    }

    /// Text form used for categorical columns.
    pub fn to_label(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Employee – one row of the table
// ---------------------------------------------------------------------------

/// A single employee record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    #[serde(rename = "Senority")]
    pub seniority: CellValue,
    pub salary: CellValue,
    #[serde(rename = "Area")]
    pub area: String,
    /// Columns other than seniority, salary and area.
    #[serde(flatten)]
    pub extra: BTreeMap<String, CellValue>,
}

impl Employee {
    pub fn new(seniority: CellValue, salary: CellValue, area: impl Into<String>) -> Self {
        Self {
            seniority,
            salary,
            area: area.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn seniority(&self) -> f64 {
        self.seniority.to_number()
    }

    pub fn salary(&self) -> f64 {
        self.salary.to_number()
    }
}

// ---------------------------------------------------------------------------
// EmployeeDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with the distinct departments pre-computed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeDataset {
    /// All employees, in file order.
    pub employees: Vec<Employee>,
    /// Distinct `Area` values in order of first appearance.
    pub areas: Vec<String>,
}

impl EmployeeDataset {
    /// Build the area index from the loaded employees.
    pub fn from_employees(employees: Vec<Employee>) -> Self {
        let mut areas: Vec<String> = Vec::new();
        for emp in &employees {
            if !areas.iter().any(|a| a == &emp.area) {
                areas.push(emp.area.clone());
            }
        }
        EmployeeDataset { employees, areas }
    }

    /// Largest coerced seniority, ignoring `NaN`. `NaN` when nothing is numeric.
    pub fn max_seniority(&self) -> f64 {
        max_numeric(self.employees.iter().map(Employee::seniority))
    }

    /// Largest coerced salary, ignoring `NaN`. `NaN` when nothing is numeric.
    pub fn max_salary(&self) -> f64 {
        max_numeric(self.employees.iter().map(Employee::salary))
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

fn max_numeric(values: impl Iterator<Item = f64>) -> f64 {
    values
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_number_coerce_identically() {
        let text = CellValue::Text("50000".into());
        let number = CellValue::Integer(50000);
        assert_eq!(text.to_number(), number.to_number());
        assert_eq!(CellValue::Text(" 12.5 ".into()).to_number(), 12.5);
    }

    #[test]
    fn malformed_cells_become_nan() {
        assert!(CellValue::Text("n/a".into()).to_number().is_nan());
        assert!(CellValue::Null.to_number().is_nan());
    }

    #[test]
    fn blank_cells_read_as_zero() {
        assert_eq!(CellValue::guess("").to_number(), 0.0);
        assert_eq!(CellValue::Text("  ".into()).to_number(), 0.0);

        let ds = EmployeeDataset::from_employees(vec![
            Employee::new(CellValue::guess(""), CellValue::Integer(30000), "Production"),
        ]);
        assert_eq!(ds.max_seniority(), 0.0);
    }

    #[test]
    fn guess_prefers_integer_then_float() {
        assert_eq!(CellValue::guess("7"), CellValue::Integer(7));
        assert_eq!(CellValue::guess("7.5"), CellValue::Float(7.5));
        assert_eq!(CellValue::guess("Production"), CellValue::Text("Production".into()));
        assert_eq!(CellValue::guess(""), CellValue::Text(String::new()));
    }

    #[test]
    fn areas_keep_first_appearance_order() {
        let ds = EmployeeDataset::from_employees(vec![
            Employee::new(CellValue::Integer(3), CellValue::Integer(30000), "Production"),
            Employee::new(CellValue::Integer(9), CellValue::Integer(90000), "Management"),
            Employee::new(CellValue::Integer(1), CellValue::Integer(21000), "Production"),
        ]);
        assert_eq!(ds.areas, vec!["Production", "Management"]);
    }

    #[test]
    fn max_ignores_malformed_values() {
        let ds = EmployeeDataset::from_employees(vec![
            Employee::new(CellValue::Text("12".into()), CellValue::Text("bad".into()), "Executive"),
            Employee::new(CellValue::Integer(40), CellValue::Integer(120000), "Executive"),
        ]);
        assert_eq!(ds.max_seniority(), 40.0);
        assert_eq!(ds.max_salary(), 120000.0);
    }

    #[test]
    fn empty_dataset_has_nan_maxima() {
        let ds = EmployeeDataset::default();
        assert!(ds.max_seniority().is_nan());
        assert!(ds.is_empty());
    }
}
