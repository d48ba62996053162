use std::error::Error;

use crate::chart;
use crate::config::ChartConfig;
use crate::data::loader::LoadError;
use crate::data::model::EmployeeDataset;
use crate::scene::SvgDocument;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// What a render reported, in the order it was reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Loaded { records: usize },
    LoadFailed { message: String },
}

// ---------------------------------------------------------------------------
// Chart state
// ---------------------------------------------------------------------------

/// The outcome of one load-and-render pass.
pub struct ChartState {
    pub config: ChartConfig,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<EmployeeDataset>,

    /// Rendered chart. Blank until a dataset is set.
    pub document: SvgDocument,

    pub diagnostics: Vec<Diagnostic>,
}

impl ChartState {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            dataset: None,
            document: SvgDocument::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Route a finished load to the success or failure path.
    pub fn apply(&mut self, result: Result<EmployeeDataset, LoadError>) {
        match result {
            Ok(dataset) => self.set_dataset(dataset),
            Err(err) => self.set_load_error(&err),
        }
    }

    /// Log the dataset and render it.
    pub fn set_dataset(&mut self, dataset: EmployeeDataset) {
        match serde_json::to_string(&dataset) {
            Ok(json) => log::info!("employees {json}"),
            Err(e) => log::info!("employees: {} records ({e})", dataset.len()),
        }
        self.diagnostics.push(Diagnostic::Loaded {
            records: dataset.len(),
        });

        self.document = chart::init_graph(&dataset, &self.config);
        self.dataset = Some(dataset);
    }

    /// Log the failure. Nothing is rendered.
    pub fn set_load_error(&mut self, err: &LoadError) {
        let message = error_chain(err);
        log::error!("error {message}");
        self.diagnostics.push(Diagnostic::LoadFailed { message });
    }

    pub fn load_failed(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::LoadFailed { .. }))
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::LoadFailed { message } => Some(message.as_str()),
            Diagnostic::Loaded { .. } => None,
        })
    }
}

/// `outer: inner: root` rendering of an error and its sources.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    std::iter::successors(Some(err), |&e| e.source())
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Employee};
    use crate::scene::Node;

    #[test]
    fn failed_load_renders_nothing_and_reports_once() {
        let mut state = ChartState::new(ChartConfig::default());
        state.apply(Err(LoadError::NotAnArray));

        assert!(state.document.is_blank());
        assert!(state.dataset.is_none());
        assert_eq!(state.errors().count(), 1);
        assert_eq!(state.diagnostics.len(), 1);
        assert!(state.load_failed());
    }

    #[test]
    fn error_message_includes_the_source() {
        let mut state = ChartState::new(ChartConfig::default());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        state.set_load_error(&LoadError::Io {
            path: "data/CompanyData.csv".into(),
            source: io,
        });
        let msg = state.errors().next().unwrap();
        assert_eq!(msg, "failed to read data/CompanyData.csv: no such file");
    }

    #[test]
    fn successful_load_renders_every_record() {
        let mut state = ChartState::new(ChartConfig::default());
        state.apply(Ok(EmployeeDataset::from_employees(vec![
            Employee::new(CellValue::Integer(4), CellValue::Integer(41000), "Production"),
            Employee::new(CellValue::Integer(8), CellValue::Integer(66000), "Management"),
        ])));

        assert_eq!(state.diagnostics, vec![Diagnostic::Loaded { records: 2 }]);
        assert!(!state.load_failed());
        assert_eq!(state.document.count(|n| matches!(n, Node::Circle(_))), 2);
    }
}
