use std::path::PathBuf;

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::config::ReportConfig;
use crate::models::LogRecord;
use crate::observer::LogObserver;
use crate::reporter::LogReporter;

#[pymodule]
fn tfslog(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<RustTfsLogParser>()?;
    Ok(())
}

#[pyclass(name = "RustTfsLogParser")]
struct RustTfsLogParser {
    config: ReportConfig,
}

#[pymethods]
impl RustTfsLogParser {
    #[new]
    #[pyo3(signature = (
        tfs_log = "tfs.txt",
        user = "*",
        commit_message = "",
        exclude_commit_message = "",
        export_root = "output",
        output = "",
        statistics = "",
        group_keys = "",
        export_bug_number = false,
        encoding = "utf-8"
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        tfs_log: &str,
        user: &str,
        commit_message: &str,
        exclude_commit_message: &str,
        export_root: &str,
        output: &str,
        statistics: &str,
        group_keys: &str,
        export_bug_number: bool,
        encoding: &str,
    ) -> Self {
        RustTfsLogParser {
            config: ReportConfig {
                input: PathBuf::from(tfs_log),
                encoding: encoding.to_string(),
                users: user.to_string(),
                include_messages: commit_message.to_string(),
                exclude_messages: exclude_commit_message.to_string(),
                output_root: PathBuf::from(export_root),
                dump_file: output.to_string(),
                statistics_file: statistics.to_string(),
                group_keys: group_keys.to_string(),
                export_identifiers: export_bug_number,
                ..ReportConfig::default()
            },
        }
    }

    /// Returns the filtered changesets, oldest first.
    fn parse(&self, py: Python) -> PyResult<PyObject> {
        let reporter = self.reporter()?;
        let working_set = reporter
            .collect_history(&mut LogObserver)
            .map_err(|err| PyRuntimeError::new_err(format!("Failed to parse log: {}", err)))?;

        let result = PyList::empty(py);
        for record in &working_set.records {
            result.append(record_to_py_dict(py, record)?)?;
        }
        Ok(result.into())
    }

    /// Runs the whole pipeline and returns a summary dict.
    fn save_reports(&self, py: Python) -> PyResult<PyObject> {
        let reporter = self.reporter()?;
        let summary = reporter
            .run(&mut LogObserver)
            .map_err(|err| PyRuntimeError::new_err(format!("Failed to save reports: {}", err)))?;

        let written: Vec<String> = summary
            .written
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        let failed: Vec<(String, String)> = summary
            .failed
            .iter()
            .map(|(path, reason)| (path.display().to_string(), reason.clone()))
            .collect();

        let result = PyDict::new(py);
        result.set_item("parsed", summary.parsed)?;
        result.set_item("malformed", summary.malformed)?;
        result.set_item("kept", summary.kept)?;
        result.set_item("written", written)?;
        result.set_item("failed", failed)?;
        Ok(result.into())
    }
}

impl RustTfsLogParser {
    fn reporter(&self) -> PyResult<LogReporter> {
        LogReporter::new(self.config.clone())
            .map_err(|err| PyRuntimeError::new_err(format!("Invalid configuration: {}", err)))
    }
}

fn record_to_py_dict(py: Python, record: &LogRecord) -> PyResult<PyObject> {
    let record_dict = PyDict::new(py);

    record_dict.set_item("changeset", &record.changeset)?;
    record_dict.set_item("user", &record.author)?;
    record_dict.set_item("date", &record.date)?;
    record_dict.set_item("message", &record.message)?;

    let items = PyList::empty(py);
    for item in &record.items {
        let item_dict = PyDict::new(py);
        item_dict.set_item("status", &item.status)?;
        item_dict.set_item("path", &item.path)?;
        items.append(item_dict)?;
    }

    record_dict.set_item("items", items)?;

    Ok(record_dict.into())
}
