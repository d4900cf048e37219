//! PyO3 bindings for mplsettings-core.
//!
//! One [`StyleContext`] lives for the whole interpreter session. The Python
//! side feeds `setup_plots()` into `matplotlib.rcParams.update(...)` and
//! `font_files()` into `font_manager.fontManager.addfont(...)`.

use std::ffi::CString;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

use pyo3::exceptions::{
    PyAssertionError, PyKeyError, PyOSError, PyRuntimeError, PyUserWarning, PyValueError,
};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use mplsettings_core::loader::format_family_list;
use mplsettings_core::{
    LoadOptions, LoadReport, PathStatus, RcValue, SettingsError, SetupOptions, StyleContext,
    StyleTable, BIGGER_SIZE, MEDIUM_SIZE, SMALL_SIZE,
};

static SESSION: OnceLock<Mutex<StyleContext>> = OnceLock::new();

/// `None`, a single path, or a list of paths.
#[derive(Debug, FromPyObject)]
enum PathArg {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl PathArg {
    fn into_paths(arg: Option<Self>) -> Vec<PathBuf> {
        match arg {
            None => Vec::new(),
            Some(PathArg::One(path)) => vec![path],
            Some(PathArg::Many(paths)) => paths,
        }
    }
}

fn session() -> PyResult<MutexGuard<'static, StyleContext>> {
    let cell = match SESSION.get() {
        Some(cell) => cell,
        None => {
            let ctx = StyleContext::new().map_err(to_py_err)?;
            SESSION.get_or_init(|| Mutex::new(ctx))
        }
    };
    cell.lock()
        .map_err(|_| PyRuntimeError::new_err("mplsettings session lock poisoned"))
}

#[pyfunction]
#[pyo3(name = "load_fonts", signature = (path=None, verbose=false))]
fn load_fonts_py(py: Python<'_>, path: Option<PathArg>, verbose: bool) -> PyResult<()> {
    let paths = PathArg::into_paths(path);
    // The guard must be gone before any Python code runs: `print` and warning
    // hooks may release the GIL or call back into this module.
    let report = session()?.load_fonts(&paths, &LoadOptions::default());
    emit_report(py, &report, verbose)
}

#[pyfunction]
#[pyo3(name = "list_fonts")]
fn list_fonts_py() -> PyResult<Vec<String>> {
    Ok(session()?.list_fonts())
}

#[pyfunction]
#[pyo3(name = "setup_plots", signature = (dpi=300.0, font=None))]
fn setup_plots_py(py: Python<'_>, dpi: f64, font: Option<String>) -> PyResult<Py<PyDict>> {
    let style = setup_into(&mut *session()?, dpi, font)?;
    style_to_dict(py, &style)
}

/// Files backing every registered face, for `fontManager.addfont`.
#[pyfunction]
#[pyo3(name = "font_files")]
fn font_files_py() -> PyResult<Vec<String>> {
    Ok(session()?
        .registry()
        .font_files()
        .into_iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect())
}

/// Parameters applied so far.
#[pyfunction]
#[pyo3(name = "rc_params")]
fn rc_params_py(py: Python<'_>) -> PyResult<Py<PyDict>> {
    let style = session()?.style().clone();
    style_to_dict(py, &style)
}

/// Print the per-directory listing when `verbose`, then raise each loader
/// warning as a `UserWarning`.
fn emit_report(py: Python<'_>, report: &LoadReport, verbose: bool) -> PyResult<()> {
    if verbose {
        let print = py.import("builtins")?.getattr("print")?;
        for entry in &report.paths {
            if let PathStatus::Loaded { families, .. } = &entry.status {
                print.call1((format!(
                    "Loading from {}: {}",
                    entry.path.display(),
                    format_family_list(families)
                ),))?;
            }
        }
    }

    for message in &report.warnings {
        let message = CString::new(message.as_str())
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        PyErr::warn(py, py.get_type::<PyUserWarning>().as_any(), &message, 1)?;
    }

    Ok(())
}

/// Apply the style and hand back a snapshot, so no session guard outlives the call.
fn setup_into(ctx: &mut StyleContext, dpi: f64, font: Option<String>) -> PyResult<StyleTable> {
    let opts = SetupOptions { dpi, font };
    ctx.setup_plots(&opts).map_err(to_py_err)?;
    Ok(ctx.style().clone())
}

fn style_to_dict(py: Python<'_>, style: &StyleTable) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    for (key, value) in style.iter() {
        match value {
            RcValue::Bool(v) => dict.set_item(key, *v)?,
            RcValue::Int(v) => dict.set_item(key, *v)?,
            RcValue::Float(v) => dict.set_item(key, *v)?,
            RcValue::Str(v) => dict.set_item(key, v.as_str())?,
        }
    }
    Ok(dict.unbind())
}

fn to_py_err(err: SettingsError) -> PyErr {
    match err {
        SettingsError::FontUnavailable { .. } => PyAssertionError::new_err(err.to_string()),
        SettingsError::HomeUnset => PyKeyError::new_err(err.to_string()),
        SettingsError::Io { .. } => PyOSError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

#[pymodule]
#[pyo3(name = "_mplsettings")]
fn mplsettings_python(_py: Python<'_>, m: &Bound<PyModule>) -> PyResult<()> {
    m.add("SMALL_SIZE", SMALL_SIZE)?;
    m.add("MEDIUM_SIZE", MEDIUM_SIZE)?;
    m.add("BIGGER_SIZE", BIGGER_SIZE)?;
    m.add_function(wrap_pyfunction!(load_fonts_py, m)?)?;
    m.add_function(wrap_pyfunction!(list_fonts_py, m)?)?;
    m.add_function(wrap_pyfunction!(setup_plots_py, m)?)?;
    m.add_function(wrap_pyfunction!(font_files_py, m)?)?;
    m.add_function(wrap_pyfunction!(rc_params_py, m)?)?;
    Ok(())
}
