use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::{DetectorConfig, KickDetector, KickError, KickSession, Sample};

fn to_py_err(e: KickError) -> PyErr {
    match e {
        KickError::Parse { .. } | KickError::Json(_) | KickError::InvalidConfig(_) => {
            PyValueError::new_err(e.to_string())
        }
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

type EventTuple = (usize, f64, f64);

// ──────────────────────────────────────────────────────────────────────────────
// FUNKSJONER
// ──────────────────────────────────────────────────────────────────────────────

#[pyfunction]
#[pyo3(signature = (samples_json, config_json=None))]
fn analyze_trajectory_json(samples_json: &str, config_json: Option<&str>) -> PyResult<String> {
    crate::analyze_trajectory_json(samples_json, config_json).map_err(to_py_err)
}

/// (t, x, y)-liste inn → (antall, [(index, time, speed)], peak)
#[pyfunction]
fn analyze_trajectory(
    samples: Vec<(f64, f64, f64)>,
) -> PyResult<(usize, Vec<EventTuple>, Option<EventTuple>)> {
    let samples: Vec<Sample> = samples
        .into_iter()
        .map(|(t, x, y)| Sample::new(t, x, y))
        .collect();

    let analysis = KickDetector::default().analyze(&samples);
    let events = analysis
        .events
        .iter()
        .map(|e| (e.index, e.time, e.speed))
        .collect();
    let peak = analysis.peak.map(|e| (e.index, e.time, e.speed));

    Ok((analysis.events.len(), events, peak))
}

// ──────────────────────────────────────────────────────────────────────────────
// SESJON
// ──────────────────────────────────────────────────────────────────────────────

#[pyclass(name = "KickSession")]
struct PyKickSession {
    inner: KickSession,
}

#[pymethods]
impl PyKickSession {
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let cfg = match config_json {
            Some(c) => crate::parse_json::<DetectorConfig>(c).map_err(to_py_err)?,
            None => DetectorConfig::default(),
        };
        let inner = KickSession::new(cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn start_session(&self) {
        self.inner.start_session();
    }

    fn on_tracked_point(&self, timestamp: f64, x: f64, y: f64) -> bool {
        self.inner.on_tracked_point(timestamp, x, y)
    }

    fn is_recording(&self) -> bool {
        self.inner.is_recording()
    }

    /// Returnerer SessionResult som JSON-streng
    fn stop_session(&self) -> PyResult<String> {
        let result = self.inner.stop_session().map_err(to_py_err)?;
        serde_json::to_string(&result).map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn kicksim_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_trajectory_json, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_trajectory, m)?)?;
    m.add_class::<PyKickSession>()?;
    Ok(())
}
