// File: src/python_bind.rs
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::SdsConfig;
use crate::entry::{InputEvent, SdsSession, ViewId};
use crate::io::output::write_table_to_csv;
use crate::processing::annotator::Figure;
use crate::processing::geometry::{circle_from_three_points, Point};
use crate::processing::table::SdsTable;

fn parse_view(view: &str) -> PyResult<ViewId> {
    ViewId::parse(view)
        .ok_or_else(|| PyValueError::new_err(format!("unknown view {:?}, expected 'ap' or 'lat'", view)))
}

/// Python representation of a placed figure
///
/// Attributes:
///     kind (str): "point" or "circle"
///     x (float): X-coordinate of the point or circle center
///     y (float): Y-coordinate of the point or circle center
///     radius (float | None): Circle radius, None for points
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyFigure {
    #[pyo3(get)]
    pub kind: String,
    #[pyo3(get)]
    pub x: f64,
    #[pyo3(get)]
    pub y: f64,
    #[pyo3(get)]
    pub radius: Option<f64>,
}

#[pymethods]
impl PyFigure {
    fn __repr__(&self) -> String {
        match self.radius {
            Some(r) => format!("Circle(x={:.2}, y={:.2}, r={:.2})", self.x, self.y, r),
            None => format!("Point(x={:.2}, y={:.2})", self.x, self.y),
        }
    }
}

impl From<&Figure> for PyFigure {
    fn from(figure: &Figure) -> Self {
        let anchor = figure.anchor();
        let kind = match figure {
            Figure::Point(_) => "point",
            Figure::Circle(_) => "circle",
        };
        Self {
            kind: kind.to_string(),
            x: anchor.x,
            y: anchor.y,
            radius: figure.radius(),
        }
    }
}

/// Annotation session over an AP and a lateral radiograph.
///
/// Every event method takes the view name ("ap" or "lat") and returns the
/// refreshed table values as strings.
///
/// Example:
///     >>> s = PySdsSession()
///     >>> s.pointer_down("ap", -10.0, 0.0)
///     >>> s.pointer_up("ap")
///     >>> s.export_line()
#[pyclass]
pub struct PySdsSession {
    inner: SdsSession,
}

impl PySdsSession {
    fn dispatch(&mut self, view: &str, event: InputEvent) -> PyResult<Vec<String>> {
        let id = parse_view(view)?;
        let table = self
            .inner
            .handle(id, event)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(table.text_values().to_vec())
    }
}

#[pymethods]
impl PySdsSession {
    #[new]
    #[pyo3(signature = (config_path = None))]
    fn new(config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => {
                SdsConfig::load(path).map_err(|e| PyValueError::new_err(format!("{:#}", e)))?
            }
            None => SdsConfig::default(),
        };
        Ok(Self {
            inner: SdsSession::new(config),
        })
    }

    fn pointer_down(&mut self, view: &str, x: f64, y: f64) -> PyResult<Vec<String>> {
        self.dispatch(view, InputEvent::PointerDown(Point::new(x, y)))
    }

    fn pointer_drag(&mut self, view: &str, x: f64, y: f64) -> PyResult<Vec<String>> {
        self.dispatch(view, InputEvent::PointerDrag(Point::new(x, y)))
    }

    fn pointer_up(&mut self, view: &str) -> PyResult<Vec<String>> {
        self.dispatch(view, InputEvent::PointerUp)
    }

    fn undo(&mut self, view: &str) -> PyResult<Vec<String>> {
        self.dispatch(view, InputEvent::Undo)
    }

    fn toggle_move_mode(&mut self, view: &str) -> PyResult<bool> {
        self.dispatch(view, InputEvent::ToggleMoveMode)?;
        Ok(self.inner.view(parse_view(view)?).is_moving())
    }

    fn translate(&mut self, view: &str, dx: f64, dy: f64) -> PyResult<Vec<String>> {
        self.dispatch(view, InputEvent::Translate { dx, dy })
    }

    fn step(&self, view: &str) -> PyResult<usize> {
        Ok(self.inner.view(parse_view(view)?).sds_step())
    }

    fn instruction(&self, view: &str) -> PyResult<&'static str> {
        Ok(self.inner.view(parse_view(view)?).instruction())
    }

    fn figures(&self, view: &str) -> PyResult<Vec<PyFigure>> {
        let annotator = self.inner.view(parse_view(view)?);
        Ok(annotator.figures().iter().map(PyFigure::from).collect())
    }

    fn preview(&self, view: &str) -> PyResult<Option<PyFigure>> {
        let annotator = self.inner.view(parse_view(view)?);
        Ok(annotator.preview().map(PyFigure::from))
    }

    fn point_size(&self) -> f64 {
        self.inner.config().point_size
    }

    #[staticmethod]
    fn headings() -> Vec<&'static str> {
        SdsTable::headings().to_vec()
    }

    fn values(&self) -> Vec<String> {
        self.inner.table().text_values().to_vec()
    }

    /// Full-precision values as a JSON object keyed by heading.
    fn values_json(&self) -> PyResult<String> {
        serde_json::to_string(self.inner.table().result())
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn export_line(&self) -> String {
        self.inner.table().export_line()
    }

    fn write_csv(&self, path: &str) -> PyResult<()> {
        write_table_to_csv(path, self.inner.table())
            .map_err(|e| PyRuntimeError::new_err(format!("{:#}", e)))
    }
}

/// Circle through three points.
///
/// Returns ((cx, cy), radius); raises ValueError for collinear points.
#[pyfunction]
#[pyo3(name = "circle_from_three_points")]
pub fn circle_from_three_points_py(
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
) -> PyResult<((f64, f64), f64)> {
    let circle = circle_from_three_points(p1.into(), p2.into(), p3.into())
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(((circle.center.x, circle.center.y), circle.radius))
}
