pub mod config;
pub mod entry;
pub mod io;
pub mod processing;
mod utils;

#[cfg(feature = "python")]
mod python_bind;

pub use config::SdsConfig;
pub use entry::{run_event_script, InputEvent, SdsSession, ViewId};
pub use processing::aggregate::{aggregate, AggregateResult, StateError, ViewMeasurements};
pub use processing::annotator::{Figure, ViewAnnotator};
pub use processing::geometry::{
    circle_from_center_and_point, circle_from_three_points, Circle, GeometryError, Point,
};
pub use processing::table::SdsTable;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// This is the module importable from Python:
///
/// ```python
/// import sdsmeasure as sds
/// session = sds.PySdsSession()
/// session.pointer_down("ap", -10.0, 0.0)
/// session.pointer_up("ap")
/// print(session.export_line())
/// ```
#[cfg(feature = "python")]
#[pymodule]
fn sdsmeasure(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let _ = env_logger::try_init();

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(
        python_bind::circle_from_three_points_py,
        m
    )?)?;

    m.add_class::<python_bind::PyFigure>()?;
    m.add_class::<python_bind::PySdsSession>()?;
    Ok(())
}
