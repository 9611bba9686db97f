use crate::processing::aggregate::ViewMeasurements;
use crate::processing::annotator::ViewAnnotator;
use crate::processing::geometry::Point;

/// Press, drag and release at a single point.
pub fn drag_and_commit(view: &mut ViewAnnotator, point: Point) {
    view.begin_drag(point);
    view.update_drag(point);
    view.commit();
}

/// Picks driving a view to completion: mic radius 10 around the origin,
/// then an mcc of radius 12.
pub fn default_picks() -> [Point; 4] {
    [
        Point::new(-10.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
        Point::new(0.0, 12.0),
    ]
}

/// Annotator advanced through the first `step` default picks.
pub fn annotator_at_step(step: usize) -> ViewAnnotator {
    let mut view = ViewAnnotator::new();
    for point in default_picks().into_iter().take(step) {
        drag_and_commit(&mut view, point);
    }
    assert_eq!(view.sds_step(), step);
    view
}

/// Completed view with the given mic and mcc radii, centred on the origin.
pub fn completed_view(r_mic: f64, r_mcc: f64) -> ViewAnnotator {
    let mut view = ViewAnnotator::new();
    for point in [
        Point::new(-r_mic, 0.0),
        Point::new(r_mic, 0.0),
        Point::new(0.0, r_mic),
        Point::new(0.0, r_mcc),
    ] {
        drag_and_commit(&mut view, point);
    }
    view
}

/// Hand-set measurements, for states the annotator cannot reach.
#[derive(Debug, Clone, Copy)]
pub struct FixedView {
    pub step: usize,
    pub r_mic: Option<f64>,
    pub r_mcc: Option<f64>,
}

impl FixedView {
    pub fn new(step: usize, r_mic: Option<f64>, r_mcc: Option<f64>) -> Self {
        Self { step, r_mic, r_mcc }
    }
}

impl ViewMeasurements for FixedView {
    fn sds_step(&self) -> usize {
        self.step
    }

    fn r_mic(&self) -> Option<f64> {
        self.r_mic
    }

    fn r_mcc(&self) -> Option<f64> {
        self.r_mcc
    }
}
