use serde::{Deserialize, Serialize};

use crate::processing::geometry::{
    circle_from_center_and_point, circle_from_three_points, Circle, Point,
};

/// Last step of the annotation sequence; both radii are known once reached.
pub const FINAL_STEP: usize = 4;

/// A figure placed on a view, either a bare point or a circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Figure {
    Point(Point),
    Circle(Circle),
}

impl Figure {
    /// Point used to translate the figure and to seed later steps.
    pub fn anchor(&self) -> Point {
        match self {
            Figure::Point(p) => *p,
            Figure::Circle(c) => c.center,
        }
    }

    pub fn radius(&self) -> Option<f64> {
        match self {
            Figure::Point(_) => None,
            Figure::Circle(c) => Some(c.radius),
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Figure {
        match self {
            Figure::Point(p) => Figure::Point(p.translated(dx, dy)),
            Figure::Circle(c) => Figure::Circle(Circle::new(c.center.translated(dx, dy), c.radius)),
        }
    }
}

/// Annotation state for one radiograph view.
///
/// Steps:
/// 0. place the first point of the mic circle
/// 1. place the second point of the mic circle
/// 2. drag the third point; the mic circle runs through all three
/// 3. drag a point on the mcc circle, concentric with the mic circle
/// 4. complete
///
/// `figures`, `fig_centres` and `sds_step` always have matching lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewAnnotator {
    figures: Vec<Figure>,
    fig_centres: Vec<Point>,
    sds_step: usize,
    r_mic: Option<f64>,
    r_mcc: Option<f64>,
    preview: Option<Figure>,
    moving: bool,
}

impl ViewAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn fig_centres(&self) -> &[Point] {
        &self.fig_centres
    }

    pub fn preview(&self) -> Option<&Figure> {
        self.preview.as_ref()
    }

    pub fn sds_step(&self) -> usize {
        self.sds_step
    }

    pub fn r_mic(&self) -> Option<f64> {
        self.r_mic
    }

    pub fn r_mcc(&self) -> Option<f64> {
        self.r_mcc
    }

    pub fn is_complete(&self) -> bool {
        self.sds_step == FINAL_STEP
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn toggle_move_mode(&mut self) -> bool {
        self.moving = !self.moving;
        log::debug!("move mode {}", if self.moving { "on" } else { "off" });
        self.moving
    }

    /// Prompt for the current step, for the host's status line.
    pub fn instruction(&self) -> &'static str {
        match self.sds_step {
            0 => "Place first point on the outline",
            1 => "Place second point on the outline",
            2 => "Drag third point to fit the inscribed circle",
            3 => "Drag outward to fit the concentric circumscribing circle",
            _ => "Measurement complete",
        }
    }

    /// Pointer pressed: start a new preview at `point`.
    pub fn begin_drag(&mut self, point: Point) {
        self.update_preview(point);
    }

    /// Pointer moved while pressed: replace the preview.
    pub fn update_drag(&mut self, point: Point) {
        self.update_preview(point);
    }

    fn update_preview(&mut self, point: Point) {
        if self.moving {
            return;
        }
        match self.sds_step {
            0 | 1 => self.preview = Some(Figure::Point(point)),
            2 => match circle_from_three_points(self.fig_centres[0], self.fig_centres[1], point) {
                Ok(circle) => self.preview = Some(Figure::Circle(circle)),
                // keep whatever preview was showing until the user drags somewhere valid
                Err(e) => log::debug!("preview suppressed: {}", e),
            },
            3 => {
                let center = self.fig_centres[self.fig_centres.len() - 1];
                self.preview = Some(Figure::Circle(circle_from_center_and_point(center, point)));
            }
            _ => self.preview = None,
        }
    }

    /// Pointer released: commit the live preview, if there is one.
    ///
    /// Ignored in move mode, without a valid preview, or once the view is
    /// complete. The preview is cleared in every case.
    pub fn commit(&mut self) {
        let preview = self.preview.take();
        if self.moving || self.is_complete() {
            return;
        }
        let Some(figure) = preview else {
            return;
        };

        match self.sds_step {
            2 => self.r_mic = figure.radius(),
            3 => self.r_mcc = figure.radius(),
            _ => {}
        }
        self.fig_centres.push(figure.anchor());
        self.figures.push(figure);
        self.sds_step += 1;
        log::debug!("committed figure, step {} -> {}", self.sds_step - 1, self.sds_step);
    }

    /// Remove the most recent figure and step back.
    ///
    /// The radius recorded by the removed figure is cleared as well, and any
    /// live preview is dropped.
    pub fn undo(&mut self) {
        if self.sds_step == 0 {
            return;
        }
        self.preview = None;
        self.figures.pop();
        self.fig_centres.pop();
        match self.sds_step {
            3 => self.r_mic = None,
            4 => self.r_mcc = None,
            _ => {}
        }
        self.sds_step -= 1;
        log::debug!("undo, step {} -> {}", self.sds_step + 1, self.sds_step);
    }

    /// Shift every stored figure and anchor by `(dx, dy)`.
    pub fn translate_all(&mut self, dx: f64, dy: f64) {
        for centre in self.fig_centres.iter_mut() {
            *centre = centre.translated(dx, dy);
        }
        for figure in self.figures.iter_mut() {
            *figure = figure.translated(dx, dy);
        }
        if let Some(preview) = self.preview.as_mut() {
            *preview = preview.translated(dx, dy);
        }
    }
}
