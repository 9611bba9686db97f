use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::SdsConfig;
use crate::io::input::read_event_script;
use crate::processing::aggregate::{aggregate, StateError};
use crate::processing::annotator::ViewAnnotator;
use crate::processing::geometry::Point;
use crate::processing::table::SdsTable;

/// Which radiograph an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewId {
    Ap,
    Lat,
}

impl ViewId {
    pub fn label(&self) -> &'static str {
        match self {
            ViewId::Ap => "AP",
            ViewId::Lat => "LAT",
        }
    }

    pub fn parse(text: &str) -> Option<ViewId> {
        match text.trim().to_ascii_lowercase().as_str() {
            "ap" => Some(ViewId::Ap),
            "lat" | "lateral" => Some(ViewId::Lat),
            _ => None,
        }
    }
}

/// Input forwarded by the host UI, already in view canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerDrag(Point),
    PointerUp,
    Undo,
    ToggleMoveMode,
    Translate { dx: f64, dy: f64 },
}

/// Two annotated views and the table derived from them.
#[derive(Debug, Clone)]
pub struct SdsSession {
    ap: ViewAnnotator,
    lat: ViewAnnotator,
    config: SdsConfig,
    table: SdsTable,
    // last pointer position per view while a drag is in progress
    last_pointer: [Option<Point>; 2],
}

impl Default for SdsSession {
    fn default() -> Self {
        Self::new(SdsConfig::default())
    }
}

impl SdsSession {
    pub fn new(config: SdsConfig) -> Self {
        let table = SdsTable::new(Default::default(), &config);
        Self {
            ap: ViewAnnotator::new(),
            lat: ViewAnnotator::new(),
            config,
            table,
            last_pointer: [None, None],
        }
    }

    pub fn view(&self, id: ViewId) -> &ViewAnnotator {
        match id {
            ViewId::Ap => &self.ap,
            ViewId::Lat => &self.lat,
        }
    }

    fn view_mut(&mut self, id: ViewId) -> &mut ViewAnnotator {
        match id {
            ViewId::Ap => &mut self.ap,
            ViewId::Lat => &mut self.lat,
        }
    }

    pub fn config(&self) -> &SdsConfig {
        &self.config
    }

    pub fn table(&self) -> &SdsTable {
        &self.table
    }

    /// Apply one event to the named view and recompute the table.
    pub fn handle(&mut self, id: ViewId, event: InputEvent) -> Result<&SdsTable, StateError> {
        let slot = id as usize;
        let last = self.last_pointer[slot];
        let mut next_last = last;
        let view = self.view_mut(id);

        match event {
            InputEvent::PointerDown(p) | InputEvent::PointerDrag(p) => {
                if view.is_moving() {
                    if let Some(prev) = last {
                        view.translate_all(p.x - prev.x, p.y - prev.y);
                    }
                } else if last.is_none() {
                    view.begin_drag(p);
                } else {
                    view.update_drag(p);
                }
                next_last = Some(p);
            }
            InputEvent::PointerUp => {
                view.commit();
                next_last = None;
            }
            InputEvent::Undo => view.undo(),
            InputEvent::ToggleMoveMode => {
                view.toggle_move_mode();
            }
            InputEvent::Translate { dx, dy } => {
                if view.is_moving() {
                    view.translate_all(dx, dy);
                }
            }
        }
        self.last_pointer[slot] = next_last;

        self.refresh()
    }

    /// Recompute the table from both views.
    pub fn refresh(&mut self) -> Result<&SdsTable, StateError> {
        let result = aggregate(&self.ap, &self.lat)?;
        self.table = SdsTable::new(result, &self.config);
        Ok(&self.table)
    }

    /// Apply a recorded sequence of events in order.
    pub fn replay<I>(&mut self, events: I) -> Result<&SdsTable, StateError>
    where
        I: IntoIterator<Item = (ViewId, InputEvent)>,
    {
        let mut count = 0usize;
        for (id, event) in events {
            self.handle(id, event)?;
            count += 1;
        }
        log::info!(
            "replayed {} events, AP step {}, LAT step {}",
            count,
            self.ap.sds_step(),
            self.lat.sds_step()
        );
        self.refresh()
    }
}

/// Replay an event script file and return the resulting table.
pub fn run_event_script<P: AsRef<Path>>(path: P, config: SdsConfig) -> Result<SdsTable> {
    let events = read_event_script(&path)
        .with_context(|| format!("failed to read event script {:?}", path.as_ref()))?;
    let mut session = SdsSession::new(config);
    let table = session
        .replay(events)
        .context("session replay hit an invalid annotation state")?;
    Ok(table.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::default_picks;
    use approx::assert_relative_eq;

    fn click(session: &mut SdsSession, id: ViewId, p: Point) {
        session.handle(id, InputEvent::PointerDown(p)).unwrap();
        session.handle(id, InputEvent::PointerUp).unwrap();
    }

    fn complete(session: &mut SdsSession, id: ViewId, r_mic: f64, r_mcc: f64) {
        for p in [
            Point::new(-r_mic, 0.0),
            Point::new(r_mic, 0.0),
            Point::new(0.0, r_mic),
            Point::new(0.0, r_mcc),
        ] {
            click(session, id, p);
        }
    }

    #[test]
    fn test_views_are_routed_independently() {
        let mut session = SdsSession::default();
        click(&mut session, ViewId::Ap, Point::new(1.0, 1.0));
        assert_eq!(session.view(ViewId::Ap).sds_step(), 1);
        assert_eq!(session.view(ViewId::Lat).sds_step(), 0);
    }

    #[test]
    fn test_table_updates_after_every_event() {
        let mut session = SdsSession::default();
        complete(&mut session, ViewId::Ap, 10.0, 12.0);
        assert_eq!(session.table().text_values()[2], "11.0");
        assert_eq!(session.table().text_values()[8], "N/A");

        complete(&mut session, ViewId::Lat, 9.0, 11.0);
        let values = session.table().text_values();
        assert_eq!(values[6], "18.1818");
        assert_eq!(values[7], "20.0");
        assert_eq!(values[8], "10.0");
        assert_eq!(values[9], "48.1818");

        session.handle(ViewId::Lat, InputEvent::Undo).unwrap();
        assert_eq!(session.table().text_values()[9], "N/A");
        assert_eq!(session.table().text_values()[3], "9.0");
    }

    #[test]
    fn test_drag_in_move_mode_translates() {
        let mut session = SdsSession::default();
        for p in default_picks().into_iter().take(2) {
            click(&mut session, ViewId::Ap, p);
        }
        session.handle(ViewId::Ap, InputEvent::ToggleMoveMode).unwrap();
        session
            .handle(ViewId::Ap, InputEvent::PointerDown(Point::new(0.0, 0.0)))
            .unwrap();
        session
            .handle(ViewId::Ap, InputEvent::PointerDrag(Point::new(3.0, 4.0)))
            .unwrap();
        session.handle(ViewId::Ap, InputEvent::PointerUp).unwrap();

        let view = session.view(ViewId::Ap);
        assert_eq!(view.sds_step(), 2);
        assert_relative_eq!(view.fig_centres()[0].x, -7.0);
        assert_relative_eq!(view.fig_centres()[0].y, 4.0);
    }

    #[test]
    fn test_undo_mid_drag_drops_the_drag() {
        let mut session = SdsSession::default();
        for p in default_picks().into_iter().take(3) {
            click(&mut session, ViewId::Ap, p);
        }
        session
            .handle(ViewId::Ap, InputEvent::PointerDown(Point::new(0.0, 25.0)))
            .unwrap();
        session.handle(ViewId::Ap, InputEvent::Undo).unwrap();
        session.handle(ViewId::Ap, InputEvent::PointerUp).unwrap();

        let view = session.view(ViewId::Ap);
        assert_eq!(view.sds_step(), 2);
        assert!(view.r_mic().is_none());
        assert_eq!(session.table().text_values()[0], "N/A");

        // the next pick still fits the mic circle through the two kept points
        click(&mut session, ViewId::Ap, Point::new(0.0, 10.0));
        let view = session.view(ViewId::Ap);
        assert_eq!(view.sds_step(), 3);
        assert_relative_eq!(view.r_mic().unwrap(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_translate_ignored_outside_move_mode() {
        let mut session = SdsSession::default();
        click(&mut session, ViewId::Lat, Point::new(2.0, 2.0));
        session
            .handle(ViewId::Lat, InputEvent::Translate { dx: 5.0, dy: 5.0 })
            .unwrap();
        assert_eq!(session.view(ViewId::Lat).fig_centres()[0], Point::new(2.0, 2.0));
    }

    #[test]
    fn test_replay_matches_direct_calls() {
        let mut direct = SdsSession::default();
        complete(&mut direct, ViewId::Ap, 10.0, 12.0);

        let script: Vec<(ViewId, InputEvent)> = [
            Point::new(-10.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 12.0),
        ]
        .into_iter()
        .flat_map(|p| {
            [
                (ViewId::Ap, InputEvent::PointerDown(p)),
                (ViewId::Ap, InputEvent::PointerUp),
            ]
        })
        .collect();

        let mut replayed = SdsSession::default();
        let table = replayed.replay(script).unwrap();
        assert_eq!(table, direct.table());
    }

    #[test]
    fn test_view_id_parse() {
        assert_eq!(ViewId::parse(" AP "), Some(ViewId::Ap));
        assert_eq!(ViewId::parse("lateral"), Some(ViewId::Lat));
        assert_eq!(ViewId::parse("frog"), None);
    }
}
