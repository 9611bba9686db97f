use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::entry::{InputEvent, ViewId};
use crate::processing::geometry::Point;

/// Delimiter of an event script: whichever of tab or comma ends the
/// leading view token on the first non-blank line. Defaults to comma.
fn script_delimiter(text: &str) -> u8 {
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    match first.find(|c| c == '\t' || c == ',') {
        Some(i) if first.as_bytes()[i] == b'\t' => b'\t',
        _ => b',',
    }
}

/// One row of an event script: `view,event,x,y`.
///
/// `x`/`y` carry the pointer position for `down`/`drag` and the offset for
/// `translate`; other events leave them empty.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EventRecord {
    pub view: String,
    pub event: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl EventRecord {
    pub fn to_event(&self) -> Result<(ViewId, InputEvent)> {
        let view = ViewId::parse(&self.view)
            .with_context(|| format!("unknown view {:?}", self.view))?;
        let coords = || -> Result<(f64, f64)> {
            match (self.x, self.y) {
                (Some(x), Some(y)) => Ok((x, y)),
                _ => anyhow::bail!("event {:?} needs both x and y", self.event),
            }
        };

        let event = match self.event.trim().to_ascii_lowercase().as_str() {
            "down" => {
                let (x, y) = coords()?;
                InputEvent::PointerDown(Point::new(x, y))
            }
            "drag" => {
                let (x, y) = coords()?;
                InputEvent::PointerDrag(Point::new(x, y))
            }
            "up" => InputEvent::PointerUp,
            "undo" => InputEvent::Undo,
            "move" => InputEvent::ToggleMoveMode,
            "translate" => {
                let (dx, dy) = coords()?;
                InputEvent::Translate { dx, dy }
            }
            other => anyhow::bail!("unknown event {:?}", other),
        };
        Ok((view, event))
    }
}

/// Reads an event script from a CSV or TSV file without header.
///
/// Rows that cannot be parsed are skipped with a warning.
pub fn read_event_script<P: AsRef<Path>>(path: P) -> Result<Vec<(ViewId, InputEvent)>> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to open event script {:?}", path.as_ref()))?;
    let delim = script_delimiter(&text);
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delim)
        .from_reader(text.as_bytes());

    let mut events = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping invalid row {}: {:?}", line + 1, e);
                continue;
            }
        };
        let parsed = record
            .deserialize::<EventRecord>(None)
            .map_err(anyhow::Error::from)
            .and_then(|r| r.to_event());
        match parsed {
            Ok(event) => events.push(event),
            Err(e) => log::warn!("Skipping invalid record {}: {:#}", line + 1, e),
        }
    }

    Ok(events)
}
