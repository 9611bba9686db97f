use crate::config::SdsConfig;
use crate::processing::aggregate::AggregateResult;

/// Text rendering of an [`AggregateResult`] for display and export.
#[derive(Debug, Clone, PartialEq)]
pub struct SdsTable {
    result: AggregateResult,
    text_values: Vec<String>,
    separator: String,
}

impl SdsTable {
    pub fn new(result: AggregateResult, config: &SdsConfig) -> Self {
        let text_values = result
            .values()
            .iter()
            .map(|v| match v {
                Some(v) => format_value(*v, config.decimals),
                None => config.na_text.clone(),
            })
            .collect();
        Self {
            result,
            text_values,
            separator: config.separator.clone(),
        }
    }

    pub fn headings() -> &'static [&'static str; 10] {
        &AggregateResult::FIELD_NAMES
    }

    pub fn result(&self) -> &AggregateResult {
        &self.result
    }

    pub fn text_values(&self) -> &[String] {
        &self.text_values
    }

    /// Single line for the clipboard, no trailing separator.
    pub fn export_line(&self) -> String {
        self.text_values.join(&self.separator)
    }
}

impl Default for SdsTable {
    fn default() -> Self {
        SdsTable::new(AggregateResult::default(), &SdsConfig::default())
    }
}

/// Round half to even at `decimals` places and print in shortest form,
/// keeping at least one fractional digit (`3.0`, `18.1818`).
pub fn format_value(value: f64, decimals: u32) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round_ties_even() / scale;
    if rounded.is_finite() {
        format!("{:?}", rounded)
    } else {
        format!("{:?}", value)
    }
}
