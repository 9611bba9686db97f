use serde::Serialize;
use thiserror::Error;

use crate::processing::annotator::{ViewAnnotator, FINAL_STEP};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("{view} view is at annotation step {step}, steps run from 0 to 4")]
    InvalidStep { view: &'static str, step: usize },
    #[error("{view} view is at annotation step {step} but has no recorded {radius} radius")]
    MissingRadius {
        view: &'static str,
        step: usize,
        radius: &'static str,
    },
}

/// Read-only view of what an annotated radiograph has measured so far.
pub trait ViewMeasurements {
    fn sds_step(&self) -> usize;
    fn r_mic(&self) -> Option<f64>;
    fn r_mcc(&self) -> Option<f64>;
}

impl ViewMeasurements for ViewAnnotator {
    fn sds_step(&self) -> usize {
        ViewAnnotator::sds_step(self)
    }

    fn r_mic(&self) -> Option<f64> {
        ViewAnnotator::r_mic(self)
    }

    fn r_mcc(&self) -> Option<f64> {
        ViewAnnotator::r_mcc(self)
    }
}

/// Radii and relative eccentricity derived for a single view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ViewMetrics {
    pub r_mic: Option<f64>,
    pub r_mcc: Option<f64>,
    /// Mean of the mic and mcc radii.
    pub r: Option<f64>,
    /// Relative eccentricity in percent.
    pub re: Option<f64>,
}

impl ViewMetrics {
    pub fn from_view<V: ViewMeasurements + ?Sized>(
        view: &V,
        label: &'static str,
    ) -> Result<Self, StateError> {
        let step = view.sds_step();
        let missing = |radius| StateError::MissingRadius {
            view: label,
            step,
            radius,
        };

        match step {
            0..=2 => Ok(Self::default()),
            3 => {
                let r_mic = view.r_mic().ok_or_else(|| missing("mic"))?;
                Ok(Self {
                    r_mic: Some(r_mic),
                    ..Self::default()
                })
            }
            FINAL_STEP => {
                let r_mic = view.r_mic().ok_or_else(|| missing("mic"))?;
                let r_mcc = view.r_mcc().ok_or_else(|| missing("mcc"))?;
                let r = (r_mic + r_mcc) / 2.0;
                Ok(Self {
                    r_mic: Some(r_mic),
                    r_mcc: Some(r_mcc),
                    r: Some(r),
                    re: Some(100.0 * (r_mcc - r_mic) / r),
                })
            }
            _ => {
                let err = StateError::InvalidStep { view: label, step };
                log::error!("{}", err);
                Err(err)
            }
        }
    }
}

/// The ten derived values shown in the calculations table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    pub r_mic_ap: Option<f64>,
    pub r_mcc_ap: Option<f64>,
    pub r_ap: Option<f64>,
    pub r_mic_lat: Option<f64>,
    pub r_mcc_lat: Option<f64>,
    pub r_lat: Option<f64>,
    #[serde(rename = "RE_ap")]
    pub re_ap: Option<f64>,
    #[serde(rename = "RE_lat")]
    pub re_lat: Option<f64>,
    #[serde(rename = "ED")]
    pub ed: Option<f64>,
    #[serde(rename = "SDS")]
    pub sds: Option<f64>,
}

impl AggregateResult {
    pub const FIELD_NAMES: [&'static str; 10] = [
        "r_mic_ap",
        "r_mcc_ap",
        "r_ap",
        "r_mic_lat",
        "r_mcc_lat",
        "r_lat",
        "RE_ap",
        "RE_lat",
        "ED",
        "SDS",
    ];

    /// Values in table order.
    pub fn values(&self) -> [Option<f64>; 10] {
        [
            self.r_mic_ap,
            self.r_mcc_ap,
            self.r_ap,
            self.r_mic_lat,
            self.r_mcc_lat,
            self.r_lat,
            self.re_ap,
            self.re_lat,
            self.ed,
            self.sds,
        ]
    }
}

/// Eccentricity difference between the two views, normalised by the
/// smaller mean radius.
pub fn eccentricity_difference(r_ap: f64, r_lat: f64) -> f64 {
    if r_ap > r_lat {
        100.0 * (r_ap - r_lat) / r_lat
    } else {
        100.0 * (r_lat - r_ap) / r_ap
    }
}

/// Derive the calculations table from the AP and lateral views.
///
/// ED and SDS are only available once both views are complete.
pub fn aggregate<A, L>(ap: &A, lat: &L) -> Result<AggregateResult, StateError>
where
    A: ViewMeasurements + ?Sized,
    L: ViewMeasurements + ?Sized,
{
    let ap_metrics = ViewMetrics::from_view(ap, "AP")?;
    let lat_metrics = ViewMetrics::from_view(lat, "LAT")?;

    let (ed, sds) = match (ap_metrics.re, lat_metrics.re, ap_metrics.r, lat_metrics.r) {
        (Some(re_ap), Some(re_lat), Some(r_ap), Some(r_lat)) => {
            let ed = eccentricity_difference(r_ap, r_lat);
            (Some(ed), Some(re_ap + re_lat + ed))
        }
        _ => (None, None),
    };

    Ok(AggregateResult {
        r_mic_ap: ap_metrics.r_mic,
        r_mcc_ap: ap_metrics.r_mcc,
        r_ap: ap_metrics.r,
        r_mic_lat: lat_metrics.r_mic,
        r_mcc_lat: lat_metrics.r_mcc,
        r_lat: lat_metrics.r,
        re_ap: ap_metrics.re,
        re_lat: lat_metrics.re,
        ed,
        sds,
    })
}
