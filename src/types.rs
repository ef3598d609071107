//! Feature universe types
//!
//! The model inputs are a fixed, ordered set of twelve features. Their index
//! (0..11) is the contract used by the combination table; the labels are for
//! display only.

use crate::error::{FeatureTuiError, Result};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// Number of selectable features
pub const FEATURE_COUNT: usize = Feature::COUNT;

/// Smallest feature subset a model was trained on
pub const MIN_SELECTION: usize = 6;

/// Model input feature, in universe order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, EnumCount)]
pub enum Feature {
    #[strum(serialize = "Temperature (ºC)")]
    Temperature,
    #[strum(serialize = "Humidity (%)")]
    Humidity,
    #[strum(serialize = "Wind speed (m/s)")]
    WindSpeed,
    #[strum(serialize = "Wind gust (m/s)")]
    WindGust,
    #[strum(serialize = "Solar radiation (W/m^2)")]
    SolarRadiation,
    #[strum(serialize = "Hour of day")]
    HourOfDay,
    #[strum(serialize = "No work day")]
    NoWorkDay,
    #[strum(serialize = "Power[t-1] (kWh)")]
    PowerLag1,
    #[strum(serialize = "Power[t-2] (kWh)")]
    PowerLag2,
    #[strum(serialize = "Power[t-3] (kWh)")]
    PowerLag3,
    #[strum(serialize = "Power[t-4] (kWh)")]
    PowerLag4,
    #[strum(serialize = "Power[t-5] (kWh)")]
    PowerLag5,
}

impl Feature {
    /// Position of this feature in the universe
    pub fn index(self) -> usize {
        self as usize
    }

    /// Feature at the given universe position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Autoregressive `Power[t-n]` inputs
    pub fn is_power_lag(self) -> bool {
        matches!(
            self,
            Self::PowerLag1 | Self::PowerLag2 | Self::PowerLag3 | Self::PowerLag4 | Self::PowerLag5
        )
    }
}

/// The ordered set of selectable features, fixed for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    labels: Vec<String>,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            labels: Feature::iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Universe {
    /// Build a universe from custom display labels.
    ///
    /// The label count must match [`FEATURE_COUNT`]; the universe size itself
    /// is not configurable.
    pub fn from_labels(labels: Vec<String>) -> Result<Self> {
        if labels.len() != FEATURE_COUNT {
            return Err(FeatureTuiError::invalid_configuration(format!(
                "expected {} feature labels, got {}",
                FEATURE_COUNT,
                labels.len()
            )));
        }
        if let Some(pos) = labels.iter().position(|l| l.trim().is_empty()) {
            return Err(FeatureTuiError::invalid_configuration(format!(
                "feature label {} is empty",
                pos
            )));
        }
        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Display label for a feature index
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
