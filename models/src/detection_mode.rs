use crate::error::model_error::ModelError;
use crate::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const LEGACY: &str = "legacy";
const STRUCTURED: &str = "structured";

/// Which OS query tool the detector drives.
///
/// `Legacy` is the tabular `wmic` output, `Structured` is PowerShell
/// `Get-CimInstance` piped through `ConvertTo-Json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    #[default]
    Legacy,
    Structured,
}

impl DetectionMode {
    pub fn is_structured(self) -> bool {
        self == DetectionMode::Structured
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMode::Legacy => LEGACY,
            DetectionMode::Structured => STRUCTURED,
        }
    }
}

impl Display for DetectionMode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for DetectionMode {
    type Err = ModelError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            LEGACY => Ok(DetectionMode::Legacy),
            STRUCTURED => Ok(DetectionMode::Structured),
            other => Err(ModelError::Validation {
                message: format!("Unknown detection mode: {other} (expected {LEGACY} or {STRUCTURED})"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
