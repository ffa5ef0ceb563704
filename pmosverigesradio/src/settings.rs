//! User settings

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Audio quality requested from the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioQuality {
    Lo,
    #[default]
    Normal,
    Hi,
}

impl AudioQuality {
    /// Value of the `audioquality` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            AudioQuality::Lo => "lo",
            AudioQuality::Normal => "normal",
            AudioQuality::Hi => "hi",
        }
    }
}

impl fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioQuality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lo" => Ok(AudioQuality::Lo),
            "normal" => Ok(AudioQuality::Normal),
            "hi" => Ok(AudioQuality::Hi),
            other => Err(Error::InvalidSetting(format!(
                "audio quality {:?} (expected lo, normal or hi)",
                other
            ))),
        }
    }
}

/// Settings read once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub quality: AudioQuality,
    /// Prefer the broadcast recording over pod files
    pub prefer_broadcasts: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_parsing() {
        assert_eq!("hi".parse::<AudioQuality>().unwrap(), AudioQuality::Hi);
        assert_eq!(" LO ".parse::<AudioQuality>().unwrap(), AudioQuality::Lo);
        assert!("ultra".parse::<AudioQuality>().is_err());
        assert_eq!(AudioQuality::default().as_str(), "normal");
    }
}
