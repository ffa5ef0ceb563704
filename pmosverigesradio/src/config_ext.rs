//! Sveriges Radio settings stored in pmoconfig
//!
//! This module provides the `SverigesRadioConfigExt` trait which adds the
//! Sveriges Radio keys (`sources.sverigesradio.*`) to `pmoconfig::Config`.
//!
//! # Auto-persist
//!
//! Getters write their default value back to the configuration when the key
//! is missing or unreadable, so `config.yaml` always lists every setting.
//!
//! # Example
//!
//! ```no_run
//! use pmoconfig::Config;
//! use pmosverigesradio::SverigesRadioConfigExt;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load_config("")?;
//! let settings = config.get_sverigesradio_settings()?;
//! println!("Streaming quality: {}", settings.quality);
//! # Ok(())
//! # }
//! ```

use crate::cache::DEFAULT_CACHE_TTL_SECS;
use crate::client::DEFAULT_BASE_URL;
use crate::settings::{AudioQuality, Settings};
use crate::strings::{StringId, Strings};
use anyhow::Result;
use pmoconfig::Config;
use serde_yaml::Value;

const QUALITY: &[&str] = &["sources", "sverigesradio", "quality"];
const PREFER_BROADCASTS: &[&str] = &["sources", "sverigesradio", "prefer_broadcasts"];
const CACHE_TTL: &[&str] = &["sources", "sverigesradio", "cache_ttl_secs"];
const BASE_URL: &[&str] = &["sources", "sverigesradio", "base_url"];
const STRINGS: &[&str] = &["sources", "sverigesradio", "strings"];

pub trait SverigesRadioConfigExt {
    /// Streaming quality (default: normal)
    fn get_sverigesradio_quality(&self) -> Result<AudioQuality>;
    fn set_sverigesradio_quality(&self, quality: AudioQuality) -> Result<()>;

    /// Whether broadcast recordings win over pod files (default: false)
    fn get_sverigesradio_prefer_broadcasts(&self) -> Result<bool>;
    fn set_sverigesradio_prefer_broadcasts(&self, prefer: bool) -> Result<()>;

    /// Lifetime of cached responses in seconds (default: 24 hours)
    fn get_sverigesradio_cache_ttl(&self) -> Result<u64>;
    fn set_sverigesradio_cache_ttl(&self, ttl_secs: u64) -> Result<()>;

    fn get_sverigesradio_base_url(&self) -> Result<String>;
    fn set_sverigesradio_base_url(&self, url: &str) -> Result<()>;

    /// String table with the configured overrides
    ///
    /// Overrides are a mapping from catalogue id to text. Unknown ids are
    /// ignored.
    fn get_sverigesradio_strings(&self) -> Result<Strings>;

    fn get_sverigesradio_settings(&self) -> Result<Settings> {
        Ok(Settings {
            quality: self.get_sverigesradio_quality()?,
            prefer_broadcasts: self.get_sverigesradio_prefer_broadcasts()?,
        })
    }
}

impl SverigesRadioConfigExt for Config {
    fn get_sverigesradio_quality(&self) -> Result<AudioQuality> {
        if let Ok(Value::String(s)) = self.get_value(QUALITY) {
            match s.parse() {
                Ok(quality) => return Ok(quality),
                Err(e) => tracing::warn!("{}, using default", e),
            }
        }

        let quality = AudioQuality::default();
        self.set_sverigesradio_quality(quality)?;
        Ok(quality)
    }

    fn set_sverigesradio_quality(&self, quality: AudioQuality) -> Result<()> {
        self.set_value(QUALITY, Value::String(quality.as_str().to_string()))
    }

    fn get_sverigesradio_prefer_broadcasts(&self) -> Result<bool> {
        match self.get_value(PREFER_BROADCASTS) {
            Ok(Value::Bool(b)) => Ok(b),
            _ => {
                self.set_sverigesradio_prefer_broadcasts(false)?;
                Ok(false)
            }
        }
    }

    fn set_sverigesradio_prefer_broadcasts(&self, prefer: bool) -> Result<()> {
        self.set_value(PREFER_BROADCASTS, Value::Bool(prefer))
    }

    fn get_sverigesradio_cache_ttl(&self) -> Result<u64> {
        if let Ok(Value::Number(n)) = self.get_value(CACHE_TTL) {
            if let Some(ttl) = n.as_u64() {
                return Ok(ttl);
            }
        }

        // Not set or not a positive integer, use default and persist
        self.set_sverigesradio_cache_ttl(DEFAULT_CACHE_TTL_SECS)?;
        Ok(DEFAULT_CACHE_TTL_SECS)
    }

    fn set_sverigesradio_cache_ttl(&self, ttl_secs: u64) -> Result<()> {
        self.set_value(CACHE_TTL, Value::Number(serde_yaml::Number::from(ttl_secs)))
    }

    fn get_sverigesradio_base_url(&self) -> Result<String> {
        match self.get_value(BASE_URL) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => {
                self.set_sverigesradio_base_url(DEFAULT_BASE_URL)?;
                Ok(DEFAULT_BASE_URL.to_string())
            }
        }
    }

    fn set_sverigesradio_base_url(&self, url: &str) -> Result<()> {
        self.set_value(BASE_URL, Value::String(url.to_string()))
    }

    fn get_sverigesradio_strings(&self) -> Result<Strings> {
        let mut strings = Strings::new();

        if let Ok(Value::Mapping(map)) = self.get_value(STRINGS) {
            for (key, text) in map {
                let code = match &key {
                    Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                    Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                };
                let (Some(id), Value::String(text)) = (code.and_then(StringId::from_code), text)
                else {
                    tracing::warn!("Ignoring string override {:?}", key);
                    continue;
                };
                strings = strings.with_override(id, text);
            }
        }

        Ok(strings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(yaml: &str) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yaml"), yaml).unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_defaults() {
        let (_dir, config) = load("{}\n");

        let settings = config.get_sverigesradio_settings().unwrap();
        assert_eq!(settings.quality, AudioQuality::Normal);
        assert!(!settings.prefer_broadcasts);
        assert_eq!(
            config.get_sverigesradio_cache_ttl().unwrap(),
            DEFAULT_CACHE_TTL_SECS
        );
        assert_eq!(config.get_sverigesradio_base_url().unwrap(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_values_from_file() {
        let (_dir, config) = load(
            "sources:\n  sverigesradio:\n    quality: hi\n    prefer_broadcasts: true\n    cache_ttl_secs: 60\n",
        );

        assert_eq!(config.get_sverigesradio_quality().unwrap(), AudioQuality::Hi);
        assert!(config.get_sverigesradio_prefer_broadcasts().unwrap());
        assert_eq!(config.get_sverigesradio_cache_ttl().unwrap(), 60);
    }

    #[test]
    fn test_invalid_quality_falls_back_and_persists() {
        let (_dir, config) = load("sources:\n  sverigesradio:\n    quality: ultra\n");

        assert_eq!(
            config.get_sverigesradio_quality().unwrap(),
            AudioQuality::Normal
        );
        assert_eq!(
            config.get_value(QUALITY).unwrap(),
            Value::String("normal".to_string())
        );
    }

    #[test]
    fn test_setters_persist() {
        let (dir, config) = load("{}\n");
        config.set_sverigesradio_quality(AudioQuality::Lo).unwrap();
        config.set_sverigesradio_prefer_broadcasts(true).unwrap();

        let reloaded = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        let settings = reloaded.get_sverigesradio_settings().unwrap();
        assert_eq!(settings.quality, AudioQuality::Lo);
        assert!(settings.prefer_broadcasts);
    }

    #[test]
    fn test_string_overrides() {
        let (_dir, config) = load(
            "sources:\n  sverigesradio:\n    strings:\n      30013: Direkt\n      \"30014\": Kanaler\n      99999: Ignored\n",
        );

        let strings = config.get_sverigesradio_strings().unwrap();
        assert_eq!(strings.get(StringId::Live), "Direkt");
        assert_eq!(strings.get(StringId::Channels), "Kanaler");
        assert_eq!(strings.get(StringId::Teams), "Teams");
    }
}
