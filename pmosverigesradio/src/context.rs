//! Browsing context shared by every handler
//!
//! A [`Context`] is built once at startup and only read afterwards: the API
//! (gateway and response cache), the user settings, the string table and the
//! notifier used to report failures.

use crate::api::SverigesRadioApi;
use crate::cache::{MemoryCache, NoCache, ResponseCache};
use crate::client::{Gateway, SverigesRadioClient};
use crate::config_ext::SverigesRadioConfigExt;
use crate::error::{Error, Result};
use crate::notify::{LogNotifier, Notifier};
use crate::settings::Settings;
use crate::strings::{StringId, Strings};
use pmoconfig::Config;
use std::sync::Arc;
use std::time::Duration;

pub struct Context {
    api: SverigesRadioApi,
    settings: Settings,
    strings: Strings,
    notifier: Arc<dyn Notifier>,
}

impl Context {
    pub fn builder(gateway: Arc<dyn Gateway>) -> ContextBuilder {
        ContextBuilder::new(gateway)
    }

    /// Context for the HTTP client and settings described by `config`
    pub async fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Ok(ContextBuilder::from_config(config)
            .await?
            .notifier(notifier)
            .build())
    }

    pub fn api(&self) -> &SverigesRadioApi {
        &self.api
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn strings(&self) -> &Strings {
        &self.strings
    }

    pub fn text(&self, id: StringId) -> &str {
        self.strings.get(id)
    }

    /// Turn a reported failure into a notice
    ///
    /// Transport and parse failures are shown to the user once, logged, and
    /// yield `Ok(None)`. Any other error is returned unchanged.
    pub fn report<T>(&self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_reported() => {
                tracing::error!("{}", e);
                let message = match e {
                    Error::Transport { .. } => StringId::UnableToCommunicate,
                    _ => StringId::UnableToParse,
                };
                self.notifier
                    .notify(self.text(StringId::SverigesRadio), self.text(message));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

pub struct ContextBuilder {
    gateway: Arc<dyn Gateway>,
    cache: Arc<dyn ResponseCache>,
    settings: Settings,
    strings: Strings,
    notifier: Arc<dyn Notifier>,
}

impl ContextBuilder {
    /// Builder with no cache, default settings and log-only notices
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            cache: Arc::new(NoCache),
            settings: Settings::default(),
            strings: Strings::default(),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Builder preset from `config`: HTTP client (with the optional
    /// `host.http.proxy`), response cache lifetime, settings and string
    /// overrides
    ///
    /// A cache lifetime of zero disables the cache.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut client = SverigesRadioClient::builder()
            .base_url(config.get_sverigesradio_base_url()?)
            .timeout(Duration::from_secs(config.get_http_timeout_secs()?))
            .user_agent(config.get_http_user_agent()?);
        if let Some(proxy) = config.get_http_proxy()? {
            tracing::debug!("Using HTTP proxy {}", proxy);
            client = client.proxy(proxy);
        }
        let client = client.build().await?;

        let ttl = config.get_sverigesradio_cache_ttl()?;
        let cache: Arc<dyn ResponseCache> = if ttl == 0 {
            Arc::new(NoCache)
        } else {
            Arc::new(MemoryCache::new(Duration::from_secs(ttl)))
        };

        Ok(Self::new(Arc::new(client))
            .cache(cache)
            .settings(config.get_sverigesradio_settings()?)
            .strings(config.get_sverigesradio_strings()?))
    }

    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn strings(mut self, strings: Strings) -> Self {
        self.strings = strings;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn build(self) -> Context {
        Context {
            api: SverigesRadioApi::new(self.gateway, self.cache),
            settings: self.settings,
            strings: self.strings,
            notifier: self.notifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Notice, RecordingNotifier};
    use async_trait::async_trait;
    use serde_json::Value;

    struct Offline;

    #[async_trait]
    impl Gateway for Offline {
        async fn fetch(&self, endpoint: &str, _params: &[(&'static str, String)]) -> Result<Value> {
            Err(Error::transport(endpoint, "offline"))
        }
    }

    #[test]
    fn test_report_transport_failure() {
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = Context::builder(Arc::new(Offline))
            .notifier(notifier.clone())
            .build();

        let reported = ctx
            .report::<()>(Err(Error::transport("http://x", "timeout")))
            .unwrap();
        assert!(reported.is_none());
        assert_eq!(
            notifier.notices(),
            vec![Notice {
                heading: "Sveriges Radio".to_string(),
                message: "Unable to communicate with Sveriges Radio".to_string(),
            }]
        );
    }

    #[test]
    fn test_report_uses_localized_strings() {
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = Context::builder(Arc::new(Offline))
            .strings(Strings::new().with_override(StringId::UnableToParse, "Ogiltigt svar"))
            .notifier(notifier.clone())
            .build();

        ctx.report::<()>(Err(Error::parse("episodes", "eof")))
            .unwrap();
        assert_eq!(notifier.notices()[0].message, "Ogiltigt svar");
    }

    #[test]
    fn test_report_passes_other_errors_through() {
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = Context::builder(Arc::new(Offline))
            .notifier(notifier.clone())
            .build();

        let result = ctx.report::<()>(Err(Error::InvalidDate("x".into())));
        assert!(matches!(result, Err(Error::InvalidDate(_))));
        assert!(notifier.notices().is_empty());

        assert_eq!(ctx.report(Ok(3)).unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "sources:\n  sverigesradio:\n    quality: lo\n    strings:\n      30000: SR\n",
        )
        .unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        let ctx = Context::from_config(&config, Arc::new(RecordingNotifier::new()))
            .await
            .unwrap();
        assert_eq!(ctx.settings().quality, crate::settings::AudioQuality::Lo);
        assert!(!ctx.settings().prefer_broadcasts);
        assert_eq!(ctx.text(StringId::SverigesRadio), "SR");
    }

    #[tokio::test]
    async fn test_from_config_with_proxy() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "host:\n  http:\n    proxy: \"http://127.0.0.1:3128\"\n",
        )
        .unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(
            config.get_http_proxy().unwrap().as_deref(),
            Some("http://127.0.0.1:3128")
        );

        assert!(ContextBuilder::from_config(&config).await.is_ok());
    }
}
