//! Browsable Sveriges Radio source
//!
//! [`SverigesRadioSource`] bundles the router and the browsing context so a
//! host only deals with paths and listings.

use crate::context::Context;
use crate::error::Result;
use crate::menu::Listing;
use crate::notify::Notifier;
use crate::route::Route;
use crate::router::Router;
use pmoconfig::Config;
use std::sync::Arc;

pub struct SverigesRadioSource {
    router: Router,
    context: Context,
}

impl SverigesRadioSource {
    pub fn new(context: Context) -> Self {
        Self {
            router: Router::new(),
            context,
        }
    }

    /// Create a source from the configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pmoconfig::Config;
    /// use pmosverigesradio::{LogNotifier, SverigesRadioSource};
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let config = Config::load_config("")?;
    ///     let source = SverigesRadioSource::from_config(&config, Arc::new(LogNotifier)).await?;
    ///     let listing = source.browse("/live/").await?;
    ///     for item in &listing.items {
    ///         println!("{}", item.label);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Ok(Self::new(Context::from_config(config, notifier).await?))
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Listing of a path or navigation URL
    pub async fn browse(&self, path: &str) -> Result<Listing> {
        self.router.browse(&self.context, path).await
    }

    pub async fn open(&self, route: &Route) -> Result<Listing> {
        self.router.dispatch(&self.context, route).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Gateway;
    use crate::error::Error;
    use crate::notify::RecordingNotifier;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct Channels;

    #[async_trait]
    impl Gateway for Channels {
        async fn fetch(&self, endpoint: &str, _params: &[(&'static str, String)]) -> Result<Value> {
            match endpoint {
                "channels" => Ok(json!({
                    "channels": [
                        { "id": 132, "name": "P1", "image": "http://x/p1.png",
                          "liveaudio": { "id": 132, "url": "http://x/p1.mp3" } },
                        { "id": 163, "name": "P2", "image": "http://x/p2.png",
                          "liveaudio": { "id": 163, "url": "http://x/p2.mp3" } }
                    ]
                })),
                _ => Err(Error::transport(endpoint, "offline")),
            }
        }
    }

    #[tokio::test]
    async fn test_browse_live_and_channels() {
        let source = SverigesRadioSource::new(Context::builder(Arc::new(Channels)).build());

        let live = source
            .browse("plugin://plugin.audio.sverigesradio/live/")
            .await
            .unwrap();
        assert_eq!(live.len(), 2);
        assert!(live.items.iter().all(|i| i.playable));
        assert_eq!(live.items[1].target.url(), "http://x/p2.mp3");

        let channels = source.open(&Route::Channels).await.unwrap();
        assert!(channels.items.iter().all(|i| !i.playable));
        assert_eq!(
            channels.items[0].target.url(),
            "plugin://plugin.audio.sverigesradio/channel/132"
        );
    }

    #[tokio::test]
    async fn test_browse_failure_is_reported_once() {
        let notifier = Arc::new(RecordingNotifier::new());
        let source = SverigesRadioSource::new(
            Context::builder(Arc::new(Channels))
                .notifier(notifier.clone())
                .build(),
        );

        let listing = source.browse("/categories/").await.unwrap();
        assert!(listing.is_empty());
        assert_eq!(notifier.notices().len(), 1);
    }
}
