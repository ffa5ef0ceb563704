//! Endpoint catalogue of the Sveriges Radio API
//!
//! Each method issues one request through the [`Gateway`] and returns the
//! raw JSON response. Program listings, episode listings, program details
//! and categories go through the [`ResponseCache`]; live data (channels,
//! sports) is always fetched.

use crate::cache::{cache_key, NoCache, ResponseCache};
use crate::client::Gateway;
use crate::error::Result;
use crate::settings::AudioQuality;
use serde_json::Value;
use std::sync::Arc;

/// Stream template used for live audio URLs
pub const LIVE_AUDIO_TEMPLATE_ID: &str = "5";

/// Restriction of a program listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramFilter {
    All,
    Channel(String),
    Category(String),
}

/// Restriction of a sports broadcast listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SportsFilter {
    All,
    Team(String),
    League(String),
}

type Params = Vec<(&'static str, String)>;

#[derive(Clone)]
pub struct SverigesRadioApi {
    gateway: Arc<dyn Gateway>,
    cache: Arc<dyn ResponseCache>,
}

impl SverigesRadioApi {
    pub fn new(gateway: Arc<dyn Gateway>, cache: Arc<dyn ResponseCache>) -> Self {
        Self { gateway, cache }
    }

    /// API without response cache
    pub fn uncached(gateway: Arc<dyn Gateway>) -> Self {
        Self::new(gateway, Arc::new(NoCache))
    }

    /// `channels` with live audio URLs
    pub async fn channels(&self, quality: AudioQuality) -> Result<Value> {
        self.gateway
            .fetch("channels", &live_params(quality))
            .await
    }

    /// `sport/broadcasts`, optionally restricted to a team or a league
    pub async fn sports_broadcasts(
        &self,
        quality: AudioQuality,
        filter: &SportsFilter,
    ) -> Result<Value> {
        let mut params = live_params(quality);
        match filter {
            SportsFilter::All => {}
            SportsFilter::Team(id) => params.push(("teamIds", id.clone())),
            SportsFilter::League(id) => {
                params.push(("filter", "league.id".to_string()));
                params.push(("filterValue", id.clone()));
            }
        }

        self.gateway.fetch("sport/broadcasts", &params).await
    }

    pub async fn sports_leagues(&self) -> Result<Value> {
        self.gateway.fetch("sport/leagues", &[]).await
    }

    pub async fn sports_teams(&self) -> Result<Value> {
        self.gateway.fetch("sport/teams", &[]).await
    }

    /// `programs/index` restricted to programs with on-demand content
    pub async fn programs(&self, filter: &ProgramFilter) -> Result<Value> {
        let mut params: Params = vec![
            ("filter", "program.hasondemand".to_string()),
            ("filterValue", "true".to_string()),
        ];
        match filter {
            ProgramFilter::All => {}
            ProgramFilter::Channel(id) => params.push(("channelid", id.clone())),
            ProgramFilter::Category(id) => params.push(("programcategoryid", id.clone())),
        }

        self.cached_fetch("programs/index", params).await
    }

    /// `episodes` of a program
    pub async fn program_episodes(&self, program_id: &str, quality: AudioQuality) -> Result<Value> {
        let params: Params = vec![
            ("audioquality", quality.as_str().to_string()),
            ("programid", program_id.to_string()),
        ];
        self.cached_fetch("episodes", params).await
    }

    /// `programs/<id>`
    pub async fn program_info(&self, program_id: &str) -> Result<Value> {
        self.cached_fetch(&format!("programs/{}", program_id), Vec::new())
            .await
    }

    /// `programcategories`
    pub async fn categories(&self) -> Result<Value> {
        self.cached_fetch("programcategories", Vec::new()).await
    }

    async fn cached_fetch(&self, endpoint: &str, params: Params) -> Result<Value> {
        let key = cache_key(endpoint, &params);
        if let Some(value) = self.cache.get(&key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(value);
        }

        let value = self.gateway.fetch(endpoint, &params).await?;
        self.cache.insert(key, value.clone()).await;
        Ok(value)
    }
}

fn live_params(quality: AudioQuality) -> Params {
    vec![
        ("audioquality", quality.as_str().to_string()),
        ("liveaudiotemplateid", LIVE_AUDIO_TEMPLATE_ID.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::error::Error;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubGateway {
        requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
        fail: bool,
    }

    impl StubGateway {
        fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Gateway for StubGateway {
        async fn fetch(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Value> {
            self.requests.lock().unwrap().push((
                endpoint.to_string(),
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ));
            if self.fail {
                Err(Error::transport(endpoint, "connection refused"))
            } else {
                Ok(json!({ "endpoint": endpoint }))
            }
        }
    }

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn test_sports_filters() {
        let gateway = Arc::new(StubGateway::default());
        let api = SverigesRadioApi::uncached(gateway.clone());

        api.sports_broadcasts(AudioQuality::Hi, &SportsFilter::Team("12".into()))
            .await
            .unwrap();
        api.sports_broadcasts(AudioQuality::Lo, &SportsFilter::League("3".into()))
            .await
            .unwrap();

        let requests = gateway.requests();
        assert_eq!(requests[0].0, "sport/broadcasts");
        assert_eq!(param(&requests[0].1, "teamIds"), Some("12"));
        assert_eq!(param(&requests[0].1, "audioquality"), Some("hi"));
        assert_eq!(param(&requests[0].1, "liveaudiotemplateid"), Some("5"));
        assert_eq!(param(&requests[1].1, "filter"), Some("league.id"));
        assert_eq!(param(&requests[1].1, "filterValue"), Some("3"));
        assert_eq!(param(&requests[1].1, "teamIds"), None);
    }

    #[tokio::test]
    async fn test_program_filters() {
        let gateway = Arc::new(StubGateway::default());
        let api = SverigesRadioApi::uncached(gateway.clone());

        api.programs(&ProgramFilter::Channel("132".into()))
            .await
            .unwrap();
        api.programs(&ProgramFilter::All).await.unwrap();

        let requests = gateway.requests();
        assert_eq!(requests[0].0, "programs/index");
        assert_eq!(param(&requests[0].1, "channelid"), Some("132"));
        assert_eq!(param(&requests[0].1, "filter"), Some("program.hasondemand"));
        assert_eq!(param(&requests[0].1, "filterValue"), Some("true"));
        assert_eq!(param(&requests[1].1, "channelid"), None);
        assert_eq!(param(&requests[1].1, "programcategoryid"), None);
    }

    #[tokio::test]
    async fn test_cached_endpoints_hit_the_network_once() {
        let gateway = Arc::new(StubGateway::default());
        let api = SverigesRadioApi::new(gateway.clone(), Arc::new(MemoryCache::default()));

        api.program_info("4540").await.unwrap();
        api.program_info("4540").await.unwrap();
        api.program_episodes("4540", AudioQuality::Normal)
            .await
            .unwrap();
        api.program_episodes("4540", AudioQuality::Hi).await.unwrap();

        let endpoints: Vec<String> = gateway.requests().into_iter().map(|r| r.0).collect();
        assert_eq!(endpoints, vec!["programs/4540", "episodes", "episodes"]);
    }

    #[tokio::test]
    async fn test_live_endpoints_are_not_cached() {
        let gateway = Arc::new(StubGateway::default());
        let api = SverigesRadioApi::new(gateway.clone(), Arc::new(MemoryCache::default()));

        api.channels(AudioQuality::Normal).await.unwrap();
        api.channels(AudioQuality::Normal).await.unwrap();
        assert_eq!(gateway.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = Arc::new(MemoryCache::default());
        let failing = Arc::new(StubGateway {
            fail: true,
            ..StubGateway::default()
        });
        let api = SverigesRadioApi::new(failing, cache.clone());

        assert!(api.categories().await.is_err());
        assert_eq!(cache.len().await, 0);
    }
}
