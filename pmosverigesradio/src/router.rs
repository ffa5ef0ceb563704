//! Dispatch of routes to their handlers

use crate::context::Context;
use crate::error::{Error, Result};
use crate::handlers::{self, Handler};
use crate::menu::Listing;
use crate::route::{Route, RouteId};
use std::collections::HashMap;

/// Handler table, built once at startup
pub struct Router {
    handlers: HashMap<RouteId, Handler>,
}

impl Router {
    pub fn new() -> Self {
        let table: [(RouteId, Handler); 14] = [
            (RouteId::Index, handlers::index),
            (RouteId::Live, handlers::live),
            (RouteId::Channels, handlers::channels),
            (RouteId::Categories, handlers::categories),
            (RouteId::Sports, handlers::sports),
            (RouteId::AllPrograms, handlers::all_programs),
            (RouteId::ChannelPrograms, handlers::channel_programs),
            (RouteId::Category, handlers::category),
            (RouteId::Program, handlers::program),
            (RouteId::SportsBroadcasts, handlers::all_sports_broadcasts),
            (RouteId::SportsLeagues, handlers::leagues),
            (RouteId::SportsTeams, handlers::teams),
            (RouteId::LeagueBroadcasts, handlers::league_broadcasts),
            (RouteId::TeamBroadcasts, handlers::team_broadcasts),
        ];

        Self {
            handlers: table.into_iter().collect(),
        }
    }

    /// Listing of `route`
    ///
    /// Reported failures yield an empty listing; mapping and date errors are
    /// returned.
    pub async fn dispatch(&self, ctx: &Context, route: &Route) -> Result<Listing> {
        let handler = self
            .handlers
            .get(&route.route_id())
            .ok_or_else(|| Error::UnknownRoute(route.path()))?;

        tracing::debug!("Dispatching {}", route);
        let listing = handler(ctx, route).await?;
        tracing::debug!("{} → {} items", route, listing.len());
        Ok(listing)
    }

    /// Parse `path` and dispatch it
    pub async fn browse(&self, ctx: &Context, path: &str) -> Result<Listing> {
        let route = Route::parse(path)?;
        self.dispatch(ctx, &route).await
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Gateway;
    use crate::menu::Target;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct Canned;

    #[async_trait]
    impl Gateway for Canned {
        async fn fetch(&self, endpoint: &str, _params: &[(&'static str, String)]) -> Result<Value> {
            match endpoint {
                "sport/leagues" => Ok(json!({ "leagues": [{ "id": 3, "name": "SHL" }] })),
                _ => Err(Error::transport(endpoint, "unexpected request")),
            }
        }
    }

    #[test]
    fn test_every_route_has_a_handler() {
        let router = Router::new();
        for id in RouteId::ALL {
            assert!(router.handlers.contains_key(&id), "{:?}", id);
        }
    }

    #[tokio::test]
    async fn test_browse_follows_item_targets() {
        let router = Router::new();
        let ctx = Context::builder(Arc::new(Canned)).build();

        let sports = router.browse(&ctx, "/sports/").await.unwrap();
        let leagues_route = sports.items[1].target.route().unwrap().clone();
        assert_eq!(leagues_route, Route::SportsLeagues);

        let leagues = router.dispatch(&ctx, &leagues_route).await.unwrap();
        assert_eq!(leagues.items[0].label, "SHL");
        assert_eq!(
            leagues.items[0].target,
            Target::Route(Route::LeagueBroadcasts { id: "3".into() })
        );
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let router = Router::new();
        let ctx = Context::builder(Arc::new(Canned)).build();
        assert!(matches!(
            router.browse(&ctx, "/podcasts/").await,
            Err(Error::UnknownRoute(_))
        ));
    }
}
