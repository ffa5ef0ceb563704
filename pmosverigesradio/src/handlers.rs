//! One handler per menu route
//!
//! A handler issues its request(s), maps the records and returns the
//! listing with the sort methods the host may offer. Transport and parse
//! failures are reported through the context and give an empty listing;
//! mapping and date failures propagate to the caller.

use crate::api::{ProgramFilter, SportsFilter};
use crate::assets::AssetLabels;
use crate::context::Context;
use crate::error::Result;
use crate::mapper;
use crate::menu::{Listing, MenuItem, SortMethod};
use crate::models::{
    Channel, Episode, League, LiveChannel, Program, ProgramCategory, SportBroadcast, Team,
};
use crate::route::Route;
use crate::strings::StringId;
use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde_json::Value;

const BROWSE: &[SortMethod] = &[SortMethod::PlaylistOrder, SortMethod::Label];
const BY_LABEL: &[SortMethod] = &[SortMethod::Label];
const DATED: &[SortMethod] = &[SortMethod::PlaylistOrder, SortMethod::Label, SortMethod::Date];

/// Signature shared by every handler
pub type Handler = for<'a> fn(&'a Context, &'a Route) -> BoxFuture<'a, Result<Listing>>;

/// Map the `key` array of a response, one item per record
fn listing<T, F>(
    ctx: &Context,
    response: Result<Value>,
    key: &'static str,
    sort_methods: &[SortMethod],
    map: F,
) -> Result<Listing>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Result<MenuItem>,
{
    let Some(response) = ctx.report(response)? else {
        return Ok(Listing::empty());
    };
    let Some(records) = ctx.report(mapper::records::<T>(&response, key))? else {
        return Ok(Listing::empty());
    };

    let items = records.iter().map(map).collect::<Result<Vec<_>>>()?;
    Ok(Listing::new(items, sort_methods))
}

fn menu(ctx: &Context, entries: &[(StringId, Route)]) -> Listing {
    let items = entries
        .iter()
        .map(|(label, route)| MenuItem::folder(ctx.text(*label), route.clone()))
        .collect();
    Listing::new(items, &[])
}

pub fn index<'a>(ctx: &'a Context, _route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        Ok(menu(
            ctx,
            &[
                (StringId::Live, Route::Live),
                (StringId::Channels, Route::Channels),
                (StringId::Categories, Route::Categories),
                (StringId::Sports, Route::Sports),
                (StringId::AllPrograms, Route::AllPrograms),
            ],
        ))
    }
    .boxed()
}

pub fn sports<'a>(ctx: &'a Context, _route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        Ok(menu(
            ctx,
            &[
                (StringId::AllBroadcasts, Route::SportsBroadcasts),
                (StringId::Leagues, Route::SportsLeagues),
                (StringId::Teams, Route::SportsTeams),
            ],
        ))
    }
    .boxed()
}

pub fn live<'a>(ctx: &'a Context, _route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let response = ctx.api().channels(ctx.settings().quality).await;
        listing(ctx, response, "channels", BROWSE, |c: &LiveChannel| {
            Ok(mapper::live_channel(c))
        })
    }
    .boxed()
}

pub fn channels<'a>(ctx: &'a Context, _route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let response = ctx.api().channels(ctx.settings().quality).await;
        listing(ctx, response, "channels", BROWSE, |c: &Channel| {
            Ok(mapper::channel(c))
        })
    }
    .boxed()
}

pub fn categories<'a>(ctx: &'a Context, _route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let response = ctx.api().categories().await;
        listing(ctx, response, "programcategories", BROWSE, |c: &ProgramCategory| {
            Ok(mapper::category(c))
        })
    }
    .boxed()
}

async fn programs(
    ctx: &Context,
    filter: ProgramFilter,
    sort_methods: &[SortMethod],
) -> Result<Listing> {
    let response = ctx.api().programs(&filter).await;
    listing(ctx, response, "programs", sort_methods, |p: &Program| {
        Ok(mapper::program(p))
    })
}

pub fn all_programs<'a>(ctx: &'a Context, _route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move { programs(ctx, ProgramFilter::All, BY_LABEL).await }.boxed()
}

pub fn channel_programs<'a>(ctx: &'a Context, route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let id = route.require_id()?;
        programs(ctx, ProgramFilter::Channel(id.to_string()), BROWSE).await
    }
    .boxed()
}

pub fn category<'a>(ctx: &'a Context, route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let id = route.require_id()?;
        programs(ctx, ProgramFilter::Category(id.to_string()), BROWSE).await
    }
    .boxed()
}

/// Episodes of a program, labelled with the program name
///
/// The episodes request comes first; when it fails the program details are
/// not requested.
pub fn program<'a>(ctx: &'a Context, route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let id = route.require_id()?;
        let settings = ctx.settings();

        let Some(episodes) = ctx.report(ctx.api().program_episodes(id, settings.quality).await)?
        else {
            return Ok(Listing::empty());
        };
        let Some(info) = ctx.report(ctx.api().program_info(id).await)? else {
            return Ok(Listing::empty());
        };
        let Some(name) = ctx.report(mapper::program_name(&info))? else {
            return Ok(Listing::empty());
        };
        let Some(records) = ctx.report(mapper::records::<Episode>(&episodes, "episodes"))? else {
            return Ok(Listing::empty());
        };

        let labels = AssetLabels {
            album: &name,
            artist: ctx.text(StringId::SverigesRadio),
        };

        let mut items = Vec::new();
        for episode in &records {
            items.extend(mapper::episode(episode, &labels, settings.prefer_broadcasts)?);
        }

        tracing::debug!("Program {} ({}): {} items", id, name, items.len());
        Ok(Listing::new(items, DATED))
    }
    .boxed()
}

async fn sports_broadcasts(ctx: &Context, filter: SportsFilter) -> Result<Listing> {
    let response = ctx
        .api()
        .sports_broadcasts(ctx.settings().quality, &filter)
        .await;
    let artist = ctx.text(StringId::SverigesRadio);
    listing(ctx, response, "broadcasts", DATED, |b: &SportBroadcast| {
        mapper::sports_broadcast(b, artist)
    })
}

pub fn all_sports_broadcasts<'a>(
    ctx: &'a Context,
    _route: &'a Route,
) -> BoxFuture<'a, Result<Listing>> {
    async move { sports_broadcasts(ctx, SportsFilter::All).await }.boxed()
}

pub fn league_broadcasts<'a>(ctx: &'a Context, route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let id = route.require_id()?;
        sports_broadcasts(ctx, SportsFilter::League(id.to_string())).await
    }
    .boxed()
}

pub fn team_broadcasts<'a>(ctx: &'a Context, route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let id = route.require_id()?;
        sports_broadcasts(ctx, SportsFilter::Team(id.to_string())).await
    }
    .boxed()
}

pub fn leagues<'a>(ctx: &'a Context, _route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let response = ctx.api().sports_leagues().await;
        listing(ctx, response, "leagues", BROWSE, |l: &League| {
            Ok(mapper::league(l))
        })
    }
    .boxed()
}

pub fn teams<'a>(ctx: &'a Context, _route: &'a Route) -> BoxFuture<'a, Result<Listing>> {
    async move {
        let response = ctx.api().sports_teams().await;
        listing(ctx, response, "teams", BROWSE, |t: &Team| Ok(mapper::team(t)))
    }
    .boxed()
}
