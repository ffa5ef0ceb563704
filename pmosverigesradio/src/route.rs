//! Menu routes
//!
//! Every navigable menu is addressed by a path. The tree is fixed:
//!
//! ```text
//! /                       index
//! ├── /live/              live channels (playable)
//! ├── /channels/          channels → /channel/<id> → programs → /program/<id>
//! ├── /categories/        categories → /category/<id> → programs → /program/<id>
//! ├── /sports/            /sports/broadcasts/, /sports/leagues/, /sports/teams/
//! │                        └── /sports/league/<id>, /sports/team/<id>
//! └── /allprograms/       programs → /program/<id> → episodes (playable)
//! ```

use crate::error::{Error, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

/// Prefix of every navigation URL handed to the host
pub const PLUGIN_BASE: &str = "plugin://plugin.audio.sverigesradio";

/// Characters escaped in an identifier segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

fn encode(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

fn decode(segment: &str, path: &str) -> Result<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|id| id.into_owned())
        .map_err(|_| Error::UnknownRoute(path.to_string()))
}

/// A resolved menu route with its parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Index,
    Live,
    Channels,
    Categories,
    Sports,
    AllPrograms,
    ChannelPrograms { id: String },
    Category { id: String },
    Program { id: String },
    SportsBroadcasts,
    SportsLeagues,
    SportsTeams,
    LeagueBroadcasts { id: String },
    TeamBroadcasts { id: String },
}

/// Route identifier, the key of the handler table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Index,
    Live,
    Channels,
    Categories,
    Sports,
    AllPrograms,
    ChannelPrograms,
    Category,
    Program,
    SportsBroadcasts,
    SportsLeagues,
    SportsTeams,
    LeagueBroadcasts,
    TeamBroadcasts,
}

impl RouteId {
    pub const ALL: [RouteId; 14] = [
        RouteId::Index,
        RouteId::Live,
        RouteId::Channels,
        RouteId::Categories,
        RouteId::Sports,
        RouteId::AllPrograms,
        RouteId::ChannelPrograms,
        RouteId::Category,
        RouteId::Program,
        RouteId::SportsBroadcasts,
        RouteId::SportsLeagues,
        RouteId::SportsTeams,
        RouteId::LeagueBroadcasts,
        RouteId::TeamBroadcasts,
    ];
}

impl Route {
    pub fn route_id(&self) -> RouteId {
        match self {
            Route::Index => RouteId::Index,
            Route::Live => RouteId::Live,
            Route::Channels => RouteId::Channels,
            Route::Categories => RouteId::Categories,
            Route::Sports => RouteId::Sports,
            Route::AllPrograms => RouteId::AllPrograms,
            Route::ChannelPrograms { .. } => RouteId::ChannelPrograms,
            Route::Category { .. } => RouteId::Category,
            Route::Program { .. } => RouteId::Program,
            Route::SportsBroadcasts => RouteId::SportsBroadcasts,
            Route::SportsLeagues => RouteId::SportsLeagues,
            Route::SportsTeams => RouteId::SportsTeams,
            Route::LeagueBroadcasts { .. } => RouteId::LeagueBroadcasts,
            Route::TeamBroadcasts { .. } => RouteId::TeamBroadcasts,
        }
    }

    /// Identifier carried by the route, if any
    pub fn id(&self) -> Option<&str> {
        match self {
            Route::ChannelPrograms { id }
            | Route::Category { id }
            | Route::Program { id }
            | Route::LeagueBroadcasts { id }
            | Route::TeamBroadcasts { id } => Some(id),
            _ => None,
        }
    }

    /// Identifier of a parameterized route
    pub(crate) fn require_id(&self) -> Result<&str> {
        self.id()
            .ok_or_else(|| Error::UnknownRoute(format!("{} takes no identifier", self.path())))
    }

    /// Path of the route, e.g. `/channel/132`
    ///
    /// Identifiers are percent-encoded so that any string parses back.
    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Live => "/live/".to_string(),
            Route::Channels => "/channels/".to_string(),
            Route::Categories => "/categories/".to_string(),
            Route::Sports => "/sports/".to_string(),
            Route::AllPrograms => "/allprograms/".to_string(),
            Route::ChannelPrograms { id } => format!("/channel/{}", encode(id)),
            Route::Category { id } => format!("/category/{}", encode(id)),
            Route::Program { id } => format!("/program/{}", encode(id)),
            Route::SportsBroadcasts => "/sports/broadcasts/".to_string(),
            Route::SportsLeagues => "/sports/leagues/".to_string(),
            Route::SportsTeams => "/sports/teams/".to_string(),
            Route::LeagueBroadcasts { id } => format!("/sports/league/{}", encode(id)),
            Route::TeamBroadcasts { id } => format!("/sports/team/{}", encode(id)),
        }
    }

    /// Full navigation URL, e.g. `plugin://plugin.audio.sverigesradio/channel/132`
    pub fn url(&self) -> String {
        format!("{}{}", PLUGIN_BASE, self.path())
    }

    /// Parse a path or a full navigation URL
    ///
    /// Trailing slashes are optional.
    pub fn parse(path: &str) -> Result<Route> {
        let trimmed = path.strip_prefix(PLUGIN_BASE).unwrap_or(path);
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Index,
            ["live"] => Route::Live,
            ["channels"] => Route::Channels,
            ["categories"] => Route::Categories,
            ["sports"] => Route::Sports,
            ["allprograms"] => Route::AllPrograms,
            ["channel", id] => Route::ChannelPrograms { id: decode(id, path)? },
            ["category", id] => Route::Category { id: decode(id, path)? },
            ["program", id] => Route::Program { id: decode(id, path)? },
            ["sports", "broadcasts"] => Route::SportsBroadcasts,
            ["sports", "leagues"] => Route::SportsLeagues,
            ["sports", "teams"] => Route::SportsTeams,
            ["sports", "league", id] => Route::LeagueBroadcasts { id: decode(id, path)? },
            ["sports", "team", id] => Route::TeamBroadcasts { id: decode(id, path)? },
            _ => return Err(Error::UnknownRoute(path.to_string())),
        };

        Ok(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl serde::Serialize for Route {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url())
    }
}

impl std::str::FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Route::parse(s)
    }
}
