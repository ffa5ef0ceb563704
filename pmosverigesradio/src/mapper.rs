//! Mapping of API records to menu items
//!
//! One function per record kind. Navigational records (channel, program,
//! category, league, team) become folders whose route carries the record id;
//! live channels, sports broadcasts and episode files become playable items.
//!
//! Records are not validated beyond their serde shape: a record missing a
//! field fails the whole listing with [`Error::Mapping`].

use crate::assets::{select_assets, AssetLabels};
use crate::date;
use crate::error::{Error, Result};
use crate::menu::{ItemInfo, MenuItem};
use crate::models::{
    Channel, Episode, League, LiveChannel, Program, ProgramCategory, ProgramInfo,
    SportBroadcast, Team,
};
use crate::route::Route;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Decode the array stored under `key` of a listing response
///
/// A response without that array is a parse failure; a record that does
/// not match `T` is a mapping failure.
pub fn records<T: DeserializeOwned>(response: &Value, key: &'static str) -> Result<Vec<T>> {
    let array = response
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::parse(format!("{} listing", key), "missing array"))?;

    array
        .iter()
        .enumerate()
        .map(|(index, record)| {
            T::deserialize(record).map_err(|source| Error::Mapping {
                kind: key,
                index,
                source,
            })
        })
        .collect()
}

/// Name of the program described by a `programs/<id>` response
pub fn program_name(response: &Value) -> Result<String> {
    ProgramInfo::deserialize(response)
        .map(|info| info.program.name)
        .map_err(|e| Error::parse("program details", e))
}

pub fn live_channel(channel: &LiveChannel) -> MenuItem {
    MenuItem::stream(&channel.name, &channel.liveaudio.url).with_icon(&channel.image)
}

pub fn channel(channel: &Channel) -> MenuItem {
    MenuItem::folder(
        &channel.name,
        Route::ChannelPrograms {
            id: channel.id.clone(),
        },
    )
    .with_icon(&channel.image)
}

pub fn program(program: &Program) -> MenuItem {
    MenuItem::folder(
        &program.name,
        Route::Program {
            id: program.id.clone(),
        },
    )
    .with_icon(&program.programimage)
}

pub fn category(category: &ProgramCategory) -> MenuItem {
    MenuItem::folder(
        &category.name,
        Route::Category {
            id: category.id.clone(),
        },
    )
}

pub fn league(league: &League) -> MenuItem {
    MenuItem::folder(
        &league.name,
        Route::LeagueBroadcasts {
            id: league.id.clone(),
        },
    )
}

pub fn team(team: &Team) -> MenuItem {
    MenuItem::folder(
        format!("{} - {}", team.name, team.league.name),
        Route::TeamBroadcasts {
            id: team.id.clone(),
        },
    )
}

/// Sports broadcast labelled with its local start time
pub fn sports_broadcast(broadcast: &SportBroadcast, artist: &str) -> Result<MenuItem> {
    let start = date::decode(&broadcast.localstarttime)?;
    let label = format!("{} - {}", broadcast.name, date::format_full(&start));

    let info = ItemInfo {
        title: label.clone(),
        artist: artist.to_string(),
        date: Some(date::format_date(&start)),
        ..ItemInfo::default()
    };

    Ok(MenuItem::stream(label, &broadcast.liveaudio.url).with_info(info))
}

/// Playable items of an episode, one per selected audio file
pub fn episode(
    episode: &Episode,
    labels: &AssetLabels<'_>,
    prefer_broadcast: bool,
) -> Result<Vec<MenuItem>> {
    Ok(select_assets(episode, labels, prefer_broadcast)?
        .into_iter()
        .map(MenuItem::from)
        .collect())
}
