//! Choice of the audio files exposed for an episode

use crate::date;
use crate::error::Result;
use crate::menu::{ItemInfo, MenuItem};
use crate::models::{Broadcast, Episode, PodFile};
use chrono::NaiveDate;

/// A playable audio file with its display metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioAsset {
    pub title: String,
    pub stream_url: String,
    pub icon_url: String,
    pub duration_secs: Option<u64>,
    pub file_size_bytes: Option<u64>,
    pub publish_date: Option<NaiveDate>,
    pub album: Option<String>,
    pub artist: String,
}

impl From<AudioAsset> for MenuItem {
    fn from(asset: AudioAsset) -> Self {
        let info = ItemInfo {
            title: asset.title.clone(),
            artist: asset.artist,
            album: asset.album,
            date: asset.publish_date.as_ref().map(date::format_day),
            duration_secs: asset.duration_secs,
            size_bytes: asset.file_size_bytes,
        };

        MenuItem::stream(asset.title, asset.stream_url)
            .with_icon(asset.icon_url)
            .with_info(info)
    }
}

/// Labels an episode does not carry itself
#[derive(Debug, Clone, Copy)]
pub struct AssetLabels<'a> {
    /// Name of the enclosing program
    pub album: &'a str,
    pub artist: &'a str,
}

/// Pick the audio files to expose for an episode
///
/// Exactly one source kind is used, the first that applies:
///
/// 1. the broadcast recording, when preferred and present (one asset per file)
/// 2. the listen pod file
/// 3. the download pod file
/// 4. the broadcast recording, when not preferred but present
///
/// An episode with none of them yields no asset. Assets keep source order.
pub fn select_assets(
    episode: &Episode,
    labels: &AssetLabels<'_>,
    prefer_broadcast: bool,
) -> Result<Vec<AudioAsset>> {
    let title = episode.display_title();

    if prefer_broadcast {
        if let Some(broadcast) = &episode.broadcast {
            return Ok(broadcast_assets(broadcast, episode, &title, labels));
        }
    }

    if let Some(pod) = &episode.listenpodfile {
        return Ok(vec![pod_asset(pod, episode, &title, labels)?]);
    }

    if let Some(pod) = &episode.downloadpodfile {
        return Ok(vec![pod_asset(pod, episode, &title, labels)?]);
    }

    // Same expansion as the first branch, reached only when no pod file exists
    if !prefer_broadcast {
        if let Some(broadcast) = &episode.broadcast {
            return Ok(broadcast_assets(broadcast, episode, &title, labels));
        }
    }

    Ok(Vec::new())
}

fn pod_asset(
    pod: &PodFile,
    episode: &Episode,
    title: &str,
    labels: &AssetLabels<'_>,
) -> Result<AudioAsset> {
    Ok(AudioAsset {
        title: title.to_string(),
        stream_url: pod.url.clone(),
        icon_url: episode.imageurl.clone(),
        duration_secs: Some(pod.duration),
        file_size_bytes: Some(pod.filesizeinbytes),
        publish_date: Some(date::decode_publish_date(&pod.publishdateutc)?),
        album: Some(labels.album.to_string()),
        artist: labels.artist.to_string(),
    })
}

// Broadcast files carry no structured publish date or size
fn broadcast_assets(
    broadcast: &Broadcast,
    episode: &Episode,
    title: &str,
    labels: &AssetLabels<'_>,
) -> Vec<AudioAsset> {
    broadcast
        .broadcastfiles
        .iter()
        .map(|file| AudioAsset {
            title: title.to_string(),
            stream_url: file.url.clone(),
            icon_url: episode.imageurl.clone(),
            duration_secs: Some(file.duration),
            file_size_bytes: None,
            publish_date: None,
            album: Some(labels.album.to_string()),
            artist: labels.artist.to_string(),
        })
        .collect()
}
