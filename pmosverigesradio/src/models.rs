//! Data models for Sveriges Radio API responses
//!
//! Every listing endpoint answers with a JSON object holding one array
//! (`channels`, `programs`, `episodes`, ...). The structures below describe
//! a single record of those arrays, with only the fields the menus use.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifiers come back as numbers on some endpoints and as strings on others
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

// ============================================================================
// Channels
// ============================================================================

/// A channel shown in the channel directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    /// Channel logo URL
    pub image: String,
}

/// A channel played live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LiveChannel {
    pub name: String,
    pub image: String,
    pub liveaudio: LiveAudio,
}

/// Live stream reference of a channel or sports broadcast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LiveAudio {
    pub url: String,
}

// ============================================================================
// Programs
// ============================================================================

/// A program with on-demand content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Program {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub programimage: String,
}

/// A program category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramCategory {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// Response of `programs/<id>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramInfo {
    pub program: ProgramSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramSummary {
    pub name: String,
}

// ============================================================================
// Episodes
// ============================================================================

/// An episode of a program
///
/// An episode may expose up to three alternative audio sources; see
/// [`crate::assets::select_assets`] for the choice between them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    pub description: String,
    pub imageurl: String,
    /// Recording of the scheduled broadcast, possibly split over several files
    #[serde(default)]
    pub broadcast: Option<Broadcast>,
    /// On-demand file meant for streaming
    #[serde(default)]
    pub listenpodfile: Option<PodFile>,
    /// On-demand file meant for download
    #[serde(default)]
    pub downloadpodfile: Option<PodFile>,
}

impl Episode {
    /// `"<title> - <description>"`, used for every asset of the episode
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Broadcast {
    pub broadcastfiles: Vec<BroadcastFile>,
}

/// One recorded segment of a broadcast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BroadcastFile {
    pub url: String,
    /// Seconds
    pub duration: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PodFile {
    pub url: String,
    pub publishdateutc: String,
    /// Seconds
    pub duration: u64,
    pub filesizeinbytes: u64,
}

// ============================================================================
// Sports
// ============================================================================

/// A sports broadcast, scheduled or on air
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SportBroadcast {
    pub name: String,
    /// `/Date(...)/` value
    pub localstarttime: String,
    pub liveaudio: LiveAudio,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct League {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub league: LeagueName,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueName {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_textual_ids() {
        let numeric: Program = serde_json::from_value(json!({
            "id": 4540,
            "name": "Ekot",
            "programimage": "http://x/ekot.png"
        }))
        .unwrap();
        assert_eq!(numeric.id, "4540");

        let textual: Channel = serde_json::from_value(json!({
            "id": "P1",
            "name": "P1",
            "image": "http://x/i.png"
        }))
        .unwrap();
        assert_eq!(textual.id, "P1");
    }

    #[test]
    fn test_episode_sources_are_optional() {
        let episode: Episode = serde_json::from_value(json!({
            "title": "Morgon",
            "description": "Nyheter",
            "imageurl": "http://x/e.png",
            "broadcast": null
        }))
        .unwrap();

        assert!(episode.broadcast.is_none());
        assert!(episode.listenpodfile.is_none());
        assert!(episode.downloadpodfile.is_none());
        assert_eq!(episode.display_title(), "Morgon - Nyheter");
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result = serde_json::from_value::<Team>(json!({
            "id": 1,
            "name": "AIK"
        }));
        assert!(result.is_err());
    }
}
