//! Menu items returned to the host for rendering

use crate::route::Route;
use serde::Serialize;

/// Where selecting a menu item leads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Target {
    /// Another menu
    Route(Route),
    /// An audio stream URL
    Stream(String),
}

impl Target {
    /// URL handed to the host: a navigation URL or the stream URL itself
    pub fn url(&self) -> String {
        match self {
            Target::Route(route) => route.url(),
            Target::Stream(url) => url.clone(),
        }
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            Target::Route(route) => Some(route),
            Target::Stream(_) => None,
        }
    }
}

/// Display metadata of a playable item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemInfo {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// `DD.MM.YYYY`
    pub date: Option<String>,
    pub duration_secs: Option<u64>,
    pub size_bytes: Option<u64>,
}

/// A single navigable or playable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: String,
    pub target: Target,
    pub icon: Option<String>,
    pub playable: bool,
    pub info: Option<ItemInfo>,
}

impl MenuItem {
    /// Navigational entry leading to another menu
    pub fn folder(label: impl Into<String>, route: Route) -> Self {
        Self {
            label: label.into(),
            target: Target::Route(route),
            icon: None,
            playable: false,
            info: None,
        }
    }

    /// Playable entry pointing at a stream
    pub fn stream(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: Target::Stream(url.into()),
            icon: None,
            playable: true,
            info: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_info(mut self, info: ItemInfo) -> Self {
        self.info = Some(info);
        self
    }
}

/// Orderings the host may offer for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    PlaylistOrder,
    Label,
    Date,
}

/// The items of one menu, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub items: Vec<MenuItem>,
    pub sort_methods: Vec<SortMethod>,
}

impl Listing {
    pub fn new(items: Vec<MenuItem>, sort_methods: &[SortMethod]) -> Self {
        Self {
            items,
            sort_methods: sort_methods.to_vec(),
        }
    }

    /// Listing without items, returned after a reported failure
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
