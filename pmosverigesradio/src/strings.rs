//! Localized strings
//!
//! Each string keeps the numeric id used by translation catalogues. The
//! built-in texts are English; any id can be overridden, typically from the
//! `sources.sverigesradio.strings` configuration mapping.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringId {
    SverigesRadio,
    UnableToCommunicate,
    UnableToParse,
    Live,
    Channels,
    Categories,
    AllPrograms,
    Sports,
    AllBroadcasts,
    Leagues,
    Teams,
}

impl StringId {
    pub const ALL: [StringId; 11] = [
        StringId::SverigesRadio,
        StringId::UnableToCommunicate,
        StringId::UnableToParse,
        StringId::Live,
        StringId::Channels,
        StringId::Categories,
        StringId::AllPrograms,
        StringId::Sports,
        StringId::AllBroadcasts,
        StringId::Leagues,
        StringId::Teams,
    ];

    /// Catalogue id
    pub fn code(self) -> u32 {
        match self {
            StringId::SverigesRadio => 30000,
            StringId::UnableToCommunicate => 30010,
            StringId::UnableToParse => 30011,
            StringId::Live => 30013,
            StringId::Channels => 30014,
            StringId::Categories => 30015,
            StringId::AllPrograms => 30016,
            StringId::Sports => 30017,
            StringId::AllBroadcasts => 30018,
            StringId::Leagues => 30019,
            StringId::Teams => 30020,
        }
    }

    pub fn from_code(code: u32) -> Option<StringId> {
        Self::ALL.into_iter().find(|id| id.code() == code)
    }

    fn default_text(self) -> &'static str {
        match self {
            StringId::SverigesRadio => "Sveriges Radio",
            StringId::UnableToCommunicate => "Unable to communicate with Sveriges Radio",
            StringId::UnableToParse => "Unable to parse the response from Sveriges Radio",
            StringId::Live => "Live",
            StringId::Channels => "Channels",
            StringId::Categories => "Categories",
            StringId::AllPrograms => "All programs",
            StringId::Sports => "Sports",
            StringId::AllBroadcasts => "All broadcasts",
            StringId::Leagues => "Leagues",
            StringId::Teams => "Teams",
        }
    }
}

/// String table
#[derive(Debug, Clone, Default)]
pub struct Strings {
    overrides: HashMap<StringId, String>,
}

impl Strings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, id: StringId, text: impl Into<String>) -> Self {
        self.overrides.insert(id, text.into());
        self
    }

    pub fn get(&self, id: StringId) -> &str {
        self.overrides
            .get(&id)
            .map(String::as_str)
            .unwrap_or_else(|| id.default_text())
    }
}
