//! Sveriges Radio client library for PMOSR
//!
//! This crate browses the Sveriges Radio open API (`api.sr.se/api/v2`) and
//! turns its JSON responses into menus of playable audio streams.
//!
//! # Features
//!
//! - **Live**: every channel's live stream
//! - **On demand**: programs by channel, by category or all of them, and
//!   their episodes (pod files or broadcast recordings)
//! - **Sports**: live sports broadcasts, filtered by league or team
//! - **Response cache**: program, episode and category responses are kept
//!   for a configurable time
//! - **Configuration Extension**: quality, broadcast preference and string
//!   overrides stored in `pmoconfig`
//!
//! # Example
//!
//! ```no_run
//! use pmoconfig::Config;
//! use pmosverigesradio::{LogNotifier, SverigesRadioSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_config("")?;
//!     let source = SverigesRadioSource::from_config(&config, Arc::new(LogNotifier)).await?;
//!
//!     let index = source.browse("/").await?;
//!     for item in &index.items {
//!         println!("{} -> {}", item.label, item.target.url());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Failures
//!
//! When a request fails or its body cannot be read, the user gets a single
//! notice through the [`Notifier`] and the listing comes back empty. A
//! record with an unexpected shape or an undecodable date is returned as an
//! error instead.

pub mod api;
pub mod assets;
pub mod cache;
pub mod client;
pub mod config_ext;
pub mod context;
pub mod date;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod menu;
pub mod models;
pub mod notify;
pub mod route;
pub mod router;
pub mod settings;
pub mod source;
pub mod strings;

pub use api::{ProgramFilter, SportsFilter, SverigesRadioApi};
pub use assets::{select_assets, AssetLabels, AudioAsset};
pub use cache::{MemoryCache, NoCache, ResponseCache};
pub use client::{ClientBuilder, Gateway, SverigesRadioClient};
pub use config_ext::SverigesRadioConfigExt;
pub use context::{Context, ContextBuilder};
pub use error::{Error, Result};
pub use menu::{ItemInfo, Listing, MenuItem, SortMethod, Target};
pub use notify::{LogNotifier, Notice, Notifier, RecordingNotifier};
pub use route::{Route, RouteId, PLUGIN_BASE};
pub use router::Router;
pub use settings::{AudioQuality, Settings};
pub use source::SverigesRadioSource;
pub use strings::{StringId, Strings};
