use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, ValueHint};
use pmoconfig::Config;
use pmosverigesradio::{
    AudioQuality, Context, ContextBuilder, Listing, Notifier, SverigesRadioConfigExt,
    SverigesRadioSource,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Browse the Sveriges Radio menus from the command line
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Menu path or navigation URL, e.g. `/sports/leagues/`
    #[arg(default_value = "/")]
    route: String,

    /// Configuration directory
    ///
    /// [default: $PMOSR_CONFIG, ./.pmosr or ~/.pmosr]
    #[arg(short, long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    config_dir: Option<String>,

    /// Streaming quality for this run (lo, normal or hi)
    #[arg(short, long)]
    quality: Option<AudioQuality>,

    /// Prefer broadcast recordings over pod files for this run
    #[arg(long, value_name = "BOOL")]
    prefer_broadcasts: Option<bool>,

    /// Print the listing as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable verbose logging
    ///
    /// Specify twice for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Shows notices on stderr
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, heading: &str, message: &str) {
        eprintln!("[{}] {}", heading, message);
    }
}

/// Initializes the tracing subscriber.
///
/// The level is taken, from highest to lowest precedence, from `-v`, the
/// `RUST_LOG` environment variable and `host.logger.min_level`. Nothing is
/// installed when console logging is disabled.
fn init_logging(args: &Args, config: &Config) {
    if !config.get_log_enable_console().unwrap_or(true) {
        return;
    }

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = config
                .get_log_min_level()
                .unwrap_or_else(|_| "info".to_string());
            EnvFilter::new(level.to_lowercase())
        }),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn print_listing(listing: &Listing) {
    for item in &listing.items {
        let marker = if item.playable { '♪' } else { '>' };
        println!("{} {}\t{}", marker, item.label, item.target.url());
    }

    if !listing.sort_methods.is_empty() {
        let names: Vec<String> = listing
            .sort_methods
            .iter()
            .filter_map(|m| serde_json::to_value(m).ok())
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        println!("sort: {}", names.join(", "));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load_config(args.config_dir.as_deref().unwrap_or(""))
        .context("loading configuration")?;
    init_logging(&args, &config);
    info!(config_file = %config.file_path().display(), "Configuration loaded");

    let mut settings = config.get_sverigesradio_settings()?;
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    if let Some(prefer) = args.prefer_broadcasts {
        settings.prefer_broadcasts = prefer;
    }
    debug!(?settings, "Effective settings");

    let context: Context = ContextBuilder::from_config(&config)
        .await?
        .settings(settings)
        .notifier(Arc::new(ConsoleNotifier))
        .build();
    let source = SverigesRadioSource::new(context);

    let listing = source
        .browse(&args.route)
        .await
        .with_context(|| format!("browsing {}", args.route))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print_listing(&listing);
    }

    Ok(())
}
