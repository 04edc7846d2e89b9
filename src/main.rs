use anyhow::{Context, Result};
use clap::Parser;
use lazystream::{
    BrowserConfig, CancellationToken, StreamBrowser,
    broker::{self, seed},
    logging::{self, LogFormat},
    tui::application::relay::RelayConfig,
    tui::constants::{
        DEFAULT_EXPORT_TIMEOUT_SECS, DEFAULT_MAX_BATCH, DEFAULT_MAX_WAIT_MS, DEFAULT_PAGE_SIZE,
        DEFAULT_QUEUE_CAPACITY, DEFAULT_VALUE_PREVIEW_CHARS,
    },
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "lazystream",
    version,
    about = "Terminal browser for live record streams",
    long_about = None
)]
struct Cli {
    /// Address of the stream cluster (e.g. memory://local)
    #[arg(env = "LAZYSTREAM_BOOTSTRAP")]
    bootstrap: String,

    /// Records per page (0 shows everything on one page)
    #[arg(long, env = "LAZYSTREAM_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Largest batch handed to the UI at once
    #[arg(long, env = "LAZYSTREAM_MAX_BATCH", default_value_t = DEFAULT_MAX_BATCH)]
    max_batch: usize,

    /// Longest a partial batch waits before it is flushed, in milliseconds
    #[arg(long, env = "LAZYSTREAM_MAX_WAIT_MS", default_value_t = DEFAULT_MAX_WAIT_MS)]
    max_wait_ms: u64,

    /// Capacity of each stream's ingestion queue
    #[arg(long, env = "LAZYSTREAM_QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// Time budget for a topic download, in seconds
    #[arg(long, env = "LAZYSTREAM_EXPORT_TIMEOUT_SECS", default_value_t = DEFAULT_EXPORT_TIMEOUT_SECS)]
    export_timeout_secs: u64,

    /// Characters of a value shown on a message card
    #[arg(long, env = "LAZYSTREAM_VALUE_PREVIEW_CHARS", default_value_t = DEFAULT_VALUE_PREVIEW_CHARS)]
    value_preview_chars: usize,

    /// Log file (default: <cache dir>/lazystream/lazystream.log)
    #[arg(long, env = "LAZYSTREAM_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log line format
    #[arg(long, value_enum, env = "LAZYSTREAM_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Create this stream and fill it with demo messages
    #[arg(long)]
    seed_stream: Option<String>,

    /// Demo messages published up front
    #[arg(long, default_value_t = 1000)]
    seed_count: u64,

    /// Partitions of streams created on the in-memory cluster
    #[arg(long, default_value_t = 3)]
    seed_partitions: i32,

    /// Keep publishing this many demo messages per second
    #[arg(long)]
    seed_rate: Option<u64>,
}

impl Cli {
    fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            page_size: self.page_size,
            relay: RelayConfig {
                max_batch: self.max_batch.max(1),
                max_wait: Duration::from_millis(self.max_wait_ms),
                queue_capacity: self.queue_capacity.max(1),
            },
            export_timeout: Duration::from_secs(self.export_timeout_secs),
            value_preview_chars: self.value_preview_chars,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init_tracing(&log_file, cli.log_format)?;

    // Both checks run before the terminal is touched so failures print normally.
    let connection = broker::connect(&cli.bootstrap, cli.seed_partitions)
        .with_context(|| format!("Failed to connect to {}", cli.bootstrap))?;
    let streams = connection
        .admin
        .list_streams()
        .with_context(|| format!("Failed to list streams on {}", cli.bootstrap))?;
    tracing::info!(bootstrap = %connection.bootstrap, streams = streams.len(), "connected");

    let seeder_cancel = CancellationToken::new();
    let seeder = cli.seed_stream.clone().map(|stream| {
        let plan = seed::SeedPlan {
            stream,
            count: cli.seed_count,
            rate_per_sec: cli.seed_rate,
        };
        seed::spawn_seeder(
            connection.admin.clone(),
            connection.clients.clone(),
            plan,
            seeder_cancel.clone(),
        )
    });

    let mut browser = StreamBrowser::new(&connection, cli.browser_config());
    let result = browser.run();

    seeder_cancel.cancel();
    if let Some(seeder) = seeder {
        if seeder.join().is_err() {
            tracing::error!("seeder thread panicked");
        }
    }
    result
}
