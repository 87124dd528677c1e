use anyhow::Context;
use dotenvy::dotenv;
use std::time::Duration;

mod clock;
mod config;
mod engine;
mod feedback;
mod model;
mod policy;
mod reader;
mod resolver;
mod store;
mod terminal;

use clock::SystemClock;
use config::Config;
use feedback::{Buzzer, GpioBuzzer, SilentBuzzer};
use policy::AttendancePolicy;
use reader::HidReader;
use store::HttpStore;
use terminal::Terminal;
use tracing::info;
use tracing_appender::rolling;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!("Attendance terminal starting...");

    let store = HttpStore::new(&config).context("failed to build record store client")?;

    // No reader, no terminal: this is the only fatal hardware path.
    let reader = HidReader::open(&config.reader_device)
        .await
        .with_context(|| format!("failed to open badge reader {}", config.reader_device))?;

    let buzzer: Box<dyn Buzzer> = match config.buzzer_gpio {
        Some(gpio) => Box::new(GpioBuzzer::new(gpio)),
        None => Box::new(SilentBuzzer),
    };

    let clock = SystemClock::new(config.utc_offset_secs);
    let policy = AttendancePolicy::new(config.arrival_cutoff, config.departure_open);
    let debounce = Duration::from_secs(config.debounce_secs);

    let mut terminal = Terminal::new(store, reader, clock, buzzer, policy, debounce);
    terminal.run().await;

    Ok(())
}
