use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use dshub::{
    App, FileStore, HubState, Storage,
    config::{Args, Settings},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load()
        .context("loading settings")?
        .merge_args(&args);

    // the terminal belongs to the UI, so logs go to a file
    let log_file = settings.resolve_log_file()?;
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let writer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("opening log file {}", log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(settings.log_filter()))
        .with_ansi(false)
        .with_writer(Mutex::new(writer))
        .init();

    debug!("dshub v{} starting...", env!("CARGO_PKG_VERSION"));

    let data_dir = settings.resolve_data_dir()?;
    debug!(data_dir = %data_dir.display(), "using data directory");
    let storage = Storage::new(FileStore::new(data_dir));

    let (state, problems) = if args.reset {
        (HubState::fresh(storage), Vec::new())
    } else {
        HubState::open(storage)
    };
    let notice = (!problems.is_empty()).then(|| problems.join("\n"));

    let mut app = App::new(state, settings.narrow_width).with_notice(notice);
    app.run()
}
