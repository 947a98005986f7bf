mod app;
mod args;
mod charts;
mod config;
mod engine;
mod entry;
mod error;
mod export;
mod logger;
mod samples;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
