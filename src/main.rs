use anyhow::{Context, Result};
use sentiment_board::console::app::App;
use sentiment_board::core::config::Config;
use sentiment_board::core::state::AppState;
use sentiment_board::core::tracing_init::init_tracing;
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    let config_path = env::args().nth(1).map(PathBuf::from);

    // Load and validate configuration
    let config = Config::load(config_path.as_deref()).context(
        "Failed to load configuration. \
        Copy config.example.toml to config.toml and adjust the values, or run without a config file to use defaults.",
    )?;

    init_tracing(&config.logging);

    info!(
        max_records = config.store.max_records,
        strict_category_on_edit = config.validation.strict_category_on_edit,
        unique_username_on_edit = config.validation.unique_username_on_edit,
        "Sentiment board starting"
    );

    let state = AppState::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(state, stdin.lock(), stdout.lock());

    app.run().context("Console session failed")?;

    info!(
        users = app.state().users.len(),
        comments = app.state().comments.len(),
        "Sentiment board stopped"
    );

    Ok(())
}
