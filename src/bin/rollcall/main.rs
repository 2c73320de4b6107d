use std::io;

use rollcall::{config::CONFIG_FILE, models::Repository, shell::Shell, Config};
use tracing_subscriber::EnvFilter;

fn main() -> rollcall::Result<()> {
    // A .env file is optional, it is only there to carry RUST_LOG.
    dotenv::dotenv().ok();

    // Logs go to stderr so they never interleave with the menus.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = Config::load(CONFIG_FILE)?;
    tracing::debug!(?config, "configuration loaded");
    let admin = config.admin();
    let mut repo = Repository::load(&config.users_file, &config.events_file)?;

    let stdin = io::stdin();
    Shell::new(&mut repo, &admin, stdin.lock(), io::stdout()).run()?;
    Ok(())
}
