#[path = "deck-history/app.rs"]
mod app;
#[path = "deck-history/args.rs"]
mod args;
#[path = "deck-history/command.rs"]
mod command;
#[path = "deck-history/config/mod.rs"]
mod config;
#[path = "deck-history/logging.rs"]
mod logging;
#[path = "deck-history/session.rs"]
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
