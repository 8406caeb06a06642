use std::{path::Path, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tokio::{
    io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::RwLock,
};

use deck_history::{
    Deck, HistoryController, JsonFileSnapshotLog, Selection, SharedDocument, SharedSelection,
    Slide,
};

use crate::args::CliArgs;
use crate::command::Command;
use crate::config::load_config;
use crate::logging::init_logging;
use crate::session::{Outcome, Session};

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths)?;

    let mut history_config = loaded.history();
    if let Some(capacity) = args.capacity {
        history_config.capacity = capacity;
    }
    if let Some(path) = args.log.clone() {
        history_config.log_path = Some(path);
    }
    history_config.validate()?;
    let log_path = history_config
        .log_path
        .clone()
        .context("no snapshot log path configured")?;

    let deck = match &args.deck {
        Some(path) => load_deck(path).await?,
        None => Deck::default(),
    };
    let document: SharedDocument = Arc::new(RwLock::new(Box::new(deck)));
    let selection = Selection::default();
    let shared_selection: SharedSelection = Arc::new(RwLock::new(Box::new(selection.clone())));
    let snapshot_log = JsonFileSnapshotLog::open(&log_path).await?;
    log::info!("Using snapshot log {}", log_path.display());

    let history = HistoryController::with_config(
        Box::new(snapshot_log),
        Arc::clone(&document),
        shared_selection,
        &history_config,
    );
    let session = Session::start(history, document, selection).await?;
    repl(session).await
}

async fn load_deck(path: &Path) -> anyhow::Result<Deck> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading deck {}", path.display()))?;
    let slides: Vec<Slide> = serde_json::from_slice(&data)?;
    Ok(Deck::new(slides))
}

async fn repl(mut session: Session) -> anyhow::Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    loop {
        stdout.write_all(b"deck> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err} (try 'help')");
                continue;
            }
        };
        match session.apply(command).await {
            Ok(Outcome::Continue(message)) => println!("{message}"),
            Ok(Outcome::Quit) => return Ok(()),
            Err(err) => {
                log::error!("History operation failed: {err}");
                println!("error: {err}");
            }
        }
    }
}
