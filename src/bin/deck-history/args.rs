use clap::Parser;
use std::path::PathBuf;

pub const FRESH_HISTORY_NOTE: &str = "Each run starts a fresh history: snapshots left in the log \
file by an earlier run are deleted when the session starts.";

#[derive(Parser, Debug)]
#[command(
    name = "deck-history",
    about = "Edit a slide deck interactively with undo/redo history written to a snapshot log",
    after_help = FRESH_HISTORY_NOTE
)]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/deck-history/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Snapshot log file, overriding the config. Cleared at startup.
    #[arg(long, short = 'l')]
    pub log: Option<PathBuf>,
    /// History capacity, overriding the config
    #[arg(long)]
    pub capacity: Option<usize>,
    /// JSON array of slides to start from
    #[arg(long)]
    pub deck: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn help_warns_that_log_is_cleared() {
        let help = CliArgs::command().render_help().to_string();
        assert!(help.contains(FRESH_HISTORY_NOTE));
        assert!(help.contains("Cleared at startup"));
    }

    #[test]
    fn parses_overrides() {
        let args = CliArgs::try_parse_from(["deck-history", "-l", "/tmp/h.json", "--capacity", "5"])
            .expect("parse");
        assert_eq!(args.log, Some(PathBuf::from("/tmp/h.json")));
        assert_eq!(args.capacity, Some(5));
    }
}
