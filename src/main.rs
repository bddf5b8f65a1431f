use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{error, info};

use sharktype::{
    app::App,
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    corpus::{FixedText, RandomCorpus, TextSource},
    logging::setup_logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, GameEvent, Runner, Ticker},
};

/// help the fish escape the shark by typing fast
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the passage before the shark catches the fish. Fall behind the pace and the shark closes in."
)]
pub struct Cli {
    /// custom passage to type instead of a random one
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// seed for passage selection
    #[clap(long)]
    seed: Option<u64>,

    /// directory for the log file
    #[clap(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn apply_to(&self, config: Config) -> Config {
        Config {
            seed: self.seed.or(config.seed),
            ..config
        }
        .sanitized()
    }

    fn corpus(&self, config: &Config) -> Box<dyn TextSource> {
        match (&self.prompt, config.seed) {
            (Some(prompt), _) => Box::new(FixedText::new(prompt.clone())),
            (None, Some(seed)) => Box::new(RandomCorpus::seeded(seed)),
            (None, None) => Box::new(RandomCorpus::new()),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_dir = cli.log_dir.clone().unwrap_or_else(AppDirs::log_dir);
    if let Err(e) = setup_logging(&log_dir) {
        eprintln!("warning: {e}");
    }

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    info!(?config, config_path = %store.path().display(), "starting");

    let mut app = App::new(cli.corpus(&config), SystemClock);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(config.frame_rate_ms)),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        error!(error = %e, "exiting with error");
    }
    info!("exiting");
    res
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        match runner.step() {
            GameEvent::Key(key) => app.handle_key(key)?,
            GameEvent::Resize | GameEvent::Tick => {}
        }
        // Polled after every event; the pursuit timer tracks its own deadline.
        app.on_tick()?;
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["sharktype"]);

        assert_eq!(cli.prompt, None);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.log_dir, None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "sharktype", "-p", "hi", "--seed", "5", "--log-dir", "/tmp/x",
        ]);

        assert_eq!(cli.prompt.as_deref(), Some("hi"));
        assert_eq!(cli.seed, Some(5));
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["sharktype", "--seed", "1"]);
        let file = Config {
            frame_rate_ms: 50,
            seed: Some(9),
        };

        let merged = cli.apply_to(file);

        assert_eq!(merged.seed, Some(1));
        assert_eq!(merged.frame_rate_ms, 50);
    }

    #[test]
    fn test_pace_flag_is_rejected() {
        assert!(Cli::try_parse_from(["sharktype", "--pace", "4"]).is_err());
    }

    #[test]
    fn test_custom_prompt_wins_over_corpus() {
        let cli = Cli::parse_from(["sharktype", "-p", "hi", "--seed", "3"]);
        let config = cli.apply_to(Config::default());
        let mut corpus = cli.corpus(&config);
        assert_eq!(corpus.next_text(), "hi");
    }

    #[test]
    fn test_seeded_corpus_from_cli() {
        let cli = Cli::parse_from(["sharktype", "--seed", "11"]);
        let config = cli.apply_to(Config::default());
        let mut a = cli.corpus(&config);
        let mut b = RandomCorpus::seeded(11);
        assert_eq!(a.next_text(), b.next_text());
    }
}
