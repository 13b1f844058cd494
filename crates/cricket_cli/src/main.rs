//! Cricket Scorer CLI
//!
//! Score a match ball by ball from the terminal or a script, browse saved
//! results, and manage the default match format.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use cricket_cli::{
    parse_command, render_history, render_scorecard, saved_settings, Reply, Session, HELP,
};
#[cfg(feature = "cli")]
use cricket_core::{
    FileHistoryStore, HistoryStore, KeyMomentsSummarizer, MatchConfig, MatchEngine, Summarizer,
    SummaryRequest,
};
#[cfg(feature = "cli")]
use std::io::{BufRead, BufReader, Read};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cricket")]
#[command(about = "Live limited-overs cricket scorer", long_about = None)]
struct Cli {
    /// Directory holding match history and saved settings
    #[arg(long, global = true, default_value = ".cricket")]
    data_dir: PathBuf,

    /// Log engine activity to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Score a match from stdin or a script file
    Score {
        /// Read commands from this file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,

        /// Overs per innings for this match
        #[arg(long)]
        overs: Option<u32>,

        /// Wickets per innings for this match
        #[arg(long)]
        wickets: Option<u32>,

        /// Name of the side batting first
        #[arg(long, default_value = "Team Alpha")]
        home: String,

        /// Name of the side batting second
        #[arg(long, default_value = "Team Bravo")]
        away: String,

        /// Stop at the first refused command
        #[arg(long, default_value = "false")]
        strict: bool,
    },

    /// List or clear saved matches
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show or change the default match format
    Settings {
        #[arg(long)]
        overs: Option<u32>,

        #[arg(long)]
        wickets: Option<u32>,

        #[arg(long)]
        batters: Option<u32>,

        #[arg(long)]
        bowlers: Option<u32>,

        /// Allow a bowler to bowl consecutive overs
        #[arg(long)]
        allow_consecutive: Option<bool>,
    },

    /// Summarize a commentary transcript (file or stdin)
    Summarize {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum HistoryAction {
    /// Saved matches, newest first
    List {
        /// Print records as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Remove every saved match
    Clear,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = FileHistoryStore::in_dir(&cli.data_dir)
        .with_context(|| format!("Cannot use data directory {}", cli.data_dir.display()))?;

    match cli.command {
        Commands::Score { script, overs, wickets, home, away, strict } => {
            let mut config = saved_settings(&store);
            if let Some(overs) = overs {
                config.max_overs = overs;
            }
            if let Some(wickets) = wickets {
                config.max_wickets = wickets;
            }
            config.check().context("Invalid match format")?;

            let engine = MatchEngine::with_history(config, Box::new(store))
                .with_team_names(&home, &away)?;
            let input: Box<dyn BufRead> = match &script {
                Some(path) => Box::new(BufReader::new(
                    std::fs::File::open(path)
                        .with_context(|| format!("Failed to open script: {}", path.display()))?,
                )),
                None => {
                    println!("{}", HELP);
                    Box::new(BufReader::new(std::io::stdin()))
                }
            };
            score(Session::new(engine), input, strict)?;
        }

        Commands::History { action } => match action {
            HistoryAction::List { json } => {
                let records = store.load_newest_first().context("Failed to read match history")?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                } else {
                    println!("{}", render_history(&records));
                }
            }
            HistoryAction::Clear => {
                store.clear().context("Failed to clear match history")?;
                println!("Match history cleared.");
            }
        },

        Commands::Settings { overs, wickets, batters, bowlers, allow_consecutive } => {
            let mut config = saved_settings(&store);
            let changed = overs.is_some()
                || wickets.is_some()
                || batters.is_some()
                || bowlers.is_some()
                || allow_consecutive.is_some();
            config.max_overs = overs.unwrap_or(config.max_overs);
            config.max_wickets = wickets.unwrap_or(config.max_wickets);
            config.max_batters = batters.unwrap_or(config.max_batters);
            config.max_bowlers = bowlers.unwrap_or(config.max_bowlers);
            if let Some(allow) = allow_consecutive {
                config.no_consecutive_overs = !allow;
            }

            if changed {
                config.check().context("Invalid match format")?;
                store.save_settings(&config).context("Failed to save settings")?;
                println!("Settings saved.");
            }
            print_settings(&config);
        }

        Commands::Summarize { file } => {
            let mut text = String::new();
            match file {
                Some(path) => {
                    text = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                }
                None => {
                    std::io::stdin().read_to_string(&mut text)?;
                }
            }
            let response = KeyMomentsSummarizer::default().summarize(&SummaryRequest::new(text))?;
            println!("{}", response.summary);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[cfg(feature = "cli")]
fn score(mut session: Session, input: Box<dyn BufRead>, strict: bool) -> Result<()> {
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) if strict => anyhow::bail!("line {}: {}", index + 1, e),
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let outcome = session.execute(command);
        let mut notes = session.take_notifications();
        if let Err(e) = &outcome {
            if notes.is_empty() {
                notes.push(e.to_notification());
            }
        }
        for note in &notes {
            println!("[{:?}] {}", note.severity, note);
        }

        match outcome {
            Ok(Reply::Output(text)) => println!("{}", text),
            Ok(Reply::Quit) => break,
            Ok(Reply::Done) => {}
            Err(e) if strict => anyhow::bail!("line {}: {}", index + 1, e),
            Err(_) => {}
        }
    }

    println!("\n{}", render_scorecard(&session.engine));
    Ok(())
}

#[cfg(feature = "cli")]
fn print_settings(config: &MatchConfig) {
    println!("   Overs per innings:   {}", config.max_overs);
    println!("   Wickets per innings: {}", config.max_wickets);
    println!("   Batters per side:    {}", config.max_batters);
    println!("   Bowlers per side:    {}", config.max_bowlers);
    println!(
        "   Consecutive overs:   {}",
        if config.no_consecutive_overs { "not allowed" } else { "allowed" }
    );
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("cricket CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
