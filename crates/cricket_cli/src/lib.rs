//! Cricket Scorer CLI Library
//!
//! Line-oriented scoring commands and plain-text views over a
//! [`MatchEngine`].

use std::fmt::Write as _;

use cricket_core::{
    BatterId, Delivery, End, HighlightSummarizer, HistoryStore, KeyMomentsSummarizer, MatchConfig,
    MatchEngine, MatchRecord, Notification, ScoringError, Side, TeamInnings,
};
use thiserror::Error;

/// One line of scorer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreCommand {
    Bowler(String),
    RenameBowler { from: String, to: String },
    AddBatter(String),
    Striker(String),
    NonStriker(String),
    Ball(Delivery),
    Swap,
    Undo,
    Switch,
    Reset,
    Note(String),
    Summary,
    Card,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {what}")]
    MissingArgument { command: &'static str, what: &'static str },

    #[error("'{0}' is not a valid run count")]
    BadRuns(String),
}

pub const HELP: &str = "\
Scoring:   0-6 | dot | w | wd | nb [runs] | b <runs>
Players:   bowler <name> | rename <old> = <new> | bat <name>
           strike <name> | nonstrike <name> | swap
Match:     undo | switch | reset | note <text>
Views:     card | summary | help | quit";

fn parse_runs(text: &str) -> Result<u32, ParseError> {
    match text.parse::<u32>() {
        Ok(n) if n <= 6 => Ok(n),
        _ => Err(ParseError::BadRuns(text.to_string())),
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument { command, what });
    }
    Ok(rest)
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ScoreCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "0" | "." | "dot" => ScoreCommand::Ball(Delivery::dot()),
        "w" | "wicket" => ScoreCommand::Ball(Delivery::wicket()),
        "wd" | "wide" => ScoreCommand::Ball(Delivery::wide()),
        "nb" | "noball" => {
            let struck = if rest.is_empty() { 0 } else { parse_runs(rest)? };
            ScoreCommand::Ball(Delivery::no_ball(struck))
        }
        "b" | "byes" => {
            let runs = parse_runs(required(rest, "byes", "a run count")?)?;
            if runs == 0 {
                return Err(ParseError::BadRuns(rest.to_string()));
            }
            ScoreCommand::Ball(Delivery::byes(runs))
        }
        "bowler" => ScoreCommand::Bowler(required(rest, "bowler", "a name")?.to_string()),
        "rename" => {
            let (from, to) = required(rest, "rename", "'<old> = <new>'")?
                .split_once('=')
                .ok_or(ParseError::MissingArgument { command: "rename", what: "'<old> = <new>'" })?;
            ScoreCommand::RenameBowler { from: from.trim().to_string(), to: to.trim().to_string() }
        }
        "bat" | "batter" => ScoreCommand::AddBatter(required(rest, "bat", "a name")?.to_string()),
        "strike" => ScoreCommand::Striker(required(rest, "strike", "a name")?.to_string()),
        "nonstrike" => {
            ScoreCommand::NonStriker(required(rest, "nonstrike", "a name")?.to_string())
        }
        "swap" => ScoreCommand::Swap,
        "undo" => ScoreCommand::Undo,
        "switch" => ScoreCommand::Switch,
        "reset" => ScoreCommand::Reset,
        "note" => ScoreCommand::Note(required(rest, "note", "some text")?.to_string()),
        "summary" => ScoreCommand::Summary,
        "card" => ScoreCommand::Card,
        "help" | "?" => ScoreCommand::Help,
        "quit" | "exit" => ScoreCommand::Quit,
        other => match other.parse::<u32>() {
            Ok(_) => ScoreCommand::Ball(Delivery::runs(parse_runs(other)?)),
            Err(_) => return Err(ParseError::Unknown(word.to_string())),
        },
    };
    Ok(Some(command))
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Done,
    Output(String),
    Quit,
}

/// An engine plus the highlight summary shown alongside it.
pub struct Session {
    pub engine: MatchEngine,
    highlights: HighlightSummarizer<KeyMomentsSummarizer>,
}

impl Session {
    pub fn new(engine: MatchEngine) -> Self {
        Self { engine, highlights: HighlightSummarizer::new(KeyMomentsSummarizer::default()) }
    }

    pub fn execute(&mut self, command: ScoreCommand) -> Result<Reply, ScoringError> {
        log::debug!("Executing {:?}", command);
        let engine = &mut self.engine;
        match command {
            ScoreCommand::Ball(delivery) => {
                engine.record_delivery(delivery)?;
                Ok(Reply::Output(render_scoreline(engine)))
            }
            ScoreCommand::Bowler(name) => engine.select_or_create_bowler(&name).map(|_| Reply::Done),
            ScoreCommand::RenameBowler { from, to } => {
                let id = engine
                    .fielding_team()
                    .find_bowler(&from)
                    .map(|b| b.id)
                    .ok_or(ScoringError::UnknownBowler)?;
                engine.rename_bowler(id, &to).map(|_| Reply::Done)
            }
            ScoreCommand::AddBatter(name) => engine.add_batter(&name).map(|_| Reply::Done),
            ScoreCommand::Striker(name) => select_by_name(engine, End::OnStrike, &name),
            ScoreCommand::NonStriker(name) => select_by_name(engine, End::OffStrike, &name),
            ScoreCommand::Swap => {
                engine.swap_strike();
                Ok(Reply::Done)
            }
            ScoreCommand::Undo => {
                engine.undo()?;
                Ok(Reply::Output(render_scoreline(engine)))
            }
            ScoreCommand::Switch => engine.switch_innings().map(|_| Reply::Done),
            ScoreCommand::Reset => {
                engine.reset_match();
                Ok(Reply::Done)
            }
            ScoreCommand::Note(text) => engine.add_manual_commentary(&text).map(|_| Reply::Done),
            ScoreCommand::Summary => {
                let note = self.highlights.summarize(&self.engine.commentary_text());
                let mut out = note.to_string();
                if let Some(summary) = self.highlights.summary() {
                    out.push('\n');
                    out.push_str(summary);
                }
                Ok(Reply::Output(out))
            }
            ScoreCommand::Card => Ok(Reply::Output(render_scorecard(engine))),
            ScoreCommand::Help => Ok(Reply::Output(HELP.to_string())),
            ScoreCommand::Quit => Ok(Reply::Quit),
        }
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.engine.take_notifications()
    }
}

fn select_by_name(engine: &mut MatchEngine, end: End, name: &str) -> Result<Reply, ScoringError> {
    let id = engine
        .batting_team()
        .find_batter(name)
        .map(|b| b.id)
        .ok_or(ScoringError::UnknownBatter)?;
    engine.select_batter(end, id).map(|_| Reply::Done)
}

/// "Team Alpha 24/2 (3.4 ov)" plus the chase equation when there is one.
pub fn render_scoreline(engine: &MatchEngine) -> String {
    let team = engine.batting_team();
    let stats = engine.innings_stats();
    let mut line =
        format!("{} {} ({} ov, RR {:.2})", team.name, stats.score, stats.overs, stats.run_rate);
    if let (Some(target), Some(needed)) = (stats.target, stats.runs_needed) {
        let _ = write!(
            line,
            " | target {}, need {} from {} balls",
            target, needed, stats.balls_remaining
        );
        if let Some(rate) = stats.required_rate {
            let _ = write!(line, " (RRR {:.2})", rate);
        }
    }
    line
}

/// Batting table; `striker` gets a `*`.
pub fn render_batting(team: &TeamInnings, striker: Option<BatterId>) -> String {
    let mut out = format!(
        "{:<20} {:<16} {:>4} {:>4} {:>3} {:>3} {:>7}\n",
        "Batter", "", "R", "B", "4s", "6s", "SR"
    );
    for batter in &team.batters {
        let marker = if striker == Some(batter.id) { "*" } else { "" };
        let _ = writeln!(
            out,
            "{:<20} {:<16} {:>4} {:>4} {:>3} {:>3} {:>7.2}",
            format!("{}{}", batter.name, marker),
            batter.status(),
            batter.runs,
            batter.balls_faced,
            batter.fours,
            batter.sixes,
            batter.strike_rate()
        );
    }
    let _ = write!(
        out,
        "Extras {}  Total {} ({} ov)",
        team.extras,
        team.score_line(),
        team.overs_display()
    );
    out
}

pub fn render_bowling(team: &TeamInnings) -> String {
    let mut out =
        format!("{:<20} {:>5} {:>3} {:>4} {:>3} {:>6}", "Bowler", "O", "M", "R", "W", "Econ");
    for bowler in &team.bowlers {
        let _ = write!(
            out,
            "\n{:<20} {:>5} {:>3} {:>4} {:>3} {:>6.2}",
            bowler.name,
            bowler.overs_display(),
            bowler.maidens,
            bowler.runs_conceded,
            bowler.wickets,
            bowler.economy()
        );
    }
    out
}

/// Both innings, batting then the opposing bowling.
pub fn render_scorecard(engine: &MatchEngine) -> String {
    let mut out = String::new();
    for side in [Side::Home, Side::Away] {
        let team = engine.team(side);
        let fielding = engine.team(side.other());
        let striker = (side == engine.batting_side()).then(|| engine.on_strike_id()).flatten();
        let _ = writeln!(out, "== {} {} ==", team.name, team.score_line());
        if team.has_batted {
            let _ = writeln!(out, "{}", render_batting(team, striker));
            let _ = writeln!(out, "{}", render_bowling(fielding));
        }
    }
    if let Some(result) = engine.result() {
        let _ = write!(out, "Result: {}", result);
    } else {
        out.push_str(&render_scoreline(engine));
    }
    out
}

/// Last saved match format, or the default when none is stored or the
/// history cannot be read.
pub fn saved_settings(store: &dyn HistoryStore) -> MatchConfig {
    match store.load_settings() {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            log::warn!("Could not read saved match settings: {}", e);
            MatchConfig::default()
        }
    }
}

/// Saved matches, newest first.
pub fn render_history(records: &[MatchRecord]) -> String {
    if records.is_empty() {
        return "No matches saved yet.".to_string();
    }
    records
        .iter()
        .map(|r| {
            format!(
                "{}  {} {} ({} ov, {} extras) v {} {} ({} ov, {} extras)  {}",
                r.date.format("%Y-%m-%d %H:%M"),
                r.team1_name,
                r.team1_score,
                r.team1_overs,
                r.team1_extras,
                r.team2_name,
                r.team2_score,
                r.team2_overs,
                r.team2_extras,
                r.result
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
