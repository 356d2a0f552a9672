//! CLI schema and stdin command parsing for the sift binary.

use std::path::PathBuf;

use clap::Parser;
use sift_primitives::{KeyCode, SearchMode};

#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(about = "Interactive search box over a title corpus")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Newline-separated titles to search
	#[arg(value_name = "CORPUS")]
	pub corpus: PathBuf,

	/// Config file layered over the platform config
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Initial search mode: keyword, semantic or hybrid
	#[arg(long, short = 'm', default_value = "keyword")]
	pub mode: SearchMode,

	/// Locale tag, overriding the config (e.g. en, he-IL)
	#[arg(long)]
	pub locale: Option<String>,

	/// Recents file (defaults to the platform data dir)
	#[arg(long, value_name = "PATH")]
	pub recents: Option<PathBuf>,

	/// Do not load or save recent queries
	#[arg(long, conflicts_with = "recents")]
	pub no_recents: bool,

	/// Simulated backend latency in milliseconds
	#[arg(long, default_value_t = 0)]
	pub latency_ms: u64,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

/// One line read from stdin.
///
/// Lines starting with `:` are commands; anything else replaces the query.
/// `::text` types a query that begins with a colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Query(String),
	Key(KeyCode),
	Mode(SearchMode),
	Locale(String),
	Voice,
	Recents,
	Help,
	Quit,
}

/// Parses a stdin line into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, String> {
	let line = line.trim_end_matches(['\r', '\n']);
	let Some(rest) = line.strip_prefix(':') else {
		return Ok(Command::Query(line.to_string()));
	};
	if rest.starts_with(':') {
		return Ok(Command::Query(rest.to_string()));
	}

	let (name, arg) = match rest.split_once(char::is_whitespace) {
		Some((name, arg)) => (name, arg.trim()),
		None => (rest, ""),
	};
	let key = |code: KeyCode| -> Result<Command, String> { Ok(Command::Key(code)) };
	match name {
		"down" | "j" => key(KeyCode::Down),
		"up" | "k" => key(KeyCode::Up),
		"left" => key(KeyCode::Left),
		"right" => key(KeyCode::Right),
		"home" => key(KeyCode::Home),
		"end" => key(KeyCode::End),
		"enter" | "submit" => key(KeyCode::Enter),
		"esc" | "escape" => key(KeyCode::Escape),
		"clear" => Ok(Command::Query(String::new())),
		"mode" => arg.parse().map(Command::Mode).map_err(|e| e.to_string()),
		"locale" if !arg.is_empty() => Ok(Command::Locale(arg.to_string())),
		"locale" => Err("usage: :locale <tag>".to_string()),
		"voice" => Ok(Command::Voice),
		"recents" => Ok(Command::Recents),
		"help" | "h" | "?" => Ok(Command::Help),
		"quit" | "q" => Ok(Command::Quit),
		_ => Err(format!("unknown command ':{name}' (try :help)")),
	}
}

pub const HELP: &str = "\
text            replace the query
:down :up       move the highlight
:left :right    move the highlight in list focus (direction-aware)
:home :end      jump within the highlighted list
:enter          open the highlight, or search for the query
:esc            drop the highlight, then the list
:clear          empty the query
:mode <m>       keyword, semantic or hybrid
:locale <tag>   switch locale (e.g. he, en-US)
:voice          start dictation
:recents        list recent queries
:quit";
