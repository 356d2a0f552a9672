//! Sift terminal front end.
//!
//! Reads commands from stdin, drives a [`SearchCoordinator`] over a title
//! corpus, and reprints the search box whenever it changes.

mod app;
mod cli;
mod corpus;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use app::{Flow, View};
use clap::Parser;
use cli::Cli;
use corpus::CorpusSource;
use sift_config::Config;
use sift_search::{ChannelNavigator, JsonFileRecents, SearchCoordinator};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

enum Event {
	Line(Option<String>),
	Navigated(String),
	Tick,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let mut config = Config::load_default()?;
	if let Some(path) = &cli.config {
		config.merge(Config::load(path)?);
	}
	for warning in &config.warnings {
		eprintln!("config: {warning}");
	}
	if let Some(locale) = cli.locale.clone() {
		config.search.locale = locale;
	}

	let titles = corpus::load(&cli.corpus)?;
	info!(path = %cli.corpus.display(), titles = titles.len(), "corpus loaded");
	let source = CorpusSource::new(titles).with_latency(Duration::from_millis(cli.latency_ms));

	let (navigator, mut navigations) = ChannelNavigator::new();
	let mut builder = SearchCoordinator::builder(Arc::new(source), Box::new(navigator)).config(config);
	if !cli.no_recents
		&& let Some(path) = cli.recents.clone().or_else(JsonFileRecents::default_path)
	{
		info!(path = %path.display(), "recents file");
		builder = builder.recents_store(Arc::new(JsonFileRecents::new(path)));
	}
	let mut search = builder.build();
	search.on_mode_change(cli.mode);
	search.on_focus();

	println!("{}", cli::HELP);
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let mut shown = View::capture(&search);
	print!("{shown}");

	loop {
		let event = tokio::select! {
			line = lines.next_line() => Event::Line(line.context("reading stdin")?),
			Some(path) = navigations.recv() => Event::Navigated(path),
			() = search.run_once() => Event::Tick,
		};

		match event {
			Event::Line(None) => break,
			Event::Line(Some(line)) => match cli::parse_command(&line) {
				Ok(command) => {
					let (flow, output) = app::apply(&mut search, command);
					if let Some(output) = output {
						println!("{output}");
					}
					if flow == Flow::Quit {
						break;
					}
				}
				Err(e) => eprintln!("{e}"),
			},
			Event::Navigated(path) => println!("-> {path}"),
			Event::Tick => {}
		}

		let view = View::capture(&search);
		if view != shown {
			print!("{view}");
			shown = view;
		}
	}

	search.flush_recents().await;
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("warn")
		}
	});
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
