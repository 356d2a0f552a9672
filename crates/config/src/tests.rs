use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_input_yields_defaults() {
	let config = Config::parse("").unwrap();
	assert_eq!(config.search, SearchConfig::default());
	assert_eq!(config.search.debounce(), Duration::from_millis(300));
	assert_eq!(config.search.announce_clear(), Duration::from_millis(1000));
	assert!(config.shortcuts.is_empty());
	assert!(config.warnings.is_empty());
}

#[test]
fn parses_search_section() {
	let config = Config::parse(
		r#"
		[search]
		debounce-ms = 150
		announcements = false
		locale = "he-IL"
		"#,
	)
	.unwrap();
	assert_eq!(config.search.debounce_ms, 150);
	assert!(!config.search.announcements);
	assert_eq!(config.search.locale, "he-IL");
	assert_eq!(config.search.recents_limit, DEFAULT_RECENTS_LIMIT);
}

#[test]
fn shortcuts_keep_file_order() {
	let config = Config::parse(
		r#"
		[shortcuts]
		"cmd+k" = "focus"
		"ctrl+n" = "next"
		"ctrl+p" = "prev"
		"#,
	)
	.unwrap();
	let chords: Vec<_> = config.shortcuts.keys().map(String::as_str).collect();
	assert_eq!(chords, ["cmd+k", "ctrl+n", "ctrl+p"]);
}

#[test]
fn invalid_chords_become_warnings() {
	let config = Config::parse(
		r#"
		[shortcuts]
		"hyper+k" = "focus"
		"ctrl+j" = "next"
		"#,
	)
	.unwrap();
	assert_eq!(config.shortcuts.len(), 1);
	assert!(matches!(
		&config.warnings[..],
		[ConfigWarning::InvalidChord { chord, .. }] if chord == "hyper+k"
	));
}

#[test]
fn zero_recents_limit_falls_back() {
	let config = Config::parse("[search]\nrecents-limit = 0\n").unwrap();
	assert_eq!(config.search.recents_limit, DEFAULT_RECENTS_LIMIT);
	assert_eq!(config.warnings.len(), 1);
}

#[test]
fn malformed_toml_is_an_error() {
	assert!(matches!(Config::parse("[search\n"), Err(ConfigError::Toml(_))));
}

#[test]
fn load_reads_file_and_reports_missing_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("config.toml");
	std::fs::write(&path, "[search]\ndebounce-ms = 42\n").unwrap();
	assert_eq!(Config::load(&path).unwrap().search.debounce_ms, 42);

	let missing = dir.path().join("nope.toml");
	assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));
}

#[test]
fn merge_keeps_existing_chords_first() {
	let mut base = Config::parse("[shortcuts]\n\"ctrl+k\" = \"focus\"\n").unwrap();
	let overlay = Config::parse("[search]\ndebounce-ms = 10\n[shortcuts]\n\"ctrl+k\" = \"next\"\n\"down\" = \"next\"\n").unwrap();
	base.merge(overlay);
	assert_eq!(base.search.debounce_ms, 10);
	assert_eq!(base.shortcuts["ctrl+k"], "focus");
	assert_eq!(base.shortcuts["down"], "next");
}

#[test]
fn merge_keeps_search_keys_the_overlay_leaves_unset() {
	let mut base = Config::parse("[search]\nlocale = \"he\"\ndebounce-ms = 50\nannouncements = false\n").unwrap();
	base.merge(Config::parse("[search]\ndebounce-ms = 10\n").unwrap());
	assert_eq!(
		base.search,
		SearchConfig {
			debounce_ms: 10,
			locale: "he".to_string(),
			announcements: false,
			..SearchConfig::default()
		}
	);

	base.merge(Config::parse("").unwrap());
	assert_eq!(base.search.debounce_ms, 10);
	assert_eq!(base.search.locale, "he");

	base.merge(Config::parse("[search]\nlocale = \"en\"\n").unwrap());
	assert_eq!(base.search.locale, "en");
	assert_eq!(base.search.debounce_ms, 10);
}

#[test]
fn rejected_recents_limit_does_not_override_on_merge() {
	let mut base = Config::parse("[search]\nrecents-limit = 3\n").unwrap();
	let overlay = Config::parse("[search]\nrecents-limit = 0\n").unwrap();
	assert_eq!(overlay.warnings.len(), 1);
	base.merge(overlay);
	assert_eq!(base.search.recents_limit, 3);
	assert_eq!(base.warnings.len(), 1);
}
