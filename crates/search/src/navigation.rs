//! Host navigation.

use sift_primitives::SearchMode;
use tokio::sync::mpsc;
use tracing::debug;
use url::form_urlencoded;

/// Routes the host application to a path.
pub trait NavigationService {
	fn navigate_to(&mut self, path: &str);
}

/// Forwards paths over a channel to whoever owns routing.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
	tx: mpsc::UnboundedSender<String>,
}

impl ChannelNavigator {
	pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
		let (tx, rx) = mpsc::unbounded_channel();
		(Self { tx }, rx)
	}
}

impl NavigationService for ChannelNavigator {
	fn navigate_to(&mut self, path: &str) {
		if self.tx.send(path.to_string()).is_err() {
			debug!(path, "navigation.dropped");
		}
	}
}

/// Results page for a plain query submission.
///
/// `/search?q=<query>&mode=<mode>`, form-urlencoded.
pub fn search_path(query: &str, mode: SearchMode) -> String {
	let params = form_urlencoded::Serializer::new(String::new())
		.append_pair("q", query)
		.append_pair("mode", mode.as_str())
		.finish();
	format!("/search?{params}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn search_path_encodes_query() {
		assert_eq!(search_path("rust & tokio", SearchMode::Hybrid), "/search?q=rust+%26+tokio&mode=hybrid");
		assert_eq!(search_path("café", SearchMode::Keyword), "/search?q=caf%C3%A9&mode=keyword");
	}

	#[test]
	fn channel_navigator_forwards_paths() {
		let (mut nav, mut rx) = ChannelNavigator::new();
		nav.navigate_to("/doc/1");
		assert_eq!(rx.try_recv().unwrap(), "/doc/1");

		drop(rx);
		nav.navigate_to("/doc/2");
	}
}
