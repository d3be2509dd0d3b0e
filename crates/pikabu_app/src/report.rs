//! Lines printed to stdout after a run.

use chrono::Local;
use pikabu_engine::PostRecord;

pub const STARTED: &str = "Parsing has begun...";

/// Current local time in the Unix `date` layout, e.g. `Mon Jan  2 15:04:05 +03:00 2006`.
pub fn timestamp() -> String {
    Local::now().format("%a %b %e %H:%M:%S %:z %Y").to_string()
}

/// One line per post, then a completion line; a single "No posts" line when empty.
pub fn render(posts: &[PostRecord], timestamp: &str) -> Vec<String> {
    if posts.is_empty() {
        return vec![format!("{timestamp}: No posts")];
    }
    posts
        .iter()
        .map(PostRecord::to_line)
        .chain(std::iter::once(format!("{timestamp}: Parsing completed")))
        .collect()
}
