//! Defensive extraction of a JSON object from free-text model output.
//!
//! The model is instructed to return bare JSON, but replies routinely arrive
//! wrapped in a fenced markdown block or with stray prose around the object.
//! The raw reply is untrusted input: we extract the first `{…}` block and
//! let serde do the structural validation, never a direct cast.
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the first `{` through the last `}` across lines. Greedy on
/// purpose so nested objects stay intact.
static JSON_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON block regex must compile"));

/// Pulls the first JSON object out of a raw model reply.
///
/// Handles bare JSON, fenced blocks (```json ... ```), and prose-wrapped
/// objects identically: whatever sits between the first `{` and the last
/// `}` is returned verbatim. Returns `None` when no object is present.
///
/// # Examples
///
/// ```rust
/// use classify::extract_json_object;
///
/// let fenced = "```json\n{\"a\": 1}\n```";
/// let bare = "{\"a\": 1}";
/// assert_eq!(extract_json_object(fenced), extract_json_object(bare));
/// assert_eq!(extract_json_object("no json here"), None);
/// ```
pub fn extract_json_object(reply: &str) -> Option<&str> {
    JSON_BLOCK.find(reply).map(|m| m.as_str())
}
