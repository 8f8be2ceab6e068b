//! Named capture group discovery.

use std::sync::LazyLock;

use crate::engine::Engine;
use crate::options::Flag;

/// Matches `(?<name>` and `(?P<name>` openers, capturing the name.
static NAMED_GROUP: LazyLock<Engine> = LazyLock::new(|| {
    Engine::compile(r"\(\?P?<([^>]+)>", &[Flag::Unicode])
        .expect("named group discovery pattern is valid")
});

/// Names of the named capture groups in `source`, in order of appearance.
///
/// Nesting does not matter, only the position of each opener. Duplicate
/// names are kept; rejecting them is the engine's job.
#[must_use]
pub fn discover(source: &str) -> Vec<String> {
    let names: Vec<String> = NAMED_GROUP
        .captures_all(source)
        .into_iter()
        .filter_map(|caps| caps.get(1).cloned().flatten())
        .map(|span| source[span].to_string())
        .collect();
    log::debug!("discovered {} named group(s) in {source:?}", names.len());
    names
}
