/*!
Match operations over compiled patterns.

All operations are stateless: a pattern, a subject and [`MatchOptions`] in,
results shaped by the requested (or subject-derived) [`ReturnMode`] out.
*/

mod matching;
mod replace;
mod split;

pub use matching::{named_captures, run, scan, test};
pub use replace::{replace, replace_with};
pub(crate) use replace::Template;
pub use split::split;

use std::borrow::Cow;

use crate::config::{Capture, GroupRef, MatchOptions};
use crate::engine::Span;
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::text::{Fragment, ReturnMode, Subject};

const LIST_SUBJECT_NOTICE: &str =
    "passing a list of code points to regex operations is deprecated, pass a string instead";

/// A subject ready for the engine: UTF-8 text plus the return mode to shape
/// results with.
struct Prepared<'a> {
    text: Cow<'a, str>,
    mode: ReturnMode,
}

fn prepare<'a>(pattern: &Pattern, subject: Subject<'a>, opts: Option<&MatchOptions>) -> Prepared<'a> {
    if subject.is_list() {
        pattern.diagnostics.deprecated(LIST_SUBJECT_NOTICE);
    }
    let mode = opts
        .and_then(|opts| opts.return_mode)
        .unwrap_or_else(|| subject.default_return());
    Prepared {
        text: subject.as_utf8(),
        mode,
    }
}

/// Group numbers to report, in report order. `None` entries always report
/// the absent value.
fn selection(pattern: &Pattern, capture: &Capture) -> Result<Vec<Option<usize>>> {
    let count = pattern.capture_count();
    let selected = match capture {
        Capture::All => (0..count).map(Some).collect(),
        Capture::First => vec![Some(0)],
        Capture::None => Vec::new(),
        Capture::AllButFirst => (1..count).map(Some).collect(),
        Capture::Groups => pattern
            .group_names()
            .ok_or_else(Error::groups_not_discovered)?
            .iter()
            .map(|name| pattern.engine.group_index(name))
            .collect(),
        Capture::Explicit(groups) => groups
            .iter()
            .map(|group| match group {
                GroupRef::Index(index) => (*index < count).then_some(*index),
                GroupRef::Name(name) => pattern.engine.group_index(name),
            })
            .collect(),
    };
    Ok(selected)
}

fn shape(text: &str, caps: &[Span], selected: &[Option<usize>], mode: ReturnMode) -> Vec<Fragment> {
    selected
        .iter()
        .map(|index| {
            match index.and_then(|index| caps.get(index).cloned().flatten()) {
                Some(span) => Fragment::from_span(text, span, mode),
                None => Fragment::absent(mode),
            }
        })
        .collect()
}
