//! `test`, `run`, `scan` and `named_captures`.

use std::collections::HashMap;

use super::{prepare, selection, shape};
use crate::config::{Capture, MatchOptions};
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::text::{Fragment, Subject};

/// Whether `pattern` matches anywhere in `subject`.
#[must_use]
pub fn test<'a>(pattern: &Pattern, subject: impl Into<Subject<'a>>) -> bool {
    let prepared = prepare(pattern, subject.into(), None);
    pattern.engine.is_match(&prepared.text)
}

/// Captures of the first match, or `None` when nothing matches.
///
/// With [`Capture::None`] a match yields an empty list. Asking for
/// [`Capture::Groups`] on a pattern without discovered names is an
/// [`Error::Argument`], even when the subject would not match.
pub fn run<'a>(
    pattern: &Pattern,
    subject: impl Into<Subject<'a>>,
    opts: &MatchOptions,
) -> Result<Option<Vec<Fragment>>> {
    let selected = selection(pattern, &opts.capture)?;
    let prepared = prepare(pattern, subject.into(), Some(opts));

    if selected.is_empty() {
        return Ok(pattern.engine.is_match(&prepared.text).then(Vec::new));
    }
    Ok(pattern
        .engine
        .captures(&prepared.text)
        .map(|caps| shape(&prepared.text, &caps, &selected, prepared.mode)))
}

/// Captures of every non-overlapping match, left to right.
///
/// No match gives an empty list. With [`Capture::None`] each match still
/// contributes an (empty) entry, so the number of matches stays visible.
pub fn scan<'a>(
    pattern: &Pattern,
    subject: impl Into<Subject<'a>>,
    opts: &MatchOptions,
) -> Result<Vec<Vec<Fragment>>> {
    let selected = selection(pattern, &opts.capture)?;
    let prepared = prepare(pattern, subject.into(), Some(opts));

    Ok(pattern
        .engine
        .captures_all(&prepared.text)
        .iter()
        .map(|caps| shape(&prepared.text, caps, &selected, prepared.mode))
        .collect())
}

/// Map of group name to captured text for the first match.
///
/// `opts.capture` is ignored; the pattern's discovered names are used.
pub fn named_captures<'a>(
    pattern: &Pattern,
    subject: impl Into<Subject<'a>>,
    opts: &MatchOptions,
) -> Result<Option<HashMap<String, Fragment>>> {
    let names = pattern.group_names().ok_or_else(Error::groups_not_discovered)?;
    let opts = opts.clone().capture(Capture::Groups);

    let Some(values) = run(pattern, subject, &opts)? else {
        return Ok(None);
    };
    Ok(Some(names.iter().cloned().zip(values).collect()))
}
