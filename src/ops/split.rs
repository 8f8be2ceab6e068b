use super::prepare;
use crate::config::MatchOptions;
use crate::pattern::Pattern;
use crate::text::{Fragment, Subject};

/// Split `subject` at each match of `pattern`.
///
/// `opts.parts` bounds the number of pieces (the last piece keeps the rest of
/// the subject); `opts.global == false` forces at most two. With
/// `opts.trim`, empty pieces are dropped after splitting. A subject without
/// matches comes back as a single piece.
#[must_use]
pub fn split<'a>(
    pattern: &Pattern,
    subject: impl Into<Subject<'a>>,
    opts: &MatchOptions,
) -> Vec<Fragment> {
    let prepared = prepare(pattern, subject.into(), Some(opts));
    let limit = if opts.global { opts.parts.limit() } else { Some(2) };

    pattern
        .engine
        .split(&prepared.text, limit)
        .into_iter()
        .filter(|piece| !(opts.trim && piece.is_empty()))
        .map(|piece| Fragment::from_span(&prepared.text, piece, prepared.mode))
        .collect()
}
