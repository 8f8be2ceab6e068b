/*!
Pattern engine adapter.

Everything above this module talks to the engine only through [`Engine`]:
compile, a boolean test, first-match and global captures, split and replace.
Matching itself is delegated to the `regex` crate. Syntax errors are located
with `regex-syntax` so that failures carry a byte offset into the source.
*/

use std::ops::Range;

use regex::{CaptureLocations, Regex, RegexBuilder};

use crate::options::Flag;

/// Byte range of one capture group, `None` when the group did not take part
/// in the match.
pub(crate) type Span = Option<Range<usize>>;

/// Engine rejection of a pattern source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompileFailure {
    pub(crate) reason: String,
    pub(crate) offset: usize,
}

impl CompileFailure {
    fn from_syntax(err: regex_syntax::Error) -> Self {
        match err {
            regex_syntax::Error::Parse(err) => CompileFailure {
                reason: err.kind().to_string(),
                offset: err.span().start.offset,
            },
            regex_syntax::Error::Translate(err) => CompileFailure {
                reason: err.kind().to_string(),
                offset: err.span().start.offset,
            },
            other => CompileFailure {
                reason: other.to_string(),
                offset: 0,
            },
        }
    }
}

/// A compiled engine handle.
///
/// Read-only after construction; safe to share between threads.
#[derive(Clone, Debug)]
pub(crate) struct Engine {
    regex: Regex,
    firstline: bool,
}

impl Engine {
    /// Compile `source` with the given engine flags.
    ///
    /// [`Flag::Groups`] is ignored here. [`Flag::Unicode`] is implied: text is
    /// always UTF-8, so there is no byte-oriented mode to fall back to.
    pub(crate) fn compile(source: &str, flags: &[Flag]) -> Result<Engine, CompileFailure> {
        let has = |flag: Flag| flags.contains(&flag);

        // Parse first: the regex builder only reports a flattened message.
        regex_syntax::ParserBuilder::new()
            .case_insensitive(has(Flag::Caseless))
            .multi_line(has(Flag::Multiline))
            .dot_matches_new_line(has(Flag::DotAll))
            .swap_greed(has(Flag::Ungreedy))
            .ignore_whitespace(has(Flag::Extended))
            .unicode(true)
            .utf8(true)
            .build()
            .parse(source)
            .map_err(CompileFailure::from_syntax)?;

        let regex = RegexBuilder::new(source)
            .case_insensitive(has(Flag::Caseless))
            .multi_line(has(Flag::Multiline))
            .dot_matches_new_line(has(Flag::DotAll))
            .swap_greed(has(Flag::Ungreedy))
            .ignore_whitespace(has(Flag::Extended))
            .unicode(true)
            .build()
            .map_err(|err| CompileFailure {
                reason: err.to_string(),
                offset: 0,
            })?;

        Ok(Engine {
            regex,
            firstline: has(Flag::Firstline),
        })
    }

    /// Number of capture groups, including the implicit whole-match group 0.
    pub(crate) fn capture_count(&self) -> usize {
        self.regex.captures_len()
    }

    /// Group number of a named group.
    pub(crate) fn group_index(&self, name: &str) -> Option<usize> {
        self.regex
            .capture_names()
            .position(|candidate| candidate == Some(name))
    }

    /// Names of all named groups, in group-number order.
    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.regex.capture_names().flatten()
    }

    /// Whether any match exists. No capture data is computed.
    pub(crate) fn is_match(&self, text: &str) -> bool {
        if self.firstline {
            self.regex
                .find(text)
                .is_some_and(|m| m.start() <= first_line_limit(text, 0))
        } else {
            self.regex.is_match(text)
        }
    }

    /// Captures of the first match.
    pub(crate) fn captures(&self, text: &str) -> Option<Vec<Span>> {
        let mut locs = self.regex.capture_locations();
        self.search_at(text, 0, &mut locs)?;
        Some(spans(&locs))
    }

    /// Captures of every non-overlapping match, left to right.
    pub(crate) fn captures_all(&self, text: &str) -> Vec<Vec<Span>> {
        let mut all = Vec::new();
        self.for_each_match(text, |locs| {
            all.push(spans(locs));
            true
        });
        all
    }

    /// Split `text` at each match, returning the byte ranges of the pieces.
    ///
    /// At most `limit` pieces are produced; the last one holds the unsplit
    /// remainder. An empty match at the start of the current piece does not
    /// cut it, so empty-matching patterns split between characters and leave
    /// a trailing empty piece.
    pub(crate) fn split(&self, text: &str, limit: Option<usize>) -> Vec<Range<usize>> {
        let mut pieces = Vec::new();
        let mut piece_start = 0;

        if limit != Some(1) {
            self.for_each_match(text, |locs| {
                let Some((start, end)) = locs.get(0) else {
                    return true;
                };
                if start == end && start == piece_start {
                    return true;
                }
                pieces.push(piece_start..start);
                piece_start = end;
                limit.is_none_or(|limit| pieces.len() + 1 < limit)
            });
        }

        pieces.push(piece_start..text.len());
        pieces
    }

    /// Replace the first (or every, when `global`) match.
    ///
    /// `expand` appends the replacement for one match to the output; it gets
    /// the match's capture spans.
    pub(crate) fn replace(
        &self,
        text: &str,
        global: bool,
        mut expand: impl FnMut(&[Span], &mut String),
    ) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut replaced = false;

        self.for_each_match(text, |locs| {
            let caps = spans(locs);
            if let Some(Some(whole)) = caps.first() {
                out.push_str(&text[last..whole.start]);
                expand(&caps, &mut out);
                last = whole.end;
                replaced = true;
            }
            global
        });

        if !replaced {
            return text.to_string();
        }
        out.push_str(&text[last..]);
        out
    }

    /// Search from `start`, honoring the firstline restriction.
    fn search_at(
        &self,
        text: &str,
        start: usize,
        locs: &mut CaptureLocations,
    ) -> Option<Range<usize>> {
        let found = self.regex.captures_read_at(locs, text, start)?;
        if self.firstline && found.start() > first_line_limit(text, start) {
            return None;
        }
        log::trace!("match at {:?} (search start {start})", found.range());
        Some(found.range())
    }

    /// Visit every non-overlapping match until `visit` returns false.
    ///
    /// An empty match ending where the previous match ended is skipped and
    /// the search resumes one character later.
    fn for_each_match(&self, text: &str, mut visit: impl FnMut(&CaptureLocations) -> bool) {
        let mut locs = self.regex.capture_locations();
        let mut start = 0;
        let mut last_end = None;

        while start <= text.len() {
            let Some(found) = self.search_at(text, start, &mut locs) else {
                break;
            };
            if found.is_empty() && last_end == Some(found.end) {
                match next_boundary(text, found.end) {
                    Some(next) => {
                        start = next;
                        continue;
                    }
                    None => break,
                }
            }
            if !visit(&locs) {
                break;
            }
            last_end = Some(found.end);
            start = found.end;
        }
    }
}

fn spans(locs: &CaptureLocations) -> Vec<Span> {
    (0..locs.len())
        .map(|idx| locs.get(idx).map(|(start, end)| start..end))
        .collect()
}

/// Byte offset of the first newline at or after `start`, or the text length.
fn first_line_limit(text: &str, start: usize) -> usize {
    text[start..]
        .find('\n')
        .map_or(text.len(), |offset| start + offset)
}

/// The char boundary after `at`, or `None` at the end of the text.
fn next_boundary(text: &str, at: usize) -> Option<usize> {
    text[at..].chars().next().map(|ch| at + ch.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(source: &str, flags: &[Flag]) -> Engine {
        Engine::compile(source, flags).expect("pattern should compile")
    }

    fn texts<'a>(text: &'a str, ranges: &[Range<usize>]) -> Vec<&'a str> {
        ranges.iter().map(|r| &text[r.clone()]).collect()
    }

    #[test]
    fn nothing_to_repeat_is_reported_at_offset_zero() {
        let err = Engine::compile("*foo", &[Flag::Unicode]).unwrap_err();
        assert_eq!(err.offset, 0);
        assert!(err.reason.contains("repetition"), "{}", err.reason);
    }

    #[test]
    fn unclosed_group_offset_points_into_source() {
        let err = Engine::compile("ab(cd", &[Flag::Unicode]).unwrap_err();
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn flags_reach_the_engine() {
        assert!(engine("abc", &[Flag::Caseless]).is_match("ABC"));
        assert!(!engine("abc", &[]).is_match("ABC"));
        assert!(engine("a.b", &[Flag::DotAll]).is_match("a\nb"));
        assert!(!engine("a.b", &[]).is_match("a\nb"));
        assert!(engine("^b$", &[Flag::Multiline]).is_match("a\nb\nc"));
        assert!(engine("a b c", &[Flag::Extended]).is_match("abc"));

        let lazy = engine("a+", &[Flag::Ungreedy]);
        assert_eq!(lazy.captures("aaa").unwrap()[0], Some(0..1));
    }

    #[test]
    fn firstline_rejects_matches_starting_after_first_newline() {
        let first = engine("b", &[Flag::Firstline]);
        assert!(first.is_match("ab\nc"));
        assert!(!first.is_match("a\nb"));
        assert!(first.captures("a\nb").is_none());
        // The match may run past the newline.
        let spanning = engine("a\nb", &[Flag::Firstline]);
        assert!(spanning.is_match("xa\nb"));
    }

    #[test]
    fn unparticipating_group_is_none() {
        let caps = engine("a(x)?(b)", &[]).captures("ab").unwrap();
        assert_eq!(caps, vec![Some(0..2), None, Some(1..2)]);
    }

    #[test]
    fn global_captures_do_not_overlap() {
        let all = engine("aa", &[]).captures_all("aaaaa");
        assert_eq!(all, vec![vec![Some(0..2)], vec![Some(2..4)]]);
    }

    #[test]
    fn empty_matches_advance_by_char() {
        let text = "aé";
        let all = engine("", &[]).captures_all(text);
        let starts: Vec<_> = all.iter().map(|c| c[0].clone().unwrap().start).collect();
        assert_eq!(starts, vec![0, 1, 3]);
    }

    #[test]
    fn split_respects_limit_and_empty_matches() {
        let text = "a-b-c";
        let dash = engine("-", &[]);
        assert_eq!(texts(text, &dash.split(text, None)), vec!["a", "b", "c"]);
        assert_eq!(texts(text, &dash.split(text, Some(2))), vec!["a", "b-c"]);
        assert_eq!(texts(text, &dash.split(text, Some(1))), vec!["a-b-c"]);

        let text = "abc";
        let empty = engine("", &[]);
        assert_eq!(texts(text, &empty.split(text, None)), vec!["a", "b", "c", ""]);
    }

    #[test]
    fn replace_first_or_all() {
        let e = engine("b", &[]);
        let bracket = |caps: &[Span], out: &mut String| {
            let whole = caps[0].clone().unwrap();
            out.push('[');
            out.push_str(&"abcb"[whole]);
            out.push(']');
        };
        assert_eq!(e.replace("abcb", true, bracket), "a[b]c[b]");
        assert_eq!(e.replace("abcb", false, bracket), "a[b]cb");
        assert_eq!(e.replace("xyz", true, |_, _| unreachable!()), "xyz");
    }

    #[test]
    fn group_lookup_by_name() {
        let e = engine("(?<year>\\d+)-(?P<month>\\d+)", &[]);
        assert_eq!(e.capture_count(), 3);
        assert_eq!(e.group_index("year"), Some(1));
        assert_eq!(e.group_index("month"), Some(2));
        assert_eq!(e.group_index("day"), None);
        assert_eq!(e.names().collect::<Vec<_>>(), vec!["year", "month"]);
    }
}
