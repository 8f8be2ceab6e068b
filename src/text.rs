//! Text representations accepted and produced by the match operations.
//!
//! Subjects come in two shapes: UTF-8 strings ("binary") and code point
//! lists. The list shape is legacy; it still works but every call that
//! receives one emits a deprecation notice.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Text to match against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subject<'a> {
    Binary(&'a str),
    /// Legacy code point list.
    List(&'a [char]),
}

impl<'a> Subject<'a> {
    /// The return mode used when the caller did not ask for one.
    #[must_use]
    pub fn default_return(&self) -> ReturnMode {
        match self {
            Subject::Binary(_) => ReturnMode::Binary,
            Subject::List(_) => ReturnMode::List,
        }
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Subject::List(_))
    }

    /// The subject as UTF-8, borrowing when it already is.
    pub(crate) fn as_utf8(&self) -> Cow<'a, str> {
        match *self {
            Subject::Binary(text) => Cow::Borrowed(text),
            Subject::List(chars) => Cow::Owned(chars.iter().collect()),
        }
    }
}

impl<'a> From<&'a str> for Subject<'a> {
    fn from(text: &'a str) -> Self {
        Subject::Binary(text)
    }
}

impl<'a> From<&'a String> for Subject<'a> {
    fn from(text: &'a String) -> Self {
        Subject::Binary(text.as_str())
    }
}

impl<'a> From<&'a [char]> for Subject<'a> {
    fn from(chars: &'a [char]) -> Self {
        Subject::List(chars)
    }
}

impl<'a, const N: usize> From<&'a [char; N]> for Subject<'a> {
    fn from(chars: &'a [char; N]) -> Self {
        Subject::List(chars.as_slice())
    }
}

impl<'a> From<&'a Vec<char>> for Subject<'a> {
    fn from(chars: &'a Vec<char>) -> Self {
        Subject::List(chars.as_slice())
    }
}

/// How matched text comes back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnMode {
    /// Owned UTF-8 strings.
    Binary,
    /// Code point lists.
    #[serde(alias = "list_of_codepoints")]
    List,
    /// `(offset, length)` byte pairs into the UTF-8 subject.
    Index,
}

/// One matched (or split-off) piece of the subject.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Fragment {
    Binary(String),
    List(Vec<char>),
    /// Byte offset and byte length. A group that did not take part in the
    /// match is `(-1, 0)`.
    Index { offset: isize, length: usize },
}

impl Fragment {
    /// The value of a group that did not take part in a match.
    #[must_use]
    pub fn absent(mode: ReturnMode) -> Self {
        match mode {
            ReturnMode::Binary => Fragment::Binary(String::new()),
            ReturnMode::List => Fragment::List(Vec::new()),
            ReturnMode::Index => Fragment::Index {
                offset: -1,
                length: 0,
            },
        }
    }

    /// Shape the byte range `span` of `text` for `mode`.
    pub(crate) fn from_span(text: &str, span: Range<usize>, mode: ReturnMode) -> Self {
        match mode {
            ReturnMode::Binary => Fragment::Binary(text[span].to_string()),
            ReturnMode::List => Fragment::List(text[span].chars().collect()),
            ReturnMode::Index => Fragment::Index {
                // Subjects are bounded by isize::MAX bytes.
                offset: span.start as isize,
                length: span.len(),
            },
        }
    }

    /// The text of a binary fragment.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Fragment::Binary(text) => Some(text),
            _ => None,
        }
    }

    /// Offset and length of an index fragment.
    #[must_use]
    pub fn as_index(&self) -> Option<(isize, usize)> {
        match *self {
            Fragment::Index { offset, length } => Some((offset, length)),
            _ => None,
        }
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Binary(text.to_string())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Binary(text) => f.write_str(text),
            Fragment::List(chars) => chars.iter().try_for_each(|ch| write!(f, "{ch}")),
            Fragment::Index { offset, length } => write!(f, "{{{offset}, {length}}}"),
        }
    }
}

/// A whole text produced by `replace` and `escape`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Text {
    Binary(String),
    List(Vec<char>),
}

impl Text {
    /// Wrap `text` in the shape `mode` asks for. Index mode has no whole-text
    /// form and yields a binary.
    pub(crate) fn shaped(text: String, mode: ReturnMode) -> Self {
        match mode {
            ReturnMode::List => Text::List(text.chars().collect()),
            ReturnMode::Binary | ReturnMode::Index => Text::Binary(text),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Text::Binary(text) => Some(text),
            Text::List(_) => None,
        }
    }

    /// Convert to a `String` regardless of shape.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Text::Binary(text) => text,
            Text::List(chars) => chars.into_iter().collect(),
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Text::Binary(text) => f.write_str(text),
            Text::List(chars) => chars.iter().try_for_each(|ch| write!(f, "{ch}")),
        }
    }
}
