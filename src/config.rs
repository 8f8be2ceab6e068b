//! Per-call options for the match operations.
//!
//! [`MatchOptions`] deserializes from keyword-style maps such as
//! `{"capture": "all_but_first", "return": "index"}`. Missing keys take
//! their defaults and unknown keys are ignored.

use serde::Deserialize;

use crate::text::ReturnMode;

/// A capture group addressed by number or by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum GroupRef {
    Index(usize),
    Name(String),
}

impl From<usize> for GroupRef {
    fn from(index: usize) -> Self {
        GroupRef::Index(index)
    }
}

impl From<&str> for GroupRef {
    fn from(name: &str) -> Self {
        GroupRef::Name(name.to_string())
    }
}

/// Which capture groups a match reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "CaptureRepr")]
pub enum Capture {
    /// The whole match followed by every group.
    #[default]
    All,
    /// The whole match only.
    First,
    /// Nothing; only whether there was a match.
    None,
    /// Every group, without the whole match.
    AllButFirst,
    /// The named groups, in the order they appear in the pattern source.
    /// Requires a pattern compiled with group discovery.
    Groups,
    /// Exactly these groups, in this order. Unknown names and out of range
    /// numbers report the absent value.
    Explicit(Vec<GroupRef>),
}

impl Capture {
    pub fn explicit<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupRef>,
    {
        Capture::Explicit(groups.into_iter().map(Into::into).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CaptureRepr {
    Keyword(String),
    List(Vec<GroupRef>),
}

impl TryFrom<CaptureRepr> for Capture {
    type Error = String;

    fn try_from(repr: CaptureRepr) -> Result<Self, Self::Error> {
        match repr {
            CaptureRepr::List(groups) => Ok(Capture::Explicit(groups)),
            CaptureRepr::Keyword(word) => match word.as_str() {
                "all" => Ok(Capture::All),
                "first" => Ok(Capture::First),
                "none" => Ok(Capture::None),
                "all_but_first" => Ok(Capture::AllButFirst),
                "groups" | "all_names" => Ok(Capture::Groups),
                other => Err(format!("unknown capture selector {other:?}")),
            },
        }
    }
}

/// Upper bound on the number of pieces `split` produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PartsRepr")]
pub enum Parts {
    #[default]
    Infinity,
    /// At most this many pieces. Zero means unbounded.
    Count(usize),
}

impl Parts {
    pub(crate) fn limit(self) -> Option<usize> {
        match self {
            Parts::Infinity | Parts::Count(0) => None,
            Parts::Count(n) => Some(n),
        }
    }
}

impl From<usize> for Parts {
    fn from(count: usize) -> Self {
        Parts::Count(count)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PartsRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<PartsRepr> for Parts {
    type Error = String;

    fn try_from(repr: PartsRepr) -> Result<Self, Self::Error> {
        match repr {
            PartsRepr::Count(n) => Ok(Parts::Count(n)),
            PartsRepr::Keyword(word) if word == "infinity" => Ok(Parts::Infinity),
            PartsRepr::Keyword(word) => Err(format!("unknown parts value {word:?}")),
        }
    }
}

/// Options shared by `run`, `scan`, `split`, `replace` and
/// `named_captures`. Each operation reads the keys it understands.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Which groups `run`/`scan` report. Default: [`Capture::All`].
    pub capture: Capture,
    /// Result shape. Default: follows the subject (binary in, binary out).
    #[serde(rename = "return")]
    pub return_mode: Option<ReturnMode>,
    /// `replace`: every match or only the first. `split`: `false` forces two
    /// pieces. Default: `true`.
    pub global: bool,
    /// `split`: maximum number of pieces. Default: unbounded.
    pub parts: Parts,
    /// `split`: drop empty pieces. Default: `false`.
    pub trim: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            capture: Capture::All,
            return_mode: None,
            global: true,
            parts: Parts::Infinity,
            trim: false,
        }
    }
}

impl MatchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn capture(mut self, capture: Capture) -> Self {
        self.capture = capture;
        self
    }

    #[must_use]
    pub fn return_mode(mut self, mode: ReturnMode) -> Self {
        self.return_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    #[must_use]
    pub fn parts(mut self, parts: impl Into<Parts>) -> Self {
        self.parts = parts.into();
        self
    }

    #[must_use]
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}
