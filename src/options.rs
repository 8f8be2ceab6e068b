//! Option translation: human flag strings to engine flags.
//!
//! | char | flag                         |
//! |------|------------------------------|
//! | `i`  | [`Flag::Caseless`]           |
//! | `s`  | [`Flag::DotAll`]             |
//! | `m`  | [`Flag::Multiline`]          |
//! | `x`  | [`Flag::Extended`]           |
//! | `f`  | [`Flag::Firstline`]          |
//! | `r`  | [`Flag::Ungreedy`]           |
//! | `g`  | [`Flag::Groups`]             |
//! | `u`  | accepted, no effect (deprecated) |

use std::collections::BTreeSet;

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};

/// A single compile flag.
///
/// Declaration order is the canonical order of translated flag lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    /// Match on Unicode code points. Always present after translation.
    Unicode,
    Caseless,
    /// `.` also matches `\n`.
    DotAll,
    /// `^` and `$` match at line boundaries.
    Multiline,
    /// Whitespace and `#` comments in the source are ignored.
    Extended,
    /// An unanchored match must start at or before the first newline after
    /// the search start.
    Firstline,
    /// Swap greedy and lazy quantifiers.
    Ungreedy,
    /// Not an engine flag: requests named-group discovery at compile time.
    Groups,
}

impl Flag {
    /// Whether the engine sees this flag; [`Flag::Groups`] is stripped.
    #[must_use]
    pub fn is_engine_flag(self) -> bool {
        !matches!(self, Flag::Groups)
    }

    /// The option character that produces this flag, if any.
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        match self {
            Flag::Unicode => None,
            Flag::Caseless => Some('i'),
            Flag::DotAll => Some('s'),
            Flag::Multiline => Some('m'),
            Flag::Extended => Some('x'),
            Flag::Firstline => Some('f'),
            Flag::Ungreedy => Some('r'),
            Flag::Groups => Some('g'),
        }
    }
}

const UNICODE_U_NOTICE: &str =
    "the \"u\" regex option is deprecated and has no effect, unicode matching is always on";

/// Translate an option string into a canonical flag list.
///
/// Translation stops at the first unknown character and reports the rest of
/// the string from that character on. The result is sorted and deduplicated,
/// so it depends only on the set of characters present.
pub fn translate(options: &str, diagnostics: &dyn Diagnostics) -> Result<Vec<Flag>> {
    let mut flags = BTreeSet::from([Flag::Unicode]);
    let mut warned = false;

    for (at, ch) in options.char_indices() {
        let flag = match ch {
            'i' => Flag::Caseless,
            's' => Flag::DotAll,
            'm' => Flag::Multiline,
            'x' => Flag::Extended,
            'f' => Flag::Firstline,
            'r' => Flag::Ungreedy,
            'g' => Flag::Groups,
            // Legacy unicode marker; unicode is always on.
            'u' => {
                if !warned {
                    diagnostics.deprecated(UNICODE_U_NOTICE);
                    warned = true;
                }
                continue;
            }
            _ => {
                return Err(Error::InvalidOption {
                    remainder: options[at..].to_string(),
                });
            }
        };
        flags.insert(flag);
    }

    log::debug!("translated regex options {options:?} to {flags:?}");
    Ok(flags.into_iter().collect())
}

/// Render flags back into an option string (inverse of [`translate`] for
/// everything except the legacy spellings).
#[must_use]
pub fn render(flags: &[Flag]) -> String {
    let set: BTreeSet<Flag> = flags.iter().copied().collect();
    set.into_iter().filter_map(Flag::as_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordedDiagnostics;

    fn tr(options: &str) -> Result<Vec<Flag>> {
        translate(options, &RecordedDiagnostics::new())
    }

    #[test]
    fn empty_string_yields_unicode_only() {
        assert_eq!(tr("").unwrap(), vec![Flag::Unicode]);
    }

    #[test]
    fn order_and_repetition_do_not_matter() {
        let a = tr("imsx").unwrap();
        let b = tr("xsmi").unwrap();
        let c = tr("iimmssxxi").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(
            a,
            vec![
                Flag::Unicode,
                Flag::Caseless,
                Flag::DotAll,
                Flag::Multiline,
                Flag::Extended
            ]
        );
    }

    #[test]
    fn every_documented_char_is_accepted() {
        let all = tr("ismxfrg").unwrap();
        assert!(all.contains(&Flag::Firstline));
        assert!(all.contains(&Flag::Ungreedy));
        assert!(all.contains(&Flag::Groups));
    }

    #[test]
    fn legacy_unicode_marker_is_dropped() {
        assert_eq!(tr("u").unwrap(), tr("").unwrap());
        assert_eq!(tr("iu").unwrap(), tr("i").unwrap());
    }

    #[test]
    fn unknown_char_reports_remainder_from_first_invalid() {
        assert_eq!(
            tr("izm").unwrap_err(),
            Error::InvalidOption {
                remainder: "zm".to_string()
            }
        );
        assert_eq!(
            tr("ié").unwrap_err(),
            Error::InvalidOption {
                remainder: "é".to_string()
            }
        );
    }

    #[test]
    fn uppercase_u_is_not_an_option() {
        assert_eq!(
            tr("iU").unwrap_err(),
            Error::InvalidOption {
                remainder: "U".to_string()
            }
        );
    }

    #[test]
    fn u_is_deprecated_once_per_translation() {
        let sink = RecordedDiagnostics::new();
        let flags = translate("uiu", &sink).unwrap();
        assert_eq!(flags, vec![Flag::Unicode, Flag::Caseless]);
        assert_eq!(sink.notices(), vec![UNICODE_U_NOTICE]);

        let sink = RecordedDiagnostics::new();
        let flags = translate("rr", &sink).unwrap();
        assert_eq!(flags, vec![Flag::Unicode, Flag::Ungreedy]);
        assert!(sink.notices().is_empty());
    }

    #[test]
    fn render_is_canonical() {
        assert_eq!(render(&tr("gxi").unwrap()), "ixg");
        assert_eq!(render(&tr("rs").unwrap()), "sr");
    }
}
