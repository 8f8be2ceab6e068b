//! Literal escaping.

use std::sync::LazyLock;

use crate::engine::Engine;
use crate::ops::Template;
use crate::options::Flag;
use crate::text::{Subject, Text};

/// Characters that are special somewhere in pattern syntax, including the
/// whitespace (Unicode `White_Space`) and `#` that extended mode would
/// otherwise swallow.
static SPECIAL: LazyLock<Engine> = LazyLock::new(|| {
    Engine::compile(r"[.^$*+?()\[\]{}|\\#\-\s]", &[Flag::Unicode])
        .expect("escape class pattern is valid")
});

/// Backslash followed by the whole match.
static PREFIX_BACKSLASH: LazyLock<Template> = LazyLock::new(|| Template::parse(r"\\&"));

/// Escape `subject` so that, compiled as a pattern, it matches itself
/// literally, with or without the `x` option. Binary in gives binary out; a
/// code point list gives a list.
///
/// Non-ASCII whitespace cannot take a backslash escape, so it is written as
/// a `\x{...}` code point escape instead.
///
/// ```
/// use kodegen_regex::{compile, escape, test};
///
/// let escaped = escape("1.5 (approx)").into_string();
/// assert_eq!(escaped, r"1\.5\ \(approx\)");
/// assert!(test(&compile(&escaped, "x").unwrap(), "1.5 (approx)"));
/// ```
#[must_use]
pub fn escape<'a>(subject: impl Into<Subject<'a>>) -> Text {
    let subject = subject.into();
    let text = subject.as_utf8();
    let escaped = SPECIAL.replace(&text, true, |caps, out| {
        let first = caps
            .first()
            .cloned()
            .flatten()
            .and_then(|span| text[span].chars().next());
        match first {
            Some(ch) if !ch.is_ascii() => out.push_str(&format!("\\x{{{:X}}}", u32::from(ch))),
            _ => PREFIX_BACKSLASH.expand(&text, caps, out),
        }
    });
    Text::shaped(escaped, subject.default_return())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchOptions;
    use crate::pattern::compile;
    use crate::text::{Fragment, ReturnMode};

    #[test]
    fn escapes_metacharacters() {
        assert_eq!(
            escape(r".^$*+?()[{\|").into_string(),
            r"\.\^\$\*\+\?\(\)\[\{\\\|"
        );
        assert_eq!(escape("plain").into_string(), "plain");
        assert_eq!(escape("a b\tc").into_string(), "a\\ b\\\tc");
        assert_eq!(escape("a\u{3000}b\u{A0}").into_string(), r"a\x{3000}b\x{A0}");
    }

    #[test]
    fn list_in_list_out() {
        assert_eq!(escape(&['.', 'a']), Text::List(vec!['\\', '.', 'a']));
    }

    #[test]
    fn escaped_text_matches_itself_exactly() {
        let samples = [
            "a.b*c",
            "(x|y)",
            "[a-z]{2,}",
            "$100 ^ 2",
            "back\\slash",
            "tab\tnew\nline",
            "# not a comment",
            "héllo wörld?",
            "ideographic\u{3000}space",
            "no\u{A0}break\u{2028}line",
            "",
        ];
        let opts = MatchOptions::new().return_mode(ReturnMode::Index);
        for sample in samples {
            let escaped = escape(sample).into_string();
            for flags in ["", "x"] {
                let p = compile(&escaped, flags)
                    .unwrap_or_else(|err| panic!("{escaped:?} with {flags:?}: {err}"));
                let found = p.run(sample, &opts).unwrap();
                assert_eq!(
                    found,
                    Some(vec![Fragment::Index {
                        offset: 0,
                        length: sample.len()
                    }]),
                    "{sample:?} with {flags:?}"
                );
            }
        }
        let p = compile(&escape("a.c").into_string(), "").unwrap();
        assert!(!p.test("abc"));
    }
}
