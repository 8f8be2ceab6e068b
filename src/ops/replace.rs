//! Substitution with `&` / `\N` templates or a closure.

use super::prepare;
use crate::config::MatchOptions;
use crate::engine::Span;
use crate::pattern::Pattern;
use crate::text::{Subject, Text};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
}

/// A parsed replacement template.
///
/// `&` is the whole match, `\N` and `\g{N}` are group `N` (1-based; `\0` is
/// the whole match too), `\&` and `\\` are a literal `&` and backslash. Any
/// other backslash is kept as is. Groups that did not take part in the match,
/// or do not exist, expand to nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    pub(crate) fn parse(template: &str) -> Template {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        let push_group = |literal: &mut String, pieces: &mut Vec<Piece>, group| {
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(literal)));
            }
            pieces.push(Piece::Group(group));
        };

        while let Some(ch) = chars.next() {
            match ch {
                '&' => push_group(&mut literal, &mut pieces, 0),
                '\\' => match chars.peek().copied() {
                    Some(escaped @ ('&' | '\\')) => {
                        chars.next();
                        literal.push(escaped);
                    }
                    Some(digit) if digit.is_ascii_digit() => {
                        let mut number = String::new();
                        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                            number.push(digit);
                        }
                        push_group(&mut literal, &mut pieces, group_number(&number));
                    }
                    Some('g') => {
                        let mut lookahead = chars.clone();
                        lookahead.next();
                        let braced = if lookahead.next_if_eq(&'{').is_some() {
                            let mut number = String::new();
                            while let Some(digit) = lookahead.next_if(char::is_ascii_digit) {
                                number.push(digit);
                            }
                            (!number.is_empty() && lookahead.next_if_eq(&'}').is_some())
                                .then_some(number)
                        } else {
                            None
                        };
                        match braced {
                            Some(number) => {
                                chars = lookahead;
                                push_group(&mut literal, &mut pieces, group_number(&number));
                            }
                            None => literal.push('\\'),
                        }
                    }
                    _ => literal.push('\\'),
                },
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        Template { pieces }
    }

    /// Append the expansion for one match to `out`.
    pub(crate) fn expand(&self, text: &str, caps: &[Span], out: &mut String) {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(literal) => out.push_str(literal),
                Piece::Group(index) => {
                    if let Some(Some(span)) = caps.get(*index) {
                        out.push_str(&text[span.clone()]);
                    }
                }
            }
        }
    }
}

/// Out of range numbers name a group that cannot exist.
fn group_number(digits: &str) -> usize {
    digits.parse().unwrap_or(usize::MAX)
}

/// Replace matches of `pattern` in `subject` using `template`.
///
/// Every match is replaced unless `opts.global` is false. The result has the
/// subject's shape unless `opts.return_mode` asks for binary or list.
#[must_use]
pub fn replace<'a>(
    pattern: &Pattern,
    subject: impl Into<Subject<'a>>,
    template: &str,
    opts: &MatchOptions,
) -> Text {
    let template = Template::parse(template);
    let prepared = prepare(pattern, subject.into(), Some(opts));
    let text = &*prepared.text;

    let replaced = pattern.engine.replace(text, opts.global, |caps, out| {
        template.expand(text, caps, out);
    });
    Text::shaped(replaced, prepared.mode)
}

/// Replace matches of `pattern` with whatever `replacement` returns.
///
/// The closure receives the whole match followed by every group; groups that
/// did not take part are empty strings.
pub fn replace_with<'a, F>(
    pattern: &Pattern,
    subject: impl Into<Subject<'a>>,
    mut replacement: F,
    opts: &MatchOptions,
) -> Text
where
    F: FnMut(&[&str]) -> String,
{
    let prepared = prepare(pattern, subject.into(), Some(opts));
    let text = &*prepared.text;

    let replaced = pattern.engine.replace(text, opts.global, |caps, out| {
        let groups: Vec<&str> = caps
            .iter()
            .map(|span| span.clone().map_or("", |span| &text[span]))
            .collect();
        out.push_str(&replacement(&groups));
    });
    Text::shaped(replaced, prepared.mode)
}
