//! Compiled patterns and the compile entry points.

use std::fmt;
use std::sync::Arc;

use crate::config::MatchOptions;
use crate::diagnostics::{Diagnostics, default_sink};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::options::{self, Flag};
use crate::text::{Fragment, Subject, Text};

/// A compiled pattern.
///
/// Immutable once built and cheap to clone. Build one with [`compile`],
/// [`compile_with_flags`], [`compile_or_fail`] or a [`Compiler`].
#[derive(Clone)]
pub struct Pattern {
    pub(crate) engine: Engine,
    source: String,
    option_string: String,
    flags: Vec<Flag>,
    group_names: Option<Vec<String>>,
    pub(crate) diagnostics: Arc<dyn Diagnostics>,
}

impl Pattern {
    /// The source text exactly as given to the compiler.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The option string used to compile; empty when compiled from a flag
    /// list.
    #[must_use]
    pub fn option_string(&self) -> &str {
        &self.option_string
    }

    /// Flags the engine compiled with (group discovery excluded).
    #[must_use]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Named groups in source order, or `None` if the pattern was compiled
    /// without group discovery.
    #[must_use]
    pub fn group_names(&self) -> Option<&[String]> {
        self.group_names.as_deref()
    }

    /// Names of the named groups as reported by the engine, sorted.
    ///
    /// Unlike [`Pattern::group_names`] this never requires discovery.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.engine.names().map(str::to_string).collect();
        names.sort();
        names
    }

    /// Number of capture groups, counting the whole match as group 0.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.engine.capture_count()
    }

    /// See [`crate::test`].
    #[must_use]
    pub fn test<'a>(&self, subject: impl Into<Subject<'a>>) -> bool {
        crate::ops::test(self, subject)
    }

    /// See [`crate::run`].
    pub fn run<'a>(
        &self,
        subject: impl Into<Subject<'a>>,
        opts: &MatchOptions,
    ) -> Result<Option<Vec<Fragment>>> {
        crate::ops::run(self, subject, opts)
    }

    /// See [`crate::scan`].
    pub fn scan<'a>(
        &self,
        subject: impl Into<Subject<'a>>,
        opts: &MatchOptions,
    ) -> Result<Vec<Vec<Fragment>>> {
        crate::ops::scan(self, subject, opts)
    }

    /// See [`crate::split`].
    #[must_use]
    pub fn split<'a>(&self, subject: impl Into<Subject<'a>>, opts: &MatchOptions) -> Vec<Fragment> {
        crate::ops::split(self, subject, opts)
    }

    /// See [`crate::replace`].
    #[must_use]
    pub fn replace<'a>(
        &self,
        subject: impl Into<Subject<'a>>,
        template: &str,
        opts: &MatchOptions,
    ) -> Text {
        crate::ops::replace(self, subject, template, opts)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("option_string", &self.option_string)
            .field("flags", &self.flags)
            .field("group_names", &self.group_names)
            .finish_non_exhaustive()
    }
}

/// Renders as `~r/source/options`. Flag-list patterns render their flags.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = if self.option_string.is_empty() {
            let mut flags = self.flags.clone();
            if self.group_names.is_some() {
                flags.push(Flag::Groups);
            }
            options::render(&flags)
        } else {
            self.option_string.clone()
        };
        write!(f, "~r/{}/{}", self.source, opts)
    }
}

/// Builds patterns, optionally with a custom deprecation sink.
///
/// ```
/// use std::sync::Arc;
/// use kodegen_regex::{Compiler, RecordedDiagnostics};
///
/// let sink = Arc::new(RecordedDiagnostics::new());
/// let pattern = Compiler::new()
///     .diagnostics(sink.clone())
///     .compile("a+", "u")
///     .unwrap();
/// assert_eq!(pattern.source(), "a+");
/// assert_eq!(sink.notices().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Compiler {
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            diagnostics: default_sink(),
        }
    }
}

impl Compiler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route deprecation notices, from compiling and from every operation on
    /// the resulting patterns, to `sink`.
    pub fn diagnostics(&mut self, sink: Arc<dyn Diagnostics>) -> &mut Compiler {
        self.diagnostics = sink;
        self
    }

    /// Compile `source` with an option string such as `"im"`.
    pub fn compile(&self, source: &str, opts: &str) -> Result<Pattern> {
        let flags = options::translate(opts, self.diagnostics.as_ref())?;
        self.build(source, opts.to_string(), &flags)
    }

    /// Compile `source` with an already translated flag list.
    pub fn compile_with_flags(&self, source: &str, flags: &[Flag]) -> Result<Pattern> {
        self.build(source, String::new(), flags)
    }

    fn build(&self, source: &str, option_string: String, flags: &[Flag]) -> Result<Pattern> {
        let (engine_flags, discovery): (Vec<Flag>, Vec<Flag>) =
            flags.iter().partition(|flag| flag.is_engine_flag());
        let group_names = (!discovery.is_empty()).then(|| crate::groups::discover(source));

        let engine = Engine::compile(source, &engine_flags).map_err(|failure| {
            log::debug!(
                "failed to compile {source:?}: {} at {}",
                failure.reason,
                failure.offset
            );
            Error::Compile {
                reason: failure.reason,
                offset: failure.offset,
            }
        })?;
        log::debug!("compiled {source:?} with {engine_flags:?}");

        Ok(Pattern {
            engine,
            source: source.to_string(),
            option_string,
            flags: engine_flags,
            group_names,
            diagnostics: self.diagnostics.clone(),
        })
    }
}

/// Compile `source` with an option string, logging deprecations.
pub fn compile(source: &str, opts: &str) -> Result<Pattern> {
    Compiler::new().compile(source, opts)
}

/// Compile `source` with an already translated flag list.
pub fn compile_with_flags(source: &str, flags: &[Flag]) -> Result<Pattern> {
    Compiler::new().compile_with_flags(source, flags)
}

/// Compile a pattern that is known to be valid.
///
/// # Panics
///
/// Panics with `"<reason> at position <offset>"` when the engine rejects the
/// source, or with the invalid option message when `opts` is malformed.
#[must_use]
pub fn compile_or_fail(source: &str, opts: &str) -> Pattern {
    match compile(source, opts) {
        Ok(pattern) => pattern,
        Err(err) => panic!("{err}"),
    }
}
