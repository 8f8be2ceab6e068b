//! Option-driven regular expression facade.
//!
//! Compile a pattern once from a source and a short option string, then run
//! it against many subjects with uniform result shaping:
//!
//! ```
//! use kodegen_regex::{MatchOptions, compile, named_captures, run, split};
//!
//! let p = compile("c(?<foo>d)", "g").unwrap();
//! let caps = run(&p, "abcd", &MatchOptions::default()).unwrap().unwrap();
//! assert_eq!(caps[1].as_str(), Some("d"));
//!
//! let named = named_captures(&p, "abcd", &MatchOptions::default()).unwrap().unwrap();
//! assert_eq!(named["foo"].as_str(), Some("d"));
//!
//! let dash = compile("-", "").unwrap();
//! let parts = split(&dash, "a-b-c", &MatchOptions::new().parts(2));
//! assert_eq!(parts.iter().map(ToString::to_string).collect::<Vec<_>>(), ["a", "b-c"]);
//! ```

mod engine;

pub mod config;
pub use config::*;

pub mod diagnostics;
pub use diagnostics::*;

pub mod error;
pub use error::{Error, Result};

pub mod escape;
pub use escape::escape;

pub mod groups;

pub mod ops;
pub use ops::{named_captures, replace, replace_with, run, scan, split, test};

pub mod options;
pub use options::Flag;

pub mod pattern;
pub use pattern::*;

pub mod text;
pub use text::*;
