//! Error taxonomy for compiling and running patterns.

/// Errors produced while compiling or running a [`crate::Pattern`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The option string contained a character that is not a known flag.
    ///
    /// `remainder` is the rest of the option string starting at the first
    /// unrecognized character.
    #[error("invalid regex option {remainder:?}")]
    InvalidOption { remainder: String },

    /// The engine rejected the pattern source.
    ///
    /// `offset` is a byte offset into the source text.
    #[error("{reason} at position {offset}")]
    Compile { reason: String, offset: usize },

    /// The caller asked for something the pattern cannot provide, such as
    /// named groups on a pattern compiled without group discovery.
    #[error("{0}")]
    Argument(String),
}

impl Error {
    pub(crate) fn groups_not_discovered() -> Self {
        Error::Argument(
            "pattern was not compiled with group discovery (add the \"g\" option)"
                .to_string(),
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
