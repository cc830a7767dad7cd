use std::path::PathBuf;

/// Every way a load of one or more configuration files can fail.
///
/// Most variants here are never fatal on their own — the stream processor
/// and preprocessor log them via the `log` crate and keep going, exactly as
/// the taxonomy in the grammar's error-handling design describes. Only
/// [`Error::MissingParameter`] is returned all the way up to the caller as a
/// hard stop; everything else is surfaced here purely so callers that want
/// to collect diagnostics (the CLI's `check` command, for instance) can do
/// so without scraping log output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid include pattern {pattern}: {source}")]
    BadGlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("line starting `{head}` is missing a '{{' at the start of its block")]
    MissingOpenBrace { head: String },

    #[error("unexpected '{{' - ignoring")]
    UnexpectedOpenBrace,

    #[error("unexpected '}}' - ignoring")]
    UnexpectedCloseBrace,

    #[error("unknown keyword '{keyword}'")]
    UnknownKeyword { keyword: String },

    #[error("malformed definition line '{line}' - ignoring")]
    MalformedDefinition { line: String },

    #[error("parameter substitution on line '{line}' would exceed the maximum line length")]
    LineTooLong { line: String },

    #[error("expansion of multiline definition within multiline definitions not supported")]
    UnsupportedNestedMultiline,

    #[error(
        "configuration line starting `{head}` is missing a parameter after \
        keyword `{keyword}` at word position {position}"
    )]
    MissingParameter {
        head: String,
        keyword: String,
        position: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
