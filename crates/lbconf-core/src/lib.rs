//! The keyword tree, macro preprocessor, and stream processor behind the
//! lbconf configuration grammar.
//!
//! This crate owns everything past tokenization: registering a keyword
//! grammar, reading a configuration file (or tree of `include`d files) line
//! by line with macros expanded and `@id` filters applied, and matching each
//! logical line's tokens against the grammar to invoke the caller's
//! handlers. Tokenizing a single logical line is delegated to
//! [`lbconf_parser`], which this crate depends on but does not re-export in
//! full — only [`Error`] and the handful of registration/extraction types a
//! caller needs are public here.

mod context;
mod definition;
mod definition_store;
mod error;
mod extract;
mod file_loader;
mod keyword;
mod keyword_tree;
mod preprocessor;
mod stream_processor;

pub use context::ParseContext;
pub use context::SkipState;
pub use definition::Definition;
pub use definition_store::DefinitionStore;
pub use error::Error;
pub use error::Result;
pub use extract::nth_bool;
pub use extract::nth_str;
pub use extract::nth_timer;
pub use extract::nth_u64;
pub use extract::read_value_block;
pub use extract::TIMER_HZ;
pub use file_loader::load as load_pattern;
pub use keyword::CloseHandler;
pub use keyword::KeywordHandler;
pub use keyword::KeywordNode;
pub use keyword_tree::KeywordTree;
pub use keyword_tree::KeywordTreeBuilder;
pub use preprocessor::LineSource;
pub use stream_processor::process_stream;

/// Loads `pattern` (a single path, or a glob) as a top-level configuration
/// file against `keywords`, driving the preprocessor and stream processor
/// over every matched file and any `include`s they pull in.
///
/// This is the crate's single entry point: a caller registers a grammar with
/// [`KeywordTreeBuilder`], builds it, and passes the result here together
/// with an optional `config_id` (for `@id` filtering) and a maximum line
/// length. Definitions accumulated while loading do not survive past this
/// call returning, matching the grammar's top-level load/definition-clear
/// lifecycle.
pub fn load(
    keywords: &KeywordTree,
    config_id: Option<String>,
    max_line_len: usize,
    pattern: &str,
) -> Result<()> {
    let mut ctx = ParseContext::new(config_id, max_line_len);
    load_pattern(&mut ctx, keywords.root_level(), pattern)
}

#[cfg(test)]
mod tests;
