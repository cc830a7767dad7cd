#[doc = include_str!("../../../README.md")]

pub use lbconf_core::*;

/// Lexing primitives ([`tokenize`](tokenizer::tokenize), [`Token`](tokenizer::Token),
/// [`ByteSpan`](tokenizer::ByteSpan)) for callers who want to tokenize a
/// logical line themselves without going through [`process_stream`].
pub mod tokenizer {
    pub use lbconf_parser::tokenize;
    pub use lbconf_parser::ByteSpan;
    pub use lbconf_parser::ParseWarning;
    pub use lbconf_parser::Token;
    pub use lbconf_parser::TokenizeResult;
}
