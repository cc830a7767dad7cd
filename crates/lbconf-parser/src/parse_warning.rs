use crate::ByteSpan;

/// A recoverable condition raised by the tokenizer.
///
/// The tokenizer never aborts a line on its own account: when one of these
/// fires, it still returns whatever tokens it had already collected.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ParseWarning {
    /// A `"` was opened but no matching closing `"` was found before the
    /// end of the line.
    #[error("unterminated quoted string starting at byte {}", .span.start())]
    UnterminatedQuote { span: ByteSpan },
}
