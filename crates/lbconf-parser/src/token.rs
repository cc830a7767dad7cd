use crate::ByteSpan;

/// A single token produced by [`crate::tokenizer::tokenize`].
///
/// `text` has already had surrounding quotes stripped for quoted tokens, so
/// callers never need to know whether a token originated from `a` or `"a"`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    text: String,
    span: ByteSpan,
}

impl Token {
    pub fn new(text: impl Into<String>, span: ByteSpan) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> ByteSpan {
        self.span
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
