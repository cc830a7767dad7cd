use crate::ByteSpan;
use crate::ParseWarning;
use crate::Token;

/// The result of tokenizing one logical line.
///
/// `tokens` is `None` for blank lines and pure-comment lines. `warning` is
/// set when the line was malformed (currently: an unterminated quoted
/// string) but tokenizing still recovered whatever tokens it could.
#[derive(Debug, Clone, Default)]
pub struct TokenizeResult {
    tokens: Option<Vec<Token>>,
    warning: Option<ParseWarning>,
}

impl TokenizeResult {
    pub fn tokens(&self) -> Option<&[Token]> {
        self.tokens.as_deref()
    }

    pub fn into_tokens(self) -> Option<Vec<Token>> {
        self.tokens
    }

    pub fn warning(&self) -> Option<&ParseWarning> {
        self.warning.as_ref()
    }
}

/// Tokenizes one logical line per the grammar's lexical rules:
///
/// - Leading whitespace is skipped.
/// - A line whose first non-whitespace character is end-of-line, `!`, or `#`
///   produces no tokens.
/// - `"..."` groups everything up to the next `"` into a single token with
///   the quotes stripped; a missing closing quote truncates the line with a
///   [`ParseWarning::UnterminatedQuote`].
/// - Otherwise a token is the maximal run of characters that are not
///   whitespace, `"`, `!`, or `#`.
/// - `!` or `#` outside of a quoted token starts an end-of-line comment.
pub fn tokenize(line: &str) -> TokenizeResult {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let mut pos = skip_whitespace(bytes, 0);

    if pos >= len || matches!(bytes[pos], b'!' | b'#') {
        return TokenizeResult::default();
    }

    let mut tokens = Vec::new();
    loop {
        if bytes[pos] == b'"' {
            let start = pos + 1;
            match memchr::memchr(b'"', &bytes[start..]) {
                Some(offset) => {
                    let end = start + offset;
                    tokens.push(Token::new(&line[start..end], ByteSpan::new(pos, end + 1)));
                    pos = end + 1;
                }
                None => {
                    return TokenizeResult {
                        tokens: Some(tokens),
                        warning: Some(ParseWarning::UnterminatedQuote {
                            span: ByteSpan::new(pos, len),
                        }),
                    };
                }
            }
        } else {
            let start = pos;
            while pos < len && !matches!(bytes[pos], b' ' | b'\t' | b'"' | b'!' | b'#') {
                pos += 1;
            }
            tokens.push(Token::new(&line[start..pos], ByteSpan::new(start, pos)));
        }

        pos = skip_whitespace(bytes, pos);
        if pos >= len || matches!(bytes[pos], b'!' | b'#') {
            break;
        }
    }

    TokenizeResult {
        tokens: Some(tokens),
        warning: None,
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t') {
        pos += 1;
    }
    pos
}

