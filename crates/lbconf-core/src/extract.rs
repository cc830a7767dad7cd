use crate::Error;
use crate::LineSource;
use crate::ParseContext;

/// Microsecond tick rate a `nth_timer` integer-seconds argument is scaled by.
pub const TIMER_HZ: u64 = 1_000_000;

fn nth<'t>(tokens: &'t [String], head: &str, keyword: &str, n: usize) -> Result<&'t str, Error> {
    tokens
        .get(n)
        .map(String::as_str)
        .ok_or_else(|| Error::MissingParameter {
            head: head.to_string(),
            keyword: keyword.to_string(),
            position: n,
        })
}

/// Returns `tokens[n]` as a string slice, or `Error::MissingParameter` if the
/// line does not have that many words. `head`/`keyword` are carried only for
/// the error message (the original's `null_strvec` hook logged the same
/// information before aborting).
pub fn nth_str<'t>(tokens: &'t [String], keyword: &str, n: usize) -> Result<&'t str, Error> {
    nth(tokens, tokens.first().map(String::as_str).unwrap_or(""), keyword, n)
}

pub fn nth_u64(tokens: &[String], keyword: &str, n: usize) -> Result<u64, Error> {
    let raw = nth_str(tokens, keyword, n)?;
    raw.parse().map_err(|_| Error::MissingParameter {
        head: tokens.first().map(String::as_str).unwrap_or("").to_string(),
        keyword: keyword.to_string(),
        position: n,
    })
}

/// Integer seconds scaled to `TIMER_HZ` ticks, saturating rather than
/// wrapping on overflow (the original's `read_timer` clamps to `ULONG_MAX`
/// under the same condition).
pub fn nth_timer(tokens: &[String], keyword: &str, n: usize) -> Result<u64, Error> {
    let seconds = nth_u64(tokens, keyword, n)?;
    Ok(seconds.saturating_mul(TIMER_HZ))
}

/// `true`/`on`/`yes` → `Ok(true)`, `false`/`off`/`no` → `Ok(false)`, anything
/// else → `Err`. The original's `check_true_false` returns `-1` for this
/// case; Rust has no need for an in-band error sentinel.
pub fn nth_bool(tokens: &[String], keyword: &str, n: usize) -> Result<bool, Error> {
    match nth_str(tokens, keyword, n)? {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => Err(Error::MissingParameter {
            head: tokens.first().map(String::as_str).unwrap_or("").to_string(),
            keyword: format!("{keyword} (expected on/off, got '{other}')"),
            position: n,
        }),
    }
}

/// Reads a keyword's value as a flat token sequence rather than descending
/// the keyword tree into a sub-block.
///
/// `head_tokens` is the tokens of the line that introduced the block, as a
/// [`crate::KeywordHandler`] receives them. If a `{` token in `head_tokens`
/// is followed by further tokens on the same line (e.g. `values { 10 20 }`),
/// those trailing tokens are the whole value and no further lines are read.
/// Otherwise (the line ends in a bare `{`), successive logical lines are read
/// from `lines` and tokenized until one whose only token is `}`; every token
/// from every line in between is appended to the result.
///
/// This bypasses `process_stream`'s normal keyword-tree descent, so it is
/// meant for a node with no registered `sub` (`has_block() == false`) whose
/// caller drives `LineSource`/`ParseContext` directly rather than only
/// through a `KeywordHandler` callback — mirroring the original grammar's
/// `read_value_block`, which any handler could call because the stream it
/// read from was a process-wide global.
pub fn read_value_block(
    ctx: &mut ParseContext,
    lines: &mut LineSource,
    head_tokens: &[String],
) -> Result<Vec<String>, Error> {
    if let Some(bob_pos) = head_tokens.iter().position(|t| t == "{") {
        let mut rest = head_tokens[bob_pos + 1..].to_vec();
        if !rest.is_empty() {
            if rest.last().map(String::as_str) == Some("}") {
                rest.pop();
            }
            return Ok(rest);
        }
    }

    let mut values = Vec::new();
    while let Some(line) = lines.read_line(ctx)? {
        let result = lbconf_parser::tokenize(&line);
        let Some(tokens) = result.into_tokens() else {
            continue;
        };
        if tokens.len() == 1 && tokens[0].as_ref() == "}" {
            break;
        }
        values.extend(tokens.into_iter().map(|t| t.into_text()));
    }
    Ok(values)
}
