use crate::context::ParseContext;
use crate::context::SkipState;
use crate::keyword::KeywordNode;
use crate::preprocessor::LineSource;
use crate::Error;

const BOB: &str = "{";
const EOB: &str = "}";

/// Matches lines read from `lines` against `level`, entering nested `{ … }`
/// blocks by recursing one `level` deeper and invoking handlers along the
/// way. `need_bob` is true when the caller's own line did not end in `{`,
/// meaning the very first line read here must supply it.
///
/// Returns once `lines` reaches end of input (only possible for the
/// outermost, top-level call — a properly nested `}` always returns a
/// deeper call first) or once a `}` closes the block this call is
/// responsible for.
pub fn process_stream(
    ctx: &mut ParseContext,
    lines: &mut LineSource,
    level: &[KeywordNode],
    mut need_bob: bool,
) -> Result<(), Error> {
    loop {
        let Some(line) = lines.read_line(ctx)? else {
            return Ok(());
        };

        let result = lbconf_parser::tokenize(&line);
        if let Some(warning) = result.warning() {
            log::warn!("{warning}");
        }
        let Some(tokens) = result.into_tokens() else {
            continue;
        };
        if tokens.is_empty() {
            continue;
        }
        let mut tokens: Vec<String> = tokens.into_iter().map(|t| t.into_text()).collect();
        let head = tokens[0].as_str();

        match ctx.skip_state() {
            SkipState::PendingBob => {
                if head == BOB {
                    ctx.set_skip_state(SkipState::Skipping(1));
                    continue;
                }
                ctx.set_skip_state(SkipState::NotSkipping);
            }
            SkipState::Skipping(mut depth) => {
                for tok in &tokens {
                    match tok.as_str() {
                        BOB => depth += 1,
                        EOB => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                ctx.set_skip_state(if depth == 0 {
                    SkipState::NotSkipping
                } else {
                    SkipState::Skipping(depth)
                });
                continue;
            }
            SkipState::NotSkipping => {}
        }

        if need_bob {
            need_bob = false;
            if head == BOB && ctx.kw_level() > 0 {
                continue;
            }
            log::info!("{}", Error::MissingOpenBrace { head: head.to_string() });
        } else if head == BOB {
            log::info!("{}", Error::UnexpectedOpenBrace);
            continue;
        }

        if head == EOB {
            if ctx.kw_level() > 0 {
                return Ok(());
            }
            log::info!("{}", Error::UnexpectedCloseBrace);
            continue;
        }

        let Some(node) = level.iter().find(|n| n.name() == head) else {
            log::info!("{}", Error::UnknownKeyword { keyword: head.to_string() });
            continue;
        };

        if !node.is_active() {
            ctx.set_skip_state(if tokens.last().map(String::as_str) == Some(BOB) {
                SkipState::Skipping(1)
            } else {
                SkipState::PendingBob
            });
            continue;
        }

        let bob_needed = if node.has_block() {
            if tokens.last().map(String::as_str) == Some(BOB) {
                tokens.pop();
                false
            } else {
                true
            }
        } else {
            false
        };

        if let Some(handler) = node.handler() {
            handler(&tokens);
        }

        if node.has_block() {
            ctx.enter_level();
            let result = process_stream(ctx, lines, node.children(), bob_needed);
            ctx.leave_level();
            result?;
            if let Some(close) = node.close_handler() {
                close();
            }
        }
    }
}
