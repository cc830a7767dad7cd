use crate::Definition;
use crate::Error;
use indexmap::IndexMap;

/// The set of `$NAME=value` macros currently in scope for one top-level
/// configuration load.
///
/// Backed by an `IndexMap` rather than the original implementation's
/// hand-rolled linked list — definition counts in a real deployment are
/// small enough that a flat map with O(1) lookup by name is the simpler and
/// faster choice (see the grammar's design notes on re-architecting this
/// piece).
#[derive(Debug, Default)]
pub struct DefinitionStore {
    defs: IndexMap<String, Definition>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Drops every definition. Called once a top-level file load completes —
    /// definitions never persist across independent loads.
    pub fn clear(&mut self) {
        self.defs.clear();
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.defs.get(name)
    }

    /// Recognizes a `$NAME=VALUE` line, inserting or replacing the named
    /// definition and returning it. Returns `None` if `line` is not a
    /// definition at all.
    ///
    /// When `VALUE` ends in a trailing `\`, the definition is marked
    /// multiline and the trailing backslash (plus any surrounding
    /// whitespace) is trimmed from the stored value before it is recorded —
    /// unlike the original C implementation, which read `def->value` to
    /// decide how much to trim before `def->value` had been assigned.
    pub fn check_definition(&mut self, line: &str) -> Option<&Definition> {
        let body = line.strip_prefix('$')?;
        let mut chars = body.char_indices();
        let (_, first) = chars.next()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }

        let mut eq_pos = None;
        for (i, c) in chars {
            if c == '=' {
                eq_pos = Some(i);
                break;
            }
            if !(c.is_ascii_alphanumeric() || c == '_') {
                return None;
            }
        }
        let eq_pos = eq_pos?;

        let name = &body[..eq_pos];
        let raw_value = &body[eq_pos + 1..];

        let (value, multiline) = match raw_value.strip_suffix('\\') {
            Some(stripped) => {
                let trimmed = stripped.trim_matches(|c: char| c == ' ' || c == '\t');
                (format!("{trimmed}\n"), true)
            }
            None => (raw_value.to_string(), false),
        };

        self.defs.insert(
            name.to_string(),
            Definition {
                name: name.to_string(),
                value,
                multiline,
            },
        );
        self.defs.get(name)
    }

    /// Appends another physical line to a definition that is already open
    /// for multiline accumulation. `continues` mirrors whether `segment`
    /// itself ended in a trailing `\` (already stripped by the caller): when
    /// true, another internal line follows and the sentinel is appended;
    /// when false, this is the final segment.
    pub fn extend_multiline(&mut self, name: &str, segment: &str, continues: bool) {
        if let Some(def) = self.defs.get_mut(name) {
            def.value.push_str(segment);
            if continues {
                def.value.push('\n');
            }
        }
    }

    /// Looks up the definition referenced immediately after a `$` in `rest`
    /// (i.e. `rest` is the text following the `$` itself, which may begin
    /// with `{name}` or a bare `name`).
    ///
    /// Returns the matched definition together with the number of bytes of
    /// `rest` the reference consumed (so the caller can splice over exactly
    /// that span). A multiline definition only matches when the reference is
    /// the entire remainder of the line — spliced into the middle of
    /// another line, a multiline value has nowhere to put its later internal
    /// lines.
    pub(crate) fn find_definition<'s>(&self, rest: &'s str) -> Option<(&Definition, usize)> {
        let (using_braces, name_region) = match rest.strip_prefix('{') {
            Some(after_brace) => (true, after_brace),
            None => (false, rest),
        };

        let mut first_chars = name_region.char_indices();
        let (_, first) = first_chars.next()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }

        let mut name_len = first.len_utf8();
        for (i, c) in name_region.char_indices().skip(1) {
            if c.is_ascii_alphanumeric() || c == '_' {
                name_len = i + c.len_utf8();
            } else {
                break;
            }
        }

        let name = &name_region[..name_len];
        let after_name = &name_region[name_len..];

        let (terminator_len, is_entire_remainder) = if using_braces {
            if !after_name.starts_with('}') {
                return None;
            }
            (1, after_name.len() == 1)
        } else if after_name.is_empty() {
            (0, true)
        } else if after_name.starts_with(' ') || after_name.starts_with('\t') {
            (0, false)
        } else {
            return None;
        };

        let def = self.defs.get(name)?;
        if def.multiline && !is_entire_remainder {
            return None;
        }

        let consumed = if using_braces { 1 } else { 0 } + name_len + terminator_len;
        Some((def, consumed))
    }

    /// Substitutes every `$name` / `${name}` reference in `line`, returning
    /// the expanded line and, if a multiline definition was expanded, the
    /// remaining internal lines as a continuation string the preprocessor
    /// should queue as subsequent logical lines.
    ///
    /// Builds a fresh `String` rather than mutating `line` in place —
    /// shifting bytes around inside a shared buffer is exactly the kind of
    /// fragile, easy-to-get-wrong code a systems-language port should avoid
    /// when the language makes allocation cheap and correctness easy.
    pub fn replace_param(
        &self,
        line: &str,
        max_len: usize,
        in_multiline: bool,
    ) -> Result<(String, Option<String>), Error> {
        let mut out = String::with_capacity(line.len());
        let mut continuation = None;
        let mut rest = line;

        while let Some(idx) = rest.find('$') {
            out.push_str(&rest[..idx]);
            let after_dollar = &rest[idx + 1..];

            let Some((def, consumed)) = self.find_definition(after_dollar) else {
                out.push('$');
                rest = after_dollar;
                continue;
            };

            if def.multiline && in_multiline {
                log::warn!("{}", Error::UnsupportedNestedMultiline);
                out.push('$');
                out.push_str(&after_dollar[..consumed]);
                rest = &after_dollar[consumed..];
                continue;
            }

            match def.value.split_once('\n') {
                Some((first, remainder)) if def.multiline => {
                    out.push_str(first);
                    continuation = Some(remainder.to_string());
                }
                _ => out.push_str(&def.value),
            }
            rest = &after_dollar[consumed..];
        }
        out.push_str(rest);

        if out.len() > max_len {
            return Err(Error::LineTooLong {
                line: line.to_string(),
            });
        }

        Ok((out, continuation))
    }
}
