use std::collections::VecDeque;
use std::io::BufRead;
use std::io::BufReader;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use crate::context::ParseContext;
use crate::keyword::KeywordNode;
use crate::Error;

/// Tracks a `$NAME=value` definition that is still accumulating subsequent
/// physical lines because the most recent one it saw ended in `\`.
struct OpenMultiline {
    name: String,
}

/// A single physical source of configuration lines (one opened file),
/// layering macro expansion, `@id` filtering, and `include` resolution over
/// raw physical reads.
///
/// `level` is the keyword level active at the point this file was opened —
/// for the top-level file that's the grammar root, for an `include`d file
/// it's whatever level the `include` line itself appeared at. The original
/// implementation resumed parsing of an included file at whatever
/// `current_keywords` happened to be set to; here that's simply the slice
/// this `LineSource` was constructed with, no global needed.
pub struct LineSource<'k> {
    reader: BufReader<File>,
    level: &'k [KeywordNode],
    path: PathBuf,
    pending: VecDeque<String>,
    open_multiline: Option<OpenMultiline>,
    raw: String,
}

impl<'k> LineSource<'k> {
    pub fn open(path: impl AsRef<Path>, level: &'k [KeywordNode]) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            reader: BufReader::new(file),
            level,
            path,
            pending: VecDeque::new(),
            open_multiline: None,
            raw: String::new(),
        })
    }

    pub fn level(&self) -> &'k [KeywordNode] {
        self.level
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads one physical line, stripping the trailing `\r`/`\n`. `Ok(None)`
    /// at end of file.
    fn read_physical(&mut self) -> Result<Option<String>, Error> {
        self.raw.clear();
        let n = self.reader.read_line(&mut self.raw).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        if n == 0 {
            return Ok(None);
        }
        while self.raw.ends_with('\n') || self.raw.ends_with('\r') {
            self.raw.pop();
        }
        Ok(Some(std::mem::take(&mut self.raw)))
    }

    /// Produces the next logical line, or `Ok(None)` at end of input.
    /// `include` directives are resolved inline and never themselves
    /// surface as a returned line.
    pub fn read_line(&mut self, ctx: &mut ParseContext) -> Result<Option<String>, Error> {
        loop {
            let (mut physical, in_multiline_expansion) = match self.pending.pop_front() {
                Some(line) => (line, true),
                None => match self.read_physical()? {
                    Some(line) => (line, false),
                    None => return Ok(None),
                },
            };

            if let Some(open) = self.open_multiline.take() {
                let trimmed = physical.trim_matches(|c: char| c == ' ' || c == '\t');
                match trimmed.strip_suffix('\\') {
                    Some(segment) => {
                        let segment = segment.trim_end_matches(|c: char| c == ' ' || c == '\t');
                        ctx.defs_mut().extend_multiline(&open.name, segment, true);
                        self.open_multiline = Some(open);
                    }
                    None => {
                        ctx.defs_mut().extend_multiline(&open.name, trimmed, false);
                    }
                }
                continue;
            }

            if physical.trim_matches(|c: char| c == ' ' || c == '\t').is_empty() {
                continue;
            }

            let mut recheck = true;
            while recheck {
                recheck = false;

                let text_start_idx =
                    physical.len() - physical.trim_start_matches(|c: char| c == ' ' || c == '\t').len();
                let text_start = &physical[text_start_idx..];

                if let Some(rest) = text_start.strip_prefix('@') {
                    let (invert, rest) = match rest.strip_prefix('^') {
                        Some(r) => (true, r),
                        None => (false, rest),
                    };
                    let Some(word_end) = rest.find(|c: char| c == ' ' || c == '\t') else {
                        physical.clear();
                        break;
                    };
                    let id = &rest[..word_end];
                    let matches = ctx.config_id() == Some(id);
                    if matches == invert {
                        physical.clear();
                        break;
                    }
                    let consumed = text_start_idx + 1 + if invert { 1 } else { 0 } + word_end;
                    physical.replace_range(..consumed, &" ".repeat(consumed));
                }

                let text_start_idx =
                    physical.len() - physical.trim_start_matches(|c: char| c == ' ' || c == '\t').len();
                let text_start = &physical[text_start_idx..];

                if text_start.starts_with('$') {
                    let first_word = text_start
                        .split(|c: char| c == ' ' || c == '\t')
                        .next()
                        .unwrap_or(text_start);
                    let looks_like_assignment = first_word.contains('=');

                    match ctx.defs_mut().check_definition(text_start) {
                        Some(def) => {
                            if def.is_multiline() {
                                self.open_multiline = Some(OpenMultiline {
                                    name: def.name().to_string(),
                                });
                            }
                            physical.clear();
                            break;
                        }
                        None if looks_like_assignment => {
                            log::warn!(
                                "{}",
                                Error::MalformedDefinition {
                                    line: text_start.to_string(),
                                },
                            );
                            physical.clear();
                            break;
                        }
                        None => {}
                    }
                }

                if !ctx.defs().is_empty() && physical.contains('$') {
                    let max_len = ctx.max_line_len();
                    let (expanded, continuation) = ctx.defs().replace_param(
                        &physical,
                        max_len,
                        in_multiline_expansion,
                    )?;
                    physical = expanded;
                    if let Some(continuation) = continuation {
                        // `continuation` holds the remaining internal lines of
                        // a multiline definition joined by the sentinel; queue
                        // each as its own logical line rather than handing the
                        // tokenizer one line with embedded newlines.
                        for part in continuation.split('\n') {
                            self.pending.push_back(part.to_string());
                        }
                    }
                    let restart = physical.trim_start_matches(|c: char| c == ' ' || c == '\t');
                    if restart.starts_with('@') {
                        recheck = true;
                    }
                }
            }

            if physical.trim_matches(|c: char| c == ' ' || c == '\t').is_empty() {
                continue;
            }

            if let Some(tokens) = lbconf_parser::tokenize(&physical).into_tokens() {
                if tokens.len() == 2 && tokens[0].as_ref() == "include" {
                    let pattern = tokens[1].as_ref().to_string();
                    crate::file_loader::load_included(ctx, self.level, &pattern)?;
                    continue;
                }
            }

            return Ok(Some(physical));
        }
    }
}
