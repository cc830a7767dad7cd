use std::env;
use std::path::Path;
use std::path::PathBuf;

use glob::MatchOptions;

use crate::context::ParseContext;
use crate::keyword::KeywordNode;
use crate::preprocessor::LineSource;
use crate::stream_processor;
use crate::Error;

/// Restores the previous working directory on drop, covering every exit
/// path out of a file load (success, `?`-propagated error, or panic
/// unwind) without repeating save/restore bookkeeping at each return site.
struct CwdGuard {
    previous: PathBuf,
}

impl CwdGuard {
    fn enter(dir: &Path) -> std::io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir)?;
        Ok(Self { previous })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Err(source) = env::set_current_dir(&self.previous) {
            log::warn!(
                "failed to restore working directory to {}: {source}",
                self.previous.display(),
            );
        }
    }
}

#[cfg(unix)]
fn is_non_executable_regular_file(path: &Path) -> std::io::Result<bool> {
    use std::os::unix::fs::PermissionsExt;
    let meta = std::fs::metadata(path)?;
    const EXEC_BITS: u32 = 0o111;
    Ok(meta.is_file() && meta.permissions().mode() & EXEC_BITS == 0)
}

#[cfg(not(unix))]
fn is_non_executable_regular_file(path: &Path) -> std::io::Result<bool> {
    Ok(path.is_file())
}

/// Glob-expands `pattern`, then opens and processes every matching
/// non-executable regular file against `level`, relative to the directory
/// each match lives in.
///
/// Called for the top-level configuration file. Definitions accumulated
/// while loading are cleared once this call returns — but only this call:
/// a nested `include` (driven by [`load_included`]) leaves `ctx.defs()`
/// alone, so a `$NAME=value` defined earlier in the including file is still
/// in scope for lines that follow the `include`.
pub fn load(ctx: &mut ParseContext, level: &[KeywordNode], pattern: &str) -> Result<(), Error> {
    load_included(ctx, level, pattern)?;
    ctx.clear_definitions();
    Ok(())
}

/// Glob-expands `pattern` and processes every matching file against `level`,
/// without clearing `ctx.defs()` afterward. Used both by [`load`] (which
/// clears definitions itself, once, after delegating here) and recursively
/// by the preprocessor's `include` handling, so that definitions made before
/// an `include` remain visible in the lines that follow it in the including
/// file.
pub(crate) fn load_included(
    ctx: &mut ParseContext,
    level: &[KeywordNode],
    pattern: &str,
) -> Result<(), Error> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let entries = glob::glob_with(pattern, options).map_err(|source| Error::BadGlobPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut num_matches = 0usize;
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                log::warn!("error reading configuration file(s) matching '{pattern}': {err}");
                continue;
            }
        };

        if path.is_dir() {
            continue;
        }

        match is_non_executable_regular_file(&path) {
            Ok(true) => {}
            Ok(false) => {
                log::warn!(
                    "configuration file '{}' is not a regular non-executable file - skipping",
                    path.display(),
                );
                continue;
            }
            Err(source) => {
                log::warn!(
                    "configuration file '{}' open problem ({source}) - skipping",
                    path.display(),
                );
                continue;
            }
        }

        log::info!("opening file '{}'", path.display());
        num_matches += 1;

        let _guard = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => match CwdGuard::enter(parent) {
                Ok(guard) => Some(guard),
                Err(source) => {
                    log::warn!("chdir({}) error ({source})", parent.display());
                    None
                }
            },
            None => None,
        };

        let file_name = path.file_name().map(PathBuf::from).unwrap_or(path.clone());
        let mut lines = LineSource::open(&file_name, level)?;
        stream_processor::process_stream(ctx, &mut lines, level, false)?;
    }

    if num_matches == 0 {
        log::info!("no config files matched '{pattern}'");
    }

    Ok(())
}
