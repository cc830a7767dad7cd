use crate::DefinitionStore;

/// How the stream processor is currently treating lines with respect to an
/// inactive or skipped `{ … }` block.
///
/// Replaces the original implementation's two module globals
/// (`skip_sublevel` used both as a brace-depth counter and, via the sentinel
/// value `-1`, as a "waiting to see whether a block follows at all" flag)
/// with an explicit enum — the two meanings never need to be disentangled by
/// the reader again.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SkipState {
    #[default]
    NotSkipping,
    /// An inactive keyword matched but its `{` has not yet been seen; the
    /// *next* line decides whether there is a block to skip at all.
    PendingBob,
    /// Currently inside an inactive or otherwise-skipped block, `n` `{`
    /// deeper than the one that triggered the skip.
    Skipping(u32),
}

/// The single threaded record a load is driven through, replacing every
/// module-global the original implementation kept for the duration of a
/// parse (`keywords`, `current_keywords`, `current_stream`, `sublevel`,
/// `skip_sublevel`, `kw_level`, `defs`, `config_id`).
///
/// Created fresh at the start of one `FileLoader::load` and dropped at its
/// end; nothing about it is process-wide, so two independent loads (even on
/// separate threads, one at a time per context) never interfere.
///
/// Deliberately does *not* own the [`crate::KeywordTree`] being matched
/// against: every function that needs a keyword level (`file_loader::load`,
/// `stream_processor::process_stream`) takes it as an explicit `&[KeywordNode]`
/// parameter instead. Storing the tree here and also handing out `&[KeywordNode]`
/// borrowed from it would tie up `ctx` for the borrow's lifetime, yet those
/// same call sites need a concurrent `&mut ParseContext` to update `defs` and
/// `skip_sublevel` — threading the level alongside `ctx` rather than through
/// it sidesteps that self-borrow entirely.
#[derive(Debug)]
pub struct ParseContext {
    skip_sublevel: SkipState,
    kw_level: u32,
    defs: DefinitionStore,
    config_id: Option<String>,
    max_line_len: usize,
}

impl ParseContext {
    pub fn new(config_id: Option<String>, max_line_len: usize) -> Self {
        Self {
            skip_sublevel: SkipState::NotSkipping,
            kw_level: 0,
            defs: DefinitionStore::new(),
            config_id,
            max_line_len,
        }
    }

    pub fn config_id(&self) -> Option<&str> {
        self.config_id.as_deref()
    }

    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    pub fn defs(&self) -> &DefinitionStore {
        &self.defs
    }

    pub fn defs_mut(&mut self) -> &mut DefinitionStore {
        &mut self.defs
    }

    pub fn skip_state(&self) -> SkipState {
        self.skip_sublevel
    }

    pub(crate) fn set_skip_state(&mut self, state: SkipState) {
        self.skip_sublevel = state;
    }

    /// Public hook a keyword handler calls to force the block it is already
    /// inside to be abandoned, regardless of whether the keyword itself is
    /// marked active. Mirrors the original's `skip_block()`
    /// (`skip_sublevel = 1`): a handler runs after any same-line `{` has
    /// already been stripped and consumed, so by the time it calls this the
    /// block has already been entered, not merely announced — `Skipping(1)`
    /// is the state that starts discarding tokens immediately, where
    /// `PendingBob` would instead wait for a `{` that will never come on a
    /// `keyword {`-on-one-line block and let the body parse normally.
    pub fn skip_block(&mut self) {
        self.skip_sublevel = SkipState::Skipping(1);
    }

    pub(crate) fn kw_level(&self) -> u32 {
        self.kw_level
    }

    pub(crate) fn enter_level(&mut self) {
        self.kw_level += 1;
    }

    pub(crate) fn leave_level(&mut self) {
        self.kw_level -= 1;
    }

    /// Drops every accumulated `$NAME=value` definition. Called once the
    /// top-level `load` completes — never from within a nested `include`.
    pub fn clear_definitions(&mut self) {
        self.defs.clear();
    }
}
