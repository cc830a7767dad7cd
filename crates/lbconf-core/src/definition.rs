/// A macro defined via `$NAME=value` (optionally spanning several physical
/// lines when the value ends in a trailing `\`).
///
/// For a multiline definition, `value` holds its internal lines joined by
/// `'\n'` — chosen as the sentinel because a definition's value is always
/// built from physical lines that have already had their own CR/LF stripped,
/// so `'\n'` can never appear in a line's raw text and is safe to use purely
/// as an internal separator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Definition {
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) multiline: bool,
}

impl Definition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }
}
