/// A handler invoked with the tokens of a matched configuration line.
///
/// The first token is always the keyword itself; callers that only care
/// about the arguments typically skip it.
pub type KeywordHandler = Box<dyn Fn(&[String]) + Send>;

/// A handler invoked once a keyword's `{ … }` block has fully closed.
pub type CloseHandler = Box<dyn Fn() + Send>;

/// One entry in the keyword tree.
///
/// A node occupies a slot in the grammar whether or not it is `active`: an
/// inactive keyword is still recognized (so its `{ … }` block is correctly
/// skipped rather than falling through as "unknown keyword"), it simply has
/// no handler invoked and its sub-block, if any, is never descended into.
pub struct KeywordNode {
    pub(crate) name: String,
    pub(crate) handler: Option<KeywordHandler>,
    pub(crate) active: bool,
    pub(crate) sub: Option<Vec<KeywordNode>>,
    pub(crate) close_handler: Option<CloseHandler>,
}

impl KeywordNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_block(&self) -> bool {
        self.sub.is_some()
    }

    pub fn children(&self) -> &[KeywordNode] {
        self.sub.as_deref().unwrap_or(&[])
    }

    pub fn handler(&self) -> Option<&KeywordHandler> {
        self.handler.as_ref()
    }

    pub fn close_handler(&self) -> Option<&CloseHandler> {
        self.close_handler.as_ref()
    }
}

impl std::fmt::Debug for KeywordNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordNode")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("has_handler", &self.handler.is_some())
            .field("has_close_handler", &self.close_handler.is_some())
            .field("sub", &self.sub)
            .finish()
    }
}
