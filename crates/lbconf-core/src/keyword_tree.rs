use crate::CloseHandler;
use crate::KeywordHandler;
use crate::KeywordNode;

/// The immutable, fully registered keyword grammar a load is matched
/// against.
///
/// Built once via [`KeywordTreeBuilder`] and then frozen — nothing in the
/// stream processor ever mutates it.
#[derive(Debug)]
pub struct KeywordTree {
    roots: Vec<KeywordNode>,
}

impl KeywordTree {
    pub fn root_level(&self) -> &[KeywordNode] {
        &self.roots
    }
}

/// Builds a [`KeywordTree`] one registration call at a time.
///
/// This replaces the original implementation's module-level `sublevel`
/// counter with ordinary builder state: each `install_*` call is a method on
/// `self`, so registration order and depth tracking are local to whichever
/// code is assembling the grammar rather than shared process-wide globals.
#[derive(Debug, Default)]
pub struct KeywordTreeBuilder {
    roots: Vec<KeywordNode>,
    sublevel: usize,
}

impl KeywordTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a top-level keyword. When `active` is false, `handler` is
    /// discarded immediately — an inactive keyword's handler must never run.
    pub fn install_keyword_root(
        &mut self,
        name: impl Into<String>,
        handler: Option<KeywordHandler>,
        active: bool,
    ) -> &mut Self {
        self.roots.push(KeywordNode {
            name: name.into(),
            handler: if active { handler } else { None },
            active,
            sub: None,
            close_handler: None,
        });
        self
    }

    /// Registers a keyword nested under the most recently installed
    /// top-level keyword, at the depth tracked by `install_sublevel`/
    /// `install_sublevel_end`. Silently ignored if that top-level keyword is
    /// inactive.
    pub fn install_keyword(
        &mut self,
        name: impl Into<String>,
        handler: Option<KeywordHandler>,
    ) -> &mut Self {
        let Some(root) = self.roots.last_mut() else {
            panic!("install_keyword called before any install_keyword_root");
        };
        if !root.active {
            return self;
        }
        let target = Self::descend(root, self.sublevel);
        target
            .sub
            .get_or_insert_with(Vec::new)
            .push(KeywordNode {
                name: name.into(),
                handler,
                active: true,
                sub: None,
                close_handler: None,
            });
        self
    }

    pub fn install_sublevel(&mut self) -> &mut Self {
        self.sublevel += 1;
        self
    }

    pub fn install_sublevel_end(&mut self) -> &mut Self {
        self.sublevel = self
            .sublevel
            .checked_sub(1)
            .expect("install_sublevel_end called without a matching install_sublevel");
        self
    }

    /// Attaches a close-handler to the most recently installed *top-level*
    /// keyword, regardless of the current sublevel depth.
    pub fn install_root_end_handler(&mut self, handler: CloseHandler) -> &mut Self {
        let Some(root) = self.roots.last_mut() else {
            panic!("install_root_end_handler called before any install_keyword_root");
        };
        if root.active {
            root.close_handler = Some(handler);
        }
        self
    }

    /// Attaches a close-handler to the node at the current sublevel depth
    /// under the most recently installed top-level keyword.
    pub fn install_sublevel_end_handler(&mut self, handler: CloseHandler) -> &mut Self {
        let Some(root) = self.roots.last_mut() else {
            panic!("install_sublevel_end_handler called before any install_keyword_root");
        };
        if !root.active {
            return self;
        }
        let target = Self::descend(root, self.sublevel);
        target.close_handler = Some(handler);
        self
    }

    fn descend(mut node: &mut KeywordNode, depth: usize) -> &mut KeywordNode {
        for _ in 0..depth {
            let sub = node
                .sub
                .as_mut()
                .expect("sublevel deeper than any registered keyword has a block");
            node = sub
                .last_mut()
                .expect("sublevel deeper than any registered keyword has children");
        }
        node
    }

    pub fn build(self) -> KeywordTree {
        KeywordTree { roots: self.roots }
    }
}
