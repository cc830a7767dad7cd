use std::sync::Arc;
use std::sync::Mutex;

use lbconf::KeywordNode;

use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;

#[derive(Debug, clap::Args)]
pub(crate) struct DumpKeywordsCmd;

#[inherent::inherent]
impl RunnableCommand for DumpKeywordsCmd {
    pub fn run(self, _cli: Cli) -> CommandResult {
        let matches = Arc::new(Mutex::new(Vec::new()));
        let tree = crate::demo_grammar::build(matches);

        let mut rendered = String::new();
        for node in tree.root_level() {
            dump_node(node, 0, &mut rendered);
        }
        CommandResult::stdout(format_args!("{rendered}"))
    }
}

fn dump_node(node: &KeywordNode, depth: usize, rendered: &mut String) {
    let indent = "  ".repeat(depth);
    let suffix = if !node.is_active() {
        " (inactive)"
    } else if node.has_block() {
        " { ... }"
    } else {
        ""
    };
    rendered.push_str(&format!("{indent}{}{suffix}\n", node.name()));
    for child in node.children() {
        dump_node(child, depth + 1, rendered);
    }
}
