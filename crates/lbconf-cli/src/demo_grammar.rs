use std::sync::Arc;
use std::sync::Mutex;

use lbconf::KeywordHandler;
use lbconf::KeywordTree;
use lbconf::KeywordTreeBuilder;

/// Directives the grammar's handlers have recorded, in the order they fired.
pub(crate) type Matches = Arc<Mutex<Vec<String>>>;

fn recorder(matches: &Matches, label: &'static str) -> KeywordHandler {
    let matches = matches.clone();
    Box::new(move |tokens: &[String]| {
        matches
            .lock()
            .unwrap()
            .push(format!("{label}: {}", tokens.join(" ")));
    })
}

/// The small grammar `check` and `dump-keywords` exercise: a `virtual_server`
/// block nesting `delay_loop`, plus the flat `real_server` and `enable`
/// keywords -- enough surface to demonstrate blocks, macro expansion, and
/// `@id` filtering without pulling in a real load-balancer's full keyword
/// set.
pub(crate) fn build(matches: Matches) -> KeywordTree {
    let mut builder = KeywordTreeBuilder::new();
    builder.install_keyword_root(
        "virtual_server",
        Some(recorder(&matches, "virtual_server")),
        true,
    );
    builder.install_keyword("delay_loop", Some(recorder(&matches, "delay_loop")));
    builder.install_keyword_root("real_server", Some(recorder(&matches, "real_server")), true);
    builder.install_keyword_root("enable", Some(recorder(&matches, "enable")), true);
    builder.build()
}
