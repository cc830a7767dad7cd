use crate::KeywordTreeBuilder;
use std::sync::Arc;
use std::sync::Mutex;

use super::support::ScratchDir;

type Calls = Arc<Mutex<Vec<String>>>;

fn recording_handler(calls: &Calls, label: &'static str) -> crate::KeywordHandler {
    let calls = calls.clone();
    Box::new(move |tokens: &[String]| {
        calls.lock().unwrap().push(format!("{label}:{}", tokens.join(" ")));
    })
}

fn recording_close_handler(calls: &Calls, label: &'static str) -> crate::CloseHandler {
    let calls = calls.clone();
    Box::new(move || calls.lock().unwrap().push(label.to_string()))
}

#[test]
fn scenario_1_virtual_server_with_nested_delay_loop() {
    let scratch = ScratchDir::new();
    let path = scratch.write(
        "lb.conf",
        "virtual_server 10.0.0.1 80 {\n  delay_loop 6\n}\n",
    );

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("virtual_server", Some(recording_handler(&calls, "virtual_server")), true);
    b.install_keyword("delay_loop", Some(recording_handler(&calls, "delay_loop")));
    b.install_root_end_handler(recording_close_handler(&calls, "close:virtual_server"));
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "virtual_server:virtual_server 10.0.0.1 80".to_string(),
            "delay_loop:delay_loop 6".to_string(),
            "close:virtual_server".to_string(),
        ],
    );
}

#[test]
fn scenario_2_macro_expansion_into_handler_tokens() {
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "$IP=10.0.0.1\nreal_server $IP 80\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("real_server", Some(recording_handler(&calls, "real_server")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["real_server:real_server 10.0.0.1 80".to_string()]);
}

#[test]
fn scenario_3_comments_and_quoted_tokens() {
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "! a comment\n   # another\nfoo \"bar baz\"\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("foo", Some(recording_handler(&calls, "foo")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["foo:foo bar baz".to_string()]);
}

#[test]
fn scenario_4_config_id_filter_selects_one_of_two_lines() {
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "@prod enable yes\n@^prod enable no\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("enable", Some(recording_handler(&calls, "enable")), true);
    let tree = b.build();

    crate::load(&tree, Some("prod".to_string()), 4096, path.to_str().unwrap()).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["enable:enable yes".to_string()]);
}

#[test]
fn scenario_5_inactive_block_is_entirely_skipped() {
    let scratch = ScratchDir::new();
    let path = scratch.write(
        "lb.conf",
        "inactive_block {\n  inner_keyword value\n  nested { deep }\n}\nactive_keyword v\n",
    );

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("inactive_block", Some(recording_handler(&calls, "inactive_block")), false);
    b.install_keyword_root("active_keyword", Some(recording_handler(&calls, "active_keyword")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["active_keyword:active_keyword v".to_string()]);
}

#[test]
fn scenario_6_include_glob_skips_directories_and_executables() {
    let scratch = ScratchDir::new();
    scratch.mkdir("conf.d/sub");
    scratch.write("conf.d/a.conf", "foo a\n");
    scratch.write("conf.d/b.conf", "foo b\n");
    #[cfg(unix)]
    scratch.make_executable("conf.d/b.conf");
    let main = scratch.write("main.conf", "include conf.d/*.conf\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("foo", Some(recording_handler(&calls, "foo")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, main.to_str().unwrap()).unwrap();

    #[cfg(unix)]
    assert_eq!(*calls.lock().unwrap(), vec!["foo:foo a".to_string()]);
    #[cfg(not(unix))]
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn multiline_definition_expands_to_three_successive_logical_lines() {
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "$Y=line1 \\\nline2 \\\nline3\n$Y\n");

    let mut ctx = crate::ParseContext::new(None, 4096);
    let mut lines = crate::LineSource::open(&path, &[]).unwrap();

    assert_eq!(lines.read_line(&mut ctx).unwrap().as_deref(), Some("line1"));
    assert_eq!(lines.read_line(&mut ctx).unwrap().as_deref(), Some("line2"));
    assert_eq!(lines.read_line(&mut ctx).unwrap().as_deref(), Some("line3"));
    assert_eq!(lines.read_line(&mut ctx).unwrap(), None);
}

#[test]
fn multiline_definition_referenced_alongside_other_tokens_only_splices_first_line() {
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "$Y=line1 \\\nline2 \\\nline3\nfoo $Y\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("foo", Some(recording_handler(&calls, "foo")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    // Only the first internal line is spliced into `foo`'s own logical line;
    // "line2"/"line3" surface afterward as their own bare logical lines,
    // which don't match any registered keyword and are logged-and-skipped.
    assert_eq!(*calls.lock().unwrap(), vec!["foo:foo line1".to_string()]);
}

#[test]
fn include_resolves_relative_paths_against_the_including_files_directory() {
    let scratch = ScratchDir::new();
    scratch.mkdir("nested");
    scratch.write("nested/b.conf", "foo from_nested\n");
    let main = scratch.write("main.conf", "include nested/b.conf\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("foo", Some(recording_handler(&calls, "foo")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, main.to_str().unwrap()).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["foo:foo from_nested".to_string()]);
}

#[test]
fn definitions_made_before_an_include_remain_in_scope_after_it_returns() {
    let scratch = ScratchDir::new();
    scratch.write("included.conf", "foo included\n");
    let main = scratch.write(
        "main.conf",
        "$IP=10.0.0.1\ninclude included.conf\nfoo $IP\n",
    );

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("foo", Some(recording_handler(&calls, "foo")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, main.to_str().unwrap()).unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec!["foo:foo included".to_string(), "foo:foo 10.0.0.1".to_string()],
    );
}

#[test]
fn missing_open_brace_before_a_child_block_is_logged_and_recovered() {
    // `delay_loop` is nested under `virtual_server` but the `{` is missing;
    // the stream processor logs it and treats the next line as if the block
    // had already been opened (spec.md §7: structural errors recover).
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "virtual_server 10.0.0.1 80\ndelay_loop 6\n}\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("virtual_server", Some(recording_handler(&calls, "virtual_server")), true);
    b.install_keyword("delay_loop", Some(recording_handler(&calls, "delay_loop")));
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "virtual_server:virtual_server 10.0.0.1 80".to_string(),
            "delay_loop:delay_loop 6".to_string(),
        ],
    );
}

#[test]
fn at_prefixed_line_is_suppressed_entirely_when_no_config_id_is_configured() {
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "@prod enable yes\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("enable", Some(recording_handler(&calls, "enable")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn unknown_keyword_is_logged_and_parsing_continues() {
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "bogus_directive 1 2 3\nfoo ok\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("foo", Some(recording_handler(&calls, "foo")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["foo:foo ok".to_string()]);
}

#[test]
fn malformed_definition_is_logged_and_line_discarded() {
    // `$1BAD=x` fails name validation (leading digit) but still looks like
    // an assignment attempt (it contains `=`), unlike a bare `$NAME`
    // reference; it's discarded rather than falling through to keyword
    // matching on the literal text.
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "$1BAD=x\nfoo ok\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("foo", Some(recording_handler(&calls, "foo")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["foo:foo ok".to_string()]);
}

#[test]
fn stray_top_level_close_brace_is_logged_and_parsing_continues() {
    let scratch = ScratchDir::new();
    let path = scratch.write("lb.conf", "}\nfoo ok\n");

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut b = KeywordTreeBuilder::new();
    b.install_keyword_root("foo", Some(recording_handler(&calls, "foo")), true);
    let tree = b.build();

    crate::load(&tree, None, 4096, path.to_str().unwrap()).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["foo:foo ok".to_string()]);
}
