use crate::DefinitionStore;

#[test]
fn check_definition_recognizes_simple_assignment() {
    let mut defs = DefinitionStore::new();
    let def = defs.check_definition("$IP=10.0.0.1").unwrap();
    assert_eq!(def.name(), "IP");
    assert_eq!(def.value(), "10.0.0.1");
    assert!(!def.is_multiline());
}

#[test]
fn check_definition_rejects_non_definition_lines() {
    let mut defs = DefinitionStore::new();
    assert!(defs.check_definition("virtual_server 10.0.0.1 80").is_none());
    assert!(defs.check_definition("$1BAD=x").is_none());
    assert!(defs.check_definition("$BAD-NAME=x").is_none());
}

#[test]
fn check_definition_trims_before_marking_multiline() {
    let mut defs = DefinitionStore::new();
    let def = defs.check_definition("$Y=line1   \\").unwrap();
    assert!(def.is_multiline());
    assert_eq!(def.value(), "line1\n");
}

#[test]
fn replace_param_substitutes_single_line_definition() {
    let mut defs = DefinitionStore::new();
    defs.check_definition("$IP=10.0.0.1");
    let (out, cont) = defs.replace_param("real_server $IP 80", 4096, false).unwrap();
    assert_eq!(out, "real_server 10.0.0.1 80");
    assert!(cont.is_none());
}

#[test]
fn replace_param_leaves_unknown_reference_literal() {
    let defs = DefinitionStore::new();
    let (out, cont) = defs.replace_param("foo $NOPE bar", 4096, false).unwrap();
    assert_eq!(out, "foo $NOPE bar");
    assert!(cont.is_none());
}

#[test]
fn replace_param_supports_brace_form() {
    let mut defs = DefinitionStore::new();
    defs.check_definition("$IP=10.0.0.1");
    let (out, _) = defs.replace_param("real_server ${IP}:80", 4096, false).unwrap();
    assert_eq!(out, "real_server 10.0.0.1:80");
}

#[test]
fn replace_param_multiline_splices_first_line_and_returns_continuation() {
    let mut defs = DefinitionStore::new();
    defs.check_definition("$Y=line1 \\");
    defs.extend_multiline("Y", "line2", true);
    defs.extend_multiline("Y", "line3", false);

    let (out, cont) = defs.replace_param("$Y", 4096, false).unwrap();
    assert_eq!(out, "line1");
    assert_eq!(cont.as_deref(), Some("line2\nline3"));
}

#[test]
fn replace_param_refuses_multiline_spliced_mid_line() {
    let mut defs = DefinitionStore::new();
    defs.check_definition("$Y=line1 \\");
    defs.extend_multiline("Y", "line2", false);

    // A multiline definition referenced from the middle of another line
    // cannot be spliced in, so the reference finds no match and is left
    // untouched, same as any other unknown reference.
    let (out, cont) = defs.replace_param("prefix $Y suffix", 4096, false).unwrap();
    assert_eq!(out, "prefix $Y suffix");
    assert!(cont.is_none());
}

#[test]
fn replace_param_rejects_nested_multiline_expansion() {
    let mut defs = DefinitionStore::new();
    defs.check_definition("$Y=line1 \\");
    defs.extend_multiline("Y", "line2", false);

    let (out, cont) = defs.replace_param("$Y", 4096, true).unwrap();
    assert_eq!(out, "$Y");
    assert!(cont.is_none());
}

#[test]
fn replace_param_fails_when_result_exceeds_max_len() {
    let mut defs = DefinitionStore::new();
    defs.check_definition("$BIG=0123456789");
    let err = defs.replace_param("$BIG", 4, false).unwrap_err();
    assert!(matches!(err, crate::Error::LineTooLong { .. }));
}

#[test]
fn later_definition_of_same_name_replaces_earlier_one() {
    let mut defs = DefinitionStore::new();
    defs.check_definition("$X=first");
    defs.check_definition("$X=second");
    assert_eq!(defs.get("X").unwrap().value(), "second");
}
