//! Integration test: invocation parsing as the `parse` command sees it.
//!
//! Run: cargo test -p hrexx-harness --test invocation_test

use hrexx_harness::invocation::{DEFAULT_MAX_ARGS, parse_invocation};

#[test]
fn typical_exec_line() {
    let parsed = parse_invocation("  exec(hello.rexx one two)\n", DEFAULT_MAX_ARGS);
    assert_eq!(parsed.args, ["exec", "hello.rexx", "one", "two)"]);
    assert_eq!(parsed.count, 4);
}

#[test]
fn cap_of_one_keeps_only_the_name() {
    let parsed = parse_invocation("exec(a b)", 1);
    assert_eq!(parsed.args, ["exec"]);
}

#[test]
fn cap_of_zero_yields_nothing() {
    assert_eq!(parse_invocation("exec(a b)", 0).count, 0);
}

#[test]
fn json_shape() {
    let value = serde_json::to_value(parse_invocation("foo", 5)).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj["count"], 1);
    assert_eq!(obj["args"][0], "foo");
}
