use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn pillow_prints_mapping() {
    let ctx = TestContext::new();
    ctx.write_pillow("staging", "{foo: bar}\n");

    ctx.cli().args(["pillow", "staging"]).assert().success().stdout("foo: bar\n");
}

#[test]
fn pillow_absent_is_not_an_error() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["pillow", "production"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pillow config for production"));
}

#[test]
fn pillow_parse_error_fails() {
    let ctx = TestContext::new();
    ctx.write_pillow("staging", "foo: [unclosed\n");

    ctx.cli()
        .args(["pillow", "staging"])
        .assert()
        .failure()
        .code(65)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn pillow_required_but_absent_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["pillow", "production", "--require"])
        .assert()
        .failure()
        .code(66)
        .stderr(predicate::str::contains("Configuration not found:"))
        .stderr(predicate::str::contains("production.yml"));
}
