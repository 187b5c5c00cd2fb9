use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn pip_command_keeps_requirement_order() {
    let ctx = TestContext::new();

    ctx.cli()
        .args([
            "pip-command",
            "--prefix",
            "cd /srv/app &&",
            "-r",
            "requirements/prod.txt",
            "-r",
            "requirements/extra.txt",
        ])
        .assert()
        .success()
        .stdout(
            "cd /srv/app && pip install --requirement requirements/prod.txt \
             --requirement requirements/extra.txt\n",
        );
}

#[test]
fn pip_command_emits_optional_flags() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["pip-command", "-r", "r.txt", "--timeout", "60", "--quiet", "--proxy", "http://p:3128"])
        .assert()
        .success()
        .stdout("pip install --requirement r.txt --timeout 60 --quiet --proxy http://p:3128\n");
}

#[test]
fn pip_command_omits_unset_flags() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["pip-command", "-r", "r.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--timeout").not())
        .stdout(predicate::str::contains("--quiet").not())
        .stdout(predicate::str::contains("--proxy").not());
}
