use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn checkpoint_save_show_clear() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["checkpoint", "save", "staging", "5", "--set", "code_branch=master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved checkpoint 5 for staging"));
    assert!(ctx.checkpoint_path("staging").is_file());
    assert!(ctx.environment_path("staging").is_file());

    ctx.cli()
        .args(["checkpoint", "show", "staging"])
        .assert()
        .success()
        .stdout(predicate::str::contains("command_index: 5"))
        .stdout(predicate::str::contains("\"code_branch\": \"master\""));

    ctx.cli().args(["checkpoint", "clear", "staging"]).assert().success();
    assert!(!ctx.checkpoint_path("staging").exists());
    assert!(!ctx.environment_path("staging").exists());

    ctx.cli()
        .args(["checkpoint", "show", "staging"])
        .assert()
        .failure()
        .code(66)
        .stderr(predicate::str::contains("No cached deploy checkpoint found for 'staging'"));
}

#[test]
fn checkpoint_show_rejects_non_json_leftover() {
    let ctx = TestContext::new();
    std::fs::write(ctx.checkpoint_path("staging"), b"\x80\x02K\x07.").unwrap();

    ctx.cli()
        .args(["checkpoint", "show", "staging"])
        .assert()
        .failure()
        .code(65)
        .stderr(predicate::str::contains("Cached deploy checkpoint for 'staging' is unreadable"));
}

#[test]
fn checkpoint_clear_without_saved_state_succeeds() {
    let ctx = TestContext::new();

    ctx.cli().args(["checkpoint", "clear", "india"]).assert().success();
}

#[test]
fn checkpoint_files_are_versioned_json() {
    let ctx = TestContext::new();

    ctx.cli().args(["checkpoint", "save", "india", "migrate"]).assert().success();

    let envelope: serde_json::Value =
        serde_json::from_str(&ctx.read("india_deploy_checkpoint")).unwrap();
    assert_eq!(envelope["format"], 1);
    assert_eq!(envelope["environment"], "india");
    assert_eq!(envelope["value"], "migrate");
}

#[test]
fn checkpoint_suffixes_follow_config() {
    let ctx = TestContext::new();
    ctx.write_deploy_config("[deploy]\ncheckpoint_suffix = \"step\"\nenvironment_suffix = \"env\"\n");

    ctx.cli().args(["checkpoint", "save", "staging", "1"]).assert().success();
    assert!(ctx.root().join("staging_step").is_file());
    assert!(ctx.root().join("staging_env").is_file());
}
