use crate::harness::TestContext;
use mockito::Matcher;
use predicates::prelude::*;

fn configure(ctx: &TestContext, server: &mockito::Server) {
    ctx.write_deploy_config(&format!(
        "[github]\napi_url = \"{}\"\nowner = \"acme\"\nrepo = \"shop\"\n\n[deploy]\ntiming_log = \"timing.log\"\n",
        server.url()
    ));
}

#[test]
fn tag_creates_tag_and_prints_diff_link() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    configure(&ctx, &server);

    let _commit = server
        .mock("GET", "/repos/acme/shop/commits/master")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(r#"{"sha": "abc123"}"#)
        .create();
    let _tags = server
        .mock("GET", "/repos/acme/shop/tags")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"[{"name": "2024-01-02_10.00-production-deploy"},
                {"name": "2024-01-01_10.00-staging-deploy"}]"#,
        )
        .create();
    let _user = server
        .mock("GET", "/user")
        .with_status(200)
        .with_body(r#"{"login": "octo", "email": null}"#)
        .create();
    let tag_object = server
        .mock("POST", "/repos/acme/shop/git/tags")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "object": "abc123",
            "type": "commit",
            "tagger": {"name": "octo", "email": "octo@dimagi.com"}
        })))
        .with_status(201)
        .with_body(r#"{"sha": "tagsha"}"#)
        .expect(1)
        .create();
    let tag_ref = server
        .mock("POST", "/repos/acme/shop/git/refs")
        .with_status(201)
        .with_body(r#"{"ref": "refs/tags/x"}"#)
        .expect(1)
        .create();

    ctx.cli()
        .args(["tag", "--branch", "master", "--env", "staging"])
        .env("DEPLOYCTL_GITHUB_TOKEN", "tok")
        .assert()
        .success()
        .stdout(predicate::str::contains("Previous deploy: 2024-01-01_10.00-staging-deploy"))
        .stdout(predicate::str::contains(
            "https://github.com/acme/shop/compare/2024-01-01_10.00-staging-deploy...",
        ))
        .stdout(predicate::str::contains("-staging-deploy\n"));

    tag_object.assert();
    tag_ref.assert();
    assert!(ctx.read("timing.log").starts_with("tag_commit: "));
}

#[test]
fn tag_reports_rejected_token() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    configure(&ctx, &server);

    let _commit = server
        .mock("GET", "/repos/acme/shop/commits/master")
        .with_status(401)
        .with_body(r#"{"message": "Bad credentials"}"#)
        .create();

    ctx.cli()
        .args(["tag", "-b", "master", "-e", "staging"])
        .env("DEPLOYCTL_GITHUB_TOKEN", "bad")
        .assert()
        .failure()
        .code(77)
        .stderr(predicate::str::contains("GitHub authentication failed: Bad credentials"));
}

#[test]
fn tag_reports_unknown_branch() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    configure(&ctx, &server);

    let _commit = server
        .mock("GET", "/repos/acme/shop/commits/nope")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();
    let _repo = server
        .mock("GET", "/repos/acme/shop")
        .with_status(200)
        .with_body(r#"{"full_name": "acme/shop"}"#)
        .create();

    ctx.cli()
        .args(["tag", "-b", "nope", "-e", "staging"])
        .env("DEPLOYCTL_GITHUB_TOKEN", "tok")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reference 'nope' could not be resolved"));

    assert!(ctx.read("timing.log").contains("(failed)"));
}

#[test]
fn tag_reports_inaccessible_repository() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    configure(&ctx, &server);

    let _everything = server
        .mock("GET", Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    ctx.cli()
        .args(["tag", "-b", "master", "-e", "staging"])
        .env("DEPLOYCTL_GITHUB_TOKEN", "tok")
        .assert()
        .failure()
        .code(66)
        .stderr(predicate::str::contains("Repository 'acme/shop' not found or not accessible"));
}
