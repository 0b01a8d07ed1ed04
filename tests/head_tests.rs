//! Integration tests for the pages and head commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{formsite_cmd, init_site};

const BASE_HEAD: &str = r#"<title>Site</title>
<meta name="description" content="Home">
<link rel="icon" href="/favicon.ico">
"#;

fn site_with_head() -> TempDir {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    fs::write(temp.path().join("head.html"), BASE_HEAD).unwrap();
    temp
}

#[test]
fn test_pages_lists_starter_pages() {
    let temp = site_with_head();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("pages")
        .assert()
        .success()
        .stdout(predicate::str::contains("home"))
        .stdout(predicate::str::contains("/pricing"))
        .stdout(predicate::str::contains("Templates"));
}

#[test]
fn test_head_applies_page_meta() {
    let temp = site_with_head();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("head")
        .arg("pricing")
        .assert()
        .success()
        .stdout(predicate::str::contains("<title>Pricing</title>"))
        .stdout(predicate::str::contains(
            r#"<meta name="description" content="Simple plans that grow with your responses.">"#,
        ))
        .stdout(predicate::str::contains(
            r#"<meta property="og:title" content="Pricing">"#,
        ))
        .stdout(predicate::str::contains(
            r#"<meta name="twitter:card" content="summary_large_image">"#,
        ))
        .stdout(predicate::str::contains(r#"<link rel="icon" href="/favicon.ico">"#))
        .stdout(predicate::str::contains("og:image").not());
}

#[test]
fn test_head_uses_default_og_image() {
    let temp = site_with_head();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("og_image")
        .arg("https://formly.example/og.png")
        .assert()
        .success();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("head")
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<meta property="og:image" content="https://formly.example/og.png">"#,
        ))
        .stdout(predicate::str::contains(
            r#"<meta name="twitter:image" content="https://formly.example/og.png">"#,
        ));
}

#[test]
fn test_head_check_restores() {
    let temp = site_with_head();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("head")
        .arg("pricing")
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Restored: 6 created tag(s) removed, 1 updated tag(s) reverted",
        ));

    // The base head on disk is never modified
    let head = fs::read_to_string(temp.path().join("head.html")).unwrap();
    assert_eq!(head, BASE_HEAD);
}

#[test]
fn test_head_check_without_head_file() {
    let temp = site_with_head();
    fs::remove_file(temp.path().join("head.html")).unwrap();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("head")
        .arg("home")
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<title>Formly</title>"))
        .stdout(predicate::str::contains(
            "Restored: 7 created tag(s) removed, 0 updated tag(s) reverted",
        ));
}

#[test]
fn test_head_reads_unquoted_and_referenced_attributes() {
    let temp = site_with_head();
    fs::write(
        temp.path().join("head.html"),
        "<title>Site</title>\n<meta name=description content=Home>\n\
         <meta name=author content=\"Caf&eacute; &#169; Team\">\n",
    )
    .unwrap();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("head")
        .arg("pricing")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"name="description""#).count(1))
        .stdout(predicate::str::contains(
            r#"<meta name="author" content="Caf&eacute; &#169; Team">"#,
        ));

    formsite_cmd()
        .current_dir(temp.path())
        .arg("head")
        .arg("pricing")
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Restored: 6 created tag(s) removed, 1 updated tag(s) reverted",
        ));
}

#[test]
fn test_head_rejects_unreadable_attributes() {
    let temp = site_with_head();
    fs::write(temp.path().join("head.html"), r#"<meta name="description" =Home>"#).unwrap();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("head")
        .arg("home")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreadable <meta> attribute text"));
}

#[test]
fn test_head_unknown_page() {
    let temp = site_with_head();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("head")
        .arg("careers")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Page not found: 'careers'"));
}

#[test]
fn test_head_rejects_broken_markup() {
    let temp = site_with_head();
    fs::write(temp.path().join("head.html"), "<title>Site").unwrap();

    formsite_cmd()
        .current_dir(temp.path())
        .arg("head")
        .arg("home")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unterminated <title>"));
}
