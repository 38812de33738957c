//! Tests for the file-backed referral source and the service container

use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use refnet::application::{ApplicationError, FetchOutcome};
use refnet::config::Settings;
use refnet::infrastructure::traits::{FileReferralSource, ReferralSource};
use refnet::infrastructure::ServiceContainer;
use refnet::util::testing::fixture_path;

fn source(name: &str) -> FileReferralSource {
    FileReferralSource::new(fixture_path(name))
}

#[rstest]
#[case("basic.json", "A", 3)]
#[case("network.json", "Alice Root", 8)]
fn given_response_document_when_fetching_then_returns_root_record(
    #[case] fixture: &str,
    #[case] root: &str,
    #[case] count: usize,
) {
    let raw = source(fixture).fetch("ignored").unwrap().unwrap();
    assert_eq!(raw.name.as_deref(), Some(root));
    assert_eq!(raw.count(), count);
}

#[test]
fn given_null_tree_when_fetching_then_returns_none() {
    assert!(source("null_tree.json").fetch("u").unwrap().is_none());
}

#[rstest]
#[case("invalid.json")]
#[case("does_not_exist.json")]
fn given_unreadable_document_when_fetching_then_returns_fetch_error(#[case] fixture: &str) {
    let err = source(fixture).fetch("u").unwrap_err();
    assert!(matches!(err, ApplicationError::Fetch { .. }));
    assert!(err.to_string().contains(fixture));
}

#[test]
fn given_file_container_when_refreshing_then_session_gets_tree() {
    let settings = Settings::default();
    let container = ServiceContainer::new(settings, Some(fixture_path("network.json"))).unwrap();
    let mut session = container.session().unwrap();

    let outcome = container.referrals.refresh(&mut session, "file");

    assert_eq!(outcome, FetchOutcome::Installed);
    assert_eq!(session.tree().unwrap().len(), 8);
    assert_eq!(session.viewport().translate_anchor().x, 500.0);
}

#[test]
fn given_missing_name_document_when_refreshing_then_session_reports_failure() {
    let container = ServiceContainer::with_deps(
        Settings::default(),
        Arc::new(source("missing_name.json")),
    );
    let mut session = container.session().unwrap();

    assert_eq!(
        container.referrals.refresh(&mut session, "file"),
        FetchOutcome::Failed
    );
    assert!(session.tree().is_none());
    assert!(session.error().is_some());
}

#[test]
fn given_custom_viewport_settings_when_creating_session_then_applies_them() {
    let mut settings = Settings::default();
    settings.viewport.width = 800.0;
    settings.viewport.top_offset = 20.0;
    let container = ServiceContainer::with_deps(settings, Arc::new(source("basic.json")));

    let session = container.session().unwrap();

    let anchor = session.viewport().translate_anchor();
    assert_eq!((anchor.x, anchor.y), (400.0, 20.0));
}

/// Response document whose tree is a single chain `depth` records deep.
fn write_chain(dir: &TempDir, depth: usize) -> std::path::PathBuf {
    let mut body = String::from(r#"{"referralTree":"#);
    for i in 0..depth {
        body.push_str(&format!(r#"{{"name":"level{}","referrals":["#, i));
    }
    body.push_str(r#"{"name":"deepest"}"#);
    body.push_str(&"]}".repeat(depth));
    body.push('}');
    let path = dir.path().join(format!("chain_{}.json", depth));
    std::fs::write(&path, body).unwrap();
    path
}

#[rstest]
#[case(64)]
#[case(150)]
#[case(3_000)]
fn given_deeply_nested_document_when_fetching_then_reads_whole_chain(#[case] depth: usize) {
    let dir = TempDir::new().unwrap();
    let path = write_chain(&dir, depth);

    let raw = FileReferralSource::new(path).fetch("u").unwrap().unwrap();

    assert_eq!(raw.count(), depth + 1);
}

#[test]
fn given_deeply_nested_document_when_refreshing_then_installs_tree() {
    let dir = TempDir::new().unwrap();
    let container = ServiceContainer::with_deps(
        Settings::default(),
        Arc::new(FileReferralSource::new(write_chain(&dir, 200))),
    );
    let mut session = container.session().unwrap();

    assert_eq!(
        container.referrals.refresh(&mut session, "file"),
        FetchOutcome::Installed
    );
    assert_eq!(session.tree().unwrap().height(), 201);
}
