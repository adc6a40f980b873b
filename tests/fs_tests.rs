//! Builds against real directories.

use std::fs;
use std::path::Path;

use axum::http::StatusCode;

use file_router::config::RoutesConfig;
use file_router::lifecycle::build_app;
use file_router::parser::TreeBuilder;
use file_router::routing::{mount, RecordingSink, Registration};
use file_router::source::{FsSource, HandlerRegistry, StubSource};
use file_router::structure::{BuildError, HttpMethod};

mod common;
use common::{echo, send, trace};

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

#[tokio::test]
async fn test_registry_backed_directory() {
    let dir = tempfile::tempdir().unwrap();
    for file in ["get.rs", "auth.rs", "users/[id]/get.rs", "_shared/db.rs"] {
        touch(dir.path(), file);
    }

    let registry = HandlerRegistry::new()
        .with("get", echo("root"))
        .with("auth", trace("auth"))
        .with("users/[id]/get", echo("user"));
    let source = FsSource::new(dir.path(), registry);
    let config = RoutesConfig {
        root_dir: dir.path().to_path_buf(),
        ..RoutesConfig::default()
    };
    let app = build_app(&config, &source).unwrap();

    assert_eq!(send(&app, "GET", "/").await.1, "root / [auth]");
    assert_eq!(send(&app, "GET", "/users/3").await.1, "user /users/3 [auth]");
    assert_eq!(send(&app, "GET", "/_shared/db").await.0, StatusCode::NOT_FOUND);
}

#[test]
fn test_unregistered_file_fails_build() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "users/post.rs");

    let source = FsSource::new(dir.path(), HandlerRegistry::new());
    let err = TreeBuilder::new(&source).build(dir.path()).unwrap_err();
    assert!(matches!(err, BuildError::Load { .. }));
    assert!(err.to_string().contains("post.rs"), "{err}");
}

#[test]
fn test_missing_root_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let source = StubSource::new(&missing);
    assert!(matches!(
        TreeBuilder::new(&source).build(&missing),
        Err(BuildError::DirectoryRead { .. })
    ));
}

#[test]
fn test_stub_source_preview() {
    let dir = tempfile::tempdir().unwrap();
    for file in [
        "0-cors.rs",
        "404.rs",
        "users/get.rs",
        "users/post.rs",
        "users/[id]/1-auth.rs",
        "users/[id]/delete.rs",
    ] {
        touch(dir.path(), file);
    }

    let source = StubSource::new(dir.path());
    let tree = TreeBuilder::new(&source).build(dir.path()).unwrap();
    let mut sink = RecordingSink::new();
    mount(&tree, &mut sink);

    assert_eq!(
        sink.registrations(),
        &[
            Registration::NotFound,
            Registration::path_middleware("/", &["cors"]),
            Registration::route(HttpMethod::Get, "/users", &[]),
            Registration::route(HttpMethod::Post, "/users", &[]),
            Registration::route(HttpMethod::Delete, "/users/:id", &["auth"]),
            Registration::path_middleware("/users/:id", &["auth"]),
        ]
    );
    assert_eq!(sink.methods_at("/users"), vec![HttpMethod::Get, HttpMethod::Post]);
}

#[tokio::test]
async fn test_stub_source_serves() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "users/[id]/get.rs");

    let source = StubSource::new(dir.path());
    let config = RoutesConfig {
        root_dir: dir.path().to_path_buf(),
        ..RoutesConfig::default()
    };
    let app = build_app(&config, &source).unwrap();

    let (status, body) = send(&app, "GET", "/users/9").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("GET /users/9 -> "), "{body}");
}
