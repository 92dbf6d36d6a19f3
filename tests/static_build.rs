//! Static build of a page tree, and serving its output.

use std::convert::Infallible;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pagewright::build::{BuildError, StaticBuilder};
use pagewright::config::Mode;
use pagewright::pages::Props;
use pagewright::PageRegistry;
use serde_json::json;

mod common;

use common::{client, start_server, Site};

fn registry() -> PageRegistry {
    PageRegistry::new()
        .static_props("index", || async {
            Ok::<_, Infallible>(json!({"message": "Static Hello"}))
        })
        .server_props("about", |_ctx| async {
            Ok::<_, Infallible>(json!({"randomNum": 7}))
        })
        .api("hello", |_req: Request<Body>| async { "hello" })
}

fn output_files(site: &Site) -> Vec<String> {
    let dist = site.path().join("dist");
    let mut files = Vec::new();
    let mut pending = vec![dist.clone()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let relative = path.strip_prefix(&dist).unwrap();
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.sort();
    files
}

#[tokio::test]
async fn test_build_writes_one_file_per_page() {
    let site = Site::new()
        .page("index.hbs", "<h1>{{message}}</h1>")
        .page("about.hbs", "<h1>About Page</h1><p>{{randomNum}}</p>");

    let report = StaticBuilder::new(&site.config(Mode::Production), registry())
        .build()
        .await
        .unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(output_files(&site), vec!["about.html", "index.html"]);

    let index = std::fs::read_to_string(site.path().join("dist/index.html")).unwrap();
    assert!(index.starts_with("<!DOCTYPE html>"));
    assert!(index.contains("<div id=\"root\"><h1>Static Hello</h1></div>"));

    // Server hooks never run at build time.
    let about = std::fs::read_to_string(site.path().join("dist/about.html")).unwrap();
    assert!(about.contains("<h1>About Page</h1><p></p>"));
}

#[tokio::test]
async fn test_build_skips_api_dynamic_and_shell_pages() {
    let site = Site::new()
        .page("index.hbs", "home")
        .page("_app.hbs", "shell")
        .page("_document.html", "document")
        .page("[slug].hbs", "post")
        .page("api/hello.hbs", "api")
        .page("docs/intro.html", "<p>intro</p>");

    let report = StaticBuilder::new(&site.config(Mode::Production), registry())
        .build()
        .await
        .unwrap();

    let built: Vec<_> = report.pages.iter().map(|p| p.identifier.as_str()).collect();
    assert_eq!(built, vec!["docs/intro", "index"]);
    assert_eq!(output_files(&site), vec!["docs/intro.html", "index.html"]);
}

#[tokio::test]
async fn test_build_aborts_on_first_failure() {
    let site = Site::new()
        .page("a.hbs", "a")
        .page("b.hbs", "b")
        .page("c.hbs", "c");
    let registry = PageRegistry::new()
        .static_props("b", || async { Err::<Props, _>("feed unavailable") });

    let err = StaticBuilder::new(&site.config(Mode::Production), registry)
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::Pipeline(_)));
    assert!(err.to_string().contains("feed unavailable"));
    assert_eq!(output_files(&site), vec!["a.html"]);
}

#[tokio::test]
async fn test_production_server_serves_build_output() {
    let site = Site::new()
        .page("index.hbs", "<h1>{{message}}</h1>")
        .page("about.hbs", "<p>{{randomNum}}</p>");
    let config = site.config(Mode::Production);

    StaticBuilder::new(&config, registry()).build().await.unwrap();
    let server = start_server(config, registry()).await;

    let res = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("<h1>Static Hello</h1>"));

    let res = client().get(server.url("/about.html")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("<p></p>"));

    // Without the extension the page renders per request.
    let body = client().get(server.url("/about")).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("<p>7</p>"));

    let res = client().get(server.url("/api/hello")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "hello");

    server.shutdown.trigger();
}
