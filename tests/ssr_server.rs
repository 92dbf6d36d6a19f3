//! Request-time rendering through a running server.

use std::convert::Infallible;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Json;
use pagewright::config::Mode;
use pagewright::pages::{Props, ServerPropsContext};
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
            Ok::<_, Infallible>(json!({"randomNum": 42}))
        })
        .api("hello", |_req: Request<Body>| async {
            Json(json!({"message": "Hello from the API"}))
        })
}

fn basic_site() -> Site {
    Site::new()
        .page("index.hbs", "<h1>Welcome</h1>{{#if message}}<p>{{message}}</p>{{/if}}")
        .page("about.hbs", "<h1>About Page</h1><p>Random number: {{randomNum}}</p>")
}

#[tokio::test]
async fn test_root_renders_index() {
    let site = basic_site();
    let server = start_server(site.config(Mode::Development), registry()).await;

    let res = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/html"));
    assert!(res.headers().contains_key("x-request-id"));

    let body = res.text().await.unwrap();
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("<title>index</title>"));
    assert!(body.contains("<h1>Welcome</h1>"));
    // Static hooks only run at build time.
    assert!(!body.contains("Static Hello"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_about_runs_server_hook() {
    let site = basic_site();
    let server = start_server(site.config(Mode::Development), registry()).await;

    let body = client()
        .get(server.url("/about"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("<div id=\"root\"><h1>About Page</h1><p>Random number: 42</p></div>"));

    // The query string plays no part in resolution.
    let res = client().get(server.url("/about?ref=nav")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Only leading slashes are stripped.
    let res = client().get(server.url("/about/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_page_is_404() {
    let site = basic_site();
    let server = start_server(site.config(Mode::Development), registry()).await;

    let res = client().get(server.url("/does-not-exist")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Page Not Found");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_api_route_is_delegated() {
    let site = basic_site();
    let server = start_server(site.config(Mode::Development), registry()).await;

    let res = client().get(server.url("/api/hello")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"message": "Hello from the API"}));

    let res = client().get(server.url("/api/missing")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Page Not Found");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_api_file_without_handler() {
    let site = basic_site().page("api/orphan.hbs", "orphan");
    let server = start_server(site.config(Mode::Development), registry()).await;

    let res = client().get(server.url("/api/orphan")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "API route not found");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_api_file_with_secondary_extension() {
    let site = basic_site().page("api/legacy.html", "legacy");
    let server = start_server(site.config(Mode::Development), registry()).await;

    let res = client().get(server.url("/api/legacy")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "API route not found");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_api_file_wins_over_dynamic_page() {
    let site = basic_site()
        .page("api/legacy.html", "legacy")
        .page("[slug].hbs", "<h1>Post: {{slug}}</h1>");
    let server = start_server(site.config(Mode::Development), registry()).await;

    let res = client().get(server.url("/api/legacy")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "API route not found");

    // Registered handlers are unaffected by the dynamic page.
    let res = client().get(server.url("/api/hello")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_api_handler_sees_method_and_body() {
    let site = basic_site();
    let registry = PageRegistry::new().api("echo", |req: Request<Body>| async move {
        let method = req.method().to_string();
        let bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        format!("{method} {}", String::from_utf8_lossy(&bytes))
    });
    let server = start_server(site.config(Mode::Development), registry).await;

    let res = client()
        .post(server.url("/api/echo"))
        .body("ping")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "POST ping");

    let res = client().post(server.url("/about")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_dynamic_page_binds_slug() {
    let site = basic_site().page("[slug].hbs", "<h1>Post: {{title}}</h1>");
    let registry = PageRegistry::new().server_props("[slug]", |ctx: ServerPropsContext| async move {
        Ok::<_, Infallible>(json!({ "title": ctx.query.get("slug").cloned().unwrap_or_default() }))
    });
    let server = start_server(site.config(Mode::Development), registry).await;

    let body = client()
        .get(server.url("/hello-world"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("<h1>Post: hello-world</h1>"));
    assert!(body.contains("<title>[slug]</title>"));

    // Exact pages win over the dynamic page.
    let body = client().get(server.url("/about")).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("About Page"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_hook_failure_is_isolated() {
    let site = basic_site().page("broken.hbs", "<p>{{value}}</p>");
    let registry =
        registry().server_props("broken", |_ctx| async { Err::<Props, _>("upstream offline") });
    let server = start_server(site.config(Mode::Development), registry).await;

    let res = client().get(server.url("/broken")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(!body.contains("upstream offline"));

    let res = client().get(server.url("/about")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_panicking_hook_is_500() {
    let site = basic_site().page("panics.hbs", "<p>never</p>");
    let registry = registry().server_props("panics", |_ctx| async {
        if true {
            panic!("hook exploded");
        }
        Ok::<Props, Infallible>(Props::new())
    });
    let server = start_server(site.config(Mode::Development), registry).await;

    let res = client().get(server.url("/panics")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let res = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_public_assets_served_in_development() {
    let site = basic_site().public("robots.txt", "User-agent: *");
    let server = start_server(site.config(Mode::Development), registry()).await;

    let res = client().get(server.url("/robots.txt")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "User-agent: *");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_production_serves_prebuilt_pages_first() {
    let site = basic_site()
        .dist("index.html", "<p>prebuilt</p>")
        .public("index.html", "<p>public</p>");
    let server = start_server(site.config(Mode::Production), registry()).await;

    let body = client().get(server.url("/")).send().await.unwrap().text().await.unwrap();
    assert_eq!(body, "<p>prebuilt</p>");

    // Pages missing from the output still render per request.
    let body = client().get(server.url("/about")).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("Random number: 42"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_development_ignores_prebuilt_pages() {
    let site = basic_site().dist("index.html", "<p>prebuilt</p>");
    let server = start_server(site.config(Mode::Development), registry()).await;

    let body = client().get(server.url("/")).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("<h1>Welcome</h1>"));

    server.shutdown.trigger();
}
