mod common;

use common::{redirect, response, serve};
use curlnet::{Client, NetError};

#[tokio::test]
async fn test_redirect_limit() {
    let server = serve(|_, base| redirect("302 Found", &format!("{}/loop", base))).await;

    let err = Client::new()
        .get(server.url("/start"))
        .send()
        .await
        .unwrap_err();
    assert_eq!(err, NetError::TooManyRedirects);
    // max_redirects + 1 hops, then the next one is refused.
    assert_eq!(server.hits(), 6);
}

#[tokio::test]
async fn test_redirect_limit_boundary() {
    // Chain /0 -> /1 -> ... -> /n, then 200.
    fn chain(n: usize) -> impl Fn(&common::Seen, &str) -> Vec<u8> {
        move |req: &common::Seen, base: &str| {
            let step: usize = req.path().trim_start_matches('/').parse().unwrap_or(0);
            if step < n {
                redirect("301 Moved Permanently", &format!("{}/{}", base, step + 1))
            } else {
                response("200 OK", &[], b"end")
            }
        }
    }

    // Exactly max_redirects redirects: max + 1 hops, success.
    let server = serve(chain(2)).await;
    let resp = Client::new()
        .get(server.url("/0"))
        .max_redirects(2)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.redirect_count(), 2);
    assert_eq!(resp.url(), server.url("/2"));
    assert_eq!(server.hits(), 3);

    // One more than the ceiling fails without a further connection.
    let server = serve(chain(3)).await;
    let err = Client::new()
        .get(server.url("/0"))
        .max_redirects(2)
        .send()
        .await
        .unwrap_err();
    assert_eq!(err, NetError::TooManyRedirects);
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn test_post_301_becomes_get_without_body() {
    let server = serve(|req, base| {
        if req.path() == "/old" {
            redirect("301 Moved Permanently", &format!("{}/new", base))
        } else {
            response("200 OK", &[], b"moved")
        }
    })
    .await;

    let resp = Client::new()
        .post(server.url("/old"))
        .body("a=1")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.text_lossy(), "moved");

    let seen = server.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].method(), "POST");
    assert_eq!(seen[0].body, b"a=1");
    assert_eq!(seen[1].request_line, "GET /new HTTP/1.1");
    assert!(seen[1].body.is_empty());
    assert!(seen[1].header("content-length").is_none());
}

#[tokio::test]
async fn test_302_post_becomes_get() {
    let server = serve(|req, _| {
        if req.path() == "/submit" {
            redirect("302 Found", "/done")
        } else {
            response("200 OK", &[], b"")
        }
    })
    .await;

    Client::new()
        .post(server.url("/submit"))
        .body("x=y")
        .send()
        .await
        .unwrap();

    let seen = server.seen();
    assert_eq!(seen[1].request_line, "GET /done HTTP/1.1");
    assert!(seen[1].body.is_empty());
}

#[tokio::test]
async fn test_303_always_get() {
    let server = serve(|req, _| {
        if req.path() == "/form" {
            redirect("303 See Other", "result?id=7")
        } else {
            response("200 OK", &[], b"")
        }
    })
    .await;

    let resp = Client::new()
        .post(server.url("/form"))
        .body("a=1")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url(), server.url("/result?id=7"));

    let seen = server.seen();
    assert_eq!(seen[1].request_line, "GET /result?id=7 HTTP/1.1");
    assert!(seen[1].body.is_empty());
}

#[tokio::test]
async fn test_307_and_308_preserve_method_and_body() {
    for status in ["307 Temporary Redirect", "308 Permanent Redirect"] {
        let server = serve(move |req, _| {
            if req.path() == "/a" {
                redirect(status, "/b")
            } else {
                response("200 OK", &[], b"")
            }
        })
        .await;

        Client::new()
            .post(server.url("/a"))
            .body("keep=me")
            .send()
            .await
            .unwrap();

        let seen = server.seen();
        assert_eq!(seen[1].request_line, "POST /b HTTP/1.1", "{}", status);
        assert_eq!(seen[1].body, b"keep=me");
        assert_eq!(seen[1].header("content-length"), Some("7"));
    }
}

#[tokio::test]
async fn test_redirect_without_location_returns_response() {
    let server = serve(|_, _| response("302 Found", &[], b"nowhere")).await;

    let resp = Client::new().get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(resp.text_lossy(), "nowhere");
    assert_eq!(resp.warnings(), &[NetError::RedirectWithoutLocation]);
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_redirects_disabled() {
    let server = serve(|_, base| redirect("301 Moved Permanently", &format!("{}/next", base))).await;

    let resp = Client::new()
        .get(server.url("/"))
        .allow_redirects(false)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 301);
    assert_eq!(resp.redirect_count(), 0);
    assert_eq!(resp.headers().get("location"), Some(server.url("/next").as_str()));
    assert_eq!(server.hits(), 1);

    let client = Client::builder().follow_redirects(false).build();
    let resp = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 301);
}

#[tokio::test]
async fn test_cross_host_redirect() {
    let target = serve(|_, _| response("200 OK", &[], b"other host")).await;
    let target_url = target.url("/landing");
    let origin = serve(move |_, _| redirect("302 Found", &target_url)).await;

    let resp = Client::new().get(origin.url("/")).send().await.unwrap();
    assert_eq!(resp.text_lossy(), "other host");
    assert_eq!(resp.url(), target.url("/landing"));
    assert_eq!(origin.hits(), 1);
    assert_eq!(target.hits(), 1);
}
