//! Redirect resolution.
//!
//! Method rewriting follows what browsers and curl do:
//!
//! | Status      | POST            | other methods |
//! |-------------|-----------------|---------------|
//! | 301, 302    | GET, body dropped | unchanged   |
//! | 303         | GET, body dropped | GET, body dropped |
//! | 307, 308    | unchanged       | unchanged     |

use crate::base::neterror::NetError;
use crate::http::headers::ResponseHeaders;
use http::Method;
use url::Url;

/// Status codes that trigger redirect handling.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

pub fn is_redirect(status: u16) -> bool {
    REDIRECT_STATUSES.contains(&status)
}

/// The request to issue for the next hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectInfo {
    pub new_url: String,
    pub new_method: Method,
    pub new_body: Option<String>,
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    /// Not a redirect status; the response is final.
    NotRedirect,
    /// Follow to the next hop.
    Follow(RedirectInfo),
    /// Redirect status without `Location`. The response is returned as is.
    MissingLocation,
}

/// Decide the next hop for a response.
///
/// `Err` only when `Location` cannot be resolved against `current_url`.
pub fn resolve_redirect(
    status: u16,
    headers: &ResponseHeaders,
    current_url: &str,
    method: &Method,
    body: Option<&str>,
) -> Result<RedirectDecision, NetError> {
    if !is_redirect(status) {
        return Ok(RedirectDecision::NotRedirect);
    }

    let Some(location) = headers.get("location") else {
        return Ok(RedirectDecision::MissingLocation);
    };

    let new_url = join_location(current_url, location)?;

    let downgrade = status == 303 || ((status == 301 || status == 302) && *method == Method::POST);
    let (new_method, new_body) = if downgrade {
        (Method::GET, None)
    } else {
        (method.clone(), body.map(str::to_string))
    };

    Ok(RedirectDecision::Follow(RedirectInfo {
        new_url,
        new_method,
        new_body,
        status,
    }))
}

/// Resolve a possibly relative `Location` against the current URL.
fn join_location(current_url: &str, location: &str) -> Result<String, NetError> {
    let joined = match Url::parse(current_url) {
        Ok(base) => base.join(location),
        Err(_) => Url::parse(location),
    };
    joined.map(String::from).map_err(|e| {
        tracing::debug!(location = %location, error = %e, "cannot resolve redirect target");
        NetError::InvalidRedirect
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(value: &str) -> ResponseHeaders {
        let mut headers = ResponseHeaders::new();
        headers.insert("Location", value);
        headers
    }

    fn follow(decision: RedirectDecision) -> RedirectInfo {
        match decision {
            RedirectDecision::Follow(info) => info,
            other => panic!("expected Follow, got {:?}", other),
        }
    }

    #[test]
    fn test_non_redirect_status() {
        let headers = location("/elsewhere");
        for status in [200, 304, 404, 300] {
            let decision =
                resolve_redirect(status, &headers, "http://a.test/", &Method::GET, None).unwrap();
            assert_eq!(decision, RedirectDecision::NotRedirect);
        }
    }

    #[test]
    fn test_missing_location() {
        let decision = resolve_redirect(
            302,
            &ResponseHeaders::new(),
            "http://a.test/",
            &Method::GET,
            None,
        )
        .unwrap();
        assert_eq!(decision, RedirectDecision::MissingLocation);
    }

    #[test]
    fn test_post_downgraded_on_301_302() {
        for status in [301, 302] {
            let info = follow(
                resolve_redirect(status, &location("/new"), "http://a.test/old", &Method::POST, Some("a=1"))
                    .unwrap(),
            );
            assert_eq!(info.new_method, Method::GET);
            assert_eq!(info.new_body, None);
            assert_eq!(info.new_url, "http://a.test/new");
        }
    }

    #[test]
    fn test_non_post_preserved_on_301_302() {
        for status in [301, 302] {
            let info = follow(
                resolve_redirect(status, &location("/new"), "http://a.test/", &Method::PUT, Some("x"))
                    .unwrap(),
            );
            assert_eq!(info.new_method, Method::PUT);
            assert_eq!(info.new_body.as_deref(), Some("x"));
        }
    }

    #[test]
    fn test_303_always_get() {
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            let info = follow(
                resolve_redirect(303, &location("/see"), "http://a.test/", &method, Some("b"))
                    .unwrap(),
            );
            assert_eq!(info.new_method, Method::GET);
            assert_eq!(info.new_body, None);
        }
    }

    #[test]
    fn test_307_308_preserve_method_and_body() {
        for status in [307, 308] {
            for method in [Method::GET, Method::POST] {
                let info = follow(
                    resolve_redirect(status, &location("/keep"), "http://a.test/", &method, Some("a=1"))
                        .unwrap(),
                );
                assert_eq!(info.new_method, method);
                assert_eq!(info.new_body.as_deref(), Some("a=1"));
                assert_eq!(info.status, status);
            }
        }
    }

    #[test]
    fn test_relative_and_absolute_locations() {
        let cases = [
            ("http://a.test/dir/page", "other", "http://a.test/dir/other"),
            ("http://a.test/dir/page", "../up", "http://a.test/up"),
            ("http://a.test:8080/x", "/y?z=1", "http://a.test:8080/y?z=1"),
            ("http://a.test/", "https://b.test/secure", "https://b.test/secure"),
            ("https://a.test/", "//c.test/proto", "https://c.test/proto"),
        ];
        for (base, loc, expected) in cases {
            let info = follow(
                resolve_redirect(302, &location(loc), base, &Method::GET, None).unwrap(),
            );
            assert_eq!(info.new_url, expected, "base={} location={}", base, loc);
        }
    }
}
