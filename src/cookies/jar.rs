use crate::base::neterror::NetError;
use crate::cookies::persistence;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One `Set-Cookie` header reduced to what the jar keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    /// `Domain` attribute with one leading dot removed, if present.
    pub domain: Option<String>,
}

impl SetCookie {
    /// Parse a raw `Set-Cookie` value.
    ///
    /// Returns `None` when the leading segment has no `=`. Every attribute
    /// other than `Domain` is ignored.
    pub fn parse(header_value: &str) -> Option<Self> {
        let mut parts = header_value.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;

        let mut domain = None;
        for attr in parts {
            let attr = attr.trim();
            let is_domain = attr
                .get(..7)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("domain="));
            if is_domain {
                let value = attr[7..].trim();
                domain = Some(value.strip_prefix('.').unwrap_or(value).to_string());
            }
        }

        Some(Self {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
            domain,
        })
    }
}

/// Domain-keyed cookie jar with optional write-through file persistence.
///
/// Map<Domain, Map<Name, Value>>. Names are unique per domain; the last write
/// wins. There is no expiry, path scoping or Secure/HttpOnly tracking.
pub struct CookieJar {
    store: DashMap<String, BTreeMap<String, String>>,
    backing_file: Option<PathBuf>,
    // Serializes mutate-then-rewrite so concurrent writers cannot lose updates.
    persist_lock: Mutex<()>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieJar")
            .field("backing_file", &self.backing_file)
            .field("cookies", &self.total_cookie_count())
            .finish()
    }
}

impl CookieJar {
    /// In-memory jar with no backing file.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
            backing_file: None,
            persist_lock: Mutex::new(()),
        }
    }

    /// Empty jar that rewrites `path` after every mutation.
    pub fn with_backing_file(path: impl Into<PathBuf>) -> Self {
        Self {
            backing_file: Some(path.into()),
            ..Self::new()
        }
    }

    /// Load the jar from `path` and keep it as the backing file.
    ///
    /// A missing or unreadable file yields an empty jar; malformed lines are
    /// skipped. Neither is an error.
    pub fn load(path: impl AsRef<Path>) -> Self {
        persistence::load_cookies(path.as_ref())
    }

    pub fn backing_file(&self) -> Option<&Path> {
        self.backing_file.as_deref()
    }

    /// Insert a single cookie without touching the backing file.
    pub fn set(&self, domain: &str, name: &str, value: &str) {
        self.store
            .entry(domain.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, domain: &str, name: &str) -> Option<String> {
        self.store
            .get(domain)
            .and_then(|names| names.get(name).cloned())
    }

    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_cookie_count() == 0
    }

    /// All (domain, name, value) triples, sorted by domain then name.
    pub fn entries(&self) -> Vec<(String, String, String)> {
        let mut domains: Vec<String> = self.store.iter().map(|e| e.key().clone()).collect();
        domains.sort();

        let mut entries = Vec::new();
        for domain in domains {
            if let Some(names) = self.store.get(&domain) {
                for (name, value) in names.iter() {
                    entries.push((domain.clone(), name.clone(), value.clone()));
                }
            }
        }
        entries
    }

    /// Build the `Cookie` header value for a request to `host`.
    ///
    /// Every jar domain that `host` ends with contributes its cookies. This is
    /// a plain suffix test: an entry for `le.com` also matches `google.com`.
    /// `path` is not used for filtering. Returns an empty string when nothing
    /// matches.
    pub fn cookies_for(&self, host: &str, _path: &str) -> String {
        let mut selected: Vec<(String, String)> = Vec::new();

        for (domain, name, value) in self.entries() {
            if !host.ends_with(domain.as_str()) {
                continue;
            }
            // Later domains override the value but keep the first position.
            match selected.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => selected.push((name, value)),
            }
        }

        selected
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Absorb one or more `Set-Cookie` values received from `default_domain`.
    ///
    /// Values without a `name=value` pair are skipped. The whole jar is
    /// rewritten to the backing file afterwards; a write failure is logged
    /// and does not fail the caller.
    pub fn store<I, S>(&self, set_cookie_values: I, default_domain: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let _guard = self.persist_lock.lock().unwrap_or_else(|e| e.into_inner());

        for raw in set_cookie_values {
            let raw = raw.as_ref();
            let Some(cookie) = SetCookie::parse(raw) else {
                tracing::debug!(value = %raw, "ignoring Set-Cookie without name=value");
                continue;
            };
            let domain = cookie.domain.as_deref().unwrap_or(default_domain);
            self.set(domain, &cookie.name, &cookie.value);
        }

        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "could not write cookie file");
        }
    }

    /// Rewrite the backing file with the current contents of the jar.
    ///
    /// A jar without a backing file has nothing to do and succeeds.
    pub fn save(&self) -> Result<(), NetError> {
        let _guard = self.persist_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.persist()
    }

    fn persist(&self) -> Result<(), NetError> {
        match &self.backing_file {
            Some(path) => persistence::save_cookies(self, path)
                .map_err(|e| NetError::cookie_file(path.display().to_string(), e.to_string())),
            None => Ok(()),
        }
    }
}
