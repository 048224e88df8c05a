/// Response header map.
///
/// Names are stored lower-cased, values trimmed. One value per name: a
/// repeated header overwrites the earlier value in place, so iteration keeps
/// first-seen order. `Set-Cookie` is the exception: every occurrence is also
/// kept in [`set_cookies`](Self::set_cookies) so none are lost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    headers: Vec<(String, String)>,
    set_cookies: Vec<String>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, lower-casing the name and trimming both parts.
    pub fn insert(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim().to_string();

        if name == "set-cookie" {
            self.set_cookies.push(value.clone());
        }

        if let Some((_, v)) = self.headers.iter_mut().find(|(n, _)| *n == name) {
            *v = value;
        } else {
            self.headers.push((name, value));
        }
    }

    /// Get header value (case-insensitive lookup).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every `Set-Cookie` value received, in order.
    pub fn set_cookies(&self) -> &[String] {
        &self.set_cookies
    }

    /// Headers as (lower-case name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Headers with names converted to title case ("content-type" -> "Content-Type").
    pub fn as_title_case(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.headers
            .iter()
            .map(|(n, v)| (title_case(n), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

pub(crate) fn title_case(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars: Vec<char> = word.chars().collect();
            if let Some(first) = chars.first_mut() {
                *first = first.to_ascii_uppercase();
            }
            for c in chars.iter_mut().skip(1) {
                *c = c.to_ascii_lowercase();
            }
            chars.into_iter().collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-")
}
