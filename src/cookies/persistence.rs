//! Cookie persistence - save and load cookies to/from disk.
//!
//! The file is plain UTF-8 text, one cookie per line:
//!
//! ```text
//! # comment lines start with '#'
//! <domain>\t<name>\t<value>
//! ```
//!
//! Writes always replace the whole file, starting with [`FILE_HEADER`].

use crate::cookies::jar::CookieJar;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

/// The two comment lines written at the top of every cookie file.
pub const FILE_HEADER: &str = "# curlnet cookie jar\n# Format: Domain\tName\tValue\n";

/// Default location of the cookie file, relative to the working directory.
pub const DEFAULT_COOKIE_FILE: &str = "cookies.txt";

/// Parse cookie file contents into (domain, name, value) triples.
///
/// Blank lines and `#` comments are ignored. Lines that do not split into
/// exactly three tab-separated fields are skipped with a warning; a value may
/// itself contain tabs.
pub fn parse_cookie_lines(contents: &str) -> Vec<(String, String, String)> {
    let mut cookies = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.splitn(3, '\t');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(domain), Some(name), Some(value)) => {
                cookies.push((domain.to_string(), name.to_string(), value.to_string()));
            }
            _ => {
                tracing::warn!(line = %line, "skipping malformed cookie file line");
            }
        }
    }

    cookies
}

/// Render the jar in file format.
///
/// Output is ordered by domain then name, so saving an unchanged jar twice
/// produces identical bytes.
pub fn render_cookie_file(jar: &CookieJar) -> String {
    let mut out = String::from(FILE_HEADER);
    for (domain, name, value) in jar.entries() {
        out.push_str(&domain);
        out.push('\t');
        out.push_str(&name);
        out.push('\t');
        out.push_str(&value);
        out.push('\n');
    }
    out
}

/// Save cookies from a CookieJar to a file, replacing its contents.
///
/// # Example
/// ```ignore
/// persistence::save_cookies(&jar, Path::new("cookies.txt"))?;
/// ```
pub fn save_cookies(jar: &CookieJar, path: &Path) -> io::Result<()> {
    fs::write(path, render_cookie_file(jar))
}

/// Load cookies from a file into a new CookieJar backed by that file.
///
/// A missing file gives an empty jar. Other read errors are logged and also
/// give an empty jar.
pub fn load_cookies(path: &Path) -> CookieJar {
    let jar = CookieJar::with_backing_file(path);

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return jar,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read cookie file");
            return jar;
        }
    };

    for (domain, name, value) in parse_cookie_lines(&contents) {
        jar.set(&domain, &name, &value);
    }

    tracing::debug!(
        path = %path.display(),
        count = jar.total_cookie_count(),
        "loaded cookie file"
    );
    jar
}
