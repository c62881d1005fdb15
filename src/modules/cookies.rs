// Cookie store over the page's ambient cookie string.
// Reads scan the `name1=value1; name2=value2` string, writes serialize one
// entry with its attributes and hand it to the host. No operation here fails:
// a host that refuses a write simply does not show it on the next read.

use chrono::{DateTime, NaiveDateTime, Utc};
use url::Url;

const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// The host-owned cookie string (`document.cookie` in a browser).
pub trait AmbientCookies {
    /// Current visible cookies as `name=value` pairs joined by `"; "`.
    fn cookie_string(&self) -> String;
    /// Hand one serialized cookie to the host. The host may drop it.
    fn write_cookie(&mut self, serialized: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            path: None,
            domain: None,
            secure: false,
        }
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// `name=<encoded>[; expires=..][; path=..][; domain=..][; secure]`
    pub fn serialize(&self) -> String {
        let mut out = format!("{}={}", self.name, urlencoding::encode(&self.value));
        if let Some(expires) = self.expires {
            out.push_str("; expires=");
            out.push_str(&expires.format(EXPIRES_FORMAT).to_string());
        }
        if let Some(path) = &self.path {
            out.push_str("; path=");
            out.push_str(path);
        }
        if let Some(domain) = &self.domain {
            out.push_str("; domain=");
            out.push_str(domain);
        }
        if self.secure {
            out.push_str("; secure");
        }
        out
    }
}

/// Looks up `name` in the ambient cookie string.
///
/// A token only matches at the start of the string or right after a space,
/// so `xname=` never satisfies a lookup for `name`. The value runs to the next
/// `;` and is URL-decoded; a value that does not decode is returned as stored.
pub fn get_cookie<C: AmbientCookies + ?Sized>(store: &C, name: &str) -> Option<String> {
    let cookies = store.cookie_string();
    let arg = format!("{}=", name);
    let mut i = 0;

    while i < cookies.len() {
        let j = i + arg.len();
        if cookies.as_bytes().get(i..j) == Some(arg.as_bytes()) {
            return Some(cookie_value_at(&cookies, j));
        }
        match cookies[i..].find(' ') {
            Some(pos) => i += pos + 1,
            None => break,
        }
    }
    None
}

fn cookie_value_at(cookies: &str, offset: usize) -> String {
    let rest = &cookies[offset..];
    let raw = match rest.find(';') {
        Some(end) => &rest[..end],
        None => rest,
    };
    urlencoding::decode(raw)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn set_cookie<C: AmbientCookies + ?Sized>(store: &mut C, cookie: &Cookie) {
    let serialized = cookie.serialize();
    log::debug!("[Cookies] Writing '{}'", serialized);
    store.write_cookie(&serialized);
}

/// In-memory cookie string for hosts without a browser document.
///
/// Follows browser write rules closely enough for the helpers above: a write
/// replaces the entry with the same name, an expiry in the past deletes it,
/// and writes the page may not make are dropped without a trace.
#[derive(Debug, Clone)]
pub struct DocumentCookies {
    page: Option<Url>,
    enabled: bool,
    entries: Vec<(String, String)>,
}

impl Default for DocumentCookies {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCookies {
    /// Store with no known origin: domain and secure checks are skipped.
    pub fn new() -> Self {
        Self {
            page: None,
            enabled: true,
            entries: Vec::new(),
        }
    }

    pub fn for_page(page_url: &str) -> Result<Self, String> {
        let page = Url::parse(page_url).map_err(|e| e.to_string())?;
        Ok(Self {
            page: Some(page),
            ..Self::new()
        })
    }

    /// Seeds the store from a `Cookie` request header.
    pub fn with_header(mut self, header: &str) -> Self {
        for pair in header.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                self.upsert(name.trim(), value.trim());
            }
        }
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn upsert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    fn domain_allowed(&self, domain: &str) -> bool {
        let Some(host) = self.page.as_ref().and_then(|u| u.host_str()) else {
            return true;
        };
        let host = host.to_ascii_lowercase();
        let domain = domain.trim_start_matches('.').to_ascii_lowercase();
        host == domain || host.ends_with(&format!(".{}", domain))
    }

    fn secure_allowed(&self) -> bool {
        self.page.as_ref().map_or(true, |u| u.scheme() == "https")
    }
}

impl AmbientCookies for DocumentCookies {
    fn cookie_string(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write_cookie(&mut self, serialized: &str) {
        if !self.enabled {
            log::debug!("[Cookies] Cookies disabled, dropping write");
            return;
        }

        let mut parts = serialized.split(';');
        let Some((name, value)) = parts.next().and_then(|p| p.trim().split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let mut expired = false;
        for attr in parts {
            let attr = attr.trim();
            let (key, val) = attr.split_once('=').unwrap_or((attr, ""));
            match key.to_ascii_lowercase().as_str() {
                "expires" => {
                    if let Ok(at) = NaiveDateTime::parse_from_str(val, EXPIRES_FORMAT) {
                        expired = at.and_utc() <= Utc::now();
                    }
                }
                "domain" => {
                    if !self.domain_allowed(val) {
                        log::debug!("[Cookies] Domain '{}' rejected for '{}'", val, name);
                        return;
                    }
                }
                "secure" => {
                    if !self.secure_allowed() {
                        log::debug!("[Cookies] Secure cookie '{}' rejected on insecure page", name);
                        return;
                    }
                }
                _ => {}
            }
        }

        if expired {
            self.remove(name);
        } else {
            self.upsert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    #[rstest]
    #[case("v")]
    #[case("HIDE")]
    #[case("hello world")]
    #[case("a=b&c")]
    #[case("100% ünïcode")]
    #[case("")]
    fn test_set_then_get_round_trip(#[case] value: &str) {
        let mut store = DocumentCookies::new();
        set_cookie(&mut store, &Cookie::new("k", value));
        assert_eq!(get_cookie(&store, "k").as_deref(), Some(value));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = DocumentCookies::new().with_header("a=1; b=2");
        assert_eq!(get_cookie(&store, "c"), None);
        assert_eq!(get_cookie(&DocumentCookies::new(), "a"), None);
    }

    #[test]
    fn test_get_only_matches_whole_token() {
        let store = DocumentCookies::new().with_header("xk=1; k=2");
        assert_eq!(get_cookie(&store, "k").as_deref(), Some("2"));
        assert_eq!(get_cookie(&store, "xk").as_deref(), Some("1"));
    }

    #[test]
    fn test_get_last_entry_runs_to_end() {
        let store = DocumentCookies::new().with_header("a=1; MarvelQuickEdit=SHOW");
        assert_eq!(get_cookie(&store, "MarvelQuickEdit").as_deref(), Some("SHOW"));
    }

    #[test]
    fn test_undecodable_value_returned_raw() {
        let store = DocumentCookies::new().with_header("k=%FF%FE");
        assert_eq!(get_cookie(&store, "k").as_deref(), Some("%FF%FE"));
    }

    #[test]
    fn test_serialize_with_all_attributes() {
        let expires = Utc.with_ymd_and_hms(2030, 1, 6, 12, 30, 0).unwrap();
        let cookie = Cookie::new("pref", "a b")
            .with_expires(expires)
            .with_path("/")
            .with_domain("example.com")
            .with_secure(true);
        assert_eq!(
            cookie.serialize(),
            "pref=a%20b; expires=Sun, 06 Jan 2030 12:30:00 GMT; path=/; domain=example.com; secure"
        );
    }

    #[test]
    fn test_serialize_plain() {
        assert_eq!(Cookie::new("k", "v").serialize(), "k=v");
    }

    #[test]
    fn test_write_replaces_same_name() {
        let mut store = DocumentCookies::new();
        set_cookie(&mut store, &Cookie::new("k", "one"));
        set_cookie(&mut store, &Cookie::new("other", "x"));
        set_cookie(&mut store, &Cookie::new("k", "two"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.cookie_string(), "k=two; other=x");
    }

    #[test]
    fn test_past_expiry_deletes() {
        let mut store = DocumentCookies::new().with_header("k=v");
        let past = Utc::now() - Duration::days(1);
        set_cookie(&mut store, &Cookie::new("k", "").with_expires(past));
        assert!(store.is_empty());
        assert_eq!(get_cookie(&store, "k"), None);
    }

    #[test]
    fn test_future_expiry_kept() {
        let mut store = DocumentCookies::new();
        let future = Utc::now() + Duration::days(30);
        set_cookie(&mut store, &Cookie::new("k", "v").with_expires(future));
        assert_eq!(get_cookie(&store, "k").as_deref(), Some("v"));
    }

    #[test]
    fn test_disabled_cookies_silently_drop_writes() {
        let mut store = DocumentCookies::new();
        store.set_enabled(false);
        set_cookie(&mut store, &Cookie::new("k", "v"));
        assert_eq!(get_cookie(&store, "k"), None);
    }

    #[rstest]
    #[case("example.com", true)]
    #[case(".example.com", true)]
    #[case("apex.example.com", true)]
    #[case("other.com", false)]
    #[case("ample.com", false)]
    fn test_domain_must_match_page(#[case] domain: &str, #[case] accepted: bool) {
        let mut store = DocumentCookies::for_page("https://apex.example.com/pls/f?p=100").unwrap();
        set_cookie(&mut store, &Cookie::new("k", "v").with_domain(domain));
        assert_eq!(get_cookie(&store, "k").is_some(), accepted);
    }

    #[test]
    fn test_secure_cookie_needs_https_page() {
        let mut plain = DocumentCookies::for_page("http://example.com/").unwrap();
        set_cookie(&mut plain, &Cookie::new("k", "v").with_secure(true));
        assert_eq!(get_cookie(&plain, "k"), None);

        let mut tls = DocumentCookies::for_page("https://example.com/").unwrap();
        set_cookie(&mut tls, &Cookie::new("k", "v").with_secure(true));
        assert_eq!(get_cookie(&tls, "k").as_deref(), Some("v"));
    }

    #[test]
    fn test_for_page_rejects_bad_url() {
        assert!(DocumentCookies::for_page("not a url").is_err());
    }
}
