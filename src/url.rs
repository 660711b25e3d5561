//! URL joining and query-string assembly.
//!
//! fletch hands fully resolved URLs to the transport, so relative-URL
//! resolution against the client's base URL and query-parameter encoding
//! both live here.

use std::borrow::Cow;

fn is_absolute(url: &str) -> bool {
    url.len() >= 8
        && (url[..7].eq_ignore_ascii_case("http://") || url[..8].eq_ignore_ascii_case("https://"))
}

pub(crate) fn concat_url(base: Option<&str>, relative: &str) -> String {
    let Some(base) = base.filter(|_| !is_absolute(relative)) else {
        return relative.into();
    };
    let (proto, protsep) = base.split_once("//").unwrap_or(("", base));
    let host_path = protsep.split_once('?').unwrap_or((protsep, "")).0;
    if relative.starts_with("//") {
        proto.to_owned() + relative
    } else if relative.starts_with('/') {
        let host = host_path
            .split_once('/')
            .map_or(host_path, |(host, _)| host);
        format!("{proto}//{host}{relative}")
    } else {
        let pathsep = host_path
            .rsplit_once('/')
            .map_or(host_path, |(pathsep, _)| pathsep);
        format!("{proto}//{pathsep}/{relative}")
    }
}

/// Append percent-encoded query pairs, extending any query string already
/// present in the URL.
pub(crate) fn append_query(
    mut url: String,
    pairs: &[(Cow<'static, str>, Cow<'static, str>)],
) -> String {
    if pairs.is_empty() {
        return url;
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    let encoded = serializer.finish();
    match url.rfind('?') {
        None => {
            url.push('?');
        }
        Some(i) if !url[i..].ends_with('?') && !url.ends_with('&') => {
            url.push('&');
        }
        Some(_) => {}
    }
    url + &encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute() {
        for url in ["http://example.com", "HTTPS://EXAMPLE.COM"] {
            assert!(is_absolute(url), "{url}");
        }
        for url in ["example.com", "/example", "ftp://example.com"] {
            assert!(!is_absolute(url), "{url}");
        }
    }

    #[test]
    fn test_concat_url() {
        let testcases = [
            (None, "http://example.com", "http://example.com"),
            (Some("http://a.com"), "https://b.com", "https://b.com"),
            (Some("http://a.com"), "//b.com", "http://b.com"),
            (Some("http://a.com"), "/b", "http://a.com/b"),
            (Some("http://a.com/a/b"), "/c", "http://a.com/c"),
            (Some("http://a.com/a/b"), "c", "http://a.com/a/c"),
            (Some("http://a.com/a/b/"), "c", "http://a.com/a/b/c"),
            (Some("http://a.com/a/b?q=1"), "c", "http://a.com/a/c"),
            (Some("http://a.com?q=1"), "c", "http://a.com/c"),
        ];
        for (base, relative, expected) in testcases {
            assert_eq!(
                concat_url(base, relative),
                expected,
                "{}, {relative}, {expected}",
                base.unwrap_or("None"),
            );
        }
    }

    #[test]
    fn test_append_query_encodes_pairs() {
        let url = append_query(
            "http://a.com/search".into(),
            &[("q".into(), "a b&c".into()), ("page".into(), "2".into())],
        );
        assert_eq!(url, "http://a.com/search?q=a+b%26c&page=2");
    }

    #[test]
    fn test_append_query_extends_existing() {
        let url = append_query("http://a.com/search?q=1".into(), &[("p".into(), "2".into())]);
        assert_eq!(url, "http://a.com/search?q=1&p=2");

        let url = append_query("http://a.com/search?".into(), &[("p".into(), "2".into())]);
        assert_eq!(url, "http://a.com/search?p=2");
    }

    #[test]
    fn test_append_query_empty_is_noop() {
        assert_eq!(append_query("http://a.com".into(), &[]), "http://a.com");
    }
}
