// src/crawl/resolve.rs
// =============================================================================
// Turns a link found on a page into an absolute URL.
//
// Rules:
// - Already absolute (scheme + host)? Return it exactly as written
// - Otherwise join it onto the page URL (RFC 3986 resolution via `url`)
// - Never fails: if joining is impossible the candidate comes back as-is,
//   and the downloader will report it as unreachable later
// =============================================================================

use url::Url;

// Resolves a possibly-relative link against the page it was found on
//
// Examples:
//   base = "https://www3.nd.edu/~pbui/teaching/cse.20289.sp24/"
//   "static/img/ostep.jpg"  -> ".../cse.20289.sp24/static/img/ostep.jpg"
//   "https://automatetheboringstuff.com/" -> unchanged
pub fn resolve_url(base: &str, candidate: &str) -> String {
    if is_absolute(candidate) {
        return candidate.to_string();
    }

    match Url::parse(base).and_then(|base| base.join(candidate)) {
        Ok(url) => url.to_string(),
        Err(_) => candidate.to_string(),
    }
}

fn is_absolute(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| url.has_host())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www3.nd.edu/~pbui/teaching/cse.20289.sp24/";

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_url(BASE, "static/img/ostep.jpg"),
            "https://www3.nd.edu/~pbui/teaching/cse.20289.sp24/static/img/ostep.jpg"
        );
    }

    #[test]
    fn test_absolute_link_is_unchanged() {
        assert_eq!(
            resolve_url(BASE, "https://automatetheboringstuff.com/"),
            "https://automatetheboringstuff.com/"
        );
    }

    #[test]
    fn test_absolute_links_ignore_base() {
        let candidates = [
            "https://example.com/a.jpg",
            "http://example.com/music/song.mp3",
            "https://cdn.example.org/img/x.png?size=large#top",
            "http://EXAMPLE.com/Upper.PDF",
        ];
        let bases = [BASE, "http://other.test/deep/page.html", "not a url"];

        for candidate in candidates {
            for base in bases {
                assert_eq!(resolve_url(base, candidate), candidate);
            }
        }
    }

    #[test]
    fn test_relative_links_share_scheme_and_host() {
        let bases = [
            BASE,
            "http://example.com/gallery/index.html",
            "https://example.org",
        ];
        let candidates = [
            "photo.jpg",
            "/root.png",
            "../up/one.pdf",
            "sub/dir/track.mp3?x=1",
            "#frag",
        ];

        for base in bases {
            let base_url = Url::parse(base).unwrap();
            for candidate in candidates {
                let resolved = Url::parse(&resolve_url(base, candidate)).unwrap();
                assert_eq!(resolved.scheme(), base_url.scheme());
                assert_eq!(resolved.host_str(), base_url.host_str());
            }
        }
    }

    #[test]
    fn test_parent_and_root_relative() {
        let base = "https://example.com/a/b/page.html";
        assert_eq!(resolve_url(base, "../x.jpg"), "https://example.com/a/x.jpg");
        assert_eq!(resolve_url(base, "/x.jpg"), "https://example.com/x.jpg");
        assert_eq!(
            resolve_url(base, "//cdn.example.com/x.jpg"),
            "https://cdn.example.com/x.jpg"
        );
    }

    #[test]
    fn test_unparseable_base_returns_candidate() {
        assert_eq!(resolve_url("not a url", "img/x.png"), "img/x.png");
    }
}
