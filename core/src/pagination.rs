//! `Link` header parsing.
//!
//! GitHub paginates list endpoints with an RFC 5988 `Link` header:
//!
//! ```text
//! <https://api.github.com/orgs/x/repos?page=2>; rel="next", <https://api.github.com/orgs/x/repos?page=5>; rel="last"
//! ```
//!
//! Only the `page` query parameter of each target is read, so relative
//! targets such as `<?page=2>` work the same as absolute ones. Empty entries
//! (a trailing comma) are skipped.

/// Page numbers advertised by a `Link` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

pub fn parse_link_header(value: &str) -> PageLinks {
    let mut links = PageLinks::default();

    for entry in value.split(',') {
        let mut parts = entry.split(';');
        let Some(target) = parts.next().map(str::trim) else {
            continue;
        };
        let Some(target) = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
            continue;
        };
        let Some(page) = page_param(target) else {
            continue;
        };

        for param in parts {
            let Some(rel) = param.trim().strip_prefix("rel=") else {
                continue;
            };
            match rel.trim_matches('"') {
                "first" => links.first = Some(page),
                "last" => links.last = Some(page),
                "next" => links.next = Some(page),
                "prev" => links.prev = Some(page),
                _ => {}
            }
        }
    }

    links
}

fn page_param(target: &str) -> Option<u32> {
    let (_, query) = target.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_relative_targets_with_trailing_comma() {
        let links = parse_link_header(r#"<?page=1>; rel="first",<?page=3>; rel="last",<?page=3>; rel="next",<?page=1>; rel="prev","#);
        assert_eq!(
            links,
            PageLinks {
                first: Some(1),
                last: Some(3),
                next: Some(3),
                prev: Some(1),
            }
        );
    }

    #[test]
    fn parses_absolute_targets() {
        let links = parse_link_header(
            r#"<https://api.github.com/search/code?q=addClass&page=15>; rel="next", <https://api.github.com/search/code?q=addClass&page=34>; rel="last""#,
        );
        assert_eq!(links.next, Some(15));
        assert_eq!(links.last, Some(34));
        assert_eq!(links.prev, None);
    }

    #[test]
    fn empty_header_has_no_links() {
        assert_eq!(parse_link_header(""), PageLinks::default());
    }

    #[test]
    fn targets_without_page_are_ignored() {
        let links = parse_link_header(r#"<https://api.github.com/user/repos>; rel="next""#);
        assert_eq!(links.next, None);
    }
}
