//! Path and identifier classification.
//!
//! # Responsibilities
//! - Normalize request paths into page slugs
//! - Recognize the API namespace
//! - Recognize single dynamic segments (`[name]`)
//! - Reject identifiers that could escape the pages directory
//!
//! # Design Decisions
//! - Path matching is case-sensitive (identifiers mirror file names)
//! - No regex, plain prefix/suffix checks only

/// Identifier of the page served for `/`.
pub const INDEX_PAGE: &str = "index";

/// Prefix of the API namespace.
pub const API_PREFIX: &str = "api/";

/// Turn a request path into a page slug.
///
/// All leading slashes are stripped; the empty path maps to [`INDEX_PAGE`].
pub fn normalize(url_path: &str) -> &str {
    let slug = url_path.trim_start_matches('/');
    if slug.is_empty() {
        INDEX_PAGE
    } else {
        slug
    }
}

/// Whether an identifier lives in the API namespace.
pub fn is_api(identifier: &str) -> bool {
    identifier.starts_with(API_PREFIX)
}

/// Parameter name bound by a dynamic page identifier, `[slug]` → `slug`.
///
/// Only top-level identifiers qualify; nested dynamic routes are not supported.
pub fn dynamic_param(identifier: &str) -> Option<&str> {
    let name = identifier.strip_prefix('[')?.strip_suffix(']')?;
    if name.is_empty() || name.contains(['/', '[', ']']) {
        return None;
    }
    Some(name)
}

/// Whether any segment of an identifier is dynamic.
pub fn has_dynamic_segment(identifier: &str) -> bool {
    identifier.split('/').any(|segment| dynamic_param(segment).is_some())
}

/// Whether an identifier can be joined onto the pages directory safely.
pub fn is_safe_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && !identifier.contains('\\')
        && identifier
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/"), "index");
        assert_eq!(normalize(""), "index");
        assert_eq!(normalize("///"), "index");
        assert_eq!(normalize("/about"), "about");
        assert_eq!(normalize("//api/hello"), "api/hello");
        assert_eq!(normalize("/about/"), "about/");
    }

    #[test]
    fn test_dynamic_param() {
        assert_eq!(dynamic_param("[slug]"), Some("slug"));
        assert_eq!(dynamic_param("[id]"), Some("id"));
        assert_eq!(dynamic_param("[]"), None);
        assert_eq!(dynamic_param("slug"), None);
        assert_eq!(dynamic_param("[slug"), None);
        assert_eq!(dynamic_param("blog/[slug]"), None);
        assert_eq!(dynamic_param("[[slug]]"), None);
    }

    #[test]
    fn test_has_dynamic_segment() {
        assert!(has_dynamic_segment("[slug]"));
        assert!(has_dynamic_segment("blog/[slug]"));
        assert!(!has_dynamic_segment("blog/post"));
    }

    #[test]
    fn test_api_namespace() {
        assert!(is_api("api/hello"));
        assert!(!is_api("api"));
        assert!(!is_api("apis/hello"));
    }

    #[test]
    fn test_safe_identifier() {
        assert!(is_safe_identifier("about"));
        assert!(is_safe_identifier("api/hello"));
        assert!(is_safe_identifier("[slug]"));
        assert!(!is_safe_identifier(""));
        assert!(!is_safe_identifier("../secret"));
        assert!(!is_safe_identifier("a/../../b"));
        assert!(!is_safe_identifier("a//b"));
        assert!(!is_safe_identifier("/etc/passwd"));
        assert!(!is_safe_identifier("a\\b"));
    }
}
