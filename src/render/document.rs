//! HTML document assembly.

/// Wrap a rendered fragment in the page document.
///
/// The title is the page identifier, escaped; the fragment is inserted as-is.
pub fn wrap(page_identifier: &str, fragment: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            "<html>",
            "<head><meta charset=\"utf-8\"><title>{title}</title></head>",
            "<body><div id=\"root\">{fragment}</div></body>",
            "</html>",
        ),
        title = handlebars::html_escape(page_identifier),
        fragment = fragment,
    )
}
