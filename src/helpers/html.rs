//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Anchor back to the listing page, used by the post view's error messages
pub fn back_to_listing(listing_page: &str) -> String {
    format!(
        r#"<a href="{}">Return to blog listing</a>"#,
        html_escape(listing_page)
    )
}
