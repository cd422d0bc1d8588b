//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in query values (RFC 3986 unreserved)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a single query-string value
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Link to the single-post view for a post id
///
/// # Examples
/// ```
/// assert_eq!(noteme::helpers::post_url("post.html", "dns-guide"), "post.html?id=dns-guide");
/// ```
pub fn post_url(post_page: &str, id: &str) -> String {
    format!("{}?id={}", post_page, encode_query_value(id))
}

/// Link to the listing page with the given filter state; empty and default
/// values are left out
pub fn listing_url(listing_page: &str, category: Option<&str>, query: &str, page: usize) -> String {
    let mut params = Vec::new();

    if let Some(category) = category {
        params.push(format!("category={}", encode_query_value(category)));
    }
    if !query.is_empty() {
        params.push(format!("q={}", encode_query_value(query)));
    }
    if page > 1 {
        params.push(format!("page={}", page));
    }

    if params.is_empty() {
        listing_page.to_string()
    } else {
        format!("{}?{}", listing_page, params.join("&"))
    }
}
