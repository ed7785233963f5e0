use url::Url;

/// Path prefix of search-engine redirect links (`https://duckduckgo.com/l/?uddg=...`).
pub const REDIRECT_PATH_PREFIX: &str = "/l/";

/// Returns the destination carried in the `param` query parameter of a redirect-wrapper
/// link, percent-decoded. Any other URL is returned unchanged.
///
/// # Examples
///
/// - `unwrap_redirect("https://duckduckgo.com/l/?kh=-1&uddg=https%3A%2F%2Fkanoon.ir%2Ffoo", "uddg")`
///   → `"https://kanoon.ir/foo"`
pub fn unwrap_redirect(url: &str, param: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(p) => p,
        Err(_) => return url.to_string(),
    };
    if !parsed.path().starts_with(REDIRECT_PATH_PREFIX) {
        return url.to_string();
    }
    parsed
        .query_pairs()
        .find(|(k, _)| k == param)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| url.to_string())
}
