use url::Url;

/// Resolves `href` against the page URL it was found on.
///
/// Follows standard base-URL resolution (scheme-relative, path-relative with `..`,
/// query-only and fragment-only references). Returns `None` when neither the base
/// nor the href yields an absolute URL.
///
/// # Examples
///
/// - `normalize("../a.pdf", "https://kanoon.ir/x/y")` → `"https://kanoon.ir/a.pdf"`
/// - `normalize("//ghalamchi.ir/f", "https://kanoon.ir/")` → `"https://ghalamchi.ir/f"`
pub fn normalize(href: &str, base_url: &str) -> Option<String> {
    let joined = match Url::parse(base_url) {
        Ok(base) => base.join(href),
        Err(_) => Url::parse(href),
    };
    joined.ok().map(String::from)
}
