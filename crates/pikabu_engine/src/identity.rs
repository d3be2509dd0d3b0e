use url::Url;

/// Turns a title-link `href` into an absolute URL that can be fetched.
///
/// Protocol-relative links are upgraded to `https:`; other relative links are
/// joined onto `base`. Returns `None` for empty or unresolvable hrefs.
pub fn resolve_fetch_url(href: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(rest) = trimmed.strip_prefix("//") {
        return Url::parse(&format!("https://{rest}")).ok();
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.and_then(|base| base.join(trimmed).ok())
}

/// An empty identifier counts as already processed.
pub fn is_known_post(id: &str) -> bool {
    id.is_empty()
}
