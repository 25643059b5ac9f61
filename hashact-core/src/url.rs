//! URL string helpers.

/// Strip the fragment from `url`, dropping everything from the first `#`.
///
/// ```rust
/// use hashact_core::remove_hash_symbol;
///
/// assert_eq!(remove_hash_symbol("/foo/#bar"), "/foo/");
/// assert_eq!(remove_hash_symbol("#bar"), "");
/// assert_eq!(remove_hash_symbol("/plain"), "/plain");
/// ```
pub fn remove_hash_symbol(url: &str) -> &str {
    match url.find('#') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Join a pathname and a query string (with its `?`, or empty) into the URL
/// used for a fragment-free history rewrite.
pub fn path_with_query(pathname: &str, search: &str) -> String {
    let mut url = String::with_capacity(pathname.len() + search.len());
    url.push_str(pathname);
    url.push_str(search);
    url
}
