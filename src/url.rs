//! Query-string helpers for page URLs.
//!
//! Only what deep links, share links and page routing need: read one
//! parameter, set one parameter, take the path. Fragments are preserved.

/// Split `url` into (base, query without '?', fragment with '#').
fn split_url(url: &str) -> (&str, Option<&str>, &str) {
    let (rest, fragment) = match url.find('#') {
        Some(pos) => (&url[..pos], &url[pos..]),
        None => (url, ""),
    };
    match rest.find('?') {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..]), fragment),
        None => (rest, None, fragment),
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Path part of a URL: no scheme, host, query or fragment. `/` when empty.
pub fn path_of(url: &str) -> &str {
    let (base, _, _) = split_url(url);
    let after_scheme = match base.find("://") {
        Some(pos) => &base[pos + 3..],
        None => return if base.is_empty() { "/" } else { base },
    };
    match after_scheme.find('/') {
        Some(pos) => &after_scheme[pos..],
        None => "/",
    }
}

/// First value of `key` in the query string, percent-decoded.
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let (_, query, _) = split_url(url);
    query?
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k) == key).then(|| decode_component(v))
        })
}

/// Return `url` with `key` set to `value`, replacing any existing values of
/// `key` and keeping other parameters in order.
pub fn set_query_param(url: &str, key: &str, value: &str) -> String {
    let (base, query, fragment) = split_url(url);

    let mut pairs: Vec<String> = query
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let k = pair.split_once('=').map(|(k, _)| k).unwrap_or(pair);
            decode_component(k) != key
        })
        .map(str::to_string)
        .collect();
    pairs.push(format!(
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(value)
    ));

    format!("{}?{}{}", base, pairs.join("&"), fragment)
}
