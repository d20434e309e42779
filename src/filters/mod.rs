// src/filters/mod.rs
//! Template filter helpers: one-shot string/markup transformations invoked by
//! a rendering pipeline. URL reversal belongs to the host, so filters that
//! need it take a resolver closure instead of reading routing state.

/// Map a message tag to its Bootstrap alert class.
///
/// `info`, `success` and `error` have dedicated classes; everything else
/// (debug, warning, unknown tags) gets the plain yellow alert, i.e. `""`.
pub fn message_alert_class(tag: &str) -> &'static str {
    match tag {
        "info" => "alert-info",
        "success" => "alert-success",
        "error" => "alert-error",
        _ => "",
    }
}

/// Render `(id, label)` items as a comma-joined list of anchors, resolving
/// each id to a detail URL via `resolve`. Items the resolver cannot place are
/// skipped.
pub fn linked_list<'a, I, F>(items: I, resolve: F) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
    F: Fn(&str) -> Option<String>,
{
    let links: Vec<String> = items
        .into_iter()
        .filter_map(|(id, label)| resolve(id).map(|url| format!("<a href='{url}'>{label}</a>")))
        .collect();
    links.join(", ")
}

/// Prefix `base` onto `url` unless the url is already absolute.
///
/// Asset urls are sometimes absolute (a CDN) and sometimes site-relative
/// (`/img/foo.png`), but some surfaces (emails) always need absolute ones.
pub fn default_base(url: &str, base: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{base}{url}")
    }
}

pub fn starts_with(path: &str, prefix: &str) -> bool {
    path.starts_with(prefix)
}

/// `" active"` when the request path lives under the url that `resolve`
/// produces for `url_name`, so `/tasks/`, `/tasks/7` and `/tasks/create/`
/// all light up a "Tasks" nav element. Unresolvable names yield `""`.
pub fn active_url_class<F>(request_path: &str, url_name: &str, resolve: F) -> &'static str
where
    F: Fn(&str) -> Option<String>,
{
    match resolve(url_name) {
        Some(url) if request_path.starts_with(&url) => " active",
        _ => "",
    }
}
