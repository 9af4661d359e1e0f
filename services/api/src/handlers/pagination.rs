use axum::http::Uri;
use serde::Serialize;
use url::form_urlencoded;

use foodgram_domain::pagination::Page;

/// Page-number envelope: `{"count", "next", "previous", "results"}`.
///
/// `next` / `previous` are path-relative links that keep every other query
/// parameter of the current request.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PageResponse<T> {
    pub fn from_page<U>(page: Page<U>, uri: &Uri, f: impl FnMut(U) -> T) -> Self {
        let request = page.request;
        Self {
            count: page.count,
            next: request
                .has_next(page.count)
                .then(|| page_link(uri, request.page + 1)),
            previous: request
                .has_previous()
                .then(|| page_link(uri, request.page - 1)),
            results: page.items.into_iter().map(f).collect(),
        }
    }
}

/// Rebuild the request URI pointing at `page`. Page 1 is written without a
/// `page` parameter.
fn page_link(uri: &Uri, page: u32) -> String {
    let kept: Vec<(String, String)> = uri
        .query()
        .map(|q| {
            form_urlencoded::parse(q.as_bytes())
                .filter(|(key, _)| key != "page")
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.extend_pairs(&kept);
    if page > 1 {
        query.append_pair("page", &page.to_string());
    }
    let query = query.finish();
    if query.is_empty() {
        uri.path().to_owned()
    } else {
        format!("{}?{}", uri.path(), query)
    }
}
