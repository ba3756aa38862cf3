// 🔗 Catalog Links - Search URLs stored alongside imported books

const GOODREADS_SEARCH_BASE: &str = "https://www.goodreads.com/search";

/// Build a Goodreads search URL for a title and optional author.
///
/// Query is form-encoded (spaces become `+`). The author is appended only
/// when it is non-blank.
pub fn build_goodreads_search_url(title: &str, author: Option<&str>) -> String {
    let mut query = title.trim().to_string();

    if let Some(author) = author.map(str::trim).filter(|a| !a.is_empty()) {
        query.push(' ');
        query.push_str(author);
    }

    let encoded = urlencoding::encode(&query).replace("%20", "+");
    format!("{}?q={}", GOODREADS_SEARCH_BASE, encoded)
}
