use crate::error::FetchError;

/// Download a flat-text archive and segment it into paragraphs.
pub(super) async fn fetch(client: &reqwest::Client, url: &str) -> Result<Vec<String>, FetchError> {
    let raw = super::get_text(client, url).await?;
    Ok(split_paragraphs(&raw))
}

/// Split a flat-file text on blank lines. Segments are trimmed and
/// whitespace-only segments dropped. Front matter and license
/// boilerplate are kept, so they count toward passage numbers.
pub fn split_paragraphs(raw: &str) -> Vec<String> {
    raw.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
