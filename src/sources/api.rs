//! Response mappers for the JSON passage providers. Each provider has
//! its own response shape; each mapper flattens it into an ordered
//! passage list. Missing fields fail deserialization, so a malformed
//! response is an error rather than an empty text.

use serde::Deserialize;

use crate::error::FetchError;

// --- bible-api.com ---

#[derive(Deserialize)]
struct BibleResponse {
    verses: Vec<BibleVerse>,
}

#[derive(Deserialize)]
struct BibleVerse {
    book_name: String,
    chapter: u32,
    verse: u32,
    text: String,
}

pub(super) async fn fetch_bible(
    client: &reqwest::Client,
    book: &str,
    translation: Option<&str>,
) -> Result<Vec<String>, FetchError> {
    let mut url = format!("https://bible-api.com/{}", book);
    if let Some(t) = translation {
        url.push_str(&format!("?translation={}", t));
    }
    let body = super::get_text(client, &url).await?;
    Ok(map_bible(&body)?)
}

/// One passage per verse, formatted `"{book} {chapter}:{verse} {text}"`.
fn map_bible(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let resp: BibleResponse = serde_json::from_str(body)?;
    Ok(resp
        .verses
        .iter()
        .map(|v| format!("{} {}:{} {}", v.book_name, v.chapter, v.verse, v.text.trim()))
        .collect())
}

// --- sefaria.org ---

#[derive(Deserialize)]
struct SefariaResponse {
    text: Vec<String>,
}

pub(super) async fn fetch_sefaria(
    client: &reqwest::Client,
    reference: &str,
) -> Result<Vec<String>, FetchError> {
    let url = format!("https://www.sefaria.org/api/texts/{}?lang=bi", reference);
    let body = super::get_text(client, &url).await?;
    Ok(map_sefaria(&body)?)
}

/// Passages taken directly from the response's `text` array. Sefaria
/// embeds markup in the strings; it is passed through untouched.
fn map_sefaria(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let resp: SefariaResponse = serde_json::from_str(body)?;
    Ok(resp.text)
}

// --- alquran.cloud ---

#[derive(Deserialize)]
struct AlQuranResponse {
    data: AlQuranData,
}

#[derive(Deserialize)]
struct AlQuranData {
    ayahs: Vec<AlQuranAyah>,
}

#[derive(Deserialize)]
struct AlQuranAyah {
    text: String,
}

pub(super) async fn fetch_alquran(
    client: &reqwest::Client,
    surah: u32,
    edition: &str,
) -> Result<Vec<String>, FetchError> {
    let url = format!("https://api.alquran.cloud/v1/surah/{}/{}", surah, edition);
    let body = super::get_text(client, &url).await?;
    Ok(map_alquran(&body)?)
}

/// One passage per ayah's `text` field.
fn map_alquran(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let resp: AlQuranResponse = serde_json::from_str(body)?;
    Ok(resp.data.ayahs.into_iter().map(|a| a.text).collect())
}

// --- api.nephi.org ---

#[derive(Deserialize)]
struct NephiResponse {
    verses: Vec<NephiVerse>,
}

#[derive(Deserialize)]
struct NephiVerse {
    text: String,
}

pub(super) async fn fetch_nephi(
    client: &reqwest::Client,
    book: u32,
) -> Result<Vec<String>, FetchError> {
    let url = format!("https://api.nephi.org/book_of_mormon/{}", book);
    let body = super::get_text(client, &url).await?;
    Ok(map_nephi(&body)?)
}

/// One passage per verse object's `text` field.
fn map_nephi(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let resp: NephiResponse = serde_json::from_str(body)?;
    Ok(resp.verses.into_iter().map(|v| v.text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_bible() {
        let body = r#"{
            "reference": "Genesis 1",
            "verses": [
                {"book_id": "GEN", "book_name": "Genesis", "chapter": 1, "verse": 1, "text": "In the beginning God created the heaven and the earth.\n"},
                {"book_id": "GEN", "book_name": "Genesis", "chapter": 1, "verse": 2, "text": "And the earth was without form, and void.\n"}
            ]
        }"#;
        let passages = map_bible(body).unwrap();
        assert_eq!(
            passages,
            vec![
                "Genesis 1:1 In the beginning God created the heaven and the earth.",
                "Genesis 1:2 And the earth was without form, and void."
            ]
        );
    }

    #[test]
    fn test_map_bible_missing_verses_is_error() {
        assert!(map_bible(r#"{"error": "not found"}"#).is_err());
    }

    #[test]
    fn test_map_bible_missing_verse_field_is_error() {
        let body = r#"{"verses": [{"book_name": "Genesis", "chapter": 1, "text": "no verse number"}]}"#;
        assert!(map_bible(body).is_err());
    }

    #[test]
    fn test_map_sefaria() {
        let body = r#"{"ref": "Genesis 1", "text": ["In the beginning...", "And the earth..."], "he": ["..."]}"#;
        assert_eq!(
            map_sefaria(body).unwrap(),
            vec!["In the beginning...", "And the earth..."]
        );
    }

    #[test]
    fn test_map_sefaria_missing_text_is_error() {
        assert!(map_sefaria(r#"{"ref": "Genesis 1", "he": []}"#).is_err());
    }

    #[test]
    fn test_map_alquran() {
        let body = r#"{
            "code": 200,
            "status": "OK",
            "data": {
                "number": 1,
                "name": "Al-Fatihah",
                "ayahs": [
                    {"number": 1, "text": "Praise be to Allah, Lord of the Worlds,"},
                    {"number": 2, "text": "The Beneficent, the Merciful."}
                ]
            }
        }"#;
        assert_eq!(
            map_alquran(body).unwrap(),
            vec![
                "Praise be to Allah, Lord of the Worlds,",
                "The Beneficent, the Merciful."
            ]
        );
    }

    #[test]
    fn test_map_alquran_missing_ayahs_is_error() {
        assert!(map_alquran(r#"{"code": 200, "data": {"number": 1}}"#).is_err());
    }

    #[test]
    fn test_map_nephi() {
        let body = r#"{"book": "1 Nephi", "verses": [{"verse": 1, "text": "I, Nephi, having been born of goodly parents..."}]}"#;
        assert_eq!(
            map_nephi(body).unwrap(),
            vec!["I, Nephi, having been born of goodly parents..."]
        );
    }

    #[test]
    fn test_map_nephi_not_json_is_error() {
        assert!(map_nephi("<html>Service Unavailable</html>").is_err());
    }
}
