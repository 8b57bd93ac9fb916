pub mod api;
pub mod gutenberg;

use std::time::Duration;

use anyhow::Context;

use crate::error::FetchError;

/// Where a title's passages come from. One variant per provider shape,
/// so adding or changing a provider never touches title-level logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Plain-text archive, split into paragraphs and persisted on disk.
    Gutenberg { url: String },
    /// bible-api.com. One chapter per request.
    BibleApi {
        book: String,
        translation: Option<String>,
    },
    /// Sefaria bilingual text API. One reference (e.g. "Genesis.1") per request.
    Sefaria { reference: String },
    /// alquran.cloud. One surah per request.
    AlQuran { surah: u32, edition: String },
    /// api.nephi.org. One book per request.
    Nephi { book: u32 },
}

impl Source {
    /// Local sources are persisted on disk after the first fetch;
    /// everything else is re-fetched live once per process run.
    pub fn is_local(&self) -> bool {
        matches!(self, Source::Gutenberg { .. })
    }

    pub fn provenance(&self) -> Provenance {
        if self.is_local() {
            Provenance::Local
        } else {
            Provenance::Api
        }
    }
}

/// How a resolved text got here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Downloaded once from a flat-file archive, persisted on disk.
    Local,
    /// Fetched live from a provider API each process run.
    Api,
}

impl Provenance {
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Local => "local",
            Provenance::Api => "api",
        }
    }
}

/// A catalog entry: a title, where to fetch it, and an optional note
/// about how much of the work the source actually covers.
#[derive(Debug, Clone)]
pub struct TextEntry {
    pub title: String,
    pub source: Source,
    /// The API providers serve a single fixed subdivision of each work,
    /// not the whole text. The note surfaces that to users in `list`.
    pub scope_note: Option<String>,
}

impl TextEntry {
    pub fn local(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            source: Source::Gutenberg {
                url: url.to_string(),
            },
            scope_note: None,
        }
    }

    pub fn api(title: &str, source: Source, scope_note: &str) -> Self {
        Self {
            title: title.to_string(),
            source,
            scope_note: Some(scope_note.to_string()),
        }
    }
}

/// The built-in catalog. Order here is registration order: it is the
/// order `list` reports and the order search scans.
pub fn builtin_catalog() -> Vec<TextEntry> {
    vec![
        TextEntry::local("Bhagavad Gita", "https://www.gutenberg.org/files/2388/2388-0.txt"),
        TextEntry::local("Upanishads", "https://www.gutenberg.org/files/23455/23455-0.txt"),
        TextEntry::local("Dhammapada", "https://www.gutenberg.org/files/159/159-0.txt"),
        TextEntry::api(
            "World English Bible",
            Source::BibleApi {
                book: "Genesis".to_string(),
                translation: None,
            },
            "Genesis 1 only",
        ),
        TextEntry::api(
            "KJV",
            Source::BibleApi {
                book: "Genesis".to_string(),
                translation: Some("kjv".to_string()),
            },
            "Genesis 1 only",
        ),
        TextEntry::api(
            "Tanakh (JPS 1917)",
            Source::Sefaria {
                reference: "Genesis.1".to_string(),
            },
            "Genesis 1 only",
        ),
        TextEntry::api(
            "Quran (Pickthall)",
            Source::AlQuran {
                surah: 1,
                edition: "en.pickthall".to_string(),
            },
            "Surah Al-Fatihah only",
        ),
        TextEntry::api(
            "Book of Mormon",
            Source::Nephi { book: 1 },
            "1 Nephi only",
        ),
    ]
}

/// HTTP fetch layer shared by all source adapters.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("scriptorium/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch the full passage sequence for a source. A fetch that yields
    /// no passages is an error, never an empty text, so callers can tell
    /// a failed resolution apart from a zero-passage title.
    pub async fn fetch(&self, source: &Source) -> Result<Vec<String>, FetchError> {
        let passages = match source {
            Source::Gutenberg { url } => gutenberg::fetch(&self.client, url).await?,
            Source::BibleApi { book, translation } => {
                api::fetch_bible(&self.client, book, translation.as_deref()).await?
            }
            Source::Sefaria { reference } => api::fetch_sefaria(&self.client, reference).await?,
            Source::AlQuran { surah, edition } => {
                api::fetch_alquran(&self.client, *surah, edition).await?
            }
            Source::Nephi { book } => api::fetch_nephi(&self.client, *book).await?,
        };
        if passages.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(passages)
    }
}

/// GET a URL and return the body as text. Non-2xx is an error.
pub(crate) async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let resp = client.get(url).send().await?.error_for_status()?;
    Ok(resp.text().await?)
}
