pub mod cache;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::Rng;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::QueryError;
use crate::sources::{Fetcher, TextEntry};
use cache::TextCache;

pub use crate::sources::Provenance;

/// A resolved text: its provenance and its ordered passage sequence.
/// Immutable once built; passage numbers are a stable contract, so the
/// sequence is never reordered or re-fetched within a process lifetime.
#[derive(Debug)]
pub struct PassageSet {
    provenance: Provenance,
    passages: Vec<String>,
}

impl PassageSet {
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn count(&self) -> usize {
        self.passages.len()
    }

    /// 1-based passage lookup. `0` and anything past the end are `None`.
    pub fn passage(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.passages.get(i))
            .map(String::as_str)
    }

    pub fn passages(&self) -> &[String] {
        &self.passages
    }
}

/// A single search hit: which passage matched and a short excerpt.
#[derive(Debug, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub number: usize,
    pub snippet: String,
}

/// The outcome of a random draw.
#[derive(Debug)]
pub struct RandomPick {
    pub title: String,
    pub number: usize,
    pub text: String,
}

const MAX_SEARCH_HITS: usize = 5;
const SNIPPET_LEN: usize = 300;

/// The catalog of known texts and their resolved passage sets.
///
/// Resolution is lazy with memoization: memory first, then the disk
/// cache (local titles only), then the source adapter — at most one
/// network fetch per title per process lifetime. A per-title guard
/// collapses concurrent first requests into a single fetch, and a
/// failed fetch pins the title as unresolved until restart.
pub struct Library {
    entries: Vec<TextEntry>,
    fetcher: Fetcher,
    cache: TextCache,
    resolved: RwLock<HashMap<String, Arc<PassageSet>>>,
    failed: Mutex<HashSet<String>>,
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Library {
    pub fn new(entries: Vec<TextEntry>, cache: TextCache, fetcher: Fetcher) -> Self {
        Self {
            entries,
            fetcher,
            cache,
            resolved: RwLock::new(HashMap::new()),
            failed: Mutex::new(HashSet::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Known titles in registration order, resolved or not.
    pub fn entries(&self) -> &[TextEntry] {
        &self.entries
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.title.clone()).collect()
    }

    /// `(title, provenance)` for every known title, registration order.
    pub fn list(&self) -> Vec<(String, Provenance)> {
        self.entries
            .iter()
            .map(|e| (e.title.clone(), e.source.provenance()))
            .collect()
    }

    /// Resolve a title to its passage set.
    pub async fn resolve(&self, title: &str) -> Result<Arc<PassageSet>, QueryError> {
        let title = title.trim();
        if let Some(set) = self.resolved.read().await.get(title) {
            return Ok(Arc::clone(set));
        }
        let entry = self
            .entries
            .iter()
            .find(|e| e.title == title)
            .ok_or_else(|| QueryError::NotFound(title.to_string()))?;

        let guard = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(inflight.entry(entry.title.clone()).or_default())
        };
        let _held = guard.lock().await;

        // Another task may have finished while we waited on the guard.
        if let Some(set) = self.resolved.read().await.get(title) {
            return Ok(Arc::clone(set));
        }
        if self.failed.lock().await.contains(title) {
            return Err(QueryError::NotFound(title.to_string()));
        }

        match self.load(entry).await {
            Ok(set) => {
                let set = Arc::new(set);
                self.resolved
                    .write()
                    .await
                    .insert(entry.title.clone(), Arc::clone(&set));
                Ok(set)
            }
            Err(e) => {
                warn!(title = %entry.title, error = %e, "resolution failed");
                self.failed.lock().await.insert(entry.title.clone());
                Err(e)
            }
        }
    }

    async fn load(&self, entry: &TextEntry) -> Result<PassageSet, QueryError> {
        if entry.source.is_local() {
            match self.cache.read(&entry.title) {
                Ok(Some(passages)) if !passages.is_empty() => {
                    debug!(title = %entry.title, count = passages.len(), "serving from disk cache");
                    return Ok(PassageSet {
                        provenance: Provenance::Local,
                        passages,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(title = %entry.title, error = %e, "cache read failed; refetching")
                }
            }
        }

        let passages = self
            .fetcher
            .fetch(&entry.source)
            .await
            .map_err(|e| QueryError::Fetch {
                title: entry.title.clone(),
                source: e,
            })?;

        let provenance = entry.source.provenance();
        if entry.source.is_local() {
            if let Err(e) = self.cache.write(&entry.title, &passages) {
                warn!(title = %entry.title, error = %e, "cache write failed");
            }
        }
        info!(
            title = %entry.title,
            count = passages.len(),
            provenance = provenance.label(),
            "text resolved"
        );
        Ok(PassageSet {
            provenance,
            passages,
        })
    }

    /// Resolve every known title up front. Failures are logged and the
    /// title left absent; queries for it report not-found until restart.
    pub async fn preload(&self) {
        for entry in &self.entries {
            if let Err(e) = self.resolve(&entry.title).await {
                warn!(title = %entry.title, error = %e, "preload failed");
            }
        }
    }

    /// Passage `number` (1-based) of `title`.
    pub async fn quote(&self, title: &str, number: usize) -> Result<String, QueryError> {
        let set = self.resolve(title).await?;
        set.passage(number)
            .map(str::to_string)
            .ok_or(QueryError::OutOfRange {
                number,
                count: set.count(),
            })
    }

    /// A uniformly random passage. Without a title, a title is first
    /// drawn uniformly from the known set.
    pub async fn random(&self, title: Option<&str>) -> Result<RandomPick, QueryError> {
        let title = match title {
            Some(t) => t.trim().to_string(),
            None => {
                if self.entries.is_empty() {
                    return Err(QueryError::NotFound("(no texts registered)".to_string()));
                }
                let idx = rand::rng().random_range(0..self.entries.len());
                self.entries[idx].title.clone()
            }
        };
        let set = self.resolve(&title).await?;
        let number = rand::rng().random_range(1..=set.count());
        let text = set
            .passage(number)
            .map(str::to_string)
            .ok_or(QueryError::OutOfRange {
                number,
                count: set.count(),
            })?;
        Ok(RandomPick {
            title,
            number,
            text,
        })
    }

    /// Case-insensitive substring search over locally-persisted texts,
    /// catalog order then passage order, stopping at 5 hits total.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, QueryError> {
        let needle = query.to_lowercase();
        let mut hits = Vec::new();

        for entry in self.entries.iter().filter(|e| e.source.is_local()) {
            let set = match self.resolve(&entry.title).await {
                Ok(set) => set,
                Err(e) => {
                    warn!(title = %entry.title, error = %e, "skipping unresolvable text in search");
                    continue;
                }
            };
            for (i, passage) in set.passages().iter().enumerate() {
                if passage.to_lowercase().contains(&needle) {
                    hits.push(SearchHit {
                        title: entry.title.clone(),
                        number: i + 1,
                        snippet: snippet(passage),
                    });
                    if hits.len() >= MAX_SEARCH_HITS {
                        return Ok(hits);
                    }
                }
            }
        }

        if hits.is_empty() {
            Err(QueryError::NoMatches)
        } else {
            Ok(hits)
        }
    }
}

/// First 300 characters of a passage, cut back to the last whitespace
/// boundary, with an ellipsis when truncated.
fn snippet(passage: &str) -> String {
    let chars: Vec<char> = passage.chars().collect();
    if chars.len() <= SNIPPET_LEN {
        return passage.to_string();
    }
    let head: String = chars[..SNIPPET_LEN].iter().collect();
    let cut = head.rfind(char::is_whitespace).unwrap_or(head.len());
    format!("{}...", &head[..cut])
}
