mod list;
mod quote;
mod random;
mod search;

use crate::chunk::{split_chunks, MAX_MESSAGE_LEN};
use crate::error::QueryError;
use crate::state::Context;

/// Scriptorium — numbered passages from public-domain texts
#[poise::command(
    slash_command,
    subcommands("list::list", "quote::quote", "random::random", "search::search")
)]
pub async fn scripture(_ctx: Context<'_>) -> Result<(), anyhow::Error> {
    Ok(())
}

// Room for the header line above each chunk.
const PASSAGE_BODY_LEN: usize = MAX_MESSAGE_LEN - 100;

/// Send one passage, split into Discord-safe pieces. Multi-piece
/// passages get a part marker in the header.
pub(crate) async fn send_passage(
    ctx: &Context<'_>,
    title: &str,
    number: usize,
    text: &str,
) -> Result<(), anyhow::Error> {
    let chunks = split_chunks(text, PASSAGE_BODY_LEN);
    let total = chunks.len();
    for (i, chunk) in chunks.iter().enumerate() {
        let header = if total == 1 {
            format!("**{} — Passage {}**", title, number)
        } else {
            format!("**{} — Passage {} (part {}/{})**", title, number, i + 1, total)
        };
        ctx.say(format!("{}\n{}", header, chunk)).await?;
    }
    Ok(())
}

/// Send prebuilt output in Discord-safe chunks. Uses ctx.say() for all
/// chunks — poise routes follow-ups through the interaction webhook,
/// which doesn't require Send Messages channel permission.
pub(crate) async fn send_chunked(ctx: &Context<'_>, text: &str) -> Result<(), anyhow::Error> {
    for chunk in split_chunks(text, MAX_MESSAGE_LEN) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

/// User-facing rendering of query errors. A fetch failure reads as
/// not-found: the title never made it into the catalog.
pub(crate) fn render_error(err: &QueryError) -> String {
    match err {
        QueryError::NotFound(title) => format!("Text not found: {}", title),
        QueryError::OutOfRange { number, count } => format!(
            "Invalid passage number {}. This text has {} passages.",
            number, count
        ),
        QueryError::NoMatches => "No matches found.".to_string(),
        QueryError::Fetch { title, .. } => format!("Text not found: {}", title),
    }
}

/// Autocomplete for title parameters from the known catalog.
pub(crate) async fn autocomplete_title(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let partial = partial.to_lowercase();
    ctx.data()
        .library
        .titles()
        .into_iter()
        .filter(|t| t.to_lowercase().contains(&partial))
        .take(25)
        .collect()
}
