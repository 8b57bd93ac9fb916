use tracing::info;

use crate::state::Context;

/// Search the locally cached texts
#[poise::command(slash_command)]
pub async fn search(
    ctx: Context<'_>,
    #[description = "Search term"] query: String,
) -> Result<(), anyhow::Error> {
    ctx.defer().await?;

    match ctx.data().library.search(&query).await {
        Ok(hits) => {
            info!(user = ctx.author().name, query, hits = hits.len(), "search complete");
            let body = hits
                .iter()
                .map(|h| format!("**{} — Passage {}**\n{}", h.title, h.number, h.snippet))
                .collect::<Vec<_>>()
                .join("\n\n");
            super::send_chunked(&ctx, &body).await
        }
        Err(e) => {
            ctx.say(super::render_error(&e)).await?;
            Ok(())
        }
    }
}
