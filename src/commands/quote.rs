use tracing::info;

use crate::state::Context;

/// Quote a numbered passage from a text
#[poise::command(slash_command)]
pub async fn quote(
    ctx: Context<'_>,
    #[description = "Title of the text"]
    #[autocomplete = "super::autocomplete_title"]
    title: String,
    #[description = "Passage number (starting at 1)"] number: u32,
) -> Result<(), anyhow::Error> {
    ctx.defer().await?;

    info!(user = ctx.author().name, title, number, "quote requested");

    match ctx.data().library.quote(&title, number as usize).await {
        Ok(text) => super::send_passage(&ctx, title.trim(), number as usize, &text).await,
        Err(e) => {
            ctx.say(super::render_error(&e)).await?;
            Ok(())
        }
    }
}
