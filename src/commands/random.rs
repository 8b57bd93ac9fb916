use tracing::info;

use crate::state::Context;

/// Quote a random passage
#[poise::command(slash_command)]
pub async fn random(
    ctx: Context<'_>,
    #[description = "Optional: title of the text"]
    #[autocomplete = "super::autocomplete_title"]
    title: Option<String>,
) -> Result<(), anyhow::Error> {
    ctx.defer().await?;

    info!(user = ctx.author().name, ?title, "random passage requested");

    match ctx.data().library.random(title.as_deref()).await {
        Ok(pick) => super::send_passage(&ctx, &pick.title, pick.number, &pick.text).await,
        Err(e) => {
            ctx.say(super::render_error(&e)).await?;
            Ok(())
        }
    }
}
