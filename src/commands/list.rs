use crate::state::Context;

/// List the available texts
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    let mut output = String::from("**Available texts**\n");
    for entry in ctx.data().library.entries() {
        output.push_str(&format!(
            "- {} ({})",
            entry.title,
            entry.source.provenance().label()
        ));
        if let Some(note) = &entry.scope_note {
            output.push_str(&format!(" — {}", note));
        }
        output.push('\n');
    }
    super::send_chunked(&ctx, &output).await
}
