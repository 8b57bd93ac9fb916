mod chunk;
mod commands;
mod error;
mod library;
mod sources;
mod state;

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use poise::{Framework, FrameworkOptions};
use tracing::{error, info, warn, Level};

use library::cache::TextCache;
use library::Library;
use sources::{builtin_catalog, Fetcher};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    // Load env
    let _ = dotenv::dotenv();
    let token = dotenv::var("DISCORD_TOKEN").expect("DISCORD_TOKEN required");
    let guild_id: Option<serenity::GuildId> = dotenv::var("DISCORD_GUILD_ID")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(serenity::GuildId::new);
    let texts_dir = dotenv::var("TEXTS_DIR").unwrap_or_else(|_| "./texts".to_string());

    let cache = TextCache::new(&texts_dir)?;
    info!(dir = %texts_dir, "text cache initialized");

    let library = Arc::new(Library::new(builtin_catalog(), cache, Fetcher::new()?));
    info!(titles = library.entries().len(), "catalog registered");

    // Texts resolve lazily on first query; PRELOAD_TEXTS fetches them
    // all up front instead.
    let preload = dotenv::var("PRELOAD_TEXTS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if preload {
        info!("Preloading all texts...");
        library.preload().await;
    }

    let app_state = AppState { library };

    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MESSAGES;

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: vec![commands::scripture()],
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as: {} ({})", ready.user.name, ready.user.id);

                let result = if let Some(gid) = guild_id {
                    info!("Registering commands in guild {} (instant)", gid);
                    poise::builtins::register_in_guild(
                        ctx,
                        &framework.options().commands,
                        gid,
                    )
                    .await
                } else {
                    info!("Registering commands globally (up to 1 hour delay)");
                    poise::builtins::register_globally(ctx, &framework.options().commands)
                        .await
                };
                // Registration failure isn't fatal; the bot keeps serving
                // whatever commands Discord already knows about.
                if let Err(e) = result {
                    warn!("Command registration failed: {}", e);
                }

                Ok(app_state)
            })
        })
        .build();

    info!("Starting scriptorium bot...");

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create client: {}", e))?;

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }

    Ok(())
}
