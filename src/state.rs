use std::sync::Arc;

use crate::library::Library;

pub struct AppState {
    pub library: Arc<Library>,
}

pub type Context<'a> = poise::Context<'a, AppState, anyhow::Error>;
