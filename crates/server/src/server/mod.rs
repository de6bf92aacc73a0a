use std::sync::Arc;

use crate::config::AppConfig;
use crate::server::state::AppState;

pub mod admin;
pub mod constants;
pub mod public;
pub mod router;
pub mod state;

pub async fn run_all(config: &AppConfig, init_schema: bool) -> anyhow::Result<()> {
    let app_state = Arc::new(AppState::try_init(config, init_schema).await?);
    router::serve(app_state).await?;
    Ok(())
}
