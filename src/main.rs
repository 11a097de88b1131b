use levelup::{bot, config::Config, error::AppError, scheduler::voice_xp, startup};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let state = startup::build_state(&config).await?;

    tracing::info!("Starting levelup");

    let (bot_client, handles) = bot::start::init_bot(&config, state.clone()).await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    voice_xp::start_scheduler(state.clone(), handles.cache, handles.http).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down, saving settings");

    let generation = state.writer.request_save();
    state.writer.wait_for(generation).await?;

    Ok(())
}
