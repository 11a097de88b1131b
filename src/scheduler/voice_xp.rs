use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use serenity::all::Cache;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    bot::discord::{member_context, DiscordNotifier, DiscordRoleMutator},
    error::AppError,
    model::activity::VoiceTick,
    service::activity::ActivityService,
    state::AppState,
};

/// Starts the voice XP scheduler
///
/// Runs every minute and credits the newly elapsed whole minutes of every
/// tracked voice session. Minutes are claimed by tick id, so an overlapping or
/// replayed run never credits the same minute twice.
///
/// # Arguments
/// - `state`: Shared settings store, writer and voice tracker
/// - `cache`: Discord cache for member roles and names
/// - `discord_http`: Discord HTTP client for role edits and notices
pub async fn start_scheduler(
    state: AppState,
    cache: Arc<Cache>,
    discord_http: Arc<Http>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let state = state.clone();
        let cache = cache.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            let credited = process_voice_ticks(&state, &cache, http).await;
            if credited > 0 {
                state.writer.request_save();
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Voice XP scheduler started");

    Ok(())
}

/// Claims and credits every pending voice tick.
///
/// # Returns
/// Number of ticks that awarded XP
async fn process_voice_ticks(state: &AppState, cache: &Cache, discord_http: Arc<Http>) -> usize {
    let ticks = state.voice.tick_all(Utc::now()).await;
    if ticks.is_empty() {
        return 0;
    }

    tracing::debug!("Processing {} voice ticks", ticks.len());

    let mut credited = 0;
    for tick in ticks {
        if credit_voice_tick(state, cache, discord_http.clone(), &tick).await {
            credited += 1;
        }
    }
    credited
}

/// Credits one claimed voice tick to its member.
///
/// Also used when a member leaves voice, for the minutes since the last run.
///
/// # Returns
/// - `true` - The tick awarded XP
/// - `false` - The tick was rejected or the guild is misconfigured
pub async fn credit_voice_tick(
    state: &AppState,
    cache: &Cache,
    discord_http: Arc<Http>,
    tick: &VoiceTick,
) -> bool {
    let member = member_context(
        cache,
        tick.guild_id,
        tick.member_id,
        &tick.role_ids,
        Some(tick.channel_id),
    );
    let mutator = DiscordRoleMutator::new(discord_http.clone());
    let notifier = DiscordNotifier::new(discord_http);
    let service = ActivityService::new(&state.store, &mutator, &notifier);
    let mut rng = StdRng::from_rng(&mut rand::rng());

    match service.handle_voice_tick(tick, &member, &mut rng).await {
        Ok(outcome) => outcome.award.is_some(),
        Err(e) => {
            tracing::error!(
                "Failed to credit voice minutes to member {} in guild {}: {:?}",
                tick.member_id,
                tick.guild_id,
                e
            );
            false
        }
    }
}
