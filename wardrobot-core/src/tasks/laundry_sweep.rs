// File: wardrobot-core/src/tasks/laundry_sweep.rs
//
// Background recovery of washing items. Runs on a fixed interval,
// independently of request handling; one item's failure never aborts the
// rest of the tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use wardrobot_common::{
    error::Error,
    models::item::ClothingItem,
    traits::repository_traits::{ClothingItemRepository, WardrobeUserRepository},
};

/// Default sweep period.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// What happened to one washing item during a tick.
enum SweepAction {
    Restored,
    NotDue,
    Skipped,
}

/// Totals for one sweep tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    pub restored: usize,
    pub not_due: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Spawns the recurring sweep. The task runs until the process exits.
pub fn spawn_laundry_sweep_task(
    item_repo: Arc<dyn ClothingItemRepository>,
    user_repo: Arc<dyn WardrobeUserRepository>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match run_laundry_sweep(item_repo.as_ref(), user_repo.as_ref()).await {
                Ok(outcome) => {
                    if outcome.restored > 0 || outcome.failed > 0 {
                        info!(
                            "Laundry sweep finished: {} restored, {} not due, {} skipped, {} failed",
                            outcome.restored, outcome.not_due, outcome.skipped, outcome.failed
                        );
                    }
                }
                Err(e) => error!("Laundry sweep failed: {:?}", e),
            }
        }
    })
}

/// One sweep tick: walks every washing item and restores the ones whose
/// owner-configured duration has elapsed. Idempotent: a second run right
/// after the first finds nothing left to restore.
pub async fn run_laundry_sweep(
    item_repo: &dyn ClothingItemRepository,
    user_repo: &dyn WardrobeUserRepository,
) -> Result<SweepOutcome, Error> {
    let washing = item_repo.list_washing().await?;

    let mut outcome = SweepOutcome::default();
    for item in washing {
        match check_washing_item(item_repo, user_repo, &item).await {
            Ok(SweepAction::Restored) => outcome.restored += 1,
            Ok(SweepAction::NotDue) => outcome.not_due += 1,
            Ok(SweepAction::Skipped) => outcome.skipped += 1,
            Err(e) => {
                outcome.failed += 1;
                error!("Error while checking item {}: {}", item.item_id, e);
            }
        }
    }

    Ok(outcome)
}

async fn check_washing_item(
    item_repo: &dyn ClothingItemRepository,
    user_repo: &dyn WardrobeUserRepository,
    item: &ClothingItem,
) -> Result<SweepAction, Error> {
    let owner = match user_repo.get(item.owner_id).await? {
        Some(owner) => owner,
        None => {
            warn!("Skipping item {}: owner {} not found", item.item_id, item.owner_id);
            return Ok(SweepAction::Skipped);
        }
    };

    let anchor = match item.updated_at {
        Some(anchor) => anchor,
        None => {
            warn!("Skipping item {}: no updated_at timestamp", item.item_id);
            return Ok(SweepAction::Skipped);
        }
    };

    // Fixed 24-hour days, plain wall-clock elapsed time.
    let required = chrono::Duration::days(owner.washing_time_days());
    let elapsed = Utc::now() - anchor;
    if elapsed < required {
        return Ok(SweepAction::NotDue);
    }

    // Guarded on the anchor we read; a wash restarted under our feet moves
    // updated_at and the write becomes a no-op.
    if item_repo.finish_washing(item.item_id, anchor).await? {
        info!("Item {} is clean again", item.item_id);
        Ok(SweepAction::Restored)
    } else {
        Ok(SweepAction::Skipped)
    }
}
