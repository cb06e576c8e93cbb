//! Periodic repair of `recommendation_count` drift.
//!
//! Recommendation writes keep counters exact inside their own transaction.
//! This job catches whatever slipped past them, such as rows edited by hand
//! or restored from a backup, by recounting every query on a fixed interval.

use std::time::Duration;

use prodboard_db::repositories::QueryRepo;
use prodboard_db::DbPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Run the reconciliation loop until `cancel` fires.
///
/// The first pass runs immediately.
pub async fn run(pool: DbPool, every: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = every.as_secs(),
        "Counter reconciliation job started"
    );

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Counter reconciliation job stopping");
                break;
            }
            _ = interval.tick() => {
                match QueryRepo::reconcile_recommendation_counts(&pool).await {
                    Ok(drifted) if drifted.is_empty() => {
                        tracing::debug!("Counter reconciliation: no drift");
                    }
                    Ok(drifted) => {
                        for d in &drifted {
                            tracing::warn!(
                                query_id = %d.query_id,
                                recorded = d.recorded,
                                actual = d.actual,
                                "Counter reconciliation: repaired drift"
                            );
                        }
                        tracing::info!(repaired = drifted.len(), "Counter reconciliation pass done");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Counter reconciliation failed");
                    }
                }
            }
        }
    }
}
