//! The AutoPilot scheduler.
//!
//! Each feature runs on its own jittered cadence so no fixed-period request
//! signature emerges. The three loops are polled concurrently: a slow remote
//! call stalls its own feature's pass, never the other timers. A pass always
//! runs to completion once started, and a failed pass never prevents the
//! next evaluation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use copilot_core::Cadence;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::MissedTickBehavior;

use crate::session::AutoPilot;

/// Fixed delay before the jittered loops begin.
const WARMUP_DELAY: Duration = Duration::from_secs(5);

/// How often each feature re-evaluates its cadence.
const EVALUATION_TICK: Duration = Duration::from_secs(5);

const DEPART_CADENCE_SECS: (u64, u64) = (60, 120);
const CAMPAIGN_CADENCE_SECS: (u64, u64) = (120, 180);
const BUNKER_CADENCE_SECS: (u64, u64) = (60, 180);

/// Run the scheduler until the task is dropped.
pub async fn run(pilot: Arc<AutoPilot>) {
    tokio::time::sleep(WARMUP_DELAY).await;
    tracing::info!("autopilot scheduler started");
    tokio::join!(
        depart_loop(&pilot),
        campaign_loop(&pilot),
        bunker_loop(&pilot),
    );
}

fn evaluation_ticker() -> tokio::time::Interval {
    let mut ticker = tokio::time::interval(EVALUATION_TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn depart_loop(pilot: &AutoPilot) {
    let mut rng = StdRng::from_entropy();
    let mut cadence = Cadence::from_secs(DEPART_CADENCE_SECS.0, DEPART_CADENCE_SECS.1);
    let mut ticker = evaluation_ticker();
    loop {
        ticker.tick().await;
        if !pilot.settings().auto_depart_all {
            continue;
        }
        if cadence.due(Instant::now(), &mut rng) {
            pilot.run_depart_pass().await;
        }
    }
}

async fn campaign_loop(pilot: &AutoPilot) {
    let mut rng = StdRng::from_entropy();
    let mut cadence = Cadence::from_secs(CAMPAIGN_CADENCE_SECS.0, CAMPAIGN_CADENCE_SECS.1);
    let mut ticker = evaluation_ticker();
    loop {
        ticker.tick().await;
        if !pilot.settings().auto_campaign_renewal {
            continue;
        }
        if cadence.due(Instant::now(), &mut rng) {
            pilot.run_campaign_pass().await;
        }
    }
}

/// Polls the bunker panel; each fresh snapshot is what invokes the reactive
/// rebuy hook.
async fn bunker_loop(pilot: &AutoPilot) {
    let mut rng = StdRng::from_entropy();
    let mut cadence = Cadence::from_secs(BUNKER_CADENCE_SECS.0, BUNKER_CADENCE_SECS.1);
    let mut ticker = evaluation_ticker();
    loop {
        ticker.tick().await;
        if !pilot.settings().any_rebuy_enabled() {
            continue;
        }
        if cadence.due(Instant::now(), &mut rng) {
            pilot.poll_bunker().await;
        }
    }
}
