//! Background task driving periodic listing scans.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use log::info;
use tokio::time::Instant;
use tokio::time::MissedTickBehavior;

use crate::scan::ScanOrchestrator;

/// Fires one scan per interval, forever.
///
/// Scans are serialized: the loop awaits the running scan before asking the
/// interval for another tick, and `MissedTickBehavior::Delay` drops ticks a
/// long scan has already eaten instead of firing them back-to-back. The first
/// scan runs one full interval after `start()`, not immediately.
pub struct ScanScheduler {
    orchestrator: Arc<ScanOrchestrator>,
    scan_interval: Duration,
    running: AtomicBool,
}

impl ScanScheduler {
    /// Creates a new scheduler with the given configuration.
    pub fn new(orchestrator: Arc<ScanOrchestrator>, scan_interval: Duration) -> Arc<Self> {
        info!("Initializing ScanScheduler with scan interval {scan_interval:?}");
        Arc::new(Self {
            orchestrator,
            scan_interval,
            running: AtomicBool::new(false),
        })
    }

    /// Starts the scan loop.
    pub fn start(self: Arc<Self>) -> anyhow::Result<()> {
        if !self.running.load(Ordering::SeqCst) {
            self.running.store(true, Ordering::SeqCst);
            info!("Starting ScanScheduler scan loop.");
            self.spawn_scan_loop();
        }
        Ok(())
    }

    /// Stops the scan loop.
    pub fn stop(self: Arc<Self>) -> anyhow::Result<()> {
        info!("Stopping ScanScheduler scan loop.");
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn spawn_scan_loop(self: Arc<Self>) {
        let mut interval =
            tokio::time::interval_at(Instant::now() + self.scan_interval, self.scan_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::spawn(async move {
            loop {
                interval.tick().await;
                if !self.running.load(Ordering::SeqCst) {
                    info!("Stopping scan loop.");
                    break;
                }
                self.orchestrator.run_scan().await;
            }
        });
    }
}
