//! # Obstacle monitor module
//!
//! The obstacle monitor maintains the latest front/left/right range samples from the scan
//! stream. A background thread overwrites a single shared [`RangeReading`] slot as sweeps
//! arrive, so the foreground session loop can take a consistent snapshot at any time without
//! ever blocking on the sensor. Stale data is never invalidated: the slot always holds the most
//! recent sweep's samples, or the "unknown/far" sentinel before the first sweep.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{trace, warn};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::thread::{self, JoinHandle};

// Internal
use crate::scan_client::ScanSource;
use comms_if::eqpt::scan::LaserScan;
pub use params::ObsMonParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Latest range samples at the three monitored bearings.
///
/// Owned exclusively by the monitor; the drivers only ever see copies taken by
/// [`ObsMon::current`]. All fields are `INFINITY` ("unknown/far") until the first sweep
/// arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeReading {
    /// Distance to the nearest obstacle ahead of the robot.
    ///
    /// Units: meters
    pub front_m: f64,

    /// Distance to the nearest obstacle on the robot's left.
    ///
    /// Units: meters
    pub left_m: f64,

    /// Distance to the nearest obstacle on the robot's right.
    ///
    /// Units: meters
    pub right_m: f64,
}

/// Handle to the obstacle monitor thread.
pub struct ObsMon {
    reading: Arc<Mutex<RangeReading>>,

    stop: Arc<AtomicBool>,

    join_handle: Option<JoinHandle<()>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for RangeReading {
    fn default() -> Self {
        Self {
            front_m: f64::INFINITY,
            left_m: f64::INFINITY,
            right_m: f64::INFINITY,
        }
    }
}

impl RangeReading {
    /// Extract the monitored bearing samples from a sweep.
    ///
    /// Samples missing from the sweep or non-finite are reported as the `INFINITY` sentinel, so
    /// a short or saturated sweep reads as "far" rather than as an obstacle.
    fn from_scan(scan: &LaserScan, params: &ObsMonParams) -> Self {
        Self {
            front_m: sample(scan, params.front_index),
            left_m: sample(scan, params.left_index),
            right_m: sample(scan, params.right_index),
        }
    }
}

impl ObsMon {
    /// Start the monitor thread on the given scan source.
    pub fn start<S>(scan_source: S, params: ObsMonParams) -> Self
    where
        S: ScanSource + Send + 'static,
    {
        let reading = Arc::new(Mutex::new(RangeReading::default()));
        let stop = Arc::new(AtomicBool::new(false));

        let thread_reading = reading.clone();
        let thread_stop = stop.clone();
        let join_handle = thread::spawn(move || {
            monitor_thread(scan_source, params, thread_reading, thread_stop)
        });

        Self {
            reading,
            stop,
            join_handle: Some(join_handle),
        }
    }

    /// Get a snapshot of the most recent reading.
    ///
    /// Never blocks beyond the slot lock, which the monitor thread only holds long enough to
    /// copy three floats in. Repeated calls between sweeps return identical values.
    pub fn current(&self) -> RangeReading {
        match self.reading.lock() {
            Ok(reading) => *reading,
            // If the monitor thread panicked the last written snapshot is still valid
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Stop the monitor thread and wait for it to exit.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);

        if let Some(join_handle) = self.join_handle.take() {
            join_handle.join().ok();
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the sample at the given sweep index, or the sentinel if there isn't a finite one.
fn sample(scan: &LaserScan, index: usize) -> f64 {
    match scan.range_at(index) {
        Some(range) if range.is_finite() => range,
        _ => f64::INFINITY,
    }
}

/// Monitor thread main function.
///
/// Receives sweeps from the source and overwrites the shared slot until the stop flag is
/// raised. The source's receive timeout bounds the time between stop flag checks.
fn monitor_thread<S: ScanSource>(
    mut scan_source: S,
    params: ObsMonParams,
    reading: Arc<Mutex<RangeReading>>,
    stop: Arc<AtomicBool>,
) {
    while !stop.load(Ordering::Relaxed) {
        match scan_source.recv_scan() {
            Ok(Some(scan)) => {
                let new_reading = RangeReading::from_scan(&scan, &params);

                match reading.lock() {
                    Ok(mut slot) => *slot = new_reading,
                    Err(poisoned) => *poisoned.into_inner() = new_reading,
                }

                trace!(
                    "RangeReading updated: front = {:.2} m, left = {:.2} m, right = {:.2} m",
                    new_reading.front_m,
                    new_reading.left_m,
                    new_reading.right_m
                );
            }
            // Receive timeout elapsed with no sweep, go round and check the stop flag
            Ok(None) => (),
            Err(e) => warn!("Scan stream error: {}", e),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::scan_client::ScanClientError;
    use std::time::{Duration, Instant};

    fn test_params() -> ObsMonParams {
        ObsMonParams {
            front_index: 2,
            left_index: 4,
            right_index: 0,
        }
    }

    fn test_scan(ranges_m: Vec<f64>) -> LaserScan {
        LaserScan {
            angle_min_rad: -std::f64::consts::PI,
            angle_increment_rad: std::f64::consts::PI / 3.0,
            range_max_m: 30.0,
            ranges_m,
        }
    }

    /// A source which produces each scripted sweep once, then nothing.
    struct ScriptedSource {
        sweeps: Vec<LaserScan>,
    }

    impl ScanSource for ScriptedSource {
        fn recv_scan(&mut self) -> Result<Option<LaserScan>, ScanClientError> {
            if self.sweeps.is_empty() {
                std::thread::sleep(Duration::from_millis(1));
                Ok(None)
            } else {
                Ok(Some(self.sweeps.remove(0)))
            }
        }
    }

    /// Wait for the monitor to leave the sentinel state, panicking if it never does.
    fn wait_for_update(mon: &ObsMon) -> RangeReading {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let reading = mon.current();
            if reading != RangeReading::default() {
                return reading;
            }
            assert!(Instant::now() < deadline, "monitor never updated");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_sentinel_before_first_sweep() {
        let reading = RangeReading::default();

        assert_eq!(reading.front_m, f64::INFINITY);
        assert_eq!(reading.left_m, f64::INFINITY);
        assert_eq!(reading.right_m, f64::INFINITY);
    }

    #[test]
    fn test_sample_extraction() {
        let scan = test_scan(vec![0.9, 1.1, 2.3, 3.1, 4.5, 5.0]);
        let reading = RangeReading::from_scan(&scan, &test_params());

        assert_eq!(reading.front_m, 2.3);
        assert_eq!(reading.left_m, 4.5);
        assert_eq!(reading.right_m, 0.9);
    }

    #[test]
    fn test_short_or_saturated_sweep_reads_far() {
        // Sweep shorter than the left index, with a saturated (infinite) front sample
        let scan = test_scan(vec![0.9, 1.1, f64::NAN]);
        let reading = RangeReading::from_scan(&scan, &test_params());

        assert_eq!(reading.front_m, f64::INFINITY);
        assert_eq!(reading.left_m, f64::INFINITY);
        assert_eq!(reading.right_m, 0.9);
    }

    #[test]
    fn test_snapshot_latest_wins_and_idempotent() {
        let source = ScriptedSource {
            sweeps: vec![
                test_scan(vec![9.0, 9.0, 9.0, 9.0, 9.0, 9.0]),
                test_scan(vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0]),
            ],
        };

        let mon = ObsMon::start(source, test_params());

        // Both sweeps are consumed quickly; wait until the second has landed
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let reading = wait_for_update(&mon);
            if reading.front_m == 1.5 {
                break;
            }
            assert!(Instant::now() < deadline, "second sweep never landed");
            std::thread::sleep(Duration::from_millis(1));
        }

        // With no further sweeps arriving, repeated snapshots are identical
        let first = mon.current();
        let second = mon.current();
        assert_eq!(first, second);
        assert_eq!(first.front_m, 1.5);
        assert_eq!(first.left_m, 2.5);
        assert_eq!(first.right_m, 0.5);

        mon.stop();
    }
}
