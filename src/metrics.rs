//! Pipeline observability: frame/outcome counters plus fixed-capacity
//! latency rings with percentile queries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

/// Well-known latency stage names (constants to avoid typos).
pub mod stage_names {
    pub const MASK: &str = "t_mask";
    pub const RECOGNIZE: &str = "t_recognize";
    pub const CYCLE: &str = "t_cycle";
}

/// Fixed-capacity ring of latency samples in microseconds.
struct LatencyRing {
    samples: Vec<f64>,
    pos: usize,
    count: usize,
}

impl LatencyRing {
    fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(1)],
            pos: 0,
            count: 0,
        }
    }

    fn push(&mut self, value: f64) {
        self.samples[self.pos] = value;
        self.pos = (self.pos + 1) % self.samples.len();
        if self.count < self.samples.len() {
            self.count += 1;
        }
    }

    fn percentile(&self, p: f64) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples[..self.count].to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((p / 100.0) * (self.count as f64 - 1.0)).round() as usize;
        sorted[idx.min(self.count - 1)]
    }
}

/// Counters and latency histograms for one pipeline instance.
pub struct PipelineMetrics {
    frames_offered: AtomicU64,
    frames_dropped: AtomicU64,
    recognitions_completed: AtomicU64,
    recognitions_failed: AtomicU64,
    recognitions_timed_out: AtomicU64,
    latencies: Mutex<HashMap<&'static str, LatencyRing>>,
    ring_capacity: usize,
}

impl PipelineMetrics {
    pub fn new(ring_capacity: usize) -> Self {
        Self {
            frames_offered: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
            recognitions_completed: AtomicU64::new(0),
            recognitions_failed: AtomicU64::new(0),
            recognitions_timed_out: AtomicU64::new(0),
            latencies: Mutex::new(HashMap::new()),
            ring_capacity,
        }
    }

    pub fn frame_offered(&self) {
        self.frames_offered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn frame_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn recognition_completed(&self) {
        self.recognitions_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn recognition_failed(&self) {
        self.recognitions_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn recognition_timed_out(&self) {
        self.recognitions_timed_out.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a stage latency sample in microseconds.
    pub fn record_latency(&self, stage: &'static str, value_us: f64) {
        let mut rings = self.latencies.lock();
        rings
            .entry(stage)
            .or_insert_with(|| LatencyRing::new(self.ring_capacity))
            .push(value_us);
    }

    /// Percentile (0-100) of a stage's latency in microseconds.
    pub fn latency_percentile(&self, stage: &str, p: f64) -> f64 {
        let rings = self.latencies.lock();
        rings.get(stage).map(|r| r.percentile(p)).unwrap_or(0.0)
    }

    /// Point-in-time snapshot of all counters and p50/p95 latencies.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let rings = self.latencies.lock();
        let latencies_us = rings
            .iter()
            .map(|(&stage, ring)| {
                (
                    stage.to_string(),
                    LatencySummary {
                        p50_us: ring.percentile(50.0),
                        p95_us: ring.percentile(95.0),
                        count: ring.count,
                    },
                )
            })
            .collect();

        MetricsSnapshot {
            frames_offered: self.frames_offered.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            recognitions_completed: self.recognitions_completed.load(Ordering::Relaxed),
            recognitions_failed: self.recognitions_failed.load(Ordering::Relaxed),
            recognitions_timed_out: self.recognitions_timed_out.load(Ordering::Relaxed),
            latencies_us,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencySummary {
    pub p50_us: f64,
    pub p95_us: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub frames_offered: u64,
    pub frames_dropped: u64,
    pub recognitions_completed: u64,
    pub recognitions_failed: u64,
    pub recognitions_timed_out: u64,
    pub latencies_us: HashMap<String, LatencySummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = PipelineMetrics::new(16);
        metrics.frame_offered();
        metrics.frame_offered();
        metrics.frame_dropped();
        metrics.recognition_completed();
        let snap = metrics.snapshot();
        assert_eq!(snap.frames_offered, 2);
        assert_eq!(snap.frames_dropped, 1);
        assert_eq!(snap.recognitions_completed, 1);
        assert_eq!(snap.recognitions_failed, 0);
    }

    #[test]
    fn percentile_over_recorded_samples() {
        let metrics = PipelineMetrics::new(16);
        for v in [10.0, 20.0, 30.0, 40.0] {
            metrics.record_latency(stage_names::RECOGNIZE, v);
        }
        let p50 = metrics.latency_percentile(stage_names::RECOGNIZE, 50.0);
        assert!(p50 >= 20.0 && p50 <= 30.0);
        assert_eq!(metrics.latency_percentile("unknown", 50.0), 0.0);
    }

    #[test]
    fn ring_wraps_at_capacity() {
        let metrics = PipelineMetrics::new(2);
        metrics.record_latency(stage_names::MASK, 1.0);
        metrics.record_latency(stage_names::MASK, 100.0);
        metrics.record_latency(stage_names::MASK, 100.0);
        // The oldest sample (1.0) has been overwritten.
        assert_eq!(metrics.latency_percentile(stage_names::MASK, 0.0), 100.0);
    }
}
