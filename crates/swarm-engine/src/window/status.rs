use std::time::Duration;

use crate::render::FrameStats;

/// Aggregates frame stats and produces a human-readable status line every
/// `interval` presented frames.
#[derive(Debug, Clone)]
pub struct StatusLine {
    prefix: String,
    interval: u64,
    frames: u64,
    elapsed: f32,
    cpu_time: Duration,
}

impl StatusLine {
    pub fn new(prefix: impl Into<String>, interval: u64) -> Self {
        Self {
            prefix: prefix.into(),
            interval: interval.max(1),
            frames: 0,
            elapsed: 0.0,
            cpu_time: Duration::ZERO,
        }
    }

    /// Records one presented frame; returns a fresh line when the interval
    /// completes.
    pub fn record(&mut self, stats: &FrameStats) -> Option<String> {
        self.frames += 1;
        self.elapsed += stats.dt;
        self.cpu_time += stats.cpu_time;

        if self.frames < self.interval {
            return None;
        }

        let fps = if self.elapsed > 0.0 {
            self.frames as f32 / self.elapsed
        } else {
            0.0
        };
        let cpu_ms = self.cpu_time.as_secs_f64() * 1000.0 / self.frames as f64;
        let line = format!(
            "{} | {} objects | {fps:.1} fps | {cpu_ms:.2} ms",
            self.prefix, stats.objects_drawn
        );

        self.frames = 0;
        self.elapsed = 0.0;
        self.cpu_time = Duration::ZERO;

        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(dt: f32, cpu_ms: u64) -> FrameStats {
        FrameStats {
            frame_index: 0,
            dt,
            objects_drawn: 100,
            vertex_count: 144,
            bytes_uploaded: 1_600,
            cpu_time: Duration::from_millis(cpu_ms),
        }
    }

    #[test]
    fn emits_once_per_interval() {
        let mut status = StatusLine::new("swarm", 3);
        assert!(status.record(&stats(0.02, 1)).is_none());
        assert!(status.record(&stats(0.02, 1)).is_none());
        assert!(status.record(&stats(0.02, 1)).is_some());
        assert!(status.record(&stats(0.02, 1)).is_none());
    }

    #[test]
    fn averages_over_the_interval() {
        let mut status = StatusLine::new("swarm", 2);
        status.record(&stats(0.02, 1));
        let line = status.record(&stats(0.02, 3)).unwrap();
        assert_eq!(line, "swarm | 100 objects | 50.0 fps | 2.00 ms");
    }

    #[test]
    fn zero_elapsed_reports_zero_fps() {
        let mut status = StatusLine::new("swarm", 1);
        let line = status.record(&stats(0.0, 0)).unwrap();
        assert!(line.contains("| 0.0 fps |"), "{line}");
    }

    #[test]
    fn zero_interval_is_treated_as_every_frame() {
        let mut status = StatusLine::new("swarm", 0);
        assert!(status.record(&stats(0.016, 1)).is_some());
    }
}
