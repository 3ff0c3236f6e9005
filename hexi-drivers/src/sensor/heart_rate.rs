//! Heart rate beat detector
//!
//! Works on the raw IR samples of the optical sensor, one sample per
//! sample period. A beat shows up as a sharp drop in reflected light, so
//! the detector tracks the sample-to-sample deltas in an 8-slot ring and
//! flags a beat when the most negative delta sits in the middle of the
//! ring and is below an adaptive threshold.
//!
//! # Usage
//!
//! ```ignore
//! let mut monitor = HeartRateMonitor::new(HeartRateConfig::default());
//!
//! // Every tick:
//! for _ in 0..monitor.update_with_delta(delta_ms) {
//!     let sample = optical.read_sample()?;
//!     monitor.process_sample(sample);
//!     optical.clear_fifo()?;
//! }
//! let bpm = monitor.average_bpm();
//! ```

use hexi_core::config::HeartRateConfig;

/// Slots in the delta ring
const DELTA_SLOTS: usize = 8;

/// Slots in the bpm moving average
const AVERAGE_SLOTS: usize = 10;

/// Threshold after start and after a reset
const INITIAL_THRESHOLD: f32 = -20.0;

/// Minimum deltas in this range adapt the threshold
const ADAPT_MIN: i32 = -2000;
const ADAPT_MAX: i32 = -20;

/// Weight of the detected minimum when adapting the threshold
const ADAPT_WEIGHT: f32 = 0.6;

/// Accepted bpm range (exclusive)
const BPM_MIN: f32 = 20.0;
const BPM_MAX: f32 = 255.0;

/// Beat detector with moving average
#[derive(Debug, Clone)]
pub struct HeartRateMonitor {
    config: HeartRateConfig,
    deltas: [i32; DELTA_SLOTS],
    cursor: usize,
    previous: u32,
    threshold: f32,
    /// Samples since the last beat (or reset)
    samples: u32,
    rates: [f32; AVERAGE_SLOTS],
    rate_cursor: usize,
    average: f32,
    /// Time not yet consumed by a sample period
    elapsed_ms: u32,
}

impl HeartRateMonitor {
    pub fn new(config: HeartRateConfig) -> Self {
        Self {
            config,
            deltas: [0; DELTA_SLOTS],
            cursor: 0,
            previous: 0,
            threshold: INITIAL_THRESHOLD,
            samples: 0,
            rates: [0.0; AVERAGE_SLOTS],
            rate_cursor: 0,
            average: 0.0,
            elapsed_ms: 0,
        }
    }

    pub fn config(&self) -> &HeartRateConfig {
        &self.config
    }

    /// Current average in beats per minute
    pub fn average_bpm(&self) -> u8 {
        self.average as u8
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Advance time, returning how many samples are due
    pub fn update_with_delta(&mut self, delta_ms: u32) -> u32 {
        let period = self.sample_period();
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        let due = self.elapsed_ms / period;
        self.elapsed_ms %= period;
        due
    }

    /// Feed one raw sample, returning true when it completed a beat
    pub fn process_sample(&mut self, sample: u32) -> bool {
        self.samples += 1;
        let beat = self.check_for_beat(sample);

        if beat {
            let interval_ms = self.samples * self.sample_period();
            self.samples = 0;
            let bpm = 60_000.0 / interval_ms as f32;
            if bpm > BPM_MIN && bpm < BPM_MAX {
                self.push_rate(bpm);
            }
        }

        let silence_limit = (self.config.reset_after_ms as u32 / self.sample_period()).max(1);
        if self.samples >= silence_limit {
            trace!("heart rate: no beat for {} samples, reset", self.samples);
            self.reset();
        }

        beat
    }

    /// Forget the threshold and the average
    pub fn reset(&mut self) {
        self.samples = 0;
        self.threshold = INITIAL_THRESHOLD;
        self.rates = [0.0; AVERAGE_SLOTS];
        self.rate_cursor = 0;
        self.average = 0.0;
    }

    fn sample_period(&self) -> u32 {
        (self.config.sample_period_ms as u32).max(1)
    }

    fn check_for_beat(&mut self, sample: u32) -> bool {
        let delta = sample as i64 - self.previous as i64;
        self.deltas[self.cursor] = delta.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        self.previous = sample;
        self.cursor = (self.cursor + 1) % DELTA_SLOTS;

        let minimum = self.deltas.iter().copied().min().unwrap_or(0);
        // Four slots back from the write cursor is the middle of the ring
        let candidate = self.deltas[(self.cursor + DELTA_SLOTS - 4) % DELTA_SLOTS];
        let before = self.deltas[(self.cursor + DELTA_SLOTS - 5) % DELTA_SLOTS];

        if candidate != minimum || before == 0 || minimum as f32 > self.threshold {
            return false;
        }

        if (ADAPT_MIN..=ADAPT_MAX).contains(&minimum) {
            self.threshold = (self.threshold + candidate as f32 * ADAPT_WEIGHT) / 2.0;
        }
        self.deltas = [0; DELTA_SLOTS];
        true
    }

    fn push_rate(&mut self, bpm: f32) {
        self.rates[self.rate_cursor] = bpm;
        self.rate_cursor = (self.rate_cursor + 1) % AVERAGE_SLOTS;
        // Empty slots count as zero until the ring has filled once
        self.average = self.rates.iter().sum::<f32>() / AVERAGE_SLOTS as f32;
        debug!("heart rate: beat at {} bpm", bpm as u32);
    }
}
