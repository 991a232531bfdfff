//! Rotating encouragement for the parent.
//!
//! Two fixed lists: short messages and practical tips. Each refresh picks a
//! uniformly random entry from each list, with replacement, so the same text
//! can come up twice in a row.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default time between automatic refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

pub const MESSAGES: [&str; 15] = [
    "You are doing a great job. Your baby sees you as their superhero.",
    "Your instinct is the strongest compass you have. Trust your heart.",
    "Taking care of yourself is not a luxury; it is part of loving your baby.",
    "Every touch and every hug builds a world of safety for your little one.",
    "The hard days will pass, and the beautiful memories will stay.",
    "You are the best person for your baby, and no one can take your place.",
    "Today may be exhausting, but you are planting seeds of love for a bright future.",
    "Don't compare yourself to others; your journey with your baby is unique.",
    "Take a deep breath. You are patient, strong and loving.",
    "Your baby's smile is the biggest thank-you for everything you do.",
    "Your voice is the sweetest sound your baby knows. Let it reassure them.",
    "Asking for help is fine. Parenting is a shared journey, not a solo race.",
    "You work small miracles every day, even when you can't see them.",
    "Your baby learns love through your eyes and your gentle heart.",
    "Give yourself the credit you deserve. You hold this family together.",
];

pub const TIPS: [&str; 6] = [
    "A glass of warm water helps you relax and lifts your mood.",
    "When you feel stressed, try five slow, deep breaths.",
    "Having the baby sleep in your room (not your bed) lowers the risk of SIDS.",
    "Gentle morning sunlight helps regulate your baby's sleep cycle.",
    "Talking to your baby from day one builds their language skills.",
    "A 20-second hug releases oxytocin and lowers stress for both of you.",
];

/// Currently shown message and tip, refreshed on a timer or on demand.
pub struct InspirationPanel {
    rng: StdRng,
    message_index: usize,
    tip_index: usize,
    interval: Duration,
    last_refresh: Instant,
}

impl InspirationPanel {
    pub fn new(interval: Duration) -> Self {
        Self::with_rng(StdRng::from_os_rng(), interval)
    }

    /// Deterministic panel for reproducible sequences.
    pub fn with_seed(seed: u64, interval: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), interval)
    }

    fn with_rng(rng: StdRng, interval: Duration) -> Self {
        let mut panel = Self {
            rng,
            message_index: 0,
            tip_index: 0,
            interval: interval.max(Duration::from_secs(1)),
            last_refresh: Instant::now(),
        };
        panel.refresh(Instant::now());
        panel
    }

    /// Pick a new message and tip.
    pub fn refresh(&mut self, now: Instant) {
        self.message_index = self.rng.random_range(0..MESSAGES.len());
        self.tip_index = self.rng.random_range(0..TIPS.len());
        self.last_refresh = now;
    }

    /// Refresh if the interval has elapsed. Returns true when it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_refresh) >= self.interval {
            self.refresh(now);
            true
        } else {
            false
        }
    }

    pub fn message(&self) -> &'static str {
        MESSAGES[self.message_index]
    }

    pub fn tip(&self) -> &'static str {
        TIPS[self.tip_index]
    }

    pub fn message_index(&self) -> usize {
        self.message_index
    }

    pub fn tip_index(&self) -> usize {
        self.tip_index
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
