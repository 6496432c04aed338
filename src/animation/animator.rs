use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::Tween;
use crate::calculator::DerivedTotals;
use crate::config::DisplayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayField {
    TotalCost,
    HourlyRate,
    CostPerMinute,
}

impl DisplayField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalCost => "total_cost",
            Self::HourlyRate => "hourly_rate",
            Self::CostPerMinute => "cost_per_minute",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    pub enabled: bool,
    pub duration: Duration,
    pub frame: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: Duration::from_millis(600),
            frame: Duration::from_millis(16),
        }
    }
}

impl From<&DisplayConfig> for AnimationTiming {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            enabled: config.animate,
            duration: config.animation_duration(),
            frame: config.frame_interval(),
        }
    }
}

/// One animated display value.
///
/// A new target cancels the running transition and starts a fresh one from
/// whatever is on screen at that moment. Frames from a superseded task are
/// rejected by generation, so a late frame can never overwrite a newer one.
pub struct FieldAnimation {
    field: DisplayField,
    timing: AnimationTiming,
    tx: Arc<watch::Sender<f64>>,
    target: f64,
    generation: Arc<AtomicU64>,
    cancel: Option<CancellationToken>,
}

impl FieldAnimation {
    pub fn new(field: DisplayField, timing: AnimationTiming) -> Self {
        let (tx, _rx) = watch::channel(0.0);
        Self {
            field,
            timing,
            tx: Arc::new(tx),
            target: 0.0,
            generation: Arc::new(AtomicU64::new(0)),
            cancel: None,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn displayed(&self) -> f64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.tx.subscribe()
    }

    pub fn retarget(&mut self, end: f64) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let start = self.displayed();
        self.target = end;

        if !self.timing.enabled || self.timing.duration.is_zero() || start == end {
            self.tx.send_replace(end);
            return;
        }

        if tokio::runtime::Handle::try_current().is_err() {
            debug!(
                "No async runtime for {} animation; showing target directly",
                self.field.as_str()
            );
            self.tx.send_replace(end);
            return;
        }

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let tween = Tween::new(start, end, self.timing.duration);
        let frame = self.timing.frame;
        let tx = Arc::clone(&self.tx);
        let current_generation = Arc::clone(&self.generation);
        let field = self.field;

        tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(frame);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        trace!("{} animation superseded", field.as_str());
                        return;
                    }
                    _ = ticker.tick() => {
                        let elapsed = started.elapsed();
                        let value = tween.value_at(elapsed);
                        let accepted = tx.send_if_modified(|shown| {
                            if current_generation.load(Ordering::SeqCst) != generation {
                                return false;
                            }
                            *shown = value;
                            true
                        });
                        if !accepted || tween.is_finished(elapsed) {
                            return;
                        }
                    }
                }
            }
        });
    }

    pub async fn settled(&self) {
        let mut rx = self.subscribe();
        let target = self.target;
        // The sender lives as long as `self`, so this only ends on a match.
        let _ = rx.wait_for(|shown| *shown == target).await;
    }
}

impl Drop for FieldAnimation {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

/// Animated view of the three derived totals.
pub struct DisplayAnimator {
    total_cost: FieldAnimation,
    hourly_rate: FieldAnimation,
    cost_per_minute: FieldAnimation,
}

impl DisplayAnimator {
    pub fn new(timing: AnimationTiming) -> Self {
        Self {
            total_cost: FieldAnimation::new(DisplayField::TotalCost, timing),
            hourly_rate: FieldAnimation::new(DisplayField::HourlyRate, timing),
            cost_per_minute: FieldAnimation::new(DisplayField::CostPerMinute, timing),
        }
    }

    pub fn retarget(&mut self, totals: &DerivedTotals) {
        self.total_cost.retarget(totals.total_cost);
        self.hourly_rate.retarget(totals.total_hourly_rate);
        self.cost_per_minute.retarget(totals.cost_per_minute);
    }

    /// Values currently on screen, which may lag the latest totals.
    pub fn displayed(&self) -> DerivedTotals {
        DerivedTotals {
            total_hourly_rate: self.hourly_rate.displayed(),
            cost_per_minute: self.cost_per_minute.displayed(),
            total_cost: self.total_cost.displayed(),
        }
    }

    pub fn targets(&self) -> DerivedTotals {
        DerivedTotals {
            total_hourly_rate: self.hourly_rate.target(),
            cost_per_minute: self.cost_per_minute.target(),
            total_cost: self.total_cost.target(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.displayed() == self.targets()
    }

    pub async fn settled(&self) {
        tokio::join!(
            self.total_cost.settled(),
            self.hourly_rate.settled(),
            self.cost_per_minute.settled()
        );
    }
}
