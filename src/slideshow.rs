//! Timer-driven auto-advance.
//!
//! While running, the driver owns a repeating tick and one progress animation.
//! The animation runs in its own task and reports [`ProgressStep`]s tagged with
//! an epoch; starting a new run cancels the previous token and bumps the epoch,
//! so late steps from a superseded run are recognisable and dropped.

use std::future;

use tokio::sync::mpsc::Sender;
use tokio::time::{Duration, Instant, Interval, MissedTickBehavior, interval_at, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::SlideshowOptions;
use crate::events::{ProgressStep, SlideshowStatus};

const PROGRESS_MAX: u8 = 100;

#[derive(Debug)]
struct ProgressRun {
    epoch: u64,
    cancel: CancellationToken,
}

impl ProgressRun {
    fn stop(&self) {
        self.cancel.cancel();
    }
}

#[derive(Debug)]
enum State {
    Idle,
    Running {
        ticker: Interval,
        progress: ProgressRun,
    },
}

#[derive(Debug)]
pub struct SlideshowDriver {
    options: SlideshowOptions,
    state: State,
    epoch: u64,
    to_manager: Sender<ProgressStep>,
    cancel: CancellationToken,
}

impl SlideshowDriver {
    /// `cancel` is the parent of every animation token, so cancelling it stops any run.
    pub fn new(
        options: SlideshowOptions,
        to_manager: Sender<ProgressStep>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            options,
            state: State::Idle,
            epoch: 0,
            to_manager,
            cancel,
        }
    }

    pub fn status(&self) -> SlideshowStatus {
        match self.state {
            State::Idle => SlideshowStatus::Idle,
            State::Running { .. } => SlideshowStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Arms the repeating tick (first tick one interval from now) and starts a progress run.
    /// Does nothing when already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let period = self.options.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let progress = self.spawn_progress();
        debug!(interval_ms = period.as_millis() as u64, "slideshow started");
        self.state = State::Running { ticker, progress };
    }

    /// Cancels the tick and the in-flight animation. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => false,
            State::Running { progress, .. } => {
                progress.stop();
                debug!(epoch = progress.epoch, "slideshow stopped");
                true
            }
        }
    }

    /// Supersedes the current progress run with a fresh one starting at 0 %.
    pub fn restart_progress(&mut self) {
        if !self.is_running() {
            return;
        }
        if let State::Running { progress, .. } = &self.state {
            progress.stop();
        }
        let fresh = self.spawn_progress();
        if let State::Running { progress, .. } = &mut self.state {
            *progress = fresh;
        }
    }

    /// Whether `step` belongs to the live progress run.
    pub fn accepts(&self, step: &ProgressStep) -> bool {
        match &self.state {
            State::Running { progress, .. } => progress.epoch == step.epoch,
            State::Idle => false,
        }
    }

    /// Resolves on the next auto-advance tick; pends forever while idle.
    pub async fn tick(&mut self) {
        match &mut self.state {
            State::Running { ticker, .. } => {
                ticker.tick().await;
            }
            State::Idle => future::pending::<()>().await,
        }
    }

    fn spawn_progress(&mut self) -> ProgressRun {
        self.epoch += 1;
        let run = ProgressRun {
            epoch: self.epoch,
            cancel: self.cancel.child_token(),
        };
        tokio::spawn(animate_progress(
            run.epoch,
            self.options.progress_step,
            run.cancel.clone(),
            self.to_manager.clone(),
        ));
        run
    }
}

impl Drop for SlideshowDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Steps 0..=100 %, sleeping `step` between frames; exits as soon as `cancel` fires.
async fn animate_progress(
    epoch: u64,
    step: Duration,
    cancel: CancellationToken,
    to_manager: Sender<ProgressStep>,
) {
    for percent in 0..=PROGRESS_MAX {
        if cancel.is_cancelled() {
            trace!(epoch, percent, "progress run cancelled");
            return;
        }
        if to_manager.send(ProgressStep { epoch, percent }).await.is_err() {
            return;
        }
        tokio::select! {
            _ = cancel.cancelled() => {
                trace!(epoch, percent, "progress run cancelled");
                return;
            }
            _ = sleep(step) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn driver(cap: usize) -> (SlideshowDriver, mpsc::Receiver<ProgressStep>) {
        let (tx, rx) = mpsc::channel(cap);
        let opts = SlideshowOptions::default();
        (SlideshowDriver::new(opts, tx, CancellationToken::new()), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn progress_fills_within_one_interval() {
        let (mut slideshow, mut rx) = driver(128);
        let started = Instant::now();
        slideshow.start();
        let mut last = None;
        while let Some(step) = rx.recv().await {
            assert!(slideshow.accepts(&step));
            last = Some(step.percent);
            if step.percent == PROGRESS_MAX {
                break;
            }
        }
        assert_eq!(last, Some(PROGRESS_MAX));
        assert!(started.elapsed() < SlideshowOptions::default().interval);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_fires_after_interval_only_while_running() {
        let (mut slideshow, _rx) = driver(128);
        let started = Instant::now();
        slideshow.start();
        slideshow.tick().await;
        let elapsed = started.elapsed();
        assert!(
            elapsed >= Duration::from_millis(3000) && elapsed < Duration::from_millis(3100),
            "first tick after {elapsed:?}"
        );

        assert!(slideshow.stop());
        assert!(!slideshow.stop());
        let idle = tokio::time::timeout(Duration::from_secs(10), slideshow.tick()).await;
        assert!(idle.is_err(), "idle driver must never tick");
    }

    #[tokio::test(start_paused = true)]
    async fn restart_supersedes_previous_run() {
        let (mut slideshow, mut rx) = driver(128);
        slideshow.start();
        let first = rx.recv().await.unwrap();
        slideshow.restart_progress();
        assert!(!slideshow.accepts(&first));
        let mut fresh = rx.recv().await.unwrap();
        while fresh.epoch == first.epoch {
            fresh = rx.recv().await.unwrap();
        }
        assert!(slideshow.accepts(&fresh));
        assert_eq!(fresh.percent, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_animation() {
        let (mut slideshow, mut rx) = driver(128);
        slideshow.start();
        let step = rx.recv().await.unwrap();
        slideshow.stop();
        assert!(!slideshow.accepts(&step));
        assert_eq!(slideshow.status(), SlideshowStatus::Idle);
        // The cancelled run may have one frame in flight at most, then the channel goes quiet.
        let mut late = 0;
        while let Ok(Some(_)) =
            tokio::time::timeout(Duration::from_millis(500), rx.recv()).await
        {
            late += 1;
        }
        assert!(late <= 1, "cancelled run kept animating ({late} frames)");
    }
}
