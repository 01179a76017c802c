use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Configuration;
use crate::events::{GalleryCommand, ProgressStep, SlideshowStatus, ViewUpdate};
use crate::gallery::Gallery;
use crate::pagination::Direction;
use crate::slideshow::SlideshowDriver;
use crate::store::ItemStore;

const PROGRESS_CHANNEL_CAPACITY: usize = 32;

/// Gallery context plus the slideshow that automates it.
struct Session {
    gallery: Gallery,
    slideshow: SlideshowDriver,
}

impl Session {
    fn start(&mut self) -> Vec<ViewUpdate> {
        let mut updates: Vec<ViewUpdate> = self.gallery.show_gallery().into_iter().collect();
        updates.push(ViewUpdate::SlideshowStatus(self.slideshow.status()));
        updates
    }

    fn stop_slideshow(&mut self, updates: &mut Vec<ViewUpdate>) {
        if self.slideshow.stop() {
            updates.push(ViewUpdate::SlideshowProgress(None));
            updates.push(ViewUpdate::SlideshowStatus(SlideshowStatus::Idle));
        }
    }

    fn handle(&mut self, cmd: GalleryCommand) -> Vec<ViewUpdate> {
        let mut updates = Vec::new();
        if cmd.is_manual_navigation() {
            // Cancel the pending tick and animation before stepping.
            self.stop_slideshow(&mut updates);
        }
        match cmd {
            GalleryCommand::Select(id) => updates.extend(self.gallery.select(id)),
            GalleryCommand::Next => updates.extend(self.gallery.navigate(Direction::Next)),
            GalleryCommand::Previous => {
                updates.extend(self.gallery.navigate(Direction::Previous))
            }
            GalleryCommand::Home => updates.extend(self.gallery.go_home()),
            GalleryCommand::ToggleSlideshow => {
                if self.slideshow.is_running() {
                    self.stop_slideshow(&mut updates);
                } else if self.gallery.store().is_empty() {
                    warn!("slideshow requested on an empty gallery");
                } else {
                    updates.extend(self.gallery.navigate(Direction::Next));
                    self.slideshow.start();
                    updates.push(ViewUpdate::SlideshowStatus(SlideshowStatus::Running));
                }
            }
            GalleryCommand::OpenHero => updates.extend(self.gallery.toggle_hero()),
            GalleryCommand::CloseHero => updates.extend(self.gallery.close_hero()),
            GalleryCommand::Resize(width) => updates.extend(self.gallery.resize(width)),
        }
        updates
    }

    fn on_tick(&mut self) -> Option<ViewUpdate> {
        self.slideshow.restart_progress();
        self.gallery.navigate(Direction::Next)
    }

    fn on_progress(&self, step: ProgressStep) -> Option<ViewUpdate> {
        if self.slideshow.accepts(&step) {
            Some(ViewUpdate::SlideshowProgress(Some(step.percent)))
        } else {
            debug!(epoch = step.epoch, percent = step.percent, "dropping stale progress step");
            None
        }
    }
}

/// Owns the gallery state and serializes every transition.
///
/// Rules:
/// - The grid is emitted once at startup, then again on breakpoint crossings.
/// - Manual navigation stops a running slideshow before stepping.
/// - While the slideshow runs, each tick restarts the progress bar and advances one item.
/// - Progress frames from superseded animation runs are never forwarded.
pub async fn run(
    store: ItemStore,
    cfg: Configuration,
    mut commands: Receiver<GalleryCommand>,
    to_viewer: Sender<ViewUpdate>,
    cancel: CancellationToken,
) -> Result<()> {
    let (progress_tx, mut progress_rx) = mpsc::channel::<ProgressStep>(PROGRESS_CHANNEL_CAPACITY);
    let mut session = Session {
        gallery: Gallery::new(store, &cfg),
        slideshow: SlideshowDriver::new(cfg.slideshow.clone(), progress_tx, cancel.child_token()),
    };
    info!(items = session.gallery.store().len(), "gallery ready");

    let mut pending = session.start();
    loop {
        for update in pending.drain(..) {
            if to_viewer.send(update).await.is_err() {
                warn!("viewer channel closed");
                // Break rather than keep running for a dead peer.
                session.slideshow.stop();
                return Ok(());
            }
        }

        select! {
            _ = cancel.cancelled() => break,

            maybe_cmd = commands.recv() => match maybe_cmd {
                Some(cmd) => {
                    debug!(?cmd, "command");
                    pending = session.handle(cmd);
                }
                None => {
                    info!("command channel closed; stopping gallery");
                    break;
                }
            },

            _ = session.slideshow.tick() => {
                pending.extend(session.on_tick());
            }

            Some(step) = progress_rx.recv() => {
                pending.extend(session.on_progress(step));
            }
        }
    }

    session.slideshow.stop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::store_of;

    fn session(len: usize) -> (Session, Receiver<ProgressStep>) {
        let (tx, rx) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
        let cfg = Configuration::default();
        let session = Session {
            gallery: Gallery::new(store_of(len), &cfg),
            slideshow: SlideshowDriver::new(cfg.slideshow.clone(), tx, CancellationToken::new()),
        };
        (session, rx)
    }

    fn detail_index(updates: &[ViewUpdate]) -> Option<usize> {
        updates.iter().find_map(|u| match u {
            ViewUpdate::Detail(view) => Some(view.index),
            _ => None,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_advances_immediately_and_reports_running() {
        let (mut s, _rx) = session(3);
        s.start();
        s.handle(GalleryCommand::Select(0));
        let updates = s.handle(GalleryCommand::ToggleSlideshow);
        assert_eq!(detail_index(&updates), Some(1));
        assert_eq!(
            updates.last(),
            Some(&ViewUpdate::SlideshowStatus(SlideshowStatus::Running))
        );
        assert!(s.slideshow.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_step_stops_slideshow_first() {
        let (mut s, _rx) = session(3);
        s.handle(GalleryCommand::Select(0));
        s.handle(GalleryCommand::ToggleSlideshow);
        let updates = s.handle(GalleryCommand::Previous);
        assert_eq!(updates.len(), 3);
        assert_eq!(
            &updates[..2],
            &[
                ViewUpdate::SlideshowProgress(None),
                ViewUpdate::SlideshowStatus(SlideshowStatus::Idle),
            ]
        );
        assert_eq!(detail_index(&updates), Some(0));
        assert!(!s.slideshow.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_on_empty_gallery_is_a_no_op() {
        let (mut s, _rx) = session(0);
        assert!(s.handle(GalleryCommand::ToggleSlideshow).is_empty());
        assert!(!s.slideshow.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_progress_is_dropped() {
        let (mut s, mut rx) = session(3);
        s.handle(GalleryCommand::ToggleSlideshow);
        let first = rx.recv().await.unwrap();
        assert_eq!(
            s.on_progress(first),
            Some(ViewUpdate::SlideshowProgress(Some(0)))
        );
        s.on_tick();
        assert_eq!(s.on_progress(first), None);
    }
}
