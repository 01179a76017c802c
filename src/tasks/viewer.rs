use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::Receiver;
use tracing::{debug, trace};

use crate::events::ViewUpdate;
use crate::render;

/// Progress frames are drawn every this many percent.
const PROGRESS_DRAW_STEP: u8 = 25;

fn should_draw(update: &ViewUpdate) -> bool {
    match update {
        ViewUpdate::SlideshowProgress(Some(percent)) => percent % PROGRESS_DRAW_STEP == 0,
        _ => true,
    }
}

/// Draws every view update as text on `out` until the manager hangs up.
/// Updates queued before the sender drops are still drawn.
pub async fn run<W>(mut from_manager: Receiver<ViewUpdate>, mut out: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(update) = from_manager.recv().await {
        if !should_draw(&update) {
            trace!(?update, "skipping progress frame");
            continue;
        }
        out.write_all(render::update(&update).as_bytes())
            .await
            .context("failed to draw view update")?;
        out.flush().await.context("failed to flush output")?;
    }
    debug!("manager closed view channel");
    Ok(())
}
