use std::str::FromStr;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CommandParseError;
use crate::events::GalleryCommand;

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(GalleryCommand),
    Quit,
}

fn argument<T: FromStr>(
    command: &str,
    raw: Option<&str>,
    expected: &'static str,
) -> Result<T, CommandParseError> {
    let raw = raw.ok_or_else(|| CommandParseError::MissingArgument {
        command: command.to_string(),
        expected,
    })?;
    raw.parse().map_err(|_| CommandParseError::InvalidArgument {
        command: command.to_string(),
        value: raw.to_string(),
    })
}

impl FromStr for Input {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or_default().to_ascii_lowercase();
        let arg = words.next();
        let cmd = match head.as_str() {
            "select" | "open" => GalleryCommand::Select(argument(&head, arg, "an item index")?),
            "next" | "right" | "n" => GalleryCommand::Next,
            "previous" | "prev" | "left" | "p" => GalleryCommand::Previous,
            "slideshow" | "toggle" | "s" => GalleryCommand::ToggleSlideshow,
            "hero" | "view" => GalleryCommand::OpenHero,
            "close" | "esc" => GalleryCommand::CloseHero,
            "resize" | "width" => GalleryCommand::Resize(argument(&head, arg, "a width in pixels")?),
            "home" | "gallery" => GalleryCommand::Home,
            "quit" | "exit" | "q" => return Ok(Self::Quit),
            _ => return Err(CommandParseError::Unknown(line.trim().to_string())),
        };
        Ok(Self::Command(cmd))
    }
}

/// Reads commands line by line until EOF, `quit`, or cancellation.
///
/// Returning drops `to_manager`; the manager handles every queued command
/// before it sees the closed channel and winds down.
pub async fn run<R>(reader: R, to_manager: Sender<GalleryCommand>, cancel: CancellationToken) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            line = lines.next_line() => line.context("failed to read input")?,
        };
        let Some(line) = line else {
            info!("input closed; initiating shutdown");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Input>() {
            Ok(Input::Command(cmd)) => {
                debug!(?cmd, "input");
                if to_manager.send(cmd).await.is_err() {
                    warn!("manager channel closed");
                    break;
                }
            }
            Ok(Input::Quit) => {
                info!("quit requested");
                break;
            }
            Err(err) => warn!("{err}"),
        }
    }
    Ok(())
}
