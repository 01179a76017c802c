use crate::hero::HeroView;
use crate::layout::ColumnLayout;
use crate::pagination::DetailView;

/// User input consumed by the manager task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryCommand {
    /// A gallery card was clicked; carries the card's id.
    Select(usize),
    Next,
    Previous,
    ToggleSlideshow,
    OpenHero,
    CloseHero,
    /// The viewport changed width (px).
    Resize(u32),
    /// Back to the gallery grid.
    Home,
}

impl GalleryCommand {
    /// Commands that step the pagination by hand and therefore stop a running slideshow.
    pub fn is_manual_navigation(&self) -> bool {
        matches!(
            self,
            Self::Select(_) | Self::Next | Self::Previous | Self::Home
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowStatus {
    Idle,
    Running,
}

impl SlideshowStatus {
    /// Label of the toggle control in this state.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Idle => "START SLIDESHOW",
            Self::Running => "STOP SLIDESHOW",
        }
    }
}

/// One frame of the slideshow time-progress animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    /// Animation run this step belongs to.
    pub epoch: u64,
    pub percent: u8,
}

/// Pure view data emitted by the manager for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// Replace the whole grid.
    Gallery(ColumnLayout),
    Detail(DetailView),
    /// Time-progress bar fill; `None` hides the bar.
    SlideshowProgress(Option<u8>),
    SlideshowStatus(SlideshowStatus),
    Hero(HeroView),
}
