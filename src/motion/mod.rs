//! Pointer, scroll and reveal arithmetic. Nothing in here touches GL or
//! Wayland; the renderer only sees [`VisualState`].

pub mod parallax;
pub mod pointer;
pub mod scroll;
pub mod tilt;
pub mod timeline;

use parallax::BackdropVisual;
use pointer::CursorVisual;
use tilt::CardTilt;
use timeline::{EntryStyle, TimelineVisual};

/// Everything the renderer needs from the motion layer for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    pub cursor: CursorVisual,
    /// Scroll progress through the tracked container, also the width of the
    /// top progress bar.
    pub progress: f32,
    /// Target reveal state.
    pub timeline: TimelineVisual,
    /// Displayed entry styles, eased toward `timeline`.
    pub entries: Vec<EntryStyle>,
    /// Displayed indicator length in pixels.
    pub indicator_length: f32,
    pub backdrop: BackdropVisual,
    pub hero: CardTilt,
    /// The card under the pointer and its tilt, keyed by layout block.
    pub tilted: Option<(usize, CardTilt)>,
    /// 0 closed, 1 open.
    pub chat_open: f32,
}
