/// Preview overlay selection state
///
/// Tracks whether the full-size preview is open and which card it shows.
/// The selection may stay stale after a close; `current` only ever exposes
/// it while the overlay is actually open, and the next `open` overwrites it.

use super::data::ImageCard;

/// Modal preview state: visibility plus the selected card
#[derive(Debug, Default)]
pub struct Preview {
    is_open: bool,
    selected: Option<ImageCard>,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the overlay on the given card, replacing any prior selection
    pub fn open(&mut self, card: ImageCard) {
        self.selected = Some(card);
        self.is_open = true;
    }

    /// Close the overlay. The selection is left in place but becomes
    /// invisible through `current` until the overlay is opened again.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The selected card, only while the overlay is open
    pub fn current(&self) -> Option<&ImageCard> {
        if self.is_open {
            self.selected.as_ref()
        } else {
            None
        }
    }
}
