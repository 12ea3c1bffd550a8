//! Slot grid projection
//!
//! The altar shows exactly `MAX_SLOTS` picture frames. A `SlotGrid` is computed
//! from the current entry list on every render and never edited in place:
//! position `i` shows `entries[i]` when it exists, otherwise an empty frame.
//! Entries past the last slot are not shown.

use crate::app::AppEvent;
use crate::config::Assets;
use crate::model::Entry;

/// Total number of frame slots on the altar
pub const MAX_SLOTS: usize = 12;

pub const EMPTY_SLOT_ALT: &str = "Empty frame";
const UNNAMED_ALT: &str = "Memorial";

/// A slot showing an entry
#[derive(Debug, Clone, PartialEq)]
pub struct FilledSlot {
    pub index: usize,
    pub entry: Entry,
    pub image: String,
    pub alt: String,
    /// Hover label; only set when the entry has a name
    pub hover: Option<String>,
}

/// One of the `MAX_SLOTS` display positions
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Filled(FilledSlot),
    Empty { index: usize, image: String },
}

impl Slot {
    pub fn index(&self) -> usize {
        match self {
            Slot::Filled(slot) => slot.index,
            Slot::Empty { index, .. } => *index,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled(_))
    }

    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Slot::Filled(slot) => Some(&slot.entry),
            Slot::Empty { .. } => None,
        }
    }

    pub fn image(&self) -> &str {
        match self {
            Slot::Filled(slot) => &slot.image,
            Slot::Empty { image, .. } => image,
        }
    }

    pub fn alt(&self) -> &str {
        match self {
            Slot::Filled(slot) => &slot.alt,
            Slot::Empty { .. } => EMPTY_SLOT_ALT,
        }
    }

    /// Event emitted when the slot is clicked: detail view for filled slots,
    /// the create dialog for empty ones.
    pub fn click_event(&self) -> AppEvent {
        match self {
            Slot::Filled(slot) => AppEvent::OpenDetail(slot.entry.clone()),
            Slot::Empty { .. } => AppEvent::OpenCreate,
        }
    }
}

/// Fixed-capacity projection of an entry list
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    slots: Vec<Slot>,
    hidden: usize,
}

impl SlotGrid {
    pub fn project(entries: &[Entry], assets: &Assets) -> Self {
        let slots = (0..MAX_SLOTS)
            .map(|index| match entries.get(index) {
                Some(entry) => Slot::Filled(filled_slot(index, entry, assets)),
                None => Slot::Empty {
                    index,
                    image: assets.placeholder_image.clone(),
                },
            })
            .collect();

        Self {
            slots,
            hidden: entries.len().saturating_sub(MAX_SLOTS),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_filled()).count()
    }

    pub fn empty_count(&self) -> usize {
        MAX_SLOTS - self.filled_count()
    }

    /// Number of entries that did not fit on the altar
    pub fn hidden_count(&self) -> usize {
        self.hidden
    }
}

fn filled_slot(index: usize, entry: &Entry, assets: &Assets) -> FilledSlot {
    let display_name = entry.display_name();
    let named = !entry.name.trim().is_empty();
    FilledSlot {
        index,
        entry: entry.clone(),
        image: entry
            .image_url
            .clone()
            .unwrap_or_else(|| assets.placeholder_image.clone()),
        alt: if named {
            display_name.clone()
        } else {
            UNNAMED_ALT.to_string()
        },
        hover: named.then_some(display_name),
    }
}
