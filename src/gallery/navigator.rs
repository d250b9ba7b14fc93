//! Gallery filter and lightbox navigation state.
//!
//! All state lives in an explicit [`NavigatorState`] value that is updated
//! by small reducer methods. Rendering is a separate projection
//! ([`NavigatorState::lightbox_view`], [`NavigatorState::filter_buttons`])
//! that can be re-run at any time without side effects.

use serde::Serialize;

use crate::models::GalleryCard;

/// Filter value that shows every card.
pub const FILTER_ALL: &str = "All";

/// Step direction for lightbox navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Previous card (wraps to the last)
    Previous,
    /// Next card (wraps to the first)
    Next,
}

/// Keys the lightbox responds to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    /// Close the lightbox
    Escape,
    /// Previous card
    ArrowLeft,
    /// Next card
    ArrowRight,
}

impl LightboxKey {
    /// Parses a DOM `KeyboardEvent.key` value. Other keys are ignored.
    #[must_use]
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Escape),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

/// User actions handled by the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorAction {
    /// A filter button was clicked
    Filter(String),
    /// A card (by position in the full card list) was clicked
    Open(usize),
    /// Close button or backdrop clicked
    Close,
    /// Previous/next button clicked
    Navigate(Direction),
    /// Key pressed anywhere on the page
    Key(LightboxKey),
}

/// What the lightbox shows for the open card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightboxView {
    /// Image source (full resolution when available)
    pub image: String,
    /// Title text
    pub title: String,
    /// Category label text
    pub category: String,
}

/// One filter button and whether it is highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    /// Category the button filters by
    pub category: String,
    /// Whether this is the active filter
    pub active: bool,
}

/// Filtered gallery plus lightbox cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    cards: Vec<GalleryCard>,
    filter: String,
    /// Positions in `cards` of the visible cards, in original order
    visible: Vec<usize>,
    /// Position in `visible` of the open card
    cursor: Option<usize>,
    /// Position in `cards` of the card being shown
    shown: Option<usize>,
}

impl NavigatorState {
    /// Creates a navigator over the given cards with the "All" filter applied.
    #[must_use]
    pub fn new(cards: Vec<GalleryCard>) -> Self {
        let mut state = Self {
            cards,
            filter: String::new(),
            visible: Vec::new(),
            cursor: None,
            shown: None,
        };
        state.apply_filter(FILTER_ALL);
        state
    }

    /// All cards in page order.
    #[must_use]
    pub fn cards(&self) -> &[GalleryCard] {
        &self.cards
    }

    /// The active filter category.
    #[must_use]
    pub fn active_filter(&self) -> &str {
        &self.filter
    }

    /// Positions of the visible cards in the full card list.
    #[must_use]
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// The visible cards in original order.
    pub fn visible_cards(&self) -> impl Iterator<Item = &GalleryCard> {
        self.visible.iter().map(|&i| &self.cards[i])
    }

    /// Returns whether the card at `card_index` passes the active filter.
    #[must_use]
    pub fn is_visible(&self, card_index: usize) -> bool {
        self.visible.contains(&card_index)
    }

    /// Lightbox cursor (position in the visible sequence), if open.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns whether the lightbox is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.cursor.is_some()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for card in &self.cards {
            if !categories.contains(&card.category.as_str()) {
                categories.push(&card.category);
            }
        }
        categories
    }

    /// Shows only cards tagged `category` ("All" shows everything).
    ///
    /// Matching is exact and case-sensitive. The lightbox cursor is left
    /// untouched.
    pub fn apply_filter(&mut self, category: &str) {
        self.filter = category.to_string();
        self.visible = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| category == FILTER_ALL || card.category == category)
            .map(|(i, _)| i)
            .collect();
    }

    /// Opens the lightbox on a card.
    ///
    /// Does nothing if the card is not currently visible. Returns whether
    /// the card was opened.
    pub fn open(&mut self, card_index: usize) -> bool {
        let Some(position) = self.visible.iter().position(|&i| i == card_index) else {
            return false;
        };
        self.cursor = Some(position);
        self.shown = Some(card_index);
        true
    }

    /// Closes the lightbox. Closing twice is harmless.
    pub fn close(&mut self) {
        self.cursor = None;
        self.shown = None;
    }

    /// Moves to the previous or next visible card, wrapping at both ends.
    ///
    /// Does nothing if the lightbox is closed or no card is visible.
    pub fn navigate(&mut self, direction: Direction) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let len = self.visible.len();
        if len == 0 {
            return;
        }

        let next = match direction {
            Direction::Next => (cursor + 1 + len) % len,
            Direction::Previous => (cursor + len - 1) % len,
        };
        self.open(self.visible[next]);
    }

    /// Handles a key press. Keys are ignored while the lightbox is closed.
    pub fn handle_key(&mut self, key: LightboxKey) {
        if !self.is_open() {
            return;
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::ArrowLeft => self.navigate(Direction::Previous),
            LightboxKey::ArrowRight => self.navigate(Direction::Next),
        }
    }

    /// Applies one user action.
    pub fn dispatch(&mut self, action: NavigatorAction) {
        match action {
            NavigatorAction::Filter(category) => self.apply_filter(&category),
            NavigatorAction::Open(card_index) => {
                self.open(card_index);
            }
            NavigatorAction::Close => self.close(),
            NavigatorAction::Navigate(direction) => self.navigate(direction),
            NavigatorAction::Key(key) => self.handle_key(key),
        }
    }

    /// Lightbox contents for the open card, or `None` while closed.
    #[must_use]
    pub fn lightbox_view(&self) -> Option<LightboxView> {
        self.cursor?;
        let card = &self.cards[self.shown?];
        Some(LightboxView {
            image: card.lightbox_image().to_string(),
            title: card.display_title().to_string(),
            category: card.category.clone(),
        })
    }

    /// Highlight state for a row of filter buttons.
    #[must_use]
    pub fn filter_buttons(&self, categories: &[&str]) -> Vec<FilterButton> {
        categories
            .iter()
            .map(|&category| FilterButton {
                category: category.to_string(),
                active: category == self.filter,
            })
            .collect()
    }
}
