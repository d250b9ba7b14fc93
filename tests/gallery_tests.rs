//! Scenario tests for gallery filtering, lightbox navigation, hero rotation,
//! and the before/after slider.

use proptest::prelude::*;

use countertop_site::gallery::{
    Direction, HeroCarousel, LightboxKey, NavigatorAction, NavigatorState, SliderPosition,
    FILTER_ALL,
};

mod fixtures;
use fixtures::sample_cards;

fn open_titles(state: &NavigatorState) -> Option<String> {
    state.lightbox_view().map(|view| view.title)
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_all_shows_every_card() {
    let state = NavigatorState::new(sample_cards());
    assert_eq!(state.active_filter(), FILTER_ALL);
    assert_eq!(state.visible_indices(), &[0, 1, 2, 3, 4]);
}

#[test]
fn test_filter_is_exact_and_case_sensitive() {
    let mut state = NavigatorState::new(sample_cards());

    state.apply_filter("Kitchen");
    assert_eq!(state.visible_indices(), &[0, 2, 4]);

    state.apply_filter("kitchen");
    assert!(state.visible_indices().is_empty());

    state.apply_filter(FILTER_ALL);
    assert_eq!(state.visible_indices().len(), 5);
}

#[test]
fn test_filter_buttons_highlight_active() {
    let mut state = NavigatorState::new(sample_cards());
    state.dispatch(NavigatorAction::Filter("Bath".to_string()));

    let mut row = vec![FILTER_ALL];
    row.extend(state.categories());
    let buttons = state.filter_buttons(&row);

    let active: Vec<_> = buttons
        .iter()
        .filter(|b| b.active)
        .map(|b| b.category.as_str())
        .collect();
    assert_eq!(active, vec!["Bath"]);
    assert_eq!(row, vec![FILTER_ALL, "Kitchen", "Bath", "Outdoor"]);
}

// ============================================================================
// Lightbox
// ============================================================================

#[test]
fn test_lightbox_walks_filtered_cards_and_wraps() {
    let mut state = NavigatorState::new(sample_cards());
    state.apply_filter("Kitchen");
    assert!(state.open(4));
    assert_eq!(state.cursor(), Some(2));

    state.navigate(Direction::Next);
    assert_eq!(state.cursor(), Some(0));
    let view = state.lightbox_view().unwrap();
    assert_eq!(view.image, "img/k1-full.jpg");
    assert_eq!(view.category, "Kitchen");

    state.navigate(Direction::Previous);
    assert_eq!(state.cursor(), Some(2));
    assert_eq!(open_titles(&state).as_deref(), Some("Waterfall edge"));
}

#[test]
fn test_untitled_card_uses_default_title() {
    let mut state = NavigatorState::new(sample_cards());
    assert!(state.open(2));

    let view = state.lightbox_view().unwrap();
    assert_eq!(view.title, "Project");
    assert_eq!(view.image, "img/k2.jpg");
}

#[test]
fn test_hidden_card_does_not_open() {
    let mut state = NavigatorState::new(sample_cards());
    state.apply_filter("Outdoor");

    assert!(!state.open(0));
    assert!(!state.is_open());
    assert!(state.lightbox_view().is_none());
}

#[test]
fn test_keys_drive_lightbox() {
    let mut state = NavigatorState::new(sample_cards());
    state.open(0);

    for name in ["ArrowRight", "ArrowRight", "ArrowLeft"] {
        let key = LightboxKey::from_key_name(name).unwrap();
        state.dispatch(NavigatorAction::Key(key));
    }
    assert_eq!(state.cursor(), Some(1));

    state.dispatch(NavigatorAction::Key(LightboxKey::Escape));
    assert!(!state.is_open());

    // Keys are ignored while closed
    state.dispatch(NavigatorAction::Key(LightboxKey::ArrowRight));
    assert!(!state.is_open());
    assert!(LightboxKey::from_key_name("Enter").is_none());
}

#[test]
fn test_cursor_survives_filter_change() {
    let mut state = NavigatorState::new(sample_cards());
    state.open(4);
    assert_eq!(state.cursor(), Some(4));

    // Filtering while open keeps the cursor; navigation then wraps over the new list
    state.apply_filter("Bath");
    assert_eq!(state.cursor(), Some(4));

    state.navigate(Direction::Next);
    assert_eq!(state.cursor(), Some(0));
    assert_eq!(open_titles(&state).as_deref(), Some("Floating vanity"));
}

#[test]
fn test_navigate_with_nothing_visible_is_noop() {
    let mut state = NavigatorState::new(sample_cards());
    state.open(1);
    state.apply_filter("Garage");

    state.navigate(Direction::Next);
    state.navigate(Direction::Previous);
    assert_eq!(state.cursor(), Some(1));
}

#[test]
fn test_close_twice_is_harmless() {
    let mut state = NavigatorState::new(sample_cards());
    state.open(3);
    state.dispatch(NavigatorAction::Close);
    state.dispatch(NavigatorAction::Close);
    assert!(!state.is_open());

    state.dispatch(NavigatorAction::Navigate(Direction::Next));
    assert!(!state.is_open());
}

proptest! {
    #[test]
    fn prop_next_then_previous_returns(start in 0usize..5, steps in 0usize..12) {
        let mut state = NavigatorState::new(sample_cards());
        state.open(start);

        for _ in 0..steps {
            state.navigate(Direction::Next);
        }
        for _ in 0..steps {
            state.navigate(Direction::Previous);
        }
        prop_assert_eq!(state.cursor(), Some(start));
    }

    #[test]
    fn prop_cursor_stays_in_visible_range(start in 0usize..5, moves in prop::collection::vec(any::<bool>(), 1..20)) {
        let mut state = NavigatorState::new(sample_cards());
        state.open(start);
        state.apply_filter("Kitchen");

        for forward in moves {
            state.navigate(if forward { Direction::Next } else { Direction::Previous });
            let cursor = state.cursor().unwrap();
            prop_assert!(cursor < state.visible_indices().len());
        }
    }
}

// ============================================================================
// Hero and slider
// ============================================================================

#[test]
fn test_hero_rotation_after_manual_selection() {
    let mut hero = HeroCarousel::new(vec![
        "hero/1.jpg".to_string(),
        "hero/2.jpg".to_string(),
        "hero/3.jpg".to_string(),
    ]);
    assert_eq!(hero.active_image(), Some("hero/1.jpg"));

    hero.select(2);
    hero.tick();
    assert_eq!(hero.active_image(), Some("hero/1.jpg"));

    hero.tick();
    assert_eq!(hero.active_index(), 1);
}

#[test]
fn test_slider_reveals_before_image() {
    assert_eq!(SliderPosition::parse("30").clip_path(), "inset(0 70% 0 0)");
    assert_eq!(SliderPosition::parse("").value(), 50);
    assert_eq!(SliderPosition::parse("250").clip_path(), "inset(0 0% 0 0)");
}
