use uuid::Uuid;

use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
    assert!(!m.command());
}

#[test]
fn ctrl_or_meta_is_command() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.command());
    assert!(Modifiers { meta: true, ..Default::default() }.command());
    assert!(!Modifiers { alt: true, ..Default::default() }.command());
}

#[test]
fn shift_extends_selection_and_steps_by_grid() {
    let m = Modifiers { shift: true, ..Default::default() };
    assert!(m.extends_selection());
    assert!(m.grid_step());
}

// =============================================================
// Key
// =============================================================

#[test]
fn single_characters_normalize_to_lowercase() {
    assert_eq!(Key::new("Z").normalized(), "z");
    assert_eq!(Key::new("+").normalized(), "+");
}

#[test]
fn named_keys_are_unchanged() {
    assert_eq!(Key::new("ArrowUp").normalized(), "ArrowUp");
    assert_eq!(Key::new("Delete").normalized(), "Delete");
}

// =============================================================
// UiState
// =============================================================

#[test]
fn single_selection_only_for_exactly_one() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut ui = UiState::default();
    assert_eq!(ui.single_selection(), None);
    ui.selection.push(a);
    assert_eq!(ui.single_selection(), Some(a));
    ui.selection.push(b);
    assert_eq!(ui.single_selection(), None);
}

#[test]
fn toggle_adds_then_removes() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut ui = UiState::default();
    ui.toggle(a);
    ui.toggle(b);
    assert_eq!(ui.selection, vec![a, b]);
    ui.toggle(a);
    assert_eq!(ui.selection, vec![b]);
    assert!(!ui.is_selected(&a));
    assert!(ui.is_selected(&b));
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(InputState::default().is_idle());
}

#[test]
fn active_gestures_are_not_idle() {
    let gestures = [
        InputState::Panning { last_screen: Point::new(0.0, 0.0) },
        InputState::LassoSelecting { anchor_world: Point::new(1.0, 2.0) },
        InputState::DraggingStage { grab_dx: 0.0, grab_dy: 0.0, orig_position: StagePosition::Top },
    ];
    for g in gestures {
        assert!(!g.is_idle(), "{g:?}");
    }
}
