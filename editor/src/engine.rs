//! Editor engine: the interaction controller tying scene, geometry, history
//! and camera together.
//!
//! [`EngineCore`] owns all editor state and logic and has no browser
//! dependency, so it is driven directly by the tests. [`Engine`] pairs it with
//! the `<canvas>` element it renders into.
//!
//! Every operation that changes the layout ends in exactly one history
//! snapshot. Pointer gestures mutate the scene tick by tick and snapshot only
//! on release; a rejected tick leaves the previous valid positions in place.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::autosave::AutoSave;
use crate::camera::{Camera, Point};
use crate::config::{ConfigError, EditorConfig};
use crate::consts::{COLLISION_FLASH_MS, DUPLICATE_OFFSET_STEPS, WHEEL_ZOOM_PIXELS, ZOOM_STEP};
use crate::geometry::{self, Alignment, Axis, Rect};
use crate::history::History;
use crate::hit::{self, Hit, ResizeAnchor};
use crate::host::{HostServices, LogHost, NoticeKind};
use crate::input::{Button, InputState, Key, Modifiers, TouchPoint, UiState, WheelDelta};
use crate::persist::{self, LayoutConfig, LoadReport, PartialLayoutConfig, PersistError};
use crate::render::{self, RenderView};
use crate::scene::{Scene, SceneState, Seating, SeatingAttrs, SeatingId, SeatingKind, SeatingPatch, StagePosition};

/// Copy offsets in grid steps, tried in order when the primary offset is taken.
const COPY_FALLBACK_STEPS: [(f64, f64); 5] = [(4.0, 0.0), (0.0, 4.0), (4.0, 4.0), (6.0, 6.0), (-2.0, -2.0)];

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The scene or overlay changed; redraw.
    RenderNeeded,
    /// CSS cursor to show over the canvas.
    SetCursor(String),
    /// The selection changed; carries the new selection in order.
    SelectionChanged(Vec<SeatingId>),
    /// A history snapshot was taken.
    Committed,
    /// The debounce elapsed; the host should persist this configuration.
    AutoSave(LayoutConfig),
}

/// Observable state before an event, compared afterwards to derive actions.
struct Mark {
    selection: Vec<SeatingId>,
    commits: u64,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
pub struct EngineCore {
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    scene: Scene,
    history: History,
    autosave: AutoSave,
    config: EditorConfig,
    clipboard: Vec<Seating>,
    /// Pastes since the last copy; each one lands one offset further away.
    paste_count: u32,
    clock_ms: f64,
    commits: u64,
    /// Set while undo/redo replaces the scene.
    restoring: bool,
    host: Box<dyn HostServices>,
}

impl EngineCore {
    /// Create an editor with an empty scene and the logging host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        Self::with_host(config, Box::new(LogHost))
    }

    /// Create an editor that confirms and notifies through `host`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn with_host(config: EditorConfig, host: Box<dyn HostServices>) -> Result<Self, ConfigError> {
        config.validate()?;
        let scene = Scene::new(config.width, config.height, config.grid_size, config.stage_position);
        let mut history = History::new(config.history_capacity);
        history.snapshot(scene.state());
        tracing::debug!(width = config.width, height = config.height, grid = config.grid_size, "editor created");
        Ok(Self {
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            scene,
            history,
            autosave: AutoSave::new(config.autosave_debounce_ms),
            config,
            clipboard: Vec::new(),
            paste_count: 0,
            clock_ms: 0.0,
            commits: 0,
            restoring: false,
            host,
        })
    }

    // --- Queries ---

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn seating(&self, id: &SeatingId) -> Option<&Seating> {
        self.scene.get(id)
    }

    #[must_use]
    pub fn selection(&self) -> &[SeatingId] {
        &self.ui.selection
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether there are changes the host has not saved yet.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.autosave.is_dirty()
    }

    #[must_use]
    pub fn collision_flash_active(&self) -> bool {
        self.ui.collision_until_ms.is_some_and(|until| self.clock_ms < until)
    }

    #[must_use]
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            scene: &self.scene,
            ui: &self.ui,
            camera: &self.camera,
            collision: self.collision_flash_active(),
        }
    }

    // --- Seatings ---

    /// Add a seating near `(x, y)`. Returns `None` if no free spot was found.
    pub fn add_seating(&mut self, kind: SeatingKind, x: f64, y: f64, attrs: &SeatingAttrs) -> Option<SeatingId> {
        let Some(id) = self.scene.add_object(kind, x, y, attrs) else {
            self.host.notify("Could not place the new seating here", NoticeKind::Warning);
            return None;
        };
        self.commit();
        Some(id)
    }

    pub fn remove_seating(&mut self, id: &SeatingId) -> bool {
        if self.scene.remove_object(id).is_none() {
            return false;
        }
        self.ui.selection.retain(|s| s != id);
        self.commit();
        true
    }

    /// Apply `patch` if the result is in bounds, non-overlapping and well formed.
    pub fn update_seating(&mut self, id: &SeatingId, patch: &SeatingPatch) -> bool {
        let Some(current) = self.scene.get(id) else {
            return false;
        };
        let rect = Rect::new(
            patch.x.unwrap_or(current.x),
            patch.y.unwrap_or(current.y),
            patch.width.unwrap_or(current.width),
            patch.height.unwrap_or(current.height),
        );
        let sized = rect.width.is_finite() && rect.width > 0.0 && rect.height.is_finite() && rect.height > 0.0;
        if !sized
            || patch.capacity == Some(0)
            || !self.scene.bounds().contains(&rect)
            || geometry::has_collision(&rect, *id, self.scene.seatings())
        {
            tracing::warn!(%id, "rejected seating update");
            return false;
        }
        self.scene.update_object(id, patch);
        self.commit();
        true
    }

    // --- Selection ---

    /// Select `id`, replacing the selection or toggling it in when `extend` is set.
    pub fn select(&mut self, id: SeatingId, extend: bool) -> bool {
        if !self.scene.contains(&id) {
            return false;
        }
        if extend {
            self.ui.toggle(id);
        } else {
            self.ui.selection = vec![id];
        }
        true
    }

    pub fn select_all(&mut self) {
        self.ui.selection = self.scene.seatings().iter().map(|s| s.id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.ui.selection.clear();
    }

    /// Remove every selected seating. Returns how many were removed.
    pub fn delete_selection(&mut self) -> usize {
        let mut removed = 0;
        for id in std::mem::take(&mut self.ui.selection) {
            if self.scene.remove_object(&id).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.commit();
        }
        removed
    }

    // --- Clipboard ---

    pub fn copy_selection(&mut self) -> usize {
        self.clipboard = self.selected_seatings();
        self.paste_count = 0;
        self.clipboard.len()
    }

    pub fn cut_selection(&mut self) -> usize {
        let copied = self.copy_selection();
        if copied > 0 {
            self.delete_selection();
        }
        copied
    }

    /// Paste the clipboard; the new seatings become the selection.
    pub fn paste(&mut self) -> Vec<SeatingId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        self.paste_count += 1;
        let sources = self.clipboard.clone();
        self.place_copies(&sources, DUPLICATE_OFFSET_STEPS * f64::from(self.paste_count))
    }

    /// Copy the selection in place; the copies become the selection.
    pub fn duplicate_selection(&mut self) -> Vec<SeatingId> {
        let sources = self.selected_seatings();
        self.place_copies(&sources, DUPLICATE_OFFSET_STEPS)
    }

    fn place_copies(&mut self, sources: &[Seating], steps: f64) -> Vec<SeatingId> {
        let grid = self.scene.bounds().grid_size;
        let mut placed = Vec::new();
        let mut skipped = 0usize;
        for source in sources {
            let scene = &mut self.scene;
            let id = std::iter::once((steps, steps))
                .chain(COPY_FALLBACK_STEPS)
                .find_map(|(sx, sy)| {
                    let copy = Seating {
                        id: Uuid::new_v4(),
                        x: source.x + sx * grid,
                        y: source.y + sy * grid,
                        name: scene.next_name(source.kind),
                        reserved: false,
                        ..source.clone()
                    };
                    scene.try_insert(copy)
                });
            match id {
                Some(id) => placed.push(id),
                None => {
                    tracing::warn!(source = %source.id, "no free position for copy");
                    skipped += 1;
                }
            }
        }
        if !placed.is_empty() {
            self.ui.selection.clone_from(&placed);
            self.commit();
        }
        if skipped > 0 {
            self.host
                .notify(&format!("{skipped} item(s) could not be placed"), NoticeKind::Warning);
        }
        placed
    }

    // --- Layout operations ---

    /// Move the selection by `(dx, dy)`, clamped to the canvas.
    ///
    /// A move that would overlap another seating is rejected and flashes the
    /// collision indicator.
    pub fn nudge(&mut self, dx: f64, dy: f64) -> bool {
        let origins = self.selection_origins();
        if origins.is_empty() {
            return false;
        }
        let (dx, dy) = self.clamp_group_delta(&origins, dx, dy);
        if dx.abs() + dy.abs() < f64::EPSILON {
            return false;
        }
        let moves = offset_moves(&origins, dx, dy);
        if !self.placement_is_valid(&moves) {
            tracing::debug!(dx, dy, "nudge blocked by collision");
            self.flash_collision();
            return false;
        }
        self.apply_moves(&moves);
        self.commit();
        true
    }

    /// Align the selected seatings (two or more).
    pub fn align_selection(&mut self, alignment: Alignment) -> bool {
        let selected = self.selected_seatings();
        if selected.len() < 2 {
            return false;
        }
        let rects: Vec<Rect> = selected.iter().map(Seating::rect).collect();
        let positions = geometry::align(&rects, alignment);
        self.apply_layout_change(&selected, &positions, "align")
    }

    /// Spread the selected seatings (three or more) evenly along `axis`.
    pub fn distribute_selection(&mut self, axis: Axis) -> bool {
        let selected = self.selected_seatings();
        let rects: Vec<Rect> = selected.iter().map(Seating::rect).collect();
        let Some(positions) = geometry::distribute(&rects, axis) else {
            return false;
        };
        self.apply_layout_change(&selected, &positions, "distribute")
    }

    /// Lay every seating out on the arrangement grid. Returns how many moved.
    pub fn auto_arrange(&mut self) -> usize {
        let moves: Vec<(SeatingId, f64, f64)> = geometry::auto_arrange(self.scene.seatings(), self.scene.bounds())
            .into_iter()
            .filter(|(id, x, y)| self.scene.get(id).is_some_and(|s| position_differs(s, *x, *y)))
            .collect();
        if moves.is_empty() {
            return 0;
        }
        self.apply_moves(&moves);
        self.commit();
        tracing::info!(moved = moves.len(), "auto-arranged layout");
        moves.len()
    }

    /// Remove every seating after the host confirms.
    pub fn clear_all(&mut self) -> bool {
        if self.scene.is_empty() || !self.host.confirm("Remove every seating from the layout?") {
            return false;
        }
        self.scene.clear();
        self.ui.selection.clear();
        self.commit();
        true
    }

    pub fn set_stage_position(&mut self, position: StagePosition) -> bool {
        if self.scene.stage_position() == position {
            return false;
        }
        self.scene.set_stage_position(position);
        self.commit();
        true
    }

    /// Change the canvas size and grid pitch.
    ///
    /// Seatings are pulled inside the new canvas. Returns `Ok(false)` and
    /// leaves the scene untouched if that would make any of them overlap or
    /// not fit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-positive size or grid.
    pub fn resize_canvas(&mut self, width: f64, height: f64, grid_size: f64) -> Result<bool, ConfigError> {
        EditorConfig { width, height, grid_size, ..self.config.clone() }.validate()?;

        let before = self.scene.state().clone();
        self.scene.set_canvas_geometry(width, height, grid_size);
        let bounds = self.scene.bounds();
        let seatings = self.scene.seatings();
        let broken = seatings
            .iter()
            .any(|s| !bounds.contains(&s.rect()) || geometry::has_collision(&s.rect(), s.id, seatings));
        if broken {
            tracing::warn!(width, height, "canvas too small for the current layout");
            self.scene.replace_state(before);
            return Ok(false);
        }
        self.sync_canvas_config();
        self.commit();
        Ok(true)
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        let Some(state) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(state);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(state) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(state);
        true
    }

    fn restore(&mut self, state: SceneState) {
        self.restoring = true;
        self.input = InputState::Idle;
        self.scene.replace_state(state);
        self.sync_canvas_config();
        let scene = &self.scene;
        self.ui.selection.retain(|id| scene.contains(id));
        self.ui.marquee = None;
        self.ui.guides.clear();
        self.autosave.mark_dirty(self.clock_ms);
        self.restoring = false;
    }

    /// Keep the canvas fields of `config` in step with the scene after it is replaced.
    fn sync_canvas_config(&mut self) {
        let bounds = self.scene.bounds();
        self.config.width = bounds.width;
        self.config.height = bounds.height;
        self.config.grid_size = bounds.grid_size;
    }

    fn commit(&mut self) {
        if self.restoring {
            tracing::debug!("commit ignored while restoring");
            return;
        }
        self.history.snapshot(self.scene.state());
        self.autosave.mark_dirty(self.clock_ms);
        self.commits += 1;
    }

    // --- Persistence ---

    #[must_use]
    pub fn get_configuration(&self) -> LayoutConfig {
        persist::to_configuration(&self.scene)
    }

    /// Replace the scene from a saved configuration and restart history.
    pub fn load_configuration(&mut self, cfg: &PartialLayoutConfig) -> LoadReport {
        let report = persist::apply_configuration(&mut self.scene, cfg);
        self.sync_canvas_config();
        self.input = InputState::Idle;
        self.ui = UiState::default();
        self.history.reset(self.scene.state());
        self.autosave.mark_saved();
        tracing::info!(loaded = report.loaded, skipped = report.skipped, "configuration loaded");
        report
    }

    /// Parse and load a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the document is not valid JSON.
    pub fn load_json(&mut self, raw: &str) -> Result<LoadReport, PersistError> {
        let cfg = persist::from_json(raw)?;
        Ok(self.load_configuration(&cfg))
    }

    /// The host saved the current configuration.
    pub fn mark_saved(&mut self) {
        self.autosave.mark_saved();
    }

    // --- Camera ---

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    pub fn zoom_reset(&mut self) {
        self.camera.reset();
    }

    // --- Clock ---

    /// Advance the clock. Expires the collision flash and fires auto-save.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        let mut actions = Vec::new();
        if self.ui.collision_until_ms.is_some_and(|until| now_ms >= until) {
            self.ui.collision_until_ms = None;
            actions.push(Action::RenderNeeded);
        }
        if self.autosave.poll(now_ms) {
            tracing::debug!(now_ms, "auto-save due");
            actions.push(Action::AutoSave(self.get_configuration()));
        }
        actions
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        match button {
            Button::Primary => self.primary_down(screen_pt, modifiers),
            Button::Middle => {
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::SetCursor("grabbing".to_owned())]
            }
            Button::Secondary => Vec::new(),
        }
    }

    fn primary_down(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let mark = self.mark();
        let world = self.camera.screen_to_world(screen_pt);
        match hit::hit_test(world, &self.scene, &self.ui, &self.camera) {
            Some(Hit::Handle { id, anchor }) => {
                let Some(orig) = self.scene.get(&id).map(Seating::rect) else {
                    return Vec::new();
                };
                self.input = InputState::ResizingSeating { id, anchor, start_world: world, orig };
                return vec![Action::SetCursor(anchor.cursor().to_owned())];
            }
            Some(Hit::Stage) => {
                let stage = self.scene.stage();
                self.input = InputState::DraggingStage {
                    grab_dx: world.x - stage.x,
                    grab_dy: world.y - stage.y,
                    orig_position: self.scene.stage_position(),
                };
                return vec![Action::SetCursor("move".to_owned())];
            }
            Some(Hit::Seating(id)) if modifiers.extends_selection() => self.ui.toggle(id),
            Some(Hit::Seating(id)) => {
                if !self.ui.is_selected(&id) {
                    self.ui.selection = vec![id];
                }
                self.input = InputState::DraggingSelection {
                    primary: id,
                    start_world: world,
                    origins: self.selection_origins(),
                };
            }
            None if modifiers.extends_selection() => {
                self.input = InputState::LassoSelecting { anchor_world: world };
                self.ui.marquee = Some(Rect::new(world.x, world.y, 0.0, 0.0));
            }
            None => self.ui.selection.clear(),
        }
        self.actions_since(&mark, true)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        match std::mem::take(&mut self.input) {
            InputState::Idle => vec![Action::SetCursor(self.hover_cursor(world).to_owned())],
            InputState::Panning { last_screen } => {
                self.camera.pan_x += screen_pt.x - last_screen.x;
                self.camera.pan_y += screen_pt.y - last_screen.y;
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            state @ InputState::Pinching { .. } => {
                self.input = state;
                Vec::new()
            }
            InputState::DraggingSelection { primary, start_world, origins } => {
                self.drag_tick(primary, start_world, &origins, world);
                self.input = InputState::DraggingSelection { primary, start_world, origins };
                vec![Action::RenderNeeded]
            }
            InputState::ResizingSeating { id, anchor, start_world, orig } => {
                self.resize_tick(id, anchor, start_world, orig, world);
                self.input = InputState::ResizingSeating { id, anchor, start_world, orig };
                vec![Action::RenderNeeded]
            }
            InputState::LassoSelecting { anchor_world } => {
                let mark = self.mark();
                let lasso = Rect::from_corners(anchor_world.x, anchor_world.y, world.x, world.y);
                self.ui.marquee = Some(lasso);
                self.ui.selection = hit::lasso_hits(&lasso, self.scene.seatings());
                self.input = InputState::LassoSelecting { anchor_world };
                self.actions_since(&mark, true)
            }
            InputState::DraggingStage { grab_dx, grab_dy, orig_position } => {
                self.scene.move_stage(world.x - grab_dx, world.y - grab_dy);
                self.input = InputState::DraggingStage { grab_dx, grab_dy, orig_position };
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Apply the final pointer position, then end the gesture.
    pub fn on_pointer_up(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        self.on_pointer_move(screen_pt, modifiers);
        self.finish_gesture()
    }

    /// End the gesture where it stands, exactly like a release.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            let factor = ZOOM_STEP.powf(-delta.dy / WHEEL_ZOOM_PIXELS);
            self.camera.zoom_about(screen_pt, self.camera.zoom * factor);
        } else {
            self.camera.pan_x -= delta.dx;
            self.camera.pan_y -= delta.dy;
        }
        vec![Action::RenderNeeded]
    }

    // --- Touch input ---

    /// `touches` lists every contact currently on the surface.
    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) -> Vec<Action> {
        match touches {
            [] => Vec::new(),
            [one] => self.on_pointer_down(one.point, Button::Primary, Modifiers::default()),
            [a, b, ..] => {
                let mut actions = self.finish_gesture();
                self.input = InputState::Pinching {
                    start_distance: a.point.distance(b.point),
                    start_zoom: self.camera.zoom,
                    last_mid: a.point.midpoint(b.point),
                };
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) -> Vec<Action> {
        let pinch = match self.input {
            InputState::Pinching { start_distance, start_zoom, last_mid } => Some((start_distance, start_zoom, last_mid)),
            _ => None,
        };
        match (pinch, touches) {
            (Some((start_distance, start_zoom, last_mid)), [a, b, ..]) => {
                let mid = a.point.midpoint(b.point);
                if start_distance > 0.0 {
                    self.camera
                        .zoom_about(mid, start_zoom * a.point.distance(b.point) / start_distance);
                }
                self.camera.pan_x += mid.x - last_mid.x;
                self.camera.pan_y += mid.y - last_mid.y;
                self.input = InputState::Pinching { start_distance, start_zoom, last_mid: mid };
                vec![Action::RenderNeeded]
            }
            (None, [one]) => self.on_pointer_move(one.point, Modifiers::default()),
            _ => Vec::new(),
        }
    }

    /// `remaining` lists the contacts still on the surface.
    pub fn on_touch_end(&mut self, remaining: &[TouchPoint]) -> Vec<Action> {
        if matches!(self.input, InputState::Pinching { .. }) {
            if remaining.len() < 2 {
                self.input = InputState::Idle;
            }
            return Vec::new();
        }
        if remaining.is_empty() {
            self.finish_gesture()
        } else {
            Vec::new()
        }
    }

    pub fn on_touch_cancel(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    // --- Keyboard input ---

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let mark = self.mark();
        let name = key.normalized();
        let handled = if modifiers.command() {
            match name.as_str() {
                "z" if modifiers.shift => self.redo(),
                "z" => self.undo(),
                "y" => self.redo(),
                "c" => self.copy_selection() > 0,
                "v" => !self.paste().is_empty(),
                "x" => self.cut_selection() > 0,
                "d" => !self.duplicate_selection().is_empty(),
                "a" => {
                    self.select_all();
                    true
                }
                "=" | "+" => {
                    self.zoom_in();
                    true
                }
                "-" => {
                    self.zoom_out();
                    true
                }
                "0" => {
                    self.zoom_reset();
                    true
                }
                _ => false,
            }
        } else {
            let step = if modifiers.grid_step() { self.scene.bounds().grid_size } else { 1.0 };
            match name.as_str() {
                "ArrowUp" => self.nudge(0.0, -step) || self.collision_flash_active(),
                "ArrowDown" => self.nudge(0.0, step) || self.collision_flash_active(),
                "ArrowLeft" => self.nudge(-step, 0.0) || self.collision_flash_active(),
                "ArrowRight" => self.nudge(step, 0.0) || self.collision_flash_active(),
                "Delete" | "Backspace" => self.delete_selection() > 0,
                "Escape" => {
                    self.clear_selection();
                    true
                }
                _ => false,
            }
        };
        self.actions_since(&mark, handled)
    }

    // --- Gestures ---

    fn drag_tick(&mut self, primary: SeatingId, start_world: Point, origins: &[(SeatingId, f64, f64)], world: Point) {
        let Some(&(_, px, py)) = origins.iter().find(|(id, _, _)| *id == primary) else {
            return;
        };
        let Some(rect) = self.scene.get(&primary).map(Seating::rect) else {
            return;
        };
        let grid = self.scene.bounds().grid_size;
        let mut tx = geometry::snap_to_grid(px + world.x - start_world.x, grid);
        let mut ty = geometry::snap_to_grid(py + world.y - start_world.y, grid);

        self.ui.guides.clear();
        if origins.len() == 1 {
            let snap = geometry::alignment_snap(&rect.at(tx, ty), primary, self.scene.seatings(), self.config.snap_tolerance);
            tx = snap.x.unwrap_or(tx);
            ty = snap.y.unwrap_or(ty);
            self.ui.guides = snap.guides;
        }

        let (dx, dy) = self.clamp_group_delta(origins, tx - px, ty - py);
        let moves = offset_moves(origins, dx, dy);
        if self.placement_is_valid(&moves) {
            self.apply_moves(&moves);
        } else {
            self.ui.guides.clear();
            self.flash_collision();
        }
    }

    fn resize_tick(&mut self, id: SeatingId, anchor: ResizeAnchor, start_world: Point, orig: Rect, world: Point) {
        let dx = world.x - start_world.x;
        let dy = world.y - start_world.y;
        let min = self.config.min_size;
        let bounds = self.scene.bounds();

        let (mut left, mut right) = (orig.x, orig.right());
        let (mut top, mut bottom) = (orig.y, orig.bottom());
        if anchor.moves_left() {
            left = (orig.x + dx).min(right - min).max(0.0);
        }
        if anchor.moves_right() {
            right = (orig.right() + dx).max(left + min).min(bounds.width);
        }
        if anchor.moves_top() {
            top = (orig.y + dy).min(bottom - min).max(0.0);
        }
        if anchor.moves_bottom() {
            bottom = (orig.bottom() + dy).max(top + min).min(bounds.height);
        }
        self.scene
            .update_object(&id, &rect_patch(Rect::new(left, top, right - left, bottom - top)));
    }

    fn finish_gesture(&mut self) -> Vec<Action> {
        let mark = self.mark();
        match std::mem::take(&mut self.input) {
            InputState::Idle => return Vec::new(),
            InputState::Panning { .. } | InputState::Pinching { .. } => {}
            InputState::DraggingSelection { origins, .. } => {
                self.ui.guides.clear();
                let moved = origins
                    .iter()
                    .any(|(id, x, y)| self.scene.get(id).is_some_and(|s| position_differs(s, *x, *y)));
                if moved {
                    self.commit();
                }
            }
            InputState::ResizingSeating { id, orig, .. } => self.finish_resize(id, orig),
            InputState::LassoSelecting { .. } => self.ui.marquee = None,
            InputState::DraggingStage { orig_position, .. } => {
                let position = self.scene.stage_position();
                self.scene.set_stage_position(position);
                if position != orig_position {
                    self.commit();
                }
            }
        }
        let mut actions = self.actions_since(&mark, true);
        actions.push(Action::SetCursor("default".to_owned()));
        actions
    }

    fn finish_resize(&mut self, id: SeatingId, orig: Rect) {
        let Some(rect) = self.scene.get(&id).map(Seating::rect) else {
            return;
        };
        if rect == orig {
            return;
        }
        if geometry::has_collision(&rect, id, self.scene.seatings()) {
            tracing::debug!(%id, "resize ends overlapping; reverted");
            self.scene.update_object(&id, &rect_patch(orig));
            self.flash_collision();
        } else {
            self.commit();
        }
    }

    // --- Helpers ---

    fn hover_cursor(&self, world: Point) -> &'static str {
        match hit::hit_test(world, &self.scene, &self.ui, &self.camera) {
            Some(Hit::Handle { anchor, .. }) => anchor.cursor(),
            Some(Hit::Stage | Hit::Seating(_)) => "move",
            None => "default",
        }
    }

    fn selected_seatings(&self) -> Vec<Seating> {
        self.ui
            .selection
            .iter()
            .filter_map(|id| self.scene.get(id))
            .cloned()
            .collect()
    }

    fn selection_origins(&self) -> Vec<(SeatingId, f64, f64)> {
        self.ui
            .selection
            .iter()
            .filter_map(|id| self.scene.get(id))
            .map(|s| (s.id, s.x, s.y))
            .collect()
    }

    /// Shrink `(dx, dy)` so every seating in `origins` stays on the canvas.
    fn clamp_group_delta(&self, origins: &[(SeatingId, f64, f64)], dx: f64, dy: f64) -> (f64, f64) {
        let bounds = self.scene.bounds();
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_right, mut max_bottom) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (id, x, y) in origins {
            if let Some(s) = self.scene.get(id) {
                min_x = min_x.min(*x);
                min_y = min_y.min(*y);
                max_right = max_right.max(x + s.width);
                max_bottom = max_bottom.max(y + s.height);
            }
        }
        if !min_x.is_finite() {
            return (0.0, 0.0);
        }
        (
            dx.max(-min_x).min(bounds.width - max_right),
            dy.max(-min_y).min(bounds.height - max_bottom),
        )
    }

    /// Whether applying `moves` keeps every moved seating in bounds and free.
    fn placement_is_valid(&self, moves: &[(SeatingId, f64, f64)]) -> bool {
        let bounds = self.scene.bounds();
        let mut working = self.scene.seatings().to_vec();
        for (id, x, y) in moves {
            if let Some(s) = working.iter_mut().find(|s| s.id == *id) {
                s.x = *x;
                s.y = *y;
            }
        }
        moves.iter().all(|(id, _, _)| {
            working.iter().find(|s| s.id == *id).is_some_and(|s| {
                let rect = s.rect();
                bounds.contains(&rect) && !geometry::has_collision(&rect, *id, &working)
            })
        })
    }

    fn apply_moves(&mut self, moves: &[(SeatingId, f64, f64)]) {
        for (id, x, y) in moves {
            self.scene.set_position(id, *x, *y);
        }
    }

    /// Validate and apply positions computed by align/distribute.
    fn apply_layout_change(&mut self, seatings: &[Seating], positions: &[(f64, f64)], op: &'static str) -> bool {
        let moves: Vec<(SeatingId, f64, f64)> = seatings
            .iter()
            .zip(positions)
            .map(|(s, &(x, y))| (s.id, x, y))
            .collect();
        if !seatings.iter().zip(positions).any(|(s, &(x, y))| position_differs(s, x, y)) {
            return false;
        }
        if !self.placement_is_valid(&moves) {
            tracing::warn!(op, "result would overlap or leave the canvas; rejected");
            self.flash_collision();
            return false;
        }
        self.apply_moves(&moves);
        self.commit();
        true
    }

    fn flash_collision(&mut self) {
        self.ui.collision_until_ms = Some(self.clock_ms + COLLISION_FLASH_MS);
    }

    fn mark(&self) -> Mark {
        Mark { selection: self.ui.selection.clone(), commits: self.commits }
    }

    fn actions_since(&self, mark: &Mark, render: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.selection != mark.selection {
            actions.push(Action::SelectionChanged(self.ui.selection.clone()));
        }
        if self.commits != mark.commits {
            actions.push(Action::Committed);
        }
        if render || !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}

fn offset_moves(origins: &[(SeatingId, f64, f64)], dx: f64, dy: f64) -> Vec<(SeatingId, f64, f64)> {
    origins.iter().map(|(id, x, y)| (*id, x + dx, y + dy)).collect()
}

fn position_differs(s: &Seating, x: f64, y: f64) -> bool {
    (s.x - x).abs() > f64::EPSILON || (s.y - y).abs() > f64::EPSILON
}

fn rect_patch(rect: Rect) -> SeatingPatch {
    SeatingPatch {
        x: Some(rect.x),
        y: Some(rect.y),
        width: Some(rect.width),
        height: Some(rect.height),
        ..Default::default()
    }
}

/// The browser-facing editor. Wraps `EngineCore` and owns the canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create an editor bound to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(canvas: HtmlCanvasElement, config: EditorConfig) -> Result<Self, ConfigError> {
        Ok(Self { canvas, core: EngineCore::new(config)? })
    }

    /// Create an editor bound to `canvas` that talks to the page through `host`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn with_host(
        canvas: HtmlCanvasElement,
        config: EditorConfig,
        host: Box<dyn HostServices>,
    ) -> Result<Self, ConfigError> {
        Ok(Self { canvas, core: EngineCore::with_host(config, host)? })
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, modifiers)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.core.on_pointer_cancel()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) -> Vec<Action> {
        self.core.on_touch_start(touches)
    }

    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) -> Vec<Action> {
        self.core.on_touch_move(touches)
    }

    pub fn on_touch_end(&mut self, remaining: &[TouchPoint]) -> Vec<Action> {
        self.core.on_touch_end(remaining)
    }

    pub fn on_touch_cancel(&mut self) -> Vec<Action> {
        self.core.on_touch_cancel()
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.core.tick(now_ms)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core.render_view())
    }
}
