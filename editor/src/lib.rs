//! Seating layout editor for the booking site's venue planner.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! layout canvas: a scene of tables, seats and VIP boxes around a stage marker,
//! edited with pointer, touch and keyboard input. Every edit keeps seatings
//! inside the canvas and free of overlaps, lands in a bounded undo history, and
//! is exported as a plain JSON configuration the host page saves. The host is
//! responsible only for wiring DOM events to the engine, driving the clock,
//! and acting on the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Seating and stage types and the in-memory store |
//! | [`geometry`] | Collision, snapping, alignment and arrangement math |
//! | [`history`] | Bounded undo/redo snapshot stack |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against seatings, the stage and resize handles |
//! | [`render`] | Scene rendering through a drawing surface |
//! | [`persist`] | Configuration export and tolerant import |
//! | [`config`] | Editor options and their defaults |
//! | [`autosave`] | Debounce for host-side saving |
//! | [`host`] | Confirmation and notification hooks into the page |
//! | [`registry`] | Several editors on one page with keyboard focus routing |
//! | [`report`] | Capacity summary and validation of saved layouts |
//! | [`consts`] | Shared numeric constants (canvas defaults, zoom limits, etc.) |

pub mod autosave;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod hit;
pub mod host;
pub mod input;
pub mod persist;
pub mod registry;
pub mod render;
pub mod report;
pub mod scene;
