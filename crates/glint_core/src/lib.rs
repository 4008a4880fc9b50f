//! Glint Core
//!
//! Foundational types for the Glint caret overlay:
//!
//! - **Geometry**: f64 pixel-space points, sizes, and rects
//! - **Settings**: the per-tick overlay settings snapshot
//! - **Draw Commands**: retained draw model emitted by the paint path
//! - **Host Contract**: the collaborator traits an editor host implements
//! - **Errors**: overlay error types
//!
//! The engine and adapter crates build on these; nothing here touches a
//! real drawing surface or timer.

pub mod draw;
pub mod error;
pub mod geometry;
pub mod host;
pub mod id;
pub mod settings;

pub use draw::{DrawCommand, DrawList};
pub use error::{OverlayError, Result};
pub use geometry::{Point, Rect, Size};
pub use host::{HostView, Scheduler, TickCallback, TimerId};
pub use id::{CaretId, ViewId};
pub use settings::{BlinkStyle, CaretStyle, OverlaySettings};
