//! Vizij Curves Core (engine-agnostic)
//!
//! Editing model for 2D keyframe curves: data types, segment evaluation and
//! path geometry, the graph/screen view transform, the pointer-driven
//! interaction controller with bounded undo/redo, and the compact, expanded and
//! share-token serialization formats. Rendering and DOM event capture are left
//! to the host (see `vizij-curves-wasm`).

pub mod codec;
pub mod config;
pub mod data;
pub mod error;
pub mod gesture;
pub mod history;
pub mod hit;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod outputs;
pub mod path;
pub mod persistence;
pub mod sampling;
pub mod selection;
pub mod session;
pub mod viewport;

// Re-exports for consumers (adapters)
pub use codec::{decode_any, decode_any_str, PayloadKind};
pub use config::EditorConfig;
pub use data::{Curve, CurveSet, HandleSide, Point, TangentMode, Vec2};
pub use error::{CodecError, SessionError};
pub use gesture::GesturePhase;
pub use history::History;
pub use hit::hit_test;
pub use ids::{CurveId, PointId, PointRef};
pub use inputs::{Modifiers, PointerButton, PointerTarget};
pub use interp::{evaluate_cubic, invert_cubic_time};
pub use outputs::SessionEvent;
pub use path::{path_segments, screen_path, PathCommand};
pub use persistence::TokenPublisher;
pub use sampling::{value_at, value_preview};
pub use selection::{points_in_screen_rect, Selection};
pub use session::EditorSession;
pub use viewport::{Axis, Bounds, ViewState, MIN_FIT_SPAN};
