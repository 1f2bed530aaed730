//! Curve model for the **wisp** editor: freehand capture of control points,
//! per-point kinetics, basis evaluation and draw-call encoding.
//!
//! Nothing here touches a GPU or a window. A renderer plugs in through
//! [`CurveSink`]; input arrives already converted to normalized device
//! coordinates.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`capture`] | `CaptureSession` pointer state machine |
//! | [`curve`] | `CurveKind`, `Curve`, `CurveSet`, `CurveView` |
//! | [`kinetics`] | `AnimationState`, boundary handling, Euler step |
//! | [`evaluator`] | vertex counting, span windowing, CPU evaluation |
//! | [`basis`] | B-spline, Cardinal and Bezier matrices |
//! | [`collector`] | `SceneCollector`, `CurveSink`, `CurveUniforms` |
//! | [`editor`] | `CurveEditor`, `EditorCommand` |
//!
//! # Quick start
//!
//! ```rust
//! use rand::SeedableRng;
//! use wisp_curves::{
//!     AnimationState, CurveEditor, CurveKind, Point2, RecordingSink, Visibility,
//! };
//!
//! let mut editor = CurveEditor::new(
//!     AnimationState::default(),
//!     Visibility::default(),
//!     CurveKind::Bezier,
//!     rand::rngs::StdRng::seed_from_u64(1),
//! );
//!
//! editor.pointer_down(Point2::new(-0.8, 0.0));
//! editor.pointer_move(Point2::new(-0.4, 0.5));
//! editor.pointer_move(Point2::new(0.0, -0.5));
//! assert!(editor.pointer_up(Point2::new(0.4, 0.0)));
//!
//! let mut sink = RecordingSink::default();
//! editor.tick(16.0, &mut sink);
//! assert_eq!(sink.uploads.len(), 1);
//! ```

pub mod basis;
pub mod capture;
pub mod collector;
pub mod color;
pub mod curve;
pub mod editor;
pub mod error;
pub mod evaluator;
pub mod kinetics;
pub mod point;

pub use capture::{CaptureSession, CaptureState, MoveOutcome};
pub use collector::{
    CurveSink, CurveUniforms, FrameStats, Primitive, RecordingSink, SceneCollector, Visibility,
};
pub use color::{ColorAssignment, Rgba};
pub use curve::{Curve, CurveKind, CurveSet, CurveView};
pub use editor::{CurveEditor, EditorCommand};
pub use error::ColorParseError;
pub use evaluator::MAX_CONTROL_POINTS;
pub use kinetics::{AnimationState, Boundary};
pub use point::Point2;
