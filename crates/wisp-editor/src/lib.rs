//! Wisp editor: the interactive curve editor on top of `wisp-engine`.
//!
//! Pointer drags and clicks capture control points, keys drive the editor
//! commands, and every redraw runs one animation tick whose draw calls are
//! recorded into an engine draw list and rendered by the curve renderer.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use wisp_editor::{Application, EditorConfig};
//! use wisp_engine::logging::LoggingConfig;
//!
//! Application::new()
//!     .title("wisp")
//!     .logging(LoggingConfig::default())
//!     .config(EditorConfig::default())
//!     .run()?;
//! ```

mod app;
pub mod bindings;
pub mod config;
pub mod dispatch;
pub mod sink;

pub use app::Application;
pub use bindings::KeyBindings;
pub use config::EditorConfig;
pub use dispatch::{Dispatched, dispatch_events};
pub use sink::DrawListSink;
