use anyhow::{Context, Result};
use rand::rngs::StdRng;
use winit::dpi::LogicalSize;

use wisp_curves::{CurveEditor, CurveKind};
use wisp_engine::coords::ColorRgba;
use wisp_engine::core::{App as EngineApp, AppControl, FrameCtx};
use wisp_engine::device::GpuInit;
use wisp_engine::logging::{LoggingConfig, init_logging};
use wisp_engine::render::CurveRenderer;
use wisp_engine::scene::DrawList;
use wisp_engine::window::{Runtime, RuntimeConfig};

use crate::bindings::KeyBindings;
use crate::config::EditorConfig;
use crate::dispatch::dispatch_events;
use crate::sink::DrawListSink;

// ── Application ───────────────────────────────────────────────────────────

/// Top-level editor application builder.
///
/// ```rust,ignore
/// Application::new()
///     .title("wisp")
///     .size(1024.0, 768.0)
///     .config(EditorConfig { curve_kind: CurveKind::Bezier, ..Default::default() })
///     .run()?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    config: EditorConfig,
    bindings: KeyBindings,
    logging: Option<LoggingConfig>,
    gpu: GpuInit,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "wisp".to_string(),
            width: 1024.0,
            height: 768.0,
            config: EditorConfig::default(),
            bindings: KeyBindings::default(),
            logging: None,
            gpu: GpuInit::default(),
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Initializes logging before the window opens. Without this the host is
    /// expected to have installed a logger.
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    pub fn gpu(mut self, gpu: GpuInit) -> Self {
        self.gpu = gpu;
        self
    }

    /// Opens the editor window and blocks until it is closed.
    pub fn run(self) -> Result<()> {
        if let Some(logging) = self.logging {
            init_logging(logging);
        }

        let editor = self
            .config
            .build_editor()
            .context("invalid editor configuration")?;

        let speed = editor.animation().basis_velocity;
        log::info!(
            "starting editor: {} curves, {} segments per span, speed ({:.3}, {:.3})",
            editor.kind(),
            editor.animation().segments_per_span,
            speed.x,
            speed.y
        );

        let runtime = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };
        let state = EditorApp::new(self.title, editor, self.bindings);

        Runtime::run(runtime, self.gpu, state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── EditorApp ─────────────────────────────────────────────────────────────

/// Implements `wisp_engine::core::App`: one editor tick per redraw.
struct EditorApp {
    base_title: String,
    shown_status: Option<(CurveKind, u32)>,

    editor: CurveEditor<StdRng>,
    bindings: KeyBindings,

    draw_list: DrawList,
    renderer: CurveRenderer,
}

impl EditorApp {
    fn new(base_title: String, editor: CurveEditor<StdRng>, bindings: KeyBindings) -> Self {
        Self {
            base_title,
            shown_status: None,
            editor,
            bindings,
            draw_list: DrawList::new(),
            renderer: CurveRenderer::new(),
        }
    }

    /// Title suffix with the selected kind and density; pushed only on change.
    fn status_title(&mut self) -> Option<String> {
        let status = (self.editor.kind(), self.editor.animation().segments_per_span);
        if self.shown_status == Some(status) {
            return None;
        }
        self.shown_status = Some(status);
        Some(format!("{} · {} · {} segments", self.base_title, status.0, status.1))
    }
}

impl EngineApp for EditorApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();

        // ── Input ─────────────────────────────────────────────────────────
        dispatch_events(&mut self.editor, &self.bindings, &ctx.input_frame.events, viewport);

        if let Some(title) = self.status_title() {
            ctx.runtime.set_title(title);
        }

        // ── Tick ──────────────────────────────────────────────────────────
        self.draw_list.clear();
        let stats = self
            .editor
            .tick(ctx.time.dt_ms(), &mut DrawListSink::new(&mut self.draw_list));
        if stats.suppressed > 0 {
            log::trace!("{} curves without a drawable span", stats.suppressed);
        }

        // ── Render ────────────────────────────────────────────────────────
        let renderer = &mut self.renderer;
        let draw_list = &self.draw_list;

        ctx.render(ColorRgba::black(), |rctx, target| {
            renderer.render(rctx, target, draw_list);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> EditorApp {
        let config = EditorConfig { rng_seed: Some(5), ..EditorConfig::default() };
        EditorApp::new("wisp".into(), config.build_editor().unwrap(), KeyBindings::default())
    }

    #[test]
    fn status_title_only_on_change() {
        let mut app = app();
        assert_eq!(app.status_title().as_deref(), Some("wisp · B-Spline · 7 segments"));
        assert_eq!(app.status_title(), None);

        app.editor.apply(wisp_curves::EditorCommand::SelectKind(CurveKind::Bezier));
        assert_eq!(app.status_title().as_deref(), Some("wisp · Bezier · 7 segments"));
    }

    #[test]
    fn builder_collects_settings() {
        let app = Application::new()
            .title("curves")
            .size(640.0, 480.0)
            .config(EditorConfig { segments_per_span: 3, ..EditorConfig::default() });
        assert_eq!(app.title, "curves");
        assert_eq!((app.width, app.height), (640.0, 480.0));
        assert_eq!(app.config.segments_per_span, 3);
    }
}
