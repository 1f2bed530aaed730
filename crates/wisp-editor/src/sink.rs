//! Bridge from the collector's draw calls to the engine draw list.

use core::ops::Range;

use wisp_curves::{CurveSink, CurveUniforms, Primitive};
use wisp_engine::coords::ColorRgba;
use wisp_engine::scene::{CurveCmd, DrawCmd, DrawList, Topology};

/// Last upload, already copied into the list's point arena.
struct Uploaded {
    kind: u32,
    points: Range<u32>,
    point_size: f32,
    color: ColorRgba,
}

/// Records collector output as `DrawCmd::Curve` commands.
///
/// Each upload copies its control points into the list once; the line and
/// point draws that follow share that range.
pub struct DrawListSink<'a> {
    list: &'a mut DrawList,
    segments: u32,
    current: Option<Uploaded>,
}

impl<'a> DrawListSink<'a> {
    pub fn new(list: &'a mut DrawList) -> Self {
        Self {
            list,
            segments: 0,
            current: None,
        }
    }
}

impl CurveSink for DrawListSink<'_> {
    fn set_segments(&mut self, segments_per_span: u32) {
        self.segments = segments_per_span;
    }

    fn upload(&mut self, uniforms: &CurveUniforms) {
        let points = self.list.push_points(uniforms.active());
        self.current = Some(Uploaded {
            kind: uniforms.kind.shader_index(),
            points,
            point_size: uniforms.point_size,
            color: ColorRgba::from(uniforms.color.to_array()),
        });
    }

    fn draw(&mut self, primitive: Primitive, vertex_count: u32) {
        let Some(up) = self.current.as_ref() else {
            log::warn!("draw without uploaded curve ignored");
            return;
        };

        let topology = match primitive {
            Primitive::LineStrip => Topology::LineStrip,
            Primitive::Points => Topology::Points,
        };

        self.list.push(DrawCmd::Curve(CurveCmd {
            topology,
            kind: up.kind,
            segments: self.segments,
            points: up.points.clone(),
            point_size: up.point_size,
            color: up.color,
            vertex_count,
        }));
    }
}
