use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{CurveCmd, DrawCmd, DrawList, Topology};

/// Control points one uniform slot can hold.
pub const MAX_CURVE_POINTS: usize = 256;

/// Length of the shared index stream; longer draws are truncated.
pub const MAX_CURVE_VERTICES: u32 = 60_000;

const POINT_QUAD_VERTICES: u32 = 6;

/// Renderer for `DrawCmd::Curve`.
///
/// Every command gets its own uniform slot in one buffer, bound with a dynamic
/// offset, so the whole list is uploaded with a single write before the pass.
/// Line strips and point discs use separate pipelines over the same shader and
/// the same index stream.
#[derive(Default)]
pub struct CurveRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    line_pipeline: Option<wgpu::RenderPipeline>,
    point_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,

    uniform_buffer: Option<wgpu::Buffer>,
    slot_stride: u64,
    slot_capacity: usize,

    index_vbo: Option<wgpu::Buffer>,

    staging: Vec<u8>,
    warned_truncation: bool,
}

impl CurveRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        let cmds: Vec<&CurveCmd> = draw_list
            .items()
            .iter()
            .map(|DrawCmd::Curve(c)| c)
            .filter(|c| c.vertex_count > 0)
            .collect();

        if cmds.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_slot_capacity(ctx, cmds.len());

        let viewport_px = Viewport::new(
            ctx.viewport.width * ctx.scale_factor,
            ctx.viewport.height * ctx.scale_factor,
        );

        let stride = self.slot_stride as usize;
        self.staging.clear();
        self.staging.resize(cmds.len() * stride, 0);
        for (slot, cmd) in cmds.iter().enumerate() {
            let uniform = CurveUniform::encode(cmd, draw_list.points(cmd.points.clone()), viewport_px);
            let at = slot * stride;
            self.staging[at..at + CurveUniform::SIZE].copy_from_slice(bytemuck::bytes_of(&uniform));
        }

        let Some(ubo) = self.uniform_buffer.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, &self.staging);

        let Some(line_pipeline) = self.line_pipeline.as_ref() else { return };
        let Some(point_pipeline) = self.point_pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(index_vbo) = self.index_vbo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("wisp curve pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_vertex_buffer(0, index_vbo.slice(..));

        for (slot, cmd) in cmds.iter().enumerate() {
            let count = clamp_vertex_count(cmd.vertex_count);
            if count < cmd.vertex_count && !self.warned_truncation {
                log::warn!(
                    "curve needs {} vertices, drawing the first {MAX_CURVE_VERTICES}",
                    cmd.vertex_count
                );
                self.warned_truncation = true;
            }

            let offset = (slot as u64 * self.slot_stride) as u32;
            rpass.set_bind_group(0, bind_group, &[offset]);

            match cmd.topology {
                Topology::LineStrip => {
                    rpass.set_pipeline(line_pipeline);
                    rpass.draw(0..count, 0..1);
                }
                Topology::Points => {
                    rpass.set_pipeline(point_pipeline);
                    rpass.draw(0..POINT_QUAD_VERTICES, 0..count);
                }
            }
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.line_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wisp curve shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/curve.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("wisp curve bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: Some(CurveUniform::binding_size()),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("wisp curve pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let build = |label: &str,
                     vs: &str,
                     fs: &str,
                     step_mode: wgpu::VertexStepMode,
                     topology: wgpu::PrimitiveTopology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs),
                    compilation_options: Default::default(),
                    buffers: &[index_layout(step_mode)],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let line_pipeline = build(
            "wisp curve line pipeline",
            "vs_line",
            "fs_line",
            wgpu::VertexStepMode::Vertex,
            wgpu::PrimitiveTopology::LineStrip,
        );
        let point_pipeline = build(
            "wisp curve point pipeline",
            "vs_point",
            "fs_point",
            wgpu::VertexStepMode::Instance,
            wgpu::PrimitiveTopology::TriangleList,
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.line_pipeline = Some(line_pipeline);
        self.point_pipeline = Some(point_pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.uniform_buffer = None;
        self.slot_capacity = 0;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.index_vbo.is_some() {
            return;
        }

        let indices: Vec<u32> = (0..MAX_CURVE_VERTICES).collect();
        self.index_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wisp curve index vbo"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    fn ensure_slot_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.slot_capacity && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = slot_stride(alignment);
        let capacity = required.next_power_of_two().max(16);

        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("wisp curve uniforms"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wisp curve bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: Some(CurveUniform::binding_size()),
                }),
            }],
        });

        log::debug!("curve uniform slots: {capacity} x {stride} bytes");

        self.uniform_buffer = Some(buffer);
        self.bind_group = Some(bind_group);
        self.slot_stride = stride;
        self.slot_capacity = capacity;
    }
}

fn index_layout(step_mode: wgpu::VertexStepMode) -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Uint32];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<u32>() as u64,
        step_mode,
        attributes: &ATTRS,
    }
}

/// Uniform slot size rounded up to the device's dynamic offset alignment.
fn slot_stride(alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    (CurveUniform::SIZE as u64).div_ceil(alignment) * alignment
}

#[inline]
fn clamp_vertex_count(count: u32) -> u32 {
    count.min(MAX_CURVE_VERTICES)
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform block layout (2096 bytes), matching `Curve` in curve.wgsl:
///
///  offset  0  header  [u32; 4]        kind, segments, point count, -
///  offset 16  style   [f32; 4]        point size, viewport w, viewport h, -
///  offset 32  color   [f32; 4]
///  offset 48  points  [[f32; 4]; 128] two control points per entry
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CurveUniform {
    header: [u32; 4],
    style: [f32; 4],
    color: [f32; 4],
    points: [[f32; 4]; MAX_CURVE_POINTS / 2],
}

impl CurveUniform {
    const SIZE: usize = std::mem::size_of::<Self>();

    fn binding_size() -> NonZeroU64 {
        NonZeroU64::new(Self::SIZE as u64).unwrap_or(NonZeroU64::MIN)
    }

    /// Packs one command. Points past the slot capacity are dropped.
    fn encode(cmd: &CurveCmd, points: &[[f32; 2]], viewport_px: Viewport) -> Self {
        let n = points.len().min(MAX_CURVE_POINTS);

        let mut packed = [[0.0f32; 4]; MAX_CURVE_POINTS / 2];
        for (i, p) in points[..n].iter().enumerate() {
            let lane = (i % 2) * 2;
            packed[i / 2][lane] = p[0];
            packed[i / 2][lane + 1] = p[1];
        }

        Self {
            header: [cmd.kind, cmd.segments, n as u32, 0],
            style: [cmd.point_size, viewport_px.width, viewport_px.height, 0.0],
            color: cmd.color.to_array(),
            points: packed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ColorRgba;

    fn cmd(points: u32, vertex_count: u32) -> CurveCmd {
        CurveCmd {
            topology: Topology::LineStrip,
            kind: 2,
            segments: 7,
            points: 0..points,
            point_size: 7.0,
            color: ColorRgba::new(0.5, 0.25, 1.0, 0.8),
            vertex_count,
        }
    }

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(CurveUniform::SIZE, 48 + 128 * 16);
    }

    #[test]
    fn slot_stride_respects_alignment() {
        assert_eq!(slot_stride(256), 2304);
        assert_eq!(slot_stride(256) % 256, 0);
        assert_eq!(slot_stride(16), CurveUniform::SIZE as u64);
        assert_eq!(slot_stride(0), CurveUniform::SIZE as u64);
    }

    #[test]
    fn points_packed_two_per_entry() {
        let pts = [[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]];
        let u = CurveUniform::encode(&cmd(3, 8), &pts, Viewport::new(800.0, 600.0));

        assert_eq!(u.header, [2, 7, 3, 0]);
        assert_eq!(u.points[0], [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(u.points[1], [0.5, 0.6, 0.0, 0.0]);
        assert_eq!(u.style, [7.0, 800.0, 600.0, 0.0]);
        assert_eq!(u.color, [0.5, 0.25, 1.0, 0.8]);
    }

    #[test]
    fn oversized_point_list_truncated() {
        let pts = vec![[1.0, 1.0]; MAX_CURVE_POINTS + 10];
        let u = CurveUniform::encode(&cmd(pts.len() as u32, 8), &pts, Viewport::new(1.0, 1.0));
        assert_eq!(u.header[2], MAX_CURVE_POINTS as u32);
    }

    #[test]
    fn vertex_count_clamped_to_index_stream() {
        assert_eq!(clamp_vertex_count(8), 8);
        assert_eq!(clamp_vertex_count(100 * 253 + 1), 25_301);
        assert_eq!(clamp_vertex_count(u32::MAX), MAX_CURVE_VERTICES);
    }
}
