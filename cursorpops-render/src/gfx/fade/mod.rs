/*
 * Fade pass
 *
 * scales the finished frame by the popup opacity, so the text and its
 * outline fade together as one image.
 */
use wgpu::{
    include_wgsl, BlendComponent, BlendFactor, BlendOperation, BlendState, ColorTargetState,
    ColorWrites, CommandEncoder, Device, RenderPipeline, TextureFormat, TextureView,
};

// destination * constant, both colour and alpha: the surface is premultiplied
const SCALE_DESTINATION: BlendComponent = BlendComponent {
    src_factor: BlendFactor::Zero,
    dst_factor: BlendFactor::Constant,
    operation: BlendOperation::Add,
};

/// Blend constant for `opacity`, or `None` when the frame is left as is.
pub fn blend_constant(opacity: u8) -> Option<wgpu::Color> {
    if opacity == u8::MAX {
        return None;
    }

    let scale = opacity as f64 / u8::MAX as f64;
    Some(wgpu::Color {
        r: scale,
        g: scale,
        b: scale,
        a: scale,
    })
}

pub struct Fade {
    pipeline: RenderPipeline,
}

impl Fade {
    pub fn new(device: &Device, format: TextureFormat) -> Fade {
        let shader = device.create_shader_module(include_wgsl!("fade.wgsl"));

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Fade Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Fade Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(ColorTargetState {
                    format,
                    blend: Some(BlendState {
                        color: SCALE_DESTINATION,
                        alpha: SCALE_DESTINATION,
                    }),
                    write_mask: ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        Fade { pipeline }
    }

    pub fn render(&self, encoder: &mut CommandEncoder, view: &TextureView, opacity: u8) {
        let Some(constant) = blend_constant(opacity) else {
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("fade pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: true,
                },
            })],
            depth_stencil_attachment: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_blend_constant(constant);
        render_pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_frames_skip_the_pass() {
        assert!(blend_constant(255).is_none());
    }

    #[test]
    fn every_channel_scales_by_opacity() {
        let constant = blend_constant(51).unwrap();
        assert!((constant.a - 0.2).abs() < 1e-9);
        assert_eq!(constant.r, constant.a);
        assert_eq!(constant.g, constant.a);
        assert_eq!(constant.b, constant.a);

        assert_eq!(blend_constant(0).unwrap().a, 0.0);
    }
}
