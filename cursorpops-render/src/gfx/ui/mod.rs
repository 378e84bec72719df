use egui::{Context, FullOutput, RawInput};
use egui_wgpu::{renderer::ScreenDescriptor, Renderer};
use wgpu::{
    CommandBuffer, CommandEncoder, Device, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, TextureFormat, TextureView,
};

pub struct Ui {
    context: Context,
    renderer: Renderer,
}

impl Ui {
    pub fn new(device: &Device, queue: &Queue, format: TextureFormat, pixels_per_point: f32) -> Ui {
        let mut ui = Ui {
            context: Context::default(),
            renderer: Renderer::new(device, format, None, 1),
        };

        // fonts are only loaded by the first frame, and text has to be
        // measured before anything is painted
        let output = ui.context.run(
            RawInput {
                pixels_per_point: Some(pixels_per_point),
                ..Default::default()
            },
            |_| {},
        );
        ui.upload_textures(device, queue, &output);

        ui
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    fn upload_textures(&mut self, device: &Device, queue: &Queue, output: &FullOutput) {
        for (id, image_delta) in &output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }
    }

    pub fn render<F: FnOnce(&egui::Context)>(
        &mut self,
        encoder: &mut CommandEncoder,
        device: &Device,
        queue: &Queue,
        view: &TextureView,
        render: F,
        pixels_per_point: f32,
        width: u32,
        height: u32,
    ) -> Vec<CommandBuffer> {
        let input = RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(width as f32, height as f32) / pixels_per_point,
            )),
            pixels_per_point: Some(pixels_per_point),
            ..Default::default()
        };

        let output = self.context.run(input, render);

        let paint_jobs = self.context.tessellate(output.shapes.clone());
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point,
        };

        self.upload_textures(device, queue, &output);

        let commands =
            self.renderer
                .update_buffers(device, queue, encoder, &paint_jobs, &screen_descriptor);

        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
            self.renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        commands
    }
}
