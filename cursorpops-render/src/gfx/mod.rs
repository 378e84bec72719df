use log::{debug, info, warn};
use thiserror::Error;
use wgpu::{Device, Instance, Queue, Surface, SurfaceConfiguration};

use crate::popup::Size;

use self::{fade::Fade, ui::Ui};

pub mod fade;
pub mod text;
pub mod ui;

#[derive(Error, Debug)]
pub enum GfxError {
    #[error("failed to create surface")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no graphics adapter can present to the popup window")]
    NoAdapter,

    #[error("failed to open graphics device")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture format")]
    NoFormat,
}

// the surface must be created on the thread that owns the window, so it is
// built here first and handed to Gfx::new
pub struct GfxContext {
    pub instance: Instance,
    pub surface: Surface,
}

impl GfxContext {
    pub fn new<W>(window: &W) -> Result<GfxContext, GfxError>
    where
        W: raw_window_handle::HasRawWindowHandle + raw_window_handle::HasRawDisplayHandle,
    {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        debug!("{:#?}", instance);

        let surface = unsafe { instance.create_surface(window) }?;

        Ok(GfxContext { instance, surface })
    }
}

pub struct Gfx {
    pub config: SurfaceConfiguration,
    surface: Surface,
    pub device: Device,
    pub queue: Queue,
    pub ui: Ui,
    fade: Fade,
    pixels_per_point: f32,
}

impl Gfx {
    pub async fn new(
        context: GfxContext,
        width: u32,
        height: u32,
        pixels_per_point: f32,
    ) -> Result<Gfx, GfxError> {
        let instance = context.instance;
        let surface = context.surface;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GfxError::NoAdapter)?;

        info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    ..Default::default()
                },
                None,
            )
            .await?;

        let capabilities = surface.get_capabilities(&adapter);
        let format = if capabilities
            .formats
            .contains(&wgpu::TextureFormat::Bgra8Unorm)
        {
            wgpu::TextureFormat::Bgra8Unorm
        } else {
            *capabilities.formats.first().ok_or(GfxError::NoFormat)?
        };

        // egui hands us premultiplied colours
        let alpha_mode = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ]
        .into_iter()
        .find(|mode| capabilities.alpha_modes.contains(mode))
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        if alpha_mode == wgpu::CompositeAlphaMode::Auto {
            warn!(
                "surface cannot blend with the desktop ({:?}), popup will not be transparent",
                capabilities.alpha_modes
            );
        }

        let surface_desc = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![format],
        };

        debug!("surface {:?} {:?}", format, alpha_mode);

        surface.configure(&device, &surface_desc);

        let ui = Ui::new(&device, &queue, format, pixels_per_point);
        let fade = Fade::new(&device, format);

        Ok(Gfx {
            config: surface_desc,
            surface,
            device,
            queue,
            ui,
            fade,
            pixels_per_point,
        })
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }

        self.config.width = width;
        self.config.height = height;

        self.surface.configure(&self.device, &self.config);
    }

    pub fn set_pixels_per_point(&mut self, pixels_per_point: f32) {
        self.pixels_per_point = pixels_per_point;
    }

    /// Size of `text` on screen in physical pixels.
    pub fn measure(&self, text: &text::Text) -> Size {
        let points = text.measure(self.ui.context());
        Size::new(
            (points.x * self.pixels_per_point).ceil() as u32,
            (points.y * self.pixels_per_point).ceil() as u32,
        )
    }

    /// Paints a frame at full alpha, then fades the whole of it to `opacity`.
    pub fn render<F: FnOnce(&egui::Context)>(&mut self, opacity: u8, paint: F) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                warn!("dropped frame: {e:?}");
                return;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder: wgpu::CommandEncoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            // everything the text does not cover stays see-through
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
        }

        let ui_commands = self.ui.render(
            &mut encoder,
            &self.device,
            &self.queue,
            &view,
            paint,
            self.pixels_per_point,
            self.config.width,
            self.config.height,
        );

        self.fade.render(&mut encoder, &view, opacity);

        self.queue
            .submit(ui_commands.into_iter().chain(Some(encoder.finish())));

        frame.present();
    }
}
