/*
 * Popup window
 */
use std::time::Instant;

use log::{debug, info, trace, warn};
use tao::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::EventLoopWindowTarget,
    monitor::MonitorHandle,
    window::{Window as TaoWindow, WindowBuilder},
};

use crate::app::{
    timer::{pick_refresh_rate, Ticker},
    Error,
};
use cursorpops_render::{
    gfx::{text::Text, Gfx, GfxContext},
    io::Options,
    popup::{Bounds, Frame, Point, Pointer, Presentation, Tick},
};

/// Live cursor, or the middle of the screen where the platform will not
/// tell us (e.g. Wayland).
struct Cursor<'a>(&'a TaoWindow);

impl Pointer for Cursor<'_> {
    fn position(&self) -> Point {
        match self.0.cursor_position() {
            Ok(position) => Point::new(position.x.round() as i32, position.y.round() as i32),
            Err(e) => {
                debug!("cursor position unavailable: {e}");
                monitor_center(self.0)
            }
        }
    }
}

fn monitor_center(window: &TaoWindow) -> Point {
    match window.current_monitor() {
        Some(monitor) => {
            let origin = monitor.position();
            let size = monitor.size();
            Point::new(
                origin.x + (size.width / 2) as i32,
                origin.y + (size.height / 2) as i32,
            )
        }
        None => Point::default(),
    }
}

/// Refresh rate of the current monitor, 0 if unknown.
fn monitor_refresh_rate(window: &TaoWindow) -> u32 {
    let Some(monitor) = window.current_monitor() else {
        return 0;
    };

    let fastest_mode = monitor
        .video_modes()
        .map(|mode| u32::from(mode.refresh_rate()))
        .max();

    pick_refresh_rate(current_refresh_rate(&monitor), fastest_mode)
}

#[cfg(target_os = "windows")]
fn current_refresh_rate(monitor: &MonitorHandle) -> Option<u32> {
    use tao::platform::windows::MonitorHandleExtWindows;
    use windows::{
        core::HSTRING,
        Win32::Graphics::Gdi::{EnumDisplaySettingsW, DEVMODEW, ENUM_CURRENT_SETTINGS},
    };

    let mut mode = DEVMODEW {
        dmSize: std::mem::size_of::<DEVMODEW>() as u16,
        ..Default::default()
    };
    let device = HSTRING::from(monitor.native_id());

    let found = unsafe { EnumDisplaySettingsW(&device, ENUM_CURRENT_SETTINGS, &mut mode) };
    if !found.as_bool() {
        debug!("no display settings for {device}");
        return None;
    }

    Some(mode.dmDisplayFrequency)
}

#[cfg(not(target_os = "windows"))]
fn current_refresh_rate(_monitor: &MonitorHandle) -> Option<u32> {
    None
}

pub struct Popup {
    window: TaoWindow,
    gfx: Gfx,
    options: Options,
    text: Text,
    presentation: Presentation,
    ticker: Ticker,
    started: Instant,
    opacity: u8,
    bounds: Option<Bounds>,
}

impl Popup {
    pub fn build(event_loop: &EventLoopWindowTarget<()>, options: Options) -> Result<Popup, Error> {
        let builder = WindowBuilder::new()
            .with_title("cursorpops")
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top(true)
            .with_resizable(false)
            .with_focused(false)
            .with_visible(false)
            .with_inner_size(PhysicalSize::new(1u32, 1u32));

        #[cfg(target_os = "windows")]
        let builder = {
            use tao::platform::windows::WindowBuilderExtWindows;
            builder.with_skip_taskbar(true)
        };

        #[cfg(any(
            target_os = "linux",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd"
        ))]
        let builder = {
            use tao::platform::unix::WindowBuilderExtUnix;
            builder.with_skip_taskbar(true)
        };

        let window = builder.build(event_loop)?;

        if let Err(e) = window.set_ignore_cursor_events(true) {
            warn!("popup will catch clicks: {e}");
        }

        let gfx_context = GfxContext::new(&window)?;

        let size = window.inner_size();
        let gfx = pollster::block_on(Gfx::new(
            gfx_context,
            size.width,
            size.height,
            window.scale_factor() as f32,
        ))?;

        let refresh_rate = monitor_refresh_rate(&window);
        let now = Instant::now();
        let ticker = Ticker::new(refresh_rate, now);
        info!(
            "monitor refresh rate {refresh_rate} Hz, ticking every {:?}",
            ticker.period()
        );

        let text = Text::new(&options);
        debug!("outline {:?}", text.outline());

        Ok(Popup {
            window,
            gfx,
            options,
            text,
            presentation: Presentation::new(),
            ticker,
            started: now,
            opacity: u8::MAX,
            bounds: None,
        })
    }

    /// Starts the clock and places the window. Returns when to tick next, or
    /// `None` if the popup is already over.
    pub fn show(&mut self) -> Option<Instant> {
        self.started = Instant::now();
        self.ticker.restart(self.started);

        let next = self.tick();
        if next.is_some() {
            self.window.set_visible(true);
        }
        next
    }

    pub fn tick_due(&self) -> bool {
        self.ticker.is_due(Instant::now())
    }

    pub fn tick(&mut self) -> Option<Instant> {
        let now = Instant::now();
        let elapsed_ms = now.saturating_duration_since(self.started).as_millis() as u64;
        let text_size = self.gfx.measure(&self.text);
        let phase = self.presentation.phase();

        let tick = self.presentation.update(
            elapsed_ms,
            &self.options,
            &Cursor(&self.window),
            text_size,
        );

        if self.presentation.phase() != phase {
            debug!("{phase:?} -> {:?} at {elapsed_ms} ms", self.presentation.phase());
        }

        match tick {
            Tick::Terminate => {
                debug!("popup finished after {elapsed_ms} ms");
                self.window.set_visible(false);
                None
            }
            Tick::Present(frame) => {
                trace!(
                    "{elapsed_ms} ms: {frame:?}, drifted {:?}",
                    self.presentation.offset()
                );
                self.apply(frame);
                Some(self.ticker.advance(now))
            }
        }
    }

    fn apply(&mut self, frame: Frame) {
        let Bounds { position, size } = frame.bounds;
        let previous = self.bounds.replace(frame.bounds);

        let resized = previous.map(|bounds| bounds.size) != Some(size);
        if resized {
            self.window
                .set_inner_size(PhysicalSize::new(size.width, size.height));
            self.gfx.resized(size.width, size.height);
        }

        if previous.map(|bounds| bounds.position) != Some(position) {
            self.window
                .set_outer_position(PhysicalPosition::new(position.x, position.y));
        }

        self.opacity = frame.opacity;
        if frame.repaint || resized {
            self.window.request_redraw();
        }
    }

    pub fn handle(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.gfx.resized(width, height);
                self.window.request_redraw();
            }
            WindowEvent::ScaleFactorChanged {
                scale_factor,
                new_inner_size: PhysicalSize { width, height },
            } => {
                self.gfx.set_pixels_per_point(scale_factor as f32);
                self.gfx.resized(*width, *height);
                self.window.request_redraw();
            }
            _ => (),
        }
    }

    pub fn redraw(&mut self) {
        let opacity = self.opacity;
        let text = &self.text;
        self.gfx.render(opacity, |ctx| text.paint(ctx));
    }
}
