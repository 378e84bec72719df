/*
 * Popup presentation
 *
 * one tick of the popup: how opaque it is, where it sits, and whether it is
 * done. the window layer samples the clock and the cursor and applies the
 * returned frame.
 */
use crate::io::Options;

/// Space between the cursor and the bottom edge of the text.
pub const CURSOR_GAP: i32 = 20;

/// Total padding around the text, split evenly between both sides.
pub const PADDING: Size = Size {
    width: 20,
    height: 20,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Size {
        Size { width, height }
    }
}

/// Where the surface goes and how big it is, in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub position: Point,
    pub size: Size,
}

/// Source of the live cursor position, in physical screen pixels.
pub trait Pointer {
    fn position(&self) -> Point;
}

impl Pointer for Point {
    fn position(&self) -> Point {
        *self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Fading,
    Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub opacity: u8,
    /// Contents changed and need to be painted again.
    pub repaint: bool,
    pub bounds: Bounds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Present(Frame),
    Terminate,
}

/// Opacity `elapsed_ms` after the popup appeared, or `None` once it is over.
pub fn opacity_at(elapsed_ms: u64, options: &Options) -> Option<u8> {
    let display = options.display_ms as u64;
    let ease_out = options.ease_out_ms as u64;

    if elapsed_ms <= display {
        return Some(u8::MAX);
    }
    if !options.ease || elapsed_ms > display + ease_out {
        return None;
    }

    // ease_out > 0 here, elapsed_ms is in (display, display + ease_out]
    Some((255 * (display + ease_out - elapsed_ms) / ease_out) as u8)
}

/// Top-left corner of the surface: centred over `anchor`, above it by the
/// text height plus [`CURSOR_GAP`], then moved by the whole-pixel drift.
/// Drift far off screen pins to the edge of the `i32` range.
fn place(anchor: Point, text: Size, offset: (f32, f32)) -> Point {
    let x = anchor.x as f64 - (text.width / 2) as f64 + offset.0.trunc() as f64;
    let y = anchor.y as f64 - text.height as f64 - CURSOR_GAP as f64 + offset.1.trunc() as f64;
    Point::new(x as i32, y as i32)
}

/// Mutable state of a popup on screen. Lives as long as its window.
#[derive(Debug)]
pub struct Presentation {
    opacity: u8,
    phase: Phase,
    anchor: Option<Point>,
    offset: (f32, f32),
    presented: bool,
}

impl Default for Presentation {
    fn default() -> Presentation {
        Presentation::new()
    }
}

impl Presentation {
    pub fn new() -> Presentation {
        Presentation {
            opacity: u8::MAX,
            phase: Phase::Visible,
            anchor: None,
            offset: (0.0, 0.0),
            presented: false,
        }
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drift travelled so far, in pixels.
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    pub fn update<P>(&mut self, elapsed_ms: u64, options: &Options, pointer: &P, text: Size) -> Tick
    where
        P: Pointer + ?Sized,
    {
        if self.phase == Phase::Terminated {
            return Tick::Terminate;
        }

        let Some(opacity) = opacity_at(elapsed_ms, options) else {
            self.phase = Phase::Terminated;
            self.opacity = 0;
            return Tick::Terminate;
        };

        let fading = elapsed_ms > options.display_ms as u64;
        if fading {
            self.phase = Phase::Fading;
        }
        let repaint = !self.presented || opacity != self.opacity;
        self.opacity = opacity;
        self.presented = true;

        let anchor = if options.follow {
            pointer.position()
        } else {
            *self.anchor.get_or_insert_with(|| pointer.position())
        };

        // from the clock every tick, never accumulated
        let seconds = elapsed_ms as f32 / 1000.0;
        self.offset = (options.velocity.x * seconds, options.velocity.y * seconds);

        let position = place(anchor, text, self.offset);
        let size = Size::new(text.width + PADDING.width, text.height + PADDING.height);

        Tick::Present(Frame {
            opacity,
            repaint,
            bounds: Bounds { position, size },
        })
    }
}
