/*
 * The popup text, optionally outlined
 */
use egui::{Align2, Color32, Context, FontId, LayerId, Vec2};

use crate::io::{Color, Options};

pub const FONT_SIZE: f32 = 16.0;

pub fn color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

#[derive(Clone, Debug)]
pub struct Text {
    text: String,
    font: FontId,
    color: Color,
    outline: Option<Color>,
}

impl Text {
    pub fn new(options: &Options) -> Text {
        Text {
            text: options.text.clone(),
            font: FontId::proportional(FONT_SIZE),
            color: options.text_color,
            outline: options.outline.then_some(options.outline_color),
        }
    }

    pub fn outline(&self) -> Option<Color> {
        self.outline
    }

    /// Unwrapped size in points. `ctx` must have run at least one frame.
    pub fn measure(&self, ctx: &Context) -> Vec2 {
        ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(self.text.clone(), self.font.clone(), Color32::WHITE)
                .size()
        })
    }

    /// Paints opaque, centred on the screen rect, so call this from inside a
    /// frame. Fading is left to the surface.
    pub fn paint(&self, ctx: &Context) {
        let painter = ctx.layer_painter(LayerId::background());
        let center = ctx.screen_rect().center();

        if let Some(outline) = self.outline {
            let pixel = 1.0 / ctx.pixels_per_point();
            let color = color32(outline);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let offset = Vec2::new(dx as f32, dy as f32) * pixel;
                    painter.text(
                        center + offset,
                        Align2::CENTER_CENTER,
                        &self.text,
                        self.font.clone(),
                        color,
                    );
                }
            }
        }

        painter.text(
            center,
            Align2::CENTER_CENTER,
            &self.text,
            self.font.clone(),
            color32(self.color),
        );
    }
}
