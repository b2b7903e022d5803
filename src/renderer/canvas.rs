//! Canvas 2D backend
//!
//! Executes scene draw lists against a `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{DrawCmd, TextCmd};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    ball_image: HtmlImageElement,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, ball_image_src: &str) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        let ball_image = HtmlImageElement::new()?;
        ball_image.set_src(ball_image_src);

        Ok(Self { ctx, ball_image })
    }

    /// Draw one frame. A failing command is logged and skipped.
    pub fn draw(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            if let Err(e) = self.draw_cmd(cmd) {
                log::warn!("Draw failed for {:?}: {:?}", cmd, e);
            }
        }
    }

    fn draw_cmd(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        match cmd {
            DrawCmd::Clear { width, height } => {
                self.ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCmd::FillRect {
                origin,
                size,
                color,
            } => {
                self.ctx.set_fill_style_str(color);
                self.ctx.fill_rect(
                    origin.x as f64,
                    origin.y as f64,
                    size.x as f64,
                    size.y as f64,
                );
            }
            DrawCmd::Text(text) => self.draw_text(text)?,
            DrawCmd::Ball { center, radius } => {
                let (cx, cy, r) = (center.x as f64, center.y as f64, *radius as f64);
                if self.ball_image_ready() {
                    let aspect = self.ball_image.natural_width() as f64
                        / self.ball_image.natural_height() as f64;
                    let (w, h) = (r * 2.0 * aspect, r * 2.0);
                    self.ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(
                            &self.ball_image,
                            cx - w / 2.0,
                            cy - h / 2.0,
                            w,
                            h,
                        )?;
                } else {
                    self.ctx.begin_path();
                    self.ctx.arc(cx, cy, r, 0.0, TAU)?;
                    self.ctx.set_fill_style_str("white");
                    self.ctx.fill();
                }
            }
        }
        Ok(())
    }

    fn draw_text(&self, text: &TextCmd) -> Result<(), JsValue> {
        self.ctx.save();
        self.ctx.set_fill_style_str(text.color);
        self.ctx.set_font(&text.font());
        self.ctx.set_text_align(text.align.as_css());
        self.ctx
            .set_text_baseline(if text.middle { "middle" } else { "alphabetic" });

        let result = self
            .ctx
            .translate(text.anchor.x as f64, text.anchor.y as f64)
            .and_then(|_| self.ctx.rotate(text.rotation as f64))
            .and_then(|_| {
                self.ctx
                    .fill_text(&text.text, text.offset.x as f64, text.offset.y as f64)
            });

        self.ctx.restore();
        result
    }

    fn ball_image_ready(&self) -> bool {
        self.ball_image.complete() && self.ball_image.natural_height() > 0
    }
}
