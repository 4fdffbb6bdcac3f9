//! Replay of a recorded frame on the raylib window.
use std::ffi::CString;

use raylib::ffi;
use raylib::prelude::*;

use tilequest::resources::framecache::Frame;
use tilequest::resources::palette::Rgba;
use tilequest::systems::render::{DrawCmd, DrawList};

use crate::backend::assets::TextureStore;
use crate::backend::rendertarget::RenderTarget;

fn color(c: Rgba) -> Color {
    Color::new(c.r, c.g, c.b, c.a)
}

fn text_width(text: &str, size: i32) -> i32 {
    match CString::new(text) {
        Ok(c_text) => unsafe { ffi::MeasureText(c_text.as_ptr(), size) },
        Err(_) => 0,
    }
}

fn replay<D: RaylibDraw>(d: &mut D, textures: &TextureStore, frame: &DrawList) {
    for cmd in &frame.cmds {
        match cmd {
            DrawCmd::Clear(c) => d.clear_background(color(*c)),
            DrawCmd::Fill { rect, color: c } => {
                d.draw_rectangle(rect.x, rect.y, rect.w, rect.h, color(*c))
            }
            DrawCmd::Text {
                text,
                x,
                y,
                size,
                color: c,
                centered,
            } => {
                let (tx, ty) = if *centered {
                    (x - text_width(text, *size) / 2, y - size / 2)
                } else {
                    (*x, *y)
                };
                d.draw_text(text, tx, ty, *size, color(*c));
            }
            DrawCmd::Blit { frame, x, y } => blit(d, textures, frame, *x, *y),
        }
    }
}

fn blit<D: RaylibDraw>(d: &mut D, textures: &TextureStore, frame: &Frame, x: i32, y: i32) {
    match frame {
        Frame::Region {
            sheet,
            x: sx,
            y: sy,
            w,
            h,
        } => {
            if let Some(tex) = textures.get(sheet) {
                let src = Rectangle::new(*sx as f32, *sy as f32, *w as f32, *h as f32);
                d.draw_texture_rec(tex, src, Vector2::new(x as f32, y as f32), Color::WHITE);
            }
        }
        Frame::Image { key, .. } => {
            if let Some(tex) = textures.get(key) {
                d.draw_texture(tex, x, y, Color::WHITE);
            }
        }
        Frame::Placeholder { w, h, color: c } => {
            d.draw_rectangle(x, y, *w as i32, *h as i32, color(*c));
        }
    }
}

/// Draw `frame` into the render target, then scale it onto the window.
pub fn present(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    target: &mut RenderTarget,
    textures: &TextureStore,
    frame: &DrawList,
) {
    let (window_w, window_h) = (rl.get_screen_width(), rl.get_screen_height());
    let source = target.source_rect();
    let dest = target.dest_rect(window_w, window_h);

    let mut d = rl.begin_drawing(thread);
    {
        let mut canvas = d.begin_texture_mode(thread, &mut target.texture);
        replay(&mut canvas, textures, frame);
    }
    d.clear_background(Color::BLACK);
    d.draw_texture_pro(
        target.texture.texture(),
        source,
        dest,
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );
}
