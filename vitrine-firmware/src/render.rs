//! Demo frame renderer
//!
//! Draws the classic vertical color bars plus a crosshair at the last
//! touch position. Runs inside the display component's periodic repaint,
//! so it must only touch the framebuffer and lock-free state.

use vitrine_core::framebuffer::FrameBuffer;

use crate::channels;

const BARS: [(u8, u8, u8); 8] = [
    (255, 255, 255),
    (255, 255, 0),
    (0, 255, 255),
    (0, 255, 0),
    (255, 0, 255),
    (255, 0, 0),
    (0, 0, 255),
    (0, 0, 0),
];

const CURSOR_ARM: i32 = 10;

pub fn draw_frame(frame: &mut FrameBuffer) {
    let width = i32::from(frame.width());
    let height = i32::from(frame.height());
    let bar_width = width / BARS.len() as i32;

    for (i, &(r, g, b)) in BARS.iter().enumerate() {
        let x0 = i as i32 * bar_width;
        let x1 = if i == BARS.len() - 1 {
            width
        } else {
            x0 + bar_width
        };
        for y in 0..height {
            for x in x0..x1 {
                frame.write_pixel(x, y, r, g, b);
            }
        }
    }

    let pointer = channels::pointer();
    if pointer.pressed {
        let (cx, cy) = (i32::from(pointer.x), i32::from(pointer.y));
        for d in -CURSOR_ARM..=CURSOR_ARM {
            frame.write_pixel(cx + d, cy, 255, 0, 0);
            frame.write_pixel(cx, cy + d, 255, 0, 0);
        }
    }
}
