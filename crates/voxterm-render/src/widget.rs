//! Presenting a [`Framebuffer`] through ratatui.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;
use voxterm_core::TermColor;

use crate::framebuffer::Framebuffer;

/// Map a terminal colour onto the ratatui palette.
pub const fn to_ratatui(color: TermColor) -> Color {
    match (color.base(), color.is_bright()) {
        (0, false) => Color::Black,
        (0, true) => Color::DarkGray,
        (1, false) => Color::Red,
        (1, true) => Color::LightRed,
        (2, false) => Color::Green,
        (2, true) => Color::LightGreen,
        (3, false) => Color::Yellow,
        (3, true) => Color::LightYellow,
        (4, false) => Color::Blue,
        (4, true) => Color::LightBlue,
        (5, false) => Color::Magenta,
        (5, true) => Color::LightMagenta,
        (6, false) => Color::Cyan,
        (6, true) => Color::LightCyan,
        (_, false) => Color::Gray,
        (_, true) => Color::White,
    }
}

/// Copies framebuffer cells into the frame, clipped to the render area.
pub struct FramebufferWidget<'a> {
    framebuffer: &'a Framebuffer,
}

impl<'a> FramebufferWidget<'a> {
    pub const fn new(framebuffer: &'a Framebuffer) -> Self {
        Self { framebuffer }
    }
}

impl Widget for FramebufferWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let w = area.width.min(self.framebuffer.width());
        let h = area.height.min(self.framebuffer.height());
        for y in 0..h {
            for x in 0..w {
                let Some(cell) = self.framebuffer.get(i32::from(x), i32::from(y)) else {
                    continue;
                };
                if let Some(out) = buf.cell_mut((area.x + x, area.y + y)) {
                    out.set_char(cell.glyph)
                        .set_fg(to_ratatui(cell.fg))
                        .set_bg(to_ratatui(cell.bg));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_mapping() {
        assert_eq!(to_ratatui(TermColor::BLACK), Color::Black);
        assert_eq!(to_ratatui(TermColor::CYAN), Color::Cyan);
        assert_eq!(to_ratatui(TermColor::YELLOW.bright()), Color::LightYellow);
        assert_eq!(to_ratatui(TermColor::WHITE), Color::Gray);
        assert_eq!(to_ratatui(TermColor::WHITE.bright()), Color::White);
    }

    #[test]
    fn renders_into_buffer() {
        let mut fb = Framebuffer::new(4, 2).unwrap();
        fb.set_pixel(1, 1, '#', TermColor::RED, TermColor::BLUE);

        let area = Rect::new(0, 0, 3, 3);
        let mut buf = Buffer::empty(area);
        FramebufferWidget::new(&fb).render(area, &mut buf);

        let cell = buf.cell((1, 1)).unwrap();
        assert_eq!(cell.symbol(), "#");
        assert_eq!(cell.fg, Color::Red);
        assert_eq!(cell.bg, Color::Blue);
        // Row 2 lies outside the framebuffer and stays untouched.
        assert_eq!(buf.cell((0, 2)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((0, 2)).unwrap().bg, Color::Reset);
    }
}
