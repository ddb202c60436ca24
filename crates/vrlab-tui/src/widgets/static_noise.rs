//! Analog TV static: random shade cells, reseeded every frame.

use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

pub struct StaticNoise {
    pub frame: u64,
}

impl Widget for StaticNoise {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut rng = StdRng::seed_from_u64(self.frame);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let shade = SHADES[rng.gen_range(0..SHADES.len())];
                let grey: u8 = rng.gen_range(90..=230);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(shade).set_style(
                        Style::default()
                            .fg(Color::Rgb(grey, grey, grey))
                            .bg(Color::Black),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(frame: u64) -> Buffer {
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        StaticNoise { frame }.render(area, &mut buf);
        buf
    }

    #[test]
    fn test_same_frame_same_picture() {
        assert_eq!(render(7), render(7));
    }

    #[test]
    fn test_frames_differ() {
        assert_ne!(render(1), render(2));
    }
}
