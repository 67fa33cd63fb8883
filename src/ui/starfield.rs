use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use ratatui::Frame;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fill `area` with `background` and a field of stars drifting left.
pub fn draw_starfield(f: &mut Frame, area: Rect, tick: u64, background: Color) {
    f.render_widget(StarfieldWidget { tick, background }, area);
}

struct StarfieldWidget {
    tick: u64,
    background: Color,
}

impl Widget for StarfieldWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.background));
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut rng = StdRng::seed_from_u64(0x6d4b_4153_54);
        let count = (area.width as usize * area.height as usize / 24).clamp(20, 300);

        for _ in 0..count {
            // Near stars scroll faster and shine brighter.
            let depth: u64 = rng.gen_range(1..=3);
            let x0: u64 = rng.gen_range(0..u64::from(area.width));
            let row: u16 = rng.gen_range(0..area.height);
            let phase: u64 = rng.gen_range(0..32);

            let drift = (self.tick * depth / 6) % u64::from(area.width);
            let col = ((x0 + u64::from(area.width) - drift) % u64::from(area.width)) as u16;

            let blink = (self.tick / 4 + phase) % 32 == 0;
            let (ch, level) = match (depth, blink) {
                (_, true) => ('+', 255),
                (1, _) => ('.', 70),
                (2, _) => ('·', 140),
                _ => ('*', 210),
            };

            let cell = &mut buf[(area.x + col, area.y + row)];
            cell.set_char(ch);
            cell.set_fg(Color::Rgb(level, level, level.saturating_add(30)));
        }
    }
}
