pub mod admin;
pub mod header;
pub mod hitmap;
pub mod layout;
pub mod main_screen;
pub mod password;
pub mod starfield;
pub mod theme;
pub mod widgets;

use crate::app::App;
use crate::types::Screen;
use hitmap::HitMap;
use ratatui::Frame;
use theme::Palette;
use widgets::DrawCtx;

/// Master render function: starfield, the active screen, then any modal.
/// Every clickable region drawn this frame lands in `hits`.
pub fn draw(f: &mut Frame, app: &App, hits: &mut HitMap) {
    let area = f.area();
    let palette = Palette::from(&app.config.theme);
    let mut ctx = DrawCtx {
        hits,
        pointer: app.pointer,
        palette,
    };

    match app.screen {
        Screen::Main => {
            starfield::draw_starfield(f, area, app.tick, palette.background);
            main_screen::draw_main_screen(f, area, app, &mut ctx);
        }
        Screen::Admin => {
            starfield::draw_starfield(f, area, app.tick, theme::ADMIN_BG);
            admin::draw_admin(f, area, app, &mut ctx);
        }
        Screen::PasswordPrompt(purpose) => {
            starfield::draw_starfield(f, area, app.tick, palette.background);
            // Backdrop only: its buttons must not be reachable through the modal.
            let mut scratch = HitMap::default();
            let mut backdrop = DrawCtx {
                hits: &mut scratch,
                pointer: None,
                palette,
            };
            main_screen::draw_main_screen(f, area, app, &mut backdrop);
            password::draw_password_dialog(f, area, app, purpose, &mut ctx);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::hitmap::HitMap;
    use crate::app::App;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    pub fn render(app: &App, width: u16, height: u16) -> (Buffer, HitMap) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut hits = HitMap::default();
        terminal.draw(|f| super::draw(f, app, &mut hits)).unwrap();
        (terminal.backend().buffer().clone(), hits)
    }

    pub fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}
