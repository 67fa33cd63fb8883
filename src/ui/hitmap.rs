use crate::types::Command;
use ratatui::layout::{Position, Rect};

/// Clickable regions registered while drawing one frame.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Command)>,
}

impl HitMap {
    pub fn register(&mut self, area: Rect, command: Command) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, command));
        }
    }

    /// Command under `pos`; regions drawn later sit on top.
    pub fn hit(&self, pos: Position) -> Option<Command> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, command)| command.clone())
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.regions.iter().map(|(_, command)| command)
    }

    /// Centre of the first region registered for `command`.
    pub fn position_of(&self, command: &Command) -> Option<Position> {
        self.regions
            .iter()
            .find(|(_, c)| c == command)
            .map(|(area, _)| Position::new(area.x + area.width / 2, area.y + area.height / 2))
    }
}
