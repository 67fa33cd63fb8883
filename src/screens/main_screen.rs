use std::ops::Range;

/// Most cards shown at once; one per quick-play key.
pub const MAX_GAMES_PER_SCREEN: usize = 9;

/// Paging state for the horizontal strip of game cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainScreen {
    /// First visible game.
    pub current_index: usize,
    pub games_per_screen: usize,
    /// Keyboard highlight (absolute index), kept inside the visible window.
    pub selected: usize,
}

impl MainScreen {
    pub fn new(games_per_screen: usize) -> Self {
        Self {
            current_index: 0,
            games_per_screen: games_per_screen.clamp(1, MAX_GAMES_PER_SCREEN),
            selected: 0,
        }
    }

    pub fn max_index(&self, len: usize) -> usize {
        len.saturating_sub(self.games_per_screen)
    }

    /// Scroll the strip by `direction` cards, staying inside
    /// `[0, max(0, len - games_per_screen)]`.
    pub fn change_page(&mut self, direction: isize, len: usize) {
        let target = self.current_index as isize + direction;
        self.current_index = target.clamp(0, self.max_index(len) as isize) as usize;
        self.keep_selection_visible(len);
    }

    /// Re-apply bounds after the collection shrank.
    pub fn clamp(&mut self, len: usize) {
        self.current_index = self.current_index.min(self.max_index(len));
        self.keep_selection_visible(len);
    }

    pub fn visible(&self, len: usize) -> Range<usize> {
        let start = self.current_index.min(len);
        start..(start + self.games_per_screen).min(len)
    }

    pub fn can_scroll_back(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_scroll_forward(&self, len: usize) -> bool {
        self.current_index < self.max_index(len)
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        if self.selected >= self.current_index + self.games_per_screen {
            self.change_page(1, len);
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        if self.selected < self.current_index {
            self.change_page(-1, len);
        }
    }

    fn keep_selection_visible(&mut self, len: usize) {
        let visible = self.visible(len);
        if visible.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.clamp(visible.start, visible.end - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_page_stays_in_bounds_for_all_lengths() {
        for page in 1..5 {
            for len in 0..12 {
                let mut screen = MainScreen::new(page);
                for step in [1, 1, 1, -1, 5, 20, -3, -20, 2, 1, 1, 1, 1] {
                    screen.change_page(step, len);
                    assert!(screen.current_index <= len.saturating_sub(page));
                    assert!(screen.visible(len).len() <= page);
                }
            }
        }
    }

    #[test]
    fn cards_per_screen_is_bounded() {
        assert_eq!(MainScreen::new(0).games_per_screen, 1);
        assert_eq!(MainScreen::new(9).games_per_screen, 9);
        assert_eq!(MainScreen::new(usize::MAX).games_per_screen, MAX_GAMES_PER_SCREEN);
        let mut screen = MainScreen::new(1_000_000);
        screen.change_page(1, 20);
        assert_eq!(screen.current_index, 1);
    }

    #[test]
    fn last_page_shows_a_full_window() {
        let mut screen = MainScreen::new(3);
        for _ in 0..10 {
            screen.change_page(1, 7);
        }
        assert_eq!(screen.current_index, 4);
        assert_eq!(screen.visible(7), 4..7);
        assert!(!screen.can_scroll_forward(7));
        assert!(screen.can_scroll_back());
    }

    #[test]
    fn short_list_never_scrolls() {
        let mut screen = MainScreen::new(3);
        screen.change_page(1, 2);
        assert_eq!(screen.current_index, 0);
        assert_eq!(screen.visible(2), 0..2);
        assert!(!screen.can_scroll_forward(2));
    }

    #[test]
    fn selection_drags_the_window() {
        let mut screen = MainScreen::new(2);
        screen.select_next(5);
        assert_eq!((screen.selected, screen.current_index), (1, 0));
        screen.select_next(5);
        assert_eq!((screen.selected, screen.current_index), (2, 1));
        screen.select_prev(5);
        screen.select_prev(5);
        assert_eq!((screen.selected, screen.current_index), (0, 0));
    }

    #[test]
    fn clamp_after_shrink() {
        let mut screen = MainScreen::new(3);
        screen.change_page(4, 7);
        screen.selected = 6;
        screen.clamp(4);
        assert_eq!(screen.current_index, 1);
        assert_eq!(screen.selected, 3);
        screen.clamp(0);
        assert_eq!((screen.current_index, screen.selected), (0, 0));
    }
}
