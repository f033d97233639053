use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::{
    constants::{GRID_SIDE, PLOTS_PER_FIELD},
    domain::Category,
    garden::{Control, Screen},
};

use super::ui_helpers::{centered_rect, inset};

const ARROW_WIDTH: u16 = 5;
const PANEL_WIDTH: u16 = 20;
const BUTTON_HEIGHT: u16 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct ScreenLayout {
    pub(super) area: Rect,
    pub(super) enter_garden: Rect,
    pub(super) prev_page: Rect,
    pub(super) next_page: Rect,
    pub(super) plots: [Rect; PLOTS_PER_FIELD],
    pub(super) categories: [Rect; 3],
    pub(super) start_stop: Rect,
    pub(super) home: Rect,
    pub(super) dev_toggle: Rect,
    pub(super) backup_reset: Rect,
    pub(super) add_time: Rect,
    pub(super) status: Rect,
    pub(super) name_modal: Rect,
}

impl ScreenLayout {
    pub(super) fn new(area: Rect) -> Self {
        let inner = inset(area, 1);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);
        let (body, status) = (rows[0], rows[1]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(ARROW_WIDTH),
                Constraint::Min(0),
                Constraint::Length(ARROW_WIDTH),
                Constraint::Length(PANEL_WIDTH),
            ])
            .split(body);
        let (prev_page, grid, next_page, panel) = (columns[0], columns[1], columns[2], columns[3]);

        let panel_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Min(0),
            ])
            .split(panel);

        Self {
            area,
            enter_garden: centered_rect(area, 26, BUTTON_HEIGHT),
            prev_page,
            next_page,
            plots: plot_rects(grid),
            categories: [panel_rows[0], panel_rows[1], panel_rows[2]],
            start_stop: panel_rows[3],
            home: panel_rows[4],
            dev_toggle: panel_rows[5],
            backup_reset: panel_rows[6],
            add_time: panel_rows[7],
            status,
            name_modal: centered_rect(area, area.width.saturating_mul(3) / 5, 7),
        }
    }

    pub(super) fn hit_test(&self, screen: Screen, column: u16, row: u16) -> Option<Control> {
        let hit = |rect: Rect| contains(rect, column, row);

        match screen {
            Screen::Home => hit(self.enter_garden).then_some(Control::EnterGarden),
            Screen::NameInput => None,
            Screen::Garden { dev_overlay } => {
                if let Some(i) = self.categories.iter().position(|&rect| hit(rect)) {
                    return Some(Control::SelectCategory(Category::ALL[i]));
                }
                if dev_overlay && hit(self.backup_reset) {
                    return Some(Control::BackupAndReset);
                }
                if dev_overlay && hit(self.add_time) {
                    return Some(Control::AddFifteenMinutes);
                }
                [
                    (self.start_stop, Control::StartStop),
                    (self.home, Control::Home),
                    (self.dev_toggle, Control::ToggleDevOverlay),
                    (self.prev_page, Control::PrevPage),
                    (self.next_page, Control::NextPage),
                ]
                .into_iter()
                .find(|&(rect, _)| hit(rect))
                .map(|(_, control)| control)
            }
        }
    }
}

fn plot_rects(grid: Rect) -> [Rect; PLOTS_PER_FIELD] {
    let thirds = [
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(thirds)
        .split(grid);

    let mut plots = [Rect::default(); PLOTS_PER_FIELD];
    for (r, row) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(thirds)
            .split(*row);
        for (c, cell) in cells.iter().enumerate() {
            plots[r * GRID_SIDE + c] = *cell;
        }
    }
    plots
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ScreenLayout {
        ScreenLayout::new(Rect::new(0, 0, 100, 40))
    }

    fn center(rect: Rect) -> (u16, u16) {
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    #[test]
    fn test_home_only_hits_enter_button() {
        let layout = layout();
        let (x, y) = center(layout.enter_garden);
        assert_eq!(
            layout.hit_test(Screen::Home, x, y),
            Some(Control::EnterGarden)
        );
        assert_eq!(layout.hit_test(Screen::Home, 0, 0), None);
    }

    #[test]
    fn test_garden_buttons_resolve() {
        let layout = layout();
        let garden = Screen::Garden { dev_overlay: false };

        let (x, y) = center(layout.categories[1]);
        assert_eq!(
            layout.hit_test(garden, x, y),
            Some(Control::SelectCategory(Category::Work))
        );
        let (x, y) = center(layout.start_stop);
        assert_eq!(layout.hit_test(garden, x, y), Some(Control::StartStop));
        let (x, y) = center(layout.prev_page);
        assert_eq!(layout.hit_test(garden, x, y), Some(Control::PrevPage));
        let (x, y) = center(layout.next_page);
        assert_eq!(layout.hit_test(garden, x, y), Some(Control::NextPage));
        let (x, y) = center(layout.plots[4]);
        assert_eq!(layout.hit_test(garden, x, y), None);
    }

    #[test]
    fn test_dev_buttons_need_overlay() {
        let layout = layout();
        let (x, y) = center(layout.backup_reset);

        assert_eq!(
            layout.hit_test(Screen::Garden { dev_overlay: false }, x, y),
            None
        );
        assert_eq!(
            layout.hit_test(Screen::Garden { dev_overlay: true }, x, y),
            Some(Control::BackupAndReset)
        );
        assert_eq!(layout.hit_test(Screen::NameInput, x, y), None);
    }

    #[test]
    fn test_plots_are_row_major() {
        let layout = layout();
        assert!(layout.plots[0].x < layout.plots[1].x);
        assert_eq!(layout.plots[0].y, layout.plots[2].y);
        assert!(layout.plots[3].y > layout.plots[0].y);
        assert_eq!(layout.plots[3].x, layout.plots[0].x);
    }
}
