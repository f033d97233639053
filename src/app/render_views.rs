use std::time::Instant;

use itertools::Itertools;
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    constants::PLOTS_PER_FIELD,
    domain::{Category, Stage},
    garden::{FrameView, PlotView, Screen, format_clock},
};

use super::{App, layout::ScreenLayout, ui_helpers::truncate_label, view_style};

const SOIL: [char; 3] = ['.', ',', '`'];

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        if self.layout.area != size {
            self.layout = ScreenLayout::new(size);
        }

        let view = self.garden.view(Instant::now());
        match view.screen {
            Screen::Home => self.draw_home(f, &view),
            Screen::Garden { dev_overlay } => {
                self.draw_garden(f, &view);
                if dev_overlay {
                    self.draw_dev_overlay(f);
                }
            }
            Screen::NameInput => {
                self.draw_garden(f, &view);
                self.draw_name_modal(f, &view);
            }
        }
        self.draw_status(f, &view);
    }

    fn draw_home(&self, f: &mut Frame, view: &FrameView) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    "Thriving like Trees",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            )
            .border_style(Style::default().fg(Color::Green));
        f.render_widget(block, self.layout.area);

        let greeting = Rect::new(
            self.layout.area.x,
            self.layout.enter_garden.y.saturating_sub(3),
            self.layout.area.width,
            1,
        );
        f.render_widget(
            Paragraph::new(format!("Welcome back, {}", view.owner_name))
                .alignment(Alignment::Center),
            greeting,
        );

        f.render_widget(
            Paragraph::new("Enter the garden")
                .alignment(Alignment::Center)
                .style(view_style::button_style(true))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::Green)),
                ),
            self.layout.enter_garden,
        );
    }

    fn draw_garden(&mut self, f: &mut Frame, view: &FrameView) {
        let border_color = view.selected.map_or(Color::White, Category::color);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    format!("Garden {}/{}", view.viewed_field + 1, view.field_count),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .title(
                Line::from(Span::styled(
                    view.timer_text.as_str(),
                    Style::default().fg(Color::White),
                ))
                .alignment(Alignment::Center),
            )
            .title(Line::from(view.owner_name.as_str()).alignment(Alignment::Right))
            .border_style(Style::default().fg(border_color));
        f.render_widget(block, self.layout.area);

        self.draw_arrows(f, view);
        for (slot, plot) in view.plots.iter().enumerate().take(PLOTS_PER_FIELD) {
            let seed = (view.viewed_field * PLOTS_PER_FIELD + slot) as u64;
            self.draw_plot(f, self.layout.plots[slot], plot, seed);
        }
        self.draw_panel(f, view);
    }

    fn draw_arrows(&self, f: &mut Frame, view: &FrameView) {
        let can_prev = view.viewed_field > 0;
        let can_next = view.viewed_field + 1 < view.field_count;

        for (rect, glyph, enabled) in [
            (self.layout.prev_page, "<", can_prev),
            (self.layout.next_page, ">", can_next),
        ] {
            let middle = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1);
            f.render_widget(
                Paragraph::new(glyph)
                    .alignment(Alignment::Center)
                    .style(view_style::button_style(enabled)),
                middle,
            );
        }
    }

    fn draw_plot(&mut self, f: &mut Frame, rect: Rect, plot: &PlotView, seed: u64) {
        let label_width = rect.width.saturating_sub(4) as usize;
        let (title, color, stage, art, footer) = match plot {
            PlotView::Empty => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray));
                let soil = soil_lines(rect, seed);
                f.render_widget(
                    Paragraph::new(soil)
                        .style(Style::default().fg(Color::Rgb(120, 85, 50)))
                        .block(block),
                    rect,
                );
                return;
            }
            PlotView::Planted {
                category,
                elapsed_secs,
                label,
                stage,
                asset,
            } => (
                truncate_label(label, label_width),
                category.color(),
                *stage,
                self.sprites.lookup(asset),
                format!("{} {}", category.name(), format_clock(*elapsed_secs)),
            ),
            PlotView::Growing {
                category,
                elapsed_secs,
                stage,
                asset,
            } => (
                "growing...".to_string(),
                category.color(),
                *stage,
                self.sprites.lookup(asset),
                format!("{} {}", category.name(), format_clock(*elapsed_secs)),
            ),
        };

        let art_style = match stage {
            Stage::Grown => Style::default().fg(color).add_modifier(Modifier::BOLD),
            _ => Style::default().fg(color),
        };
        let mut lines: Vec<Line> = art
            .iter()
            .map(|row| Line::from(Span::styled(*row, art_style)))
            .collect();
        lines.push(Line::from(Span::styled(
            truncate_label(&footer, label_width),
            Style::default().fg(Color::Gray),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(title).alignment(Alignment::Center))
            .border_style(Style::default().fg(color));
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            rect,
        );
    }

    fn draw_panel(&self, f: &mut Frame, view: &FrameView) {
        for (rect, category) in self.layout.categories.iter().zip(Category::ALL) {
            let selected = view.selected == Some(category);
            let marker = if selected { "● " } else { "○ " };
            f.render_widget(
                Paragraph::new(format!("{}{}", marker, category.name()))
                    .alignment(Alignment::Center)
                    .style(view_style::category_button_style(category, selected))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(category.color())),
                    ),
                *rect,
            );
        }

        let start_label = if view.running { "STOP" } else { "START" };
        let start_color = if view.running { Color::Red } else { Color::Green };
        f.render_widget(
            Paragraph::new(start_label)
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(start_color)
                        .add_modifier(Modifier::BOLD),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Thick)
                        .border_style(Style::default().fg(start_color)),
                ),
            self.layout.start_stop,
        );

        let dev_active = matches!(view.screen, Screen::Garden { dev_overlay: true });
        for (rect, label, active) in [
            (self.layout.home, "Home", true),
            (self.layout.dev_toggle, "Dev tools", dev_active),
        ] {
            f.render_widget(
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .style(view_style::button_style(active))
                    .block(Block::default().borders(Borders::ALL)),
                rect,
            );
        }
    }

    fn draw_dev_overlay(&self, f: &mut Frame) {
        for (rect, label) in [
            (self.layout.backup_reset, "Backup & reset"),
            (self.layout.add_time, "+15 min"),
        ] {
            f.render_widget(Clear, rect);
            f.render_widget(
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Double)
                            .border_style(Style::default().fg(Color::Yellow)),
                    ),
                rect,
            );
        }
    }

    fn draw_name_modal(&self, f: &mut Frame, view: &FrameView) {
        let rect = self.layout.name_modal;
        f.render_widget(Clear, rect);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{}_", view.name_entry),
                Style::default().fg(Color::Black).bg(Color::White),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "(Press Enter to Save)",
                Style::default().fg(Color::Gray),
            )),
        ];
        let border_color = view.selected.map_or(Color::White, Category::color);
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(
                        Line::from(format!("Name this session ({})", view.timer_text))
                            .alignment(Alignment::Center),
                    )
                    .border_style(Style::default().fg(border_color)),
            ),
            rect,
        );
    }

    fn draw_status(&self, f: &mut Frame, view: &FrameView) {
        let line = if let Some(banner) = &view.error_banner {
            Line::from(Span::styled(
                banner.as_str(),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ))
        } else if let Some(warning) = &view.warning {
            Line::from(Span::styled(
                warning.text.as_str(),
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(Span::styled(
                hints(view.screen),
                Style::default().fg(Color::DarkGray),
            ))
        };

        if matches!(view.screen, Screen::Home) {
            let rect = Rect::new(
                self.layout.area.x + 1,
                self.layout.area.bottom().saturating_sub(2),
                self.layout.area.width.saturating_sub(2),
                1,
            );
            f.render_widget(Paragraph::new(line).alignment(Alignment::Center), rect);
        } else {
            f.render_widget(
                Paragraph::new(line).alignment(Alignment::Center),
                self.layout.status,
            );
        }
    }
}

fn hints(screen: Screen) -> String {
    let pairs: &[(&str, &str)] = match screen {
        Screen::Home => &[("enter", "garden"), ("q", "quit")],
        Screen::Garden { dev_overlay: false } => &[
            ("1-3", "plant"),
            ("space", "start/stop"),
            ("←/→", "page"),
            ("h", "home"),
            ("d", "dev"),
            ("q", "quit"),
        ],
        Screen::Garden { dev_overlay: true } => &[
            ("r", "backup & reset"),
            ("t", "+15 min"),
            ("d", "close dev"),
            ("q", "quit"),
        ],
        Screen::NameInput => &[("enter", "save")],
    };
    pairs
        .iter()
        .map(|(key, action)| format!("{} {}", key, action))
        .join("  ")
}

fn soil_lines(rect: Rect, seed: u64) -> Vec<Line<'static>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let width = rect.width.saturating_sub(2) as usize;
    let height = rect.height.saturating_sub(2) as usize;

    (0..height)
        .map(|_| {
            let row: String = (0..width)
                .map(|_| {
                    if rng.gen_bool(0.12) {
                        SOIL[rng.gen_range(0..SOIL.len())]
                    } else {
                        ' '
                    }
                })
                .collect();
            Line::from(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRID_SIDE;

    #[test]
    fn test_soil_is_stable_per_seed() {
        let rect = Rect::new(0, 0, 12, 6);
        assert_eq!(soil_lines(rect, 4), soil_lines(rect, 4));
        assert_eq!(soil_lines(rect, 4).len(), 4);
    }

    #[test]
    fn test_hints_join_pairs() {
        assert_eq!(hints(Screen::Home), "enter garden  q quit");
        assert_eq!(hints(Screen::NameInput), "enter save");
    }

    #[test]
    fn test_grid_side_matches_plot_count() {
        assert_eq!(GRID_SIDE * GRID_SIDE, PLOTS_PER_FIELD);
    }
}
