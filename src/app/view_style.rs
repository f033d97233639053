use ratatui::style::{Color, Modifier, Style};

use crate::domain::Category;

pub(super) fn text_color_for_bg(bg_color: Color) -> Color {
    if let Color::Rgb(r, g, b) = bg_color {
        let brightness = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if brightness > 128 {
            Color::Black
        } else {
            Color::White
        }
    } else {
        Color::White
    }
}

pub(super) fn category_button_style(category: Category, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(text_color_for_bg(category.color()))
            .bg(category.color())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(category.color())
    }
}

pub(super) fn button_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}
