//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's palette, with a separate
//! set of indexed colors for light backgrounds.

use std::sync::atomic::{AtomicBool, Ordering};

use ratatui::style::{Color, Modifier, Style};

use crate::editor::RuleKind;

static LIGHT_BACKGROUND: AtomicBool = AtomicBool::new(false);

/// Select the light or dark palette.
pub fn set_light_background(light: bool) {
    LIGHT_BACKGROUND.store(light, Ordering::Relaxed);
}

pub fn is_light_background() -> bool {
    LIGHT_BACKGROUND.load(Ordering::Relaxed)
}

/// Style for text shown under a transformation rule.
pub fn style_for_rule(kind: RuleKind) -> Style {
    let light_bg = is_light_background();
    match kind {
        RuleKind::Heading(1) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Cyan
            })
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        RuleKind::Heading(2) => Style::default()
            .fg(if light_bg {
                Color::Indexed(22)
            } else {
                Color::Green
            })
            .add_modifier(Modifier::BOLD),
        RuleKind::Heading(3) => Style::default()
            .fg(if light_bg {
                Color::Indexed(58)
            } else {
                Color::Yellow
            })
            .add_modifier(Modifier::BOLD),
        RuleKind::Heading(4) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Blue
            })
            .add_modifier(Modifier::BOLD),
        RuleKind::Heading(5) => Style::default()
            .fg(if light_bg {
                Color::Indexed(54)
            } else {
                Color::Magenta
            })
            .add_modifier(Modifier::BOLD),
        RuleKind::Heading(_) => Style::default()
            .fg(if light_bg {
                Color::Indexed(238)
            } else {
                Color::Indexed(250)
            })
            .add_modifier(Modifier::BOLD),
        RuleKind::BlockQuote => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Blue
            })
            .add_modifier(Modifier::ITALIC),
    }
}

/// Muted style for the indicator shown on the cursor line.
pub fn indicator_style() -> Style {
    Style::default()
        .fg(if is_light_background() {
            Color::Indexed(248)
        } else {
            Color::DarkGray
        })
        .add_modifier(Modifier::DIM)
}

/// Left bar drawn in a blockquote's margin.
pub fn quote_bar_style() -> Style {
    Style::default().fg(if is_light_background() {
        Color::Indexed(245)
    } else {
        Color::Indexed(240)
    })
}

pub fn gutter_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Gutter number of the cursor line.
pub fn gutter_active_style() -> Style {
    Style::default()
        .fg(if is_light_background() {
            Color::Black
        } else {
            Color::White
        })
        .add_modifier(Modifier::BOLD)
}

pub fn status_style() -> Style {
    Style::default().bg(Color::Magenta).fg(Color::White)
}
