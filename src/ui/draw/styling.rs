//! Styling utilities and color schemes
//!
//! Colors come from a `Palette` picked by the light/dark theme flag.

use crate::types::{HttpMethod, StatusClass};
use crate::viewer::classify::ScalarKind;
use crate::viewer::raw::TokenKind;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub focused_border: Color,
    pub unfocused_border: Color,
    pub selection_bg: Color,
    pub modal_bg: Color,
    pub key: Color,
    pub string: Color,
    pub number: Color,
    pub boolean: Color,
    pub null: Color,
    pub error: Color,
}

const DARK: Palette = Palette {
    text: Color::White,
    dim: Color::Rgb(120, 120, 120),
    accent: Color::Cyan,
    focused_border: Color::Cyan,
    unfocused_border: Color::DarkGray,
    selection_bg: Color::Rgb(60, 60, 60),
    modal_bg: Color::Rgb(30, 30, 30),
    key: Color::LightBlue,
    string: Color::Green,
    number: Color::Yellow,
    boolean: Color::Magenta,
    null: Color::Rgb(150, 150, 150),
    error: Color::Red,
};

const LIGHT: Palette = Palette {
    text: Color::Black,
    dim: Color::Rgb(130, 130, 130),
    accent: Color::Blue,
    focused_border: Color::Blue,
    unfocused_border: Color::Gray,
    selection_bg: Color::Rgb(215, 215, 215),
    modal_bg: Color::Rgb(245, 245, 245),
    key: Color::Blue,
    string: Color::Rgb(0, 128, 0),
    number: Color::Rgb(170, 90, 0),
    boolean: Color::Rgb(150, 0, 150),
    null: Color::Rgb(120, 120, 120),
    error: Color::Rgb(200, 0, 0),
};

pub fn palette(dark_mode: bool) -> Palette {
    if dark_mode {
        DARK
    } else {
        LIGHT
    }
}

impl Palette {
    pub fn border(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.focused_border
        } else {
            self.unfocused_border
        })
    }

    pub fn selected(&self, flash: bool) -> Style {
        if flash {
            Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(self.selection_bg)
        }
    }

    pub fn scalar(&self, kind: ScalarKind) -> Style {
        let color = match kind {
            ScalarKind::String => self.string,
            ScalarKind::Number => self.number,
            ScalarKind::Boolean => self.boolean,
            ScalarKind::Null => self.null,
            ScalarKind::Other => self.text,
        };
        Style::default().fg(color)
    }

    pub fn token(&self, kind: Option<TokenKind>) -> Style {
        let color = match kind {
            Some(TokenKind::Key) => self.key,
            Some(TokenKind::String) => self.string,
            Some(TokenKind::Number) => self.number,
            Some(TokenKind::Boolean) => self.boolean,
            Some(TokenKind::Null) => self.null,
            None => self.text,
        };
        Style::default().fg(color)
    }

    pub fn status(&self, class: StatusClass) -> Style {
        let color = match class {
            StatusClass::Success => Color::Green,
            StatusClass::Redirect => Color::Yellow,
            StatusClass::Failure => self.error,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Get the color for an HTTP method
pub fn get_method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::Get => Color::Green,
        HttpMethod::Post => Color::Blue,
        HttpMethod::Put => Color::Yellow,
        HttpMethod::Delete => Color::Red,
        HttpMethod::Patch => Color::Cyan,
    }
}

/// Area of the nested-view modal inside `screen`.
///
/// Mouse handling uses the same function so a click can be tested against
/// the modal bounds without a frame.
pub fn modal_area(screen: Rect) -> Rect {
    centered(screen, 80, 70)
}

pub fn history_modal_area(screen: Rect) -> Rect {
    centered(screen, 60, 50)
}

fn centered(screen: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (screen.width as u32 * percent_x as u32 / 100) as u16;
    let height = (screen.height as u32 * percent_y as u32 / 100) as u16;
    Rect {
        x: screen.x + (screen.width.saturating_sub(width)) / 2,
        y: screen.y + (screen.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Lines moved per Ctrl+U / Ctrl+D
pub const SCROLL_LINES_PER_ACTION: isize = 10;
