//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::config::Theme;

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Regular text
    pub foreground: Color,
    /// Screen background
    pub background: Color,
    /// Results and the equals key
    pub accent: Color,
    /// Operator keys
    pub operator: Color,
    /// Background of the highlighted operator key
    pub active: Color,
    /// The `Error` display, clear and quit keys
    pub error: Color,
    /// Secondary text
    pub muted: Color,
    /// Panel borders
    pub border: Color,
}

impl Palette {
    /// Returns the palette for `theme`
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                foreground: Color::Black,
                background: Color::White,
                accent: Color::Blue,
                operator: Color::Magenta,
                active: Color::Magenta,
                error: Color::Red,
                muted: Color::DarkGray,
                border: Color::Gray,
            },
            Theme::Dark => Self {
                foreground: Color::White,
                background: Color::Black,
                accent: Color::Cyan,
                operator: Color::Yellow,
                active: Color::Yellow,
                error: Color::LightRed,
                muted: Color::Gray,
                border: Color::DarkGray,
            },
        }
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Where the keypad is drawn inside a frame of size `area`.
///
/// Mouse clicks are hit-tested against this rectangle.
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    horizontal_layout(area)[1]
}

/// Main area, keypad and help sidebar
fn horizontal_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(30),    // Display and tape
            Constraint::Length(22), // Keypad
            Constraint::Length(22), // Help sidebar
        ])
        .split(area)
        .to_vec()
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
    palette: Palette,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self {
            app,
            palette: Palette::for_theme(app.theme()),
        }
    }

    fn create_layout(&self, area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // History line
                Constraint::Length(3), // Display
                Constraint::Min(3),    // Tape
            ])
            .split(area)
            .to_vec()
    }

    fn panel(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.border))
    }

    fn render_history_line(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(
            self.app.history_text(),
            Style::default().fg(self.palette.muted),
        ))
        .alignment(Alignment::Right)
        .block(self.panel(" History "))
        .render(area, buf);
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.app.state().is_faulted() {
            Style::default()
                .fg(self.palette.error)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.palette.foreground)
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Span::styled(self.app.display_text(), style))
            .alignment(Alignment::Right)
            .block(self.panel(" Display "))
            .render(area, buf);
    }

    fn render_tape(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .tape()
            .iter_rev()
            .take(area.height.saturating_sub(2) as usize)
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(&entry.expression, Style::default().fg(self.palette.muted)),
                    Span::raw(" "),
                    Span::styled(&entry.result, Style::default().fg(self.palette.accent)),
                ]))
            })
            .collect();

        List::new(items)
            .block(self.panel(" Tape (newest first) "))
            .render(area, buf);
    }

    fn render_help_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>6}"), Style::default().fg(self.palette.operator)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(self.palette.muted)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(self.panel(" Help "))
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(APP_TITLE)
            .borders(Borders::ALL)
            .style(
                Style::default()
                    .fg(self.palette.foreground)
                    .bg(self.palette.background),
            )
            .render(area, buf);

        let h_chunks = horizontal_layout(area);
        let chunks = self.create_layout(h_chunks[0]);

        self.render_history_line(chunks[0], buf);
        self.render_display(chunks[1], buf);
        self.render_tape(chunks[2], buf);
        KeypadWidget::new(self.app.keypad(), self.palette).render(h_chunks[1], buf);
        self.render_help_sidebar(h_chunks[2], buf);
    }
}

/// Title of the outer frame
pub const APP_TITLE: &str = " Luxe Calculator ";

/// Keyboard shortcuts shown in the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Enter number"),
    ("+-*/", "Operator"),
    ("Enter", "Equals"),
    ("Bksp", "Delete digit"),
    ("Esc", "Clear"),
    ("t", "Theme"),
    ("Ctrl+L", "Clear tape"),
    ("Ctrl+C", "Quit"),
];
