use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::keymap::Keymap;
use crate::tui::navigator::{LinkView, Navigator};
use crate::tui::theme::Theme;
use crate::tui::view::{LinkStyle, Node};

/// Draws the navigator's top page
pub struct Renderer;

impl Renderer {
    pub fn render(frame: &mut Frame, theme: &Theme, keymap: &Keymap, navigator: &Navigator, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self::render_navigation_bar(frame, theme, navigator, chunks[0]);
        Self::render_body(frame, theme, navigator, chunks[1]);
        Self::render_hints(frame, theme, keymap, chunks[2]);
    }

    fn render_navigation_bar(frame: &mut Frame, theme: &Theme, navigator: &Navigator, area: Rect) {
        frame.render_widget(Block::default().style(theme.bar_style()), area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(area);

        if let Some(back) = navigator.back_label() {
            let back = Paragraph::new(Line::from(Span::styled(format!("‹ {}", back), theme.back_style())));
            frame.render_widget(back, columns[0]);
        }

        if let Some(title) = navigator.title() {
            let title = Paragraph::new(Line::from(Span::styled(title.to_string(), theme.title_style())))
                .alignment(Alignment::Center);
            frame.render_widget(title, columns[1]);
        }
    }

    fn render_body(frame: &mut Frame, theme: &Theme, navigator: &Navigator, area: Rect) {
        let links = navigator.links();
        let mut link_views = links.iter();
        let width = area.width.saturating_sub(2) as usize;

        let lines: Vec<Line> = navigator
            .top()
            .nodes()
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(Line::from(Span::styled(text.clone(), theme.text_style()))),
                // Links are listed in page order, so the views line up one-to-one
                Node::Link(_) => link_views.next().map(|view| Self::link_line(theme, view, width)),
            })
            .collect();

        let body = Paragraph::new(lines).block(Block::default().borders(Borders::NONE).style(Style::default().bg(theme.base)));
        frame.render_widget(body, area);
    }

    fn link_line(theme: &Theme, view: &LinkView<'_>, width: usize) -> Line<'static> {
        let style = theme.link_style(view.enabled, view.focused);
        match view.style {
            LinkStyle::Button => Line::from(Span::styled(format!("[ {} ]", view.label), style)),
            LinkStyle::ListRow => {
                let label_width = view.label.chars().count();
                let padding = width.saturating_sub(label_width + 1);
                Line::from(vec![
                    Span::styled(view.label.to_string(), style),
                    Span::styled(format!("{}›", " ".repeat(padding)), theme.hint_style()),
                ])
            }
        }
    }

    fn render_hints(frame: &mut Frame, theme: &Theme, keymap: &Keymap, area: Rect) {
        let spans: Vec<Span> = keymap
            .hints()
            .into_iter()
            .flat_map(|(keys, description)| {
                [
                    Span::styled(keys, theme.back_style()),
                    Span::styled(format!(" {}  ", description), theme.hint_style()),
                ]
            })
            .collect();

        let hints = Paragraph::new(Line::from(spans)).style(theme.bar_style());
        frame.render_widget(hints, area);
    }
}
