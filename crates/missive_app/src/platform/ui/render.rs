use std::sync::{Arc, Mutex, PoisonError};

use missive_core::{AppViewModel, Locale, MessageRowView, MessageStatus, ViewSubscriber};
use missive_logging::missive_warn;
use ratatui::backend::Backend;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph};
use ratatui::{Frame, Terminal};

use super::compose::ComposeField;
use super::constants::*;
use super::layout::{screen_labels, split, ScreenLabels};

/// Draws one full frame: header, compose field and the message list.
pub fn draw(
    frame: &mut Frame,
    view: &AppViewModel,
    compose: &ComposeField,
    labels: &ScreenLabels,
    color: bool,
) {
    let areas = split(frame.area());

    let header = Paragraph::new(vec![
        Line::styled(labels.title, Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(labels.keys, Style::default().add_modifier(Modifier::DIM)),
    ]);
    frame.render_widget(header, areas.header);
    frame.render_widget(compose.textarea(), areas.compose);

    let block = Block::bordered().title(format!(
        "{} ({} {})",
        labels.history, view.pending_count, labels.pending
    ));
    if view.messages.is_empty() {
        frame.render_widget(Paragraph::new(labels.empty_list).block(block), areas.list);
    } else {
        frame.render_widget(List::new(message_items(view, color)).block(block), areas.list);
    }
}

/// One list item per message, newest first, styled by status.
pub fn message_items(view: &AppViewModel, color: bool) -> Vec<ListItem<'static>> {
    view.messages
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let item = ListItem::new(row_lines(row, color));
            if color && index % 2 == 1 {
                item.style(Style::default().bg(STRIPE_COLOR))
            } else {
                item
            }
        })
        .collect()
}

fn row_lines(row: &MessageRowView, color: bool) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = row
        .content
        .split('\n')
        .enumerate()
        .map(|(i, text)| {
            if i == 0 {
                Line::from(vec![
                    Span::styled(
                        format!("✉ [#{}] ", row.id),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                    Span::raw(text.to_string()),
                ])
            } else {
                Line::raw(format!("   {text}"))
            }
        })
        .collect();

    let status_style = if color {
        Style::default().fg(status_color(row.status))
    } else {
        Style::default()
    };
    lines.extend(
        row.result_text
            .split('\n')
            .map(|text| Line::styled(format!("   {text}"), status_style)),
    );
    lines
}

fn status_color(status: MessageStatus) -> Color {
    match status {
        MessageStatus::Pending => PENDING_COLOR,
        MessageStatus::Success => SUCCESS_COLOR,
        MessageStatus::Failure => FAILURE_COLOR,
    }
}

/// Terminal plus the widgets that live outside the core state.
pub struct Screen<B: Backend> {
    terminal: Terminal<B>,
    compose: ComposeField,
    labels: ScreenLabels,
    color: bool,
    view: AppViewModel,
}

pub type SharedScreen<B> = Arc<Mutex<Screen<B>>>;

impl<B: Backend> Screen<B> {
    pub fn new(terminal: Terminal<B>, locale: Locale, color: bool) -> Self {
        let labels = screen_labels(locale);
        Self {
            terminal,
            compose: ComposeField::new(labels),
            labels,
            color,
            view: AppViewModel::default(),
        }
    }

    pub fn compose(&self) -> &ComposeField {
        &self.compose
    }

    pub fn compose_mut(&mut self) -> &mut ComposeField {
        &mut self.compose
    }

    /// Adopts a new projection and draws it.
    pub fn show(&mut self, view: &AppViewModel) {
        self.compose.sync(&view.compose_text, view.input_focused);
        self.view = view.clone();
        self.redraw();
    }

    pub fn redraw(&mut self) {
        let Self {
            terminal,
            compose,
            labels,
            color,
            view,
        } = self;
        if let Err(err) = terminal.draw(|frame| draw(frame, view, compose, labels, *color)) {
            missive_warn!("Failed to draw screen: {}", err);
        }
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

pub fn with_screen<B: Backend, R>(
    screen: &SharedScreen<B>,
    f: impl FnOnce(&mut Screen<B>) -> R,
) -> R {
    let mut guard = screen.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Re-draws the screen on every view change.
pub struct TerminalView<B: Backend> {
    screen: SharedScreen<B>,
}

impl<B: Backend> TerminalView<B> {
    pub fn new(screen: SharedScreen<B>) -> Self {
        Self { screen }
    }
}

impl<B: Backend + Send> ViewSubscriber for TerminalView<B> {
    fn on_view(&mut self, view: &AppViewModel) {
        with_screen(&self.screen, |screen| screen.show(view));
    }
}
