use missive_core::Locale;
use ratatui::layout::{Constraint, Layout, Rect};

use super::constants::{COMPOSE_HEIGHT, HEADER_HEIGHT};

/// Fixed screen text for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLabels {
    pub title: &'static str,
    pub keys: &'static str,
    pub placeholder: &'static str,
    pub compose: &'static str,
    pub history: &'static str,
    pub pending: &'static str,
    pub empty_list: &'static str,
}

pub fn screen_labels(locale: Locale) -> ScreenLabels {
    match locale {
        Locale::English => ScreenLabels {
            title: "📩 Message Sender",
            keys: "Enter: send  Alt+Enter: new line  Ctrl+S: send  Esc: quit",
            placeholder: "Type a message",
            compose: "Message",
            history: "Sent",
            pending: "pending",
            empty_list: "No messages yet.",
        },
        Locale::Japanese => ScreenLabels {
            title: "📩 メッセージ送信アプリ",
            keys: "Enter: 送信  Alt+Enter: 改行  Ctrl+S: 送信  Esc: 終了",
            placeholder: "メッセージを入力",
            compose: "メッセージ",
            history: "送信履歴",
            pending: "送信中",
            empty_list: "まだメッセージはありません。",
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub compose: Rect,
    pub list: Rect,
}

pub fn split(area: Rect) -> ScreenAreas {
    let [header, compose, list] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(COMPOSE_HEIGHT),
        Constraint::Min(0),
    ])
    .areas(area);
    ScreenAreas {
        header,
        compose,
        list,
    }
}
