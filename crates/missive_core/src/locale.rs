use crate::DispatchOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Japanese,
}

impl Locale {
    /// Maps a POSIX-style locale tag (`ja_JP.UTF-8`, `en_US`, `C`) to a locale.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag
            .split(['_', '.', '-', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match lang.as_str() {
            "ja" => Some(Self::Japanese),
            "en" | "c" | "posix" => Some(Self::English),
            _ => None,
        }
    }

    pub fn labels(self) -> StatusLabels {
        match self {
            Self::English => StatusLabels {
                pending: "Sending...",
                success_prefix: "✅ ",
                failure_prefix: "❌ Error: ",
                transport_failure: "❌ Communication error",
            },
            Self::Japanese => StatusLabels {
                pending: "送信中...",
                success_prefix: "✅ ",
                failure_prefix: "❌ エラー: ",
                transport_failure: "❌ 通信エラー",
            },
        }
    }
}

/// Localized status annotations shown next to each message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLabels {
    pub pending: &'static str,
    pub success_prefix: &'static str,
    pub failure_prefix: &'static str,
    pub transport_failure: &'static str,
}

impl StatusLabels {
    pub fn result_text(&self, outcome: &DispatchOutcome) -> String {
        match outcome {
            DispatchOutcome::ApplicationSuccess(message) => {
                format!("{}{}", self.success_prefix, message)
            }
            DispatchOutcome::ApplicationFailure(message) => {
                format!("{}{}", self.failure_prefix, message)
            }
            DispatchOutcome::TransportFailure => self.transport_failure.to_string(),
        }
    }
}
