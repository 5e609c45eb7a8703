use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// Strings used for history day headings.
#[derive(Debug, Clone)]
pub struct DayLabels {
    pub locale: Locale,
    pub today: String,
    pub yesterday: String,
    /// Heading for timestamps that cannot be placed on a calendar.
    pub unknown_date: String,
}

impl DayLabels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                locale,
                today: "Today".into(),
                yesterday: "Yesterday".into(),
                unknown_date: "Unknown date".into(),
            },
            Locale::PtBr => Self {
                locale,
                today: "Hoje".into(),
                yesterday: "Ontem".into(),
                unknown_date: "Data desconhecida".into(),
            },
        }
    }

    /// Long-form date, e.g. `October 19, 2026` or `19 de outubro de 2026`.
    pub fn long_date(&self, day: NaiveDate) -> String {
        let month = day.month0() as usize;
        match self.locale {
            Locale::En => format!("{} {}, {}", MONTHS_EN[month], day.day(), day.year()),
            Locale::PtBr => {
                format!("{:02} de {} de {}", day.day(), MONTHS_PT_BR[month], day.year())
            }
        }
    }
}

impl Default for DayLabels {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}
