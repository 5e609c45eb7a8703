//! Natural-language summary of completed activities.
//!
//! The service behind [`Summarizer`] is an external collaborator. Callers get
//! a string back in every case: missing credentials, an empty history and
//! upstream failures all resolve to a localized fallback message. Returned
//! text may carry `**bold**` markup, which is passed through untouched.

mod credentials;
mod gemini;
mod prompt;

pub use credentials::{forget_api_key, resolve_api_key, store_api_key};
pub use gemini::GeminiSummarizer;
pub use prompt::{PromptTemplate, DEFAULT_SYSTEM_INSTRUCTION, DEFAULT_TEMPLATE};

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::history::{HistoryItem, Locale};

pub trait Summarizer {
    /// Produce a summary of `items`. Never fails.
    fn summarize(&self, items: &[HistoryItem]) -> impl Future<Output = String> + Send;
}

/// User-facing messages used in place of a summary.
#[derive(Debug, Clone)]
pub struct Fallbacks {
    pub missing_key: String,
    pub empty_history: String,
    pub upstream_error: String,
    pub empty_response: String,
}

impl Fallbacks {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                missing_key: "API key not configured. Set TIMESHEET_API_KEY or run `timesheet summary --set-key <KEY>`.".into(),
                empty_history: "No completed activities to analyze.".into(),
                upstream_error: "An error occurred while contacting the AI to generate the summary.".into(),
                empty_response: "Could not generate the summary.".into(),
            },
            Locale::PtBr => Self {
                missing_key: "Chave de API não configurada. Defina TIMESHEET_API_KEY ou execute `timesheet summary --set-key <KEY>`.".into(),
                empty_history: "Nenhuma atividade concluída para analisar.".into(),
                upstream_error: "Ocorreu um erro ao conectar com a IA para gerar o resumo.".into(),
                empty_response: "Não foi possível gerar o resumo.".into(),
            },
        }
    }
}

/// Single-request gate. A second request while one is pending is refused
/// rather than queued.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: AtomicBool,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the gate. Returns `None` if a request is already pending; the
    /// gate reopens when the guard is dropped.
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { busy: &self.busy })
    }
}

pub struct InFlightGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Run `summarizer` over a snapshot of `items` unless another request holds
/// `gate`. Returns `None` when refused.
pub async fn request_summary<S: Summarizer>(
    summarizer: &S,
    gate: &InFlight,
    items: &[HistoryItem],
) -> Option<String> {
    let _guard = gate.try_begin()?;
    Some(summarizer.summarize(items).await)
}
