use indoc::indoc;

use crate::format::format_verbose;
use crate::history::HistoryItem;

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful productivity assistant.";

pub const DEFAULT_TEMPLATE: &str = indoc! {"
    Analyze the following activity log (timesheet) of a user:

    {tasks}

    Please provide a short, motivating and productive summary.
    1. Group similar tasks if there are any and add up their times.
    2. Highlight the main area of focus.
    3. Use Markdown formatting (bold for highlights).
    4. Be concise (at most 3 paragraphs).

    Answer in a professional but friendly tone.
"};

const TASKS_PLACEHOLDER: &str = "{tasks}";

/// Instruction text handed to the summary service.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute the activity list into the template. A template without
    /// the placeholder gets the list appended.
    pub fn render(&self, items: &[HistoryItem]) -> String {
        let tasks = task_lines(items);
        if self.template.contains(TASKS_PLACEHOLDER) {
            self.template.replace(TASKS_PLACEHOLDER, &tasks)
        } else {
            format!("{}\n\n{}", self.template.trim_end(), tasks)
        }
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

fn task_lines(items: &[HistoryItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "- Activity: \"{}\", Duration: {}",
                item.description,
                format_verbose(item.total_duration)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
