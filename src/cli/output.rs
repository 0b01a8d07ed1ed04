//! Output formatting utilities

use crate::domain::{Form, QuestionKind};
use crate::infrastructure::{FormEntry, PageEntry};

/// Format a list of pages for display
pub fn format_page_list(pages: &[PageEntry]) -> String {
    if pages.is_empty() {
        return "No pages found".to_string();
    }

    let width = pages.iter().map(|p| p.slug.len()).max().unwrap_or(0);
    let mut output = String::new();
    for page in pages {
        output.push_str(&format!(
            "{:<width$}  {:<12}  {}\n",
            page.slug,
            page.path,
            page.title,
            width = width
        ));
    }
    output
}

/// Format a list of forms for display
pub fn format_form_list(forms: &[FormEntry]) -> String {
    if forms.is_empty() {
        return "No forms found".to_string();
    }

    let mut output = String::new();
    for entry in forms {
        let form = &entry.form;
        output.push_str(&format!(
            "{}  {} ({} questions, {} required)\n",
            form.id,
            form.title,
            form.questions.len(),
            form.required_count()
        ));
    }
    output
}

/// Format a form and its questions
pub fn format_form(form: &Form) -> String {
    let mut output = format!("{} [{}]\n", form.title, form.id);
    if let Some(description) = &form.description {
        output.push_str(&format!("{}\n", description));
    }
    output.push('\n');

    for (index, question) in form.questions.iter().enumerate() {
        let marker = if question.required { "*" } else { "" };
        output.push_str(&format!(
            "{}. {}{} ({})",
            index + 1,
            question.title,
            marker,
            question.question_type()
        ));
        match &question.kind {
            QuestionKind::Rating { max_rating } => {
                output.push_str(&format!(" 1-{}", max_rating));
            }
            QuestionKind::MultipleChoice {
                options,
                allow_multiple,
            } => {
                output.push_str(&format!(": {}", options.join(" / ")));
                if *allow_multiple {
                    output.push_str(" [multi]");
                }
            }
            QuestionKind::Dropdown { options } => {
                output.push_str(&format!(": {}", options.join(" / ")));
            }
            _ => {}
        }
        output.push('\n');
    }

    output.push_str(&format!("\nSubmit: {}\n", form.settings.submit_button_text));
    output
}
