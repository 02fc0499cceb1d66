//! HTML for the form front end.
//!
//! Every page is a single POST form. The token of the history to resume
//! travels in a hidden input so the server needs no session state.

use std::fmt::Write;

use crate::replay::{Outcome, Status, Token};
use crate::routine::{InputKind, Prompt};
use crate::util::escape_html;

/// Name of the hidden input carrying the history token.
pub const HISTORY_FIELD: &str = "history_token";

pub fn render_outcome(outcome: &Outcome) -> String {
    let mut form = String::new();
    for line in &outcome.transcript {
        let _ = writeln!(form, "{}<br/>", escape_html(line));
    }
    match &outcome.status {
        Status::Suspended { prompt } => render_prompt(&mut form, prompt),
        Status::Done => form.push_str("Session finished. <a href=\"/\">Start over</a><br/>\n"),
    }
    page(&wrap_form(&form, outcome.token))
}

/// Re-ask `prompt` against the same `token` after a rejected answer.
pub fn render_retry(token: Token, prompt: &Prompt, error: &str) -> String {
    let mut form = String::new();
    let _ = writeln!(form, "<p class=\"error\">{}</p>", escape_html(error));
    render_prompt(&mut form, prompt);
    page(&wrap_form(&form, token))
}

fn render_prompt(form: &mut String, prompt: &Prompt) {
    let field = escape_html(&prompt.field);
    form.push_str(&escape_html(&prompt.label));
    match prompt.kind {
        InputKind::Text | InputKind::Integer => {
            let _ = writeln!(
                form,
                "<input type=\"text\" name=\"{field}\" value=\"\" autofocus>"
            );
            form.push_str("<input type=\"submit\" value=\"Enter\">\n");
        }
        InputKind::YesNo => {
            let _ = writeln!(form, "<input type=\"submit\" name=\"{field}\" value=\"Yes\">");
            let _ = writeln!(form, "<input type=\"submit\" name=\"{field}\" value=\"No\">");
        }
    }
}

fn wrap_form(body: &str, token: Token) -> String {
    format!(
        "<form method=\"POST\" action=\"/\">\n{body}<input type=\"hidden\" name=\"{HISTORY_FIELD}\" value=\"{token}\">\n</form>\n"
    )
}

/// Wrap `body` in a complete HTML document.
pub fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>retrace</title></head>\n<body>\n{body}</body>\n</html>\n"
    )
}
