//! Plain HTML form front end.

use axum::{extract::State, response::Html, Form};

use crate::replay::{Payload, Token};
use crate::web::error::PageError;
use crate::web::render::{render_outcome, HISTORY_FIELD};
use crate::web::state::WebAppState;

/// Start a fresh session.
pub async fn get_index(State(state): State<WebAppState>) -> Result<Html<String>, PageError> {
    let outcome = state.engine().serve_start()?;
    Ok(Html(render_outcome(&outcome)))
}

/// Resume the session named by the hidden token field. Every other field is
/// handed to the pending prompt. A missing token means the root history.
pub async fn post_index(
    State(state): State<WebAppState>,
    Form(mut fields): Form<Payload>,
) -> Result<Html<String>, PageError> {
    let token = match fields.remove(HISTORY_FIELD) {
        Some(raw) => raw.parse::<Token>()?,
        None => Token::ROOT,
    };
    let outcome = state.engine().serve_continue(token, &fields)?;
    Ok(Html(render_outcome(&outcome)))
}
