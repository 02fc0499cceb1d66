//! JSON session API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::replay::{History, Outcome, Payload, Token};
use crate::web::error::WebError;
use crate::web::state::WebAppState;

/// A token as clients send it back: the number from a previous response, or
/// the same number as a string. Anything else still deserializes so the
/// handler can reject it as an unknown token rather than a bad body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TokenParam {
    Number(u64),
    Text(String),
    Other(IgnoredAny),
}

impl TokenParam {
    fn resolve(param: Option<&TokenParam>) -> Result<Token, WebError> {
        match param {
            Some(TokenParam::Number(n)) => Ok(Token::new(*n)),
            Some(TokenParam::Text(s)) => Ok(s.parse::<Token>()?),
            Some(TokenParam::Other(_)) => Err(WebError::UnknownToken("<not a token>".to_string())),
            None => Err(WebError::UnknownToken("<missing>".to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContinueSessionRequest {
    /// `null` and an absent field both land here as `None`.
    #[serde(default)]
    pub token: Option<TokenParam>,
    #[serde(default)]
    pub payload: Payload,
}

pub async fn start_session(
    State(state): State<WebAppState>,
) -> Result<(StatusCode, Json<Outcome>), WebError> {
    let outcome = state.engine().serve_start()?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn continue_session(
    State(state): State<WebAppState>,
    Json(req): Json<ContinueSessionRequest>,
) -> Result<Json<Outcome>, WebError> {
    let token = TokenParam::resolve(req.token.as_ref())?;
    let outcome = state.engine().serve_continue(token, &req.payload)?;
    Ok(Json(outcome))
}

pub async fn get_history(
    State(state): State<WebAppState>,
    Path(token): Path<String>,
) -> Result<Json<History>, WebError> {
    let token = token.parse::<Token>()?;
    let history = state.engine().history(token)?;
    Ok(Json(history))
}
