// POST /: verify the sig_response the Duo iframe posts back.

use axum::extract::State;
use axum::Form;
use serde::Deserialize;
use tracing::info;

use crate::handshake::verify_response;
use crate::web::AppState;

#[derive(Deserialize)]
pub struct ResponseForm {
    #[serde(default)]
    sig_response: String,
}

pub async fn submit_response(
    State(state): State<AppState>,
    Form(form): Form<ResponseForm>,
) -> String {
    match verify_response(&state.credentials, &form.sig_response) {
        Some(user) => {
            info!(%user, "second factor verified");
            format!("Authenticated with Duo as {user}.")
        }
        None => "Did not authenticate with Duo.".to_string(),
    }
}
