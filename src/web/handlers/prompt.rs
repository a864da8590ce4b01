// GET /: render the Duo prompt page for `?user=<name>`.
//
// The signed request (or the legacy ERR| string when signing fails) goes
// into the iframe's data-sig-request attribute, where Duo-Web-v2.js picks
// it up together with data-host.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::warn;

use crate::handshake::sign_request;
use crate::web::AppState;

#[derive(Deserialize)]
pub struct PromptQuery {
    user: Option<String>,
}

pub async fn show_prompt(
    State(state): State<AppState>,
    Query(query): Query<PromptQuery>,
) -> Response {
    let Some(user) = query.user.filter(|u| !u.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            "You must include a user to authenticate with Duo",
        )
            .into_response();
    };

    let sig_request = match sign_request(&state.credentials, &user) {
        Ok(sig) => sig,
        Err(e) => {
            warn!(error = %e, "could not sign Duo request");
            e.to_string()
        }
    };

    Html(render_prompt(&state.config.api_host, &sig_request)).into_response()
}

/// Build the prompt page HTML.
pub fn render_prompt(api_host: &str, sig_request: &str) -> String {
    format!(
        r#"<html>
  <head>
    <title>Duo Authentication</title>
    <meta name='viewport' content='width=device-width, initial-scale=1'>
    <meta http-equiv='X-UA-Compatible' content='IE=edge'>
    <link rel='stylesheet' type='text/css' href='Duo-Frame.css'>
  </head>
  <body>
    <h1>Duo Authentication</h1>
    <script src='/Duo-Web-v2.js'></script>
    <iframe id='duo_iframe'
            title='Two-Factor Authentication'
            frameborder='0'
            data-host='{host}'
            data-sig-request='{sig}'>
    </iframe>
  </body>
</html>
"#,
        host = escape_attr(api_host),
        sig = escape_attr(sig_request),
    )
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_embeds_host_and_request() {
        let html = render_prompt("api-123.duosecurity.com", "TX|abc|def:APP|ghi|jkl");
        assert!(html.contains("data-host='api-123.duosecurity.com'"));
        assert!(html.contains("data-sig-request='TX|abc|def:APP|ghi|jkl'"));
        assert!(html.contains("<script src='/Duo-Web-v2.js'></script>"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let html = render_prompt("x' onload='alert(1)", "<b>&");
        assert!(html.contains("data-host='x&#39; onload=&#39;alert(1)'"));
        assert!(html.contains("data-sig-request='&lt;b&gt;&amp;'"));
    }
}
