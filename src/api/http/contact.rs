// src/api/http/contact.rs

use axum::{
    extract::{Form, FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::api::cookies::{self, session_token};
use crate::api::error::ApiResult;
use crate::api::found;
use crate::api::pages::{self, Notice};
use crate::auth::Authorization;
use crate::contact::{ContactOutcome, ContactSubmission};
use crate::state::AppState;

/// Send an anonymous client to the login page, dropping any stale session cookie
fn redirect_to_login(jar: CookieJar) -> Response {
    let jar = cookies::without_session(jar);
    let jar = cookies::with_flash(jar, pages::LOGIN_REQUIRED);
    (jar, found("/login")).into_response()
}

/// GET /contact
pub async fn contact_form(State(app_state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let token = session_token(&jar);
    let session = match app_state.gate.authorize(token.as_deref()).await {
        Authorization::Allowed(session) => session,
        Authorization::RedirectToLogin => return redirect_to_login(jar),
    };

    let (jar, flash) = cookies::take_flash(jar);
    let notices: Vec<Notice<'_>> = flash.as_deref().map(Notice::Success).into_iter().collect();
    let page = pages::contact_page(&session.username, &notices, &ContactSubmission::default());
    (jar, page).into_response()
}

/// POST /contact
///
/// The body is only decoded after the session check, so anonymous clients
/// are redirected whatever they send.
pub async fn submit_contact(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
) -> ApiResult<Response> {
    let token = session_token(&jar);
    let outcome = app_state
        .contact_desk
        .submit(token.as_deref(), move || async move {
            Form::<ContactSubmission>::from_request(request, &())
                .await
                .ok()
                .map(|Form(submission)| submission)
        })
        .await?;

    let response = match outcome {
        ContactOutcome::Accepted { session } => pages::contact_page(
            &session.username,
            &[Notice::Success(pages::MESSAGE_SUBMITTED)],
            &ContactSubmission::default(),
        )
        .into_response(),
        ContactOutcome::Invalid {
            session,
            submission,
            missing,
        } => {
            let message = format!("Please fill in: {}", missing.join(", "));
            let page = pages::contact_page(
                &session.username,
                &[Notice::Error(&message)],
                &submission,
            );
            (StatusCode::BAD_REQUEST, page).into_response()
        }
        ContactOutcome::RedirectToLogin => redirect_to_login(jar),
    };

    Ok(response)
}
