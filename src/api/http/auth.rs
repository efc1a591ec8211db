// src/api/http/auth.rs

use axum::{
    extract::{Form, State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::api::cookies::{self, session_token};
use crate::api::error::ApiResult;
use crate::api::found;
use crate::api::pages::{self, Notice};
use crate::auth::{AuthError, Authorization, LoginForm};
use crate::state::AppState;

/// GET /
pub async fn index(State(app_state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let token = session_token(&jar);
    match app_state.gate.authorize(token.as_deref()).await {
        Authorization::Allowed(_) => found("/contact"),
        Authorization::RedirectToLogin => found("/login"),
    }
}

/// GET /login
pub async fn login_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = cookies::take_flash(jar);
    let notices: Vec<Notice<'_>> = flash.as_deref().map(Notice::Info).into_iter().collect();
    (jar, pages::login_page(&notices))
}

/// POST /login
///
/// A body that is not a form is treated as empty credentials.
pub async fn login(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Response> {
    let req = form.map(|Form(req)| req).unwrap_or_default();
    match app_state.gate.authenticate(&req.username, &req.password).await {
        Ok(session) => {
            // Never carry a previous session across a new login
            let previous = session_token(&jar);
            app_state.gate.logout(previous.as_deref()).await;

            let jar = cookies::with_session(jar, session.token, app_state.config.secure_cookies);
            let jar = cookies::with_flash(jar, pages::LOGIN_SUCCESS);
            Ok((jar, found("/contact")).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            Ok(pages::login_page(&[Notice::Error(pages::INVALID_CREDENTIALS)]).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(State(app_state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let token = session_token(&jar);
    app_state.gate.logout(token.as_deref()).await;

    let jar = cookies::without_session(jar);
    let jar = cookies::with_flash(jar, pages::LOGGED_OUT);
    (jar, found("/login")).into_response()
}
