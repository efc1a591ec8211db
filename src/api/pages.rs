// src/api/pages.rs
// Server-rendered HTML for the login and contact pages

use axum::http::StatusCode;
use axum::response::Html;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::contact::ContactSubmission;

pub const LOGIN_SUCCESS: &str = "Login successful";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGGED_OUT: &str = "You have been logged out.";
pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";
pub const MESSAGE_SUBMITTED: &str = "Your message has been submitted successfully!";

/// One-line banner shown above a page's form
#[derive(Debug, Clone, Copy)]
pub enum Notice<'a> {
    Info(&'a str),
    Success(&'a str),
    Error(&'a str),
}

impl Notice<'_> {
    fn render(&self) -> String {
        let (class, message) = match self {
            Notice::Info(m) => ("info", m),
            Notice::Success(m) => ("success", m),
            Notice::Error(m) => ("error", m),
        };
        format!(r#"<p class="notice {}">{}</p>"#, class, text(message))
    }
}

fn layout(title: &str, notices: &[Notice<'_>], body: &str) -> Html<String> {
    let notices: String = notices.iter().map(Notice::render).collect();
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<main>
<h1>{title}</h1>
{notices}
{body}
</main>
</body>
</html>
"#,
        title = text(title),
        notices = notices,
        body = body,
    ))
}

pub fn login_page(notices: &[Notice<'_>]) -> Html<String> {
    let body = r#"<form method="post" action="/login">
<label for="username">Username</label>
<input id="username" name="username" type="text" autocomplete="username" required>
<label for="password">Password</label>
<input id="password" name="password" type="password" autocomplete="current-password" required>
<button type="submit">Log in</button>
</form>"#;
    layout("Login", notices, body)
}

pub fn contact_page(
    username: &str,
    notices: &[Notice<'_>],
    form: &ContactSubmission,
) -> Html<String> {
    let body = format!(
        r#"<p>Signed in as {username}. <a href="/logout">Log out</a></p>
<form method="post" action="/contact">
<label for="name">Name</label>
<input id="name" name="name" type="text" value="{name}" required>
<label for="email">Email</label>
<input id="email" name="email" type="email" value="{email}" required>
<label for="phone">Phone</label>
<input id="phone" name="phone" type="tel" value="{phone}">
<label for="message">Message</label>
<textarea id="message" name="message" required>{message}</textarea>
<button type="submit">Send</button>
</form>"#,
        username = text(username),
        name = attr(&form.name),
        email = attr(&form.email),
        phone = attr(&form.phone),
        message = text(&form.message),
    );
    layout("Contact", notices, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(r#"<p>{}</p><p><a href="/">Back</a></p>"#, text(message));
    layout(title, &[], &body)
}
