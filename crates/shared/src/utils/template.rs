use askama::{Error, Template};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Content of a notification email. An empty `link` hides the button.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmailTemplateData {
    pub title: String,
    pub message: String,
    pub button: String,
    pub link: String,
}

#[derive(Template)]
#[template(path = "email.html")]
pub struct EmailTemplate<'a> {
    pub data: &'a EmailTemplateData,
}

#[derive(Template)]
#[template(path = "email.txt")]
struct PlainEmailTemplate<'a> {
    data: &'a EmailTemplateData,
}

/// Both bodies of a multipart/alternative message.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

pub fn render_email(data: &EmailTemplateData) -> Result<RenderedEmail, Error> {
    let html = EmailTemplate { data }.render()?;
    let text = PlainEmailTemplate { data }.render()?;

    debug!(title = %data.title, "Rendered email");
    Ok(RenderedEmail { html, text })
}
