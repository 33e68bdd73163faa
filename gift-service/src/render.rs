//! Server-side rendering of the landing page.
//!
//! Everything coming from the model is untrusted: text is HTML-escaped and
//! any field may be missing.

use std::fmt::Write;

use gift_core::{GiftRecommendation, SuggestionOutcome, SuggestionResult};
use html_escape::{encode_double_quoted_attribute, encode_text};

pub const HERO_TEXT: &str = "Never Miss a Birthday 🎉 & Find the Perfect Gift 🎁";
const PLACEHOLDER: &str = "E.g., Gift ideas for sister turning 18";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything the page needs; `outcome: None` means nothing submitted yet.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub input: String,
    pub client_id: String,
    pub busy: bool,
    pub outcome: Option<SuggestionOutcome>,
    pub notification: Option<Notification>,
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Birthday Reminder</title>\n</head>\n<body>\n",
    );

    if let Some(notification) = &view.notification {
        let class = match notification.level {
            NotificationLevel::Success => "toast toast-success",
            NotificationLevel::Error => "toast toast-error",
        };
        let _ = writeln!(
            html,
            "<div class=\"{class}\" role=\"status\">{}</div>",
            encode_text(&notification.message)
        );
    }

    let _ = writeln!(html, "<section id=\"home\">\n<h1>{}</h1>", encode_text(HERO_TEXT));
    html.push_str("<p>Personalized reminders and thoughtful birthday gift ideas 🎁✨</p>\n");
    render_form(&mut html, view);
    html.push_str("</section>\n");

    html.push_str("<section id=\"response\">\n");
    render_response(&mut html, view);
    html.push_str("</section>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, view: &PageView) {
    let disabled = if view.busy { " disabled" } else { "" };
    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/suggest\">\n\
         <input type=\"hidden\" name=\"client_id\" value=\"{client_id}\">\n\
         <input type=\"text\" name=\"query\" placeholder=\"{placeholder}\" value=\"{input}\">\n\
         <button type=\"submit\"{disabled}>Suggest</button>\n\
         </form>",
        client_id = encode_double_quoted_attribute(&view.client_id),
        placeholder = encode_double_quoted_attribute(PLACEHOLDER),
        input = encode_double_quoted_attribute(&view.input),
    );
}

fn render_response(html: &mut String, view: &PageView) {
    if view.busy {
        html.push_str("<p class=\"loading\">Generating suggestions... 🎁</p>\n");
        return;
    }

    match &view.outcome {
        None => {}
        Some(SuggestionOutcome::Error(err)) => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", multiline(&err.error));
        }
        Some(SuggestionOutcome::Suggestion(result)) => render_suggestion(html, result),
    }
}

fn render_suggestion(html: &mut String, result: &SuggestionResult) {
    html.push_str("<div class=\"suggestion\">\n");
    let _ = writeln!(
        html,
        "<h2>Birthday for {}</h2>",
        encode_text(result.recipient.as_deref().unwrap_or_default())
    );

    html.push_str("<ul>\n");
    for gift in &result.gift_recommendations {
        render_gift(html, gift);
    }
    html.push_str("</ul>\n");

    let _ = writeln!(
        html,
        "<p class=\"reminder\"><strong>Reminder:</strong> {}</p>",
        encode_text(result.reminder_message.as_deref().unwrap_or_default())
    );
    let _ = writeln!(
        html,
        "<p class=\"tip\"><strong>Pro Tip:</strong> {}</p>",
        encode_text(result.pro_tips.as_deref().unwrap_or_default())
    );
    html.push_str("</div>\n");
}

fn render_gift(html: &mut String, gift: &GiftRecommendation) {
    let _ = write!(
        html,
        "<li>\n<h3>{}</h3>\n<p>{}</p>\n<p class=\"price\">Price: {}</p>\n",
        encode_text(gift.gift.as_deref().unwrap_or_default()),
        encode_text(gift.description.as_deref().unwrap_or_default()),
        encode_text(gift.estimated_price.as_deref().unwrap_or_default()),
    );

    // Presence of a link is checked here regardless of whether the prompt asked for one.
    if let Some(link) = gift.link.as_deref() {
        if is_web_link(link) {
            let _ = writeln!(
                html,
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Buy Now</a>",
                encode_double_quoted_attribute(link)
            );
        } else {
            html.push_str("<span class=\"buy-now\">Buy Now</span>\n");
        }
    }
    html.push_str("</li>\n");
}

fn is_web_link(link: &str) -> bool {
    let lower = link.trim_start().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

fn multiline(text: &str) -> String {
    encode_text(text).replace('\n', "<br>\n")
}
