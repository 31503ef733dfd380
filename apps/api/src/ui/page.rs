//! Server-rendered HTML for the job search page.

use std::fmt::Write;

use crate::models::retrieval::{ResultCount, RetrievalResult};
use crate::search::upload::{FILE_FIELD, RESULT_COUNT_FIELD};
use crate::search::SearchOutcome;

pub const PAGE_TITLE: &str = "Job Search";
pub const UPLOAD_SUCCESS: &str = "File uploaded successfully!";
pub const MISSING_COUNT_WARNING: &str = "Please choose how many job descriptions to retrieve.";
pub const NO_MATCHES: &str = "No matching job descriptions found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice success",
            NoticeLevel::Warning => "notice warning",
            NoticeLevel::Error => "notice error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Everything the page needs to render one response.
#[derive(Debug, Default)]
pub struct PageView {
    pub result_count: ResultCount,
    pub notices: Vec<Notice>,
    pub outcome: Option<SearchOutcome>,
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:52rem;margin:2rem auto;padding:0 1rem}\
.notice{padding:.6rem .9rem;border-radius:.3rem;margin:.6rem 0}\
.success{background:#e6f4ea}.warning{background:#fff4e5}.error{background:#fdecea}\
.result{margin:1rem 0}.result pre{white-space:pre-wrap}";

pub fn render_page(view: &PageView) -> String {
    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{PAGE_TITLE}</title><style>{STYLE}</style></head><body><h1>{PAGE_TITLE}</h1>"
    );

    render_form(&mut html, view.result_count);

    for notice in &view.notices {
        let _ = write!(
            html,
            "<div class=\"{}\">{}</div>",
            notice.level.css_class(),
            escape_html(&notice.message)
        );
    }

    if let Some(outcome) = &view.outcome {
        render_outcome(&mut html, outcome);
    }

    html.push_str("</body></html>");
    html
}

fn render_form(html: &mut String, result_count: ResultCount) {
    let _ = write!(
        html,
        "<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\
         <h2>Upload Document</h2>\
         <label>Choose a file <input type=\"file\" name=\"{FILE_FIELD}\" accept=\".txt,.pdf\"></label>\
         <p><label>How many job descriptions you want to see: \
         <input type=\"number\" name=\"{RESULT_COUNT_FIELD}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\">\
         </label></p>\
         <button type=\"submit\">Retrieve JDs</button></form>",
        min = ResultCount::MIN,
        max = ResultCount::MAX,
        value = result_count.get(),
    );
}

fn render_outcome(html: &mut String, outcome: &SearchOutcome) {
    let hits = outcome.hits();
    if hits.is_empty() {
        let _ = write!(html, "<p class=\"empty\">{NO_MATCHES}</p>");
        return;
    }

    html.push_str("<h2>Answer:</h2><ol class=\"results\">");
    for (idx, result) in hits.iter().enumerate() {
        render_result(html, idx + 1, result);
    }
    html.push_str("</ol>");
}

fn render_result(html: &mut String, position: usize, result: &RetrievalResult) {
    let _ = write!(
        html,
        "<li class=\"result\"><p><strong>Result {position}:</strong></p>\
         <p>Score: {score}</p><p>Location: {location}</p>\
         <details><summary>Show Content</summary><pre>{content}</pre></details><hr></li>",
        score = result.score,
        location = escape_html(result.location.storage_hint()),
        content = escape_html(&result.content),
    );
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::retrieval::{ResultLocation, S3Location, NO_S3_LOCATION};

    fn outcome(results: Option<Vec<RetrievalResult>>) -> SearchOutcome {
        SearchOutcome {
            query_id: Uuid::new_v4(),
            retrieved_at: Utc::now(),
            result_count: ResultCount::default(),
            resume_attached: true,
            results,
        }
    }

    fn hit(content: &str, score: f64, uri: Option<&str>) -> RetrievalResult {
        RetrievalResult {
            content: content.to_string(),
            score,
            location: ResultLocation {
                location_type: Some("S3".to_string()),
                s3_location: uri.map(|u| S3Location { uri: Some(u.to_string()) }),
                web_location: None,
            },
        }
    }

    #[test]
    fn test_form_has_bounded_count_input() {
        let html = render_page(&PageView::default());
        assert!(html.contains("<title>Job Search</title>"));
        assert!(html.contains("accept=\".txt,.pdf\""));
        assert!(html.contains("min=\"1\" max=\"10\" step=\"1\" value=\"3\""));
        assert!(html.contains("Retrieve JDs"));
    }

    #[test]
    fn test_results_render_in_given_order() {
        let view = PageView {
            outcome: Some(outcome(Some(vec![
                hit("Senior SRE", 0.9, Some("s3://jds/sre.txt")),
                hit("Data engineer", 0.5, None),
            ]))),
            ..Default::default()
        };
        let html = render_page(&view);

        let first = html.find("Score: 0.9").expect("first score");
        let second = html.find("Score: 0.5").expect("second score");
        assert!(first < second);
        assert!(html.find("Result 1:").unwrap() < html.find("Result 2:").unwrap());
        assert!(html.contains("Location: s3://jds/sre.txt"));
        assert!(html.contains(&format!("Location: {NO_S3_LOCATION}")));
        assert!(html.contains("<summary>Show Content</summary><pre>Senior SRE</pre>"));
    }

    #[test]
    fn test_absent_and_empty_results_render_the_same() {
        let absent = render_page(&PageView {
            outcome: Some(outcome(None)),
            ..Default::default()
        });
        let empty = render_page(&PageView {
            outcome: Some(outcome(Some(vec![]))),
            ..Default::default()
        });
        assert!(absent.contains(NO_MATCHES));
        assert_eq!(absent, empty);
    }

    #[test]
    fn test_content_and_notices_are_escaped() {
        let view = PageView {
            notices: vec![Notice::error("bad <script>")],
            outcome: Some(outcome(Some(vec![hit("<b>Rust</b> & Go", 0.7, None)]))),
            ..Default::default()
        };
        let html = render_page(&view);
        assert!(html.contains("bad &lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;Rust&lt;/b&gt; &amp; Go"));
        assert!(!html.contains("<b>Rust</b>"));
    }

    #[test]
    fn test_escape_html_quotes() {
        assert_eq!(escape_html(r#"a "b" 'c'"#), "a &quot;b&quot; &#39;c&#39;");
    }
}
