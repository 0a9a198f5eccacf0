//! Stateless HTML rendering.
//!
//! Pure presentation sink: takes a session snapshot, the notice from the last
//! transition, and a freshly built report, and produces the full page. The
//! background image is read once at startup and embedded as a base64 data URI
//! in the page styling; comment text is always HTML-escaped before display.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::analytics::CommentReport;
use crate::sentiment::SentimentCategory;
use crate::session::{Notice, Page, Session};

/// Fixed category color mapping for the pie chart.
fn category_color(category: SentimentCategory) -> &'static str {
    match category {
        SentimentCategory::Positive => "green",
        SentimentCategory::Negative => "orange",
        SentimentCategory::Neutral => "red",
    }
}

/// Background asset, embedded at startup. A missing file is fatal: the page
/// cannot render without it.
#[derive(Debug, Clone)]
pub struct Background {
    data_uri: String,
}

impl Background {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading background image {}", path.display()))?;
        let mime = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            _ => "image/jpeg",
        };
        Ok(Self {
            data_uri: format!("data:{mime};base64,{}", BASE64.encode(bytes)),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self { data_uri: "data:image/jpeg;base64,".to_string() }
    }
}

fn esc(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Renders the complete page for the session's current view.
pub fn render_page(
    session: &Session,
    notice: &Notice,
    report: Option<&CommentReport>,
    background: &Background,
) -> String {
    let body = match session.page {
        Page::Input => input_view(notice),
        Page::Transition => transition_view(session, notice),
        Page::Result => match report {
            Some(report) => result_view(session, report),
            // Unreachable through the state machine; keep the page usable.
            None => input_view(&Notice::None),
        },
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>YouTube Comment Analyzer</title>\n<style>{}</style>\n</head>\n\
         <body>\n<div class=\"app\">\n<h1>🎥 YouTube Comment Analyzer</h1>\n{}\n</div>\n</body>\n</html>\n",
        page_css(&background.data_uri),
        body
    )
}

fn page_css(data_uri: &str) -> String {
    format!(
        "body {{ background-image: linear-gradient(rgba(255,255,255,0.25), rgba(255,255,255,0.25)), url(\"{data_uri}\"); \
         background-size: cover; background-repeat: no-repeat; background-attachment: fixed; background-position: center; }} \
         .app {{ max-width: 1100px; margin: auto; padding: 2rem 5rem; font-family: 'Segoe UI', sans-serif; }} \
         h1, h2, h3 {{ color: #111827; text-align: center; }} \
         .notice {{ padding: 0.6rem 1rem; border-radius: 8px; margin: 0.8rem 0; }} \
         .warn {{ background: #fef3c7; }} .error {{ background: #fee2e2; }} .ok {{ background: #d1fae5; }} \
         input[type=text] {{ width: 100%; padding: 0.6rem 1rem; border: 1px solid #374151; border-radius: 10px; font-size: 1.1rem; }} \
         button {{ background-color: #2563eb; color: white; padding: 0.65rem 1.2rem; font-weight: 600; font-size: 1rem; border: none; border-radius: 10px; }} \
         button:hover {{ background-color: #1d4ed8; }} \
         .chart {{ display: block; margin: 1rem auto; }}"
    )
}

fn notice_html(notice: &Notice) -> String {
    match notice {
        Notice::None => String::new(),
        Notice::EmptyUrl => {
            "<p class=\"notice warn\">⚠️ Please enter a YouTube video URL.</p>".to_string()
        }
        Notice::InvalidUrl => "<p class=\"notice error\">❌ Invalid YouTube URL.</p>".to_string(),
        Notice::NoComments => "<p class=\"notice error\">😕 No comments found.</p>".to_string(),
        Notice::Fetched(n) => {
            format!("<p class=\"notice ok\">✅ Fetched {n} comments.</p>")
        }
    }
}

fn input_view(notice: &Notice) -> String {
    format!(
        "<p>Paste a <b>YouTube video URL</b> to fetch comments and analyze popular words, emojis, and sentiment.</p>\n{}\n\
         <form method=\"post\" action=\"/analyze\">\n\
         <label>Enter YouTube Video URL:</label>\n\
         <input type=\"text\" name=\"video_url\">\n\
         <label>Enter Channel Name (Optional):</label>\n\
         <input type=\"text\" name=\"channel_name\">\n\
         <button type=\"submit\">Analyze</button>\n</form>",
        notice_html(notice)
    )
}

fn transition_view(session: &Session, notice: &Notice) -> String {
    let banner = match notice {
        Notice::Fetched(_) => notice_html(notice),
        // Re-render after a refresh: rebuild the banner from the session.
        _ => notice_html(&Notice::Fetched(session.comments.len())),
    };
    format!(
        "{banner}\n<form method=\"post\" action=\"/continue\">\n\
         <button type=\"submit\">Go to Analysis</button>\n</form>"
    )
}

fn result_view(session: &Session, report: &CommentReport) -> String {
    let mut out = String::new();

    out.push_str("<h2>📺 Channel Info</h2>\n");
    if !session.channel_name.is_empty() {
        let _ = writeln!(
            out,
            "<p><b>🎬 Channel Name:</b> <code>{}</code></p>",
            esc(&session.channel_name)
        );
    }

    out.push_str("<h3>💬 Sentiment Breakdown:</h3>\n<ul>\n");
    for (category, count) in &report.sentiment_counts {
        let _ = writeln!(out, "<li><b>{}</b>: {} comments</li>", category.label(), count);
    }
    out.push_str("</ul>\n");

    out.push_str("<h3>📊 Sentiment Distribution:</h3>\n");
    out.push_str(&pie_chart_svg(&report.sentiment_counts));

    out.push_str("<h3>📝 Sample Comments</h3>\n<ul>\n");
    for comment in &report.samples {
        let _ = writeln!(out, "<li>👉 {}</li>", esc(comment));
    }
    out.push_str("</ul>\n");

    out.push_str("<h3>🔤 Top 10 Words</h3>\n<ul>\n");
    for (word, count) in &report.top_words {
        let _ = writeln!(out, "<li><b>{}</b>: {} times</li>", esc(word), count);
    }
    out.push_str("</ul>\n");

    out.push_str("<h3>😄 Top 10 Emojis</h3>\n");
    if report.top_emojis.is_empty() {
        out.push_str("<p class=\"notice\">No emojis found.</p>\n");
    } else {
        out.push_str("<ul>\n");
        for (emoji, count) in &report.top_emojis {
            let _ = writeln!(out, "<li>{emoji} — {count} times</li>");
        }
        out.push_str("</ul>\n");
    }

    out.push_str(
        "<form method=\"post\" action=\"/back\">\n<button type=\"submit\">🔙 Go Back</button>\n</form>",
    );
    out
}

/// Donut chart over the category counts as inline SVG. Percentages are of
/// the total scored comments; colors come from the fixed mapping.
fn pie_chart_svg(counts: &[(SentimentCategory, usize)]) -> String {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return String::new();
    }

    const CX: f64 = 150.0;
    const CY: f64 = 150.0;
    const R: f64 = 120.0;

    let mut svg = String::from(
        "<svg class=\"chart\" width=\"300\" height=\"300\" viewBox=\"0 0 300 300\" role=\"img\">\n",
    );

    if counts.len() == 1 {
        // A full circle cannot be drawn as one arc path.
        let (category, _) = counts[0];
        let _ = writeln!(
            svg,
            "<circle cx=\"{CX}\" cy=\"{CY}\" r=\"{R}\" fill=\"{}\"><title>{}: 100.0%</title></circle>",
            category_color(category),
            category.label()
        );
    } else {
        let mut angle = -PI / 2.0;
        for (category, count) in counts {
            let fraction = *count as f64 / total as f64;
            let sweep = fraction * 2.0 * PI;
            let (x0, y0) = (CX + R * angle.cos(), CY + R * angle.sin());
            let end = angle + sweep;
            let (x1, y1) = (CX + R * end.cos(), CY + R * end.sin());
            let large = if sweep > PI { 1 } else { 0 };
            let _ = writeln!(
                svg,
                "<path d=\"M {CX:.2} {CY:.2} L {x0:.2} {y0:.2} A {R} {R} 0 {large} 1 {x1:.2} {y1:.2} Z\" fill=\"{}\"><title>{}: {:.1}%</title></path>",
                category_color(*category),
                category.label(),
                fraction * 100.0
            );
            angle = end;
        }
    }

    // Donut hole.
    svg.push_str("<circle cx=\"150\" cy=\"150\" r=\"45\" fill=\"white\"/>\n</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::build_report;
    use crate::sentiment::PolarityScorer;

    struct NeutralScorer;
    impl PolarityScorer for NeutralScorer {
        fn polarity(&self, _text: &str) -> f32 {
            0.0
        }
    }

    fn result_session(comments: &[&str]) -> Session {
        Session {
            page: Page::Result,
            comments: comments.iter().map(|s| s.to_string()).collect(),
            video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".into(),
            channel_name: "TestChannel".into(),
        }
    }

    #[test]
    fn input_view_carries_warning_notice() {
        let session = Session::new();
        let html = render_page(&session, &Notice::EmptyUrl, None, &Background::for_tests());
        assert!(html.contains("Please enter a YouTube video URL"));
        assert!(html.contains("action=\"/analyze\""));
    }

    #[test]
    fn result_view_escapes_comment_text() {
        let session = result_session(&["<script>alert(1)</script>"]);
        let report = build_report(&session.comments, &NeutralScorer);
        let html = render_page(&session, &Notice::None, Some(&report), &Background::for_tests());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn result_view_reports_missing_emojis() {
        let session = result_session(&["no emojis here"]);
        let report = build_report(&session.comments, &NeutralScorer);
        let html = render_page(&session, &Notice::None, Some(&report), &Background::for_tests());
        assert!(html.contains("No emojis found."));
        assert!(html.contains("TestChannel"));
        assert!(html.contains("🔙 Go Back"));
    }

    #[test]
    fn single_category_pie_is_a_full_circle() {
        let svg = pie_chart_svg(&[(SentimentCategory::Neutral, 7)]);
        assert!(svg.contains("<circle"));
        assert!(svg.contains("fill=\"red\""));
    }

    #[test]
    fn pie_uses_fixed_color_mapping() {
        let svg = pie_chart_svg(&[
            (SentimentCategory::Positive, 2),
            (SentimentCategory::Negative, 1),
            (SentimentCategory::Neutral, 1),
        ]);
        assert!(svg.contains("fill=\"green\""));
        assert!(svg.contains("fill=\"orange\""));
        assert!(svg.contains("fill=\"red\""));
        assert!(svg.contains("Positive: 50.0%"));
    }

    #[test]
    fn transition_view_shows_comment_count() {
        let mut session = result_session(&["a", "b", "c"]);
        session.page = Page::Transition;
        let html = render_page(&session, &Notice::Fetched(3), None, &Background::for_tests());
        assert!(html.contains("Fetched 3 comments"));
        assert!(html.contains("Go to Analysis"));
    }

    #[test]
    fn missing_background_file_is_an_error() {
        assert!(Background::load("definitely/not/here.jpg").is_err());
    }
}
