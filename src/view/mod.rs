//! Server-side HTML for the checker page.
//!
//! [`render_page`] turns a [`FormController`] into a complete document. Each
//! controller state has its own section renderer; the form and the page
//! chrome are shared.

pub mod theme;

use std::f64::consts::PI;

use crate::api::models::{PageResult, ScanResponse};
use crate::controller::{FormController, ScanState};

const TITLE: &str = "SEO Health Checker";
const CONTACT_URL: &str = "https://www.janssens-janssens-webservices.be/";

/// Progress hints cycled by the loading panel.
pub const LOADING_TIPS: [&str; 6] = [
    "Fetching pages...",
    "Analysing HTML...",
    "Checking meta tags...",
    "Measuring load times...",
    "Checking links...",
    "Calculating score...",
];

const RING_RADIUS: f64 = 45.0;

/// Submit handler: locks the form, swaps the outcome for the loading panel
/// and cycles the tips every 2.5s.
const SCAN_SCRIPT: &str = "<script>\
var tipTimer=null;\
function rotateTips(){if(tipTimer)return;var t=document.querySelector('.loading .tip');\
var s=t.dataset.tips.split('|');var i=0;\
tipTimer=setInterval(function(){i=(i+1)%s.length;t.textContent=s[i];},2500);}\
function startScan(form){var b=form.querySelector('button');b.disabled=true;b.textContent='Scanning...';\
form.querySelector('input').readOnly=true;var o=document.querySelector('.outcome');if(o)o.hidden=true;\
document.querySelector('.loading').hidden=false;rotateTips();return true;}\
if(!document.querySelector('.loading').hidden)rotateTips();\
</script>";

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#0f172a;color:#e2e8f0}\
header,main,footer{max-width:64rem;margin:0 auto;padding:1rem}\
form{display:flex;gap:.75rem;margin:2rem 0}\
input{flex:1;padding:1rem;border-radius:.75rem;border:1px solid #2a3450;background:#1e293b;color:inherit}\
button{padding:1rem 2rem;border:0;border-radius:.75rem;background:#3b82f6;color:#fff;font-weight:600}\
button:disabled{opacity:.5}\
.card{background:#1e293b;border:1px solid #2a3450;border-radius:1rem;padding:1.5rem;margin-bottom:1.5rem}\
.error{border:1px solid #ef4444;color:#ef4444;border-radius:.75rem;padding:1rem;text-align:center}\
.muted{color:#94a3b8}\
.check{display:flex;gap:.75rem;padding:.5rem;border-radius:.5rem}\
.check.pass{background:#10b9811a}\
.check.issue{background:#ef44441a}\
details.page{background:#1e293b;border:1px solid #2a3450;border-radius:.75rem;margin-bottom:.75rem}\
details.page summary{display:flex;justify-content:space-between;padding:1rem;cursor:pointer}\
details.page .body{border-top:1px solid #2a3450;padding:1rem}";

/// Escapes text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Kind of a check line in a page card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Pass,
    Issue,
}

/// Icon for a check line. Issues the service flags with a leading warning
/// sign keep it; every other issue gets a cross.
pub fn check_icon(kind: CheckKind, text: &str) -> &'static str {
    match kind {
        CheckKind::Pass => "\u{2705}",
        CheckKind::Issue if text.starts_with('\u{26a0}') => "\u{26a0}\u{fe0f}",
        CheckKind::Issue => "\u{274c}",
    }
}

/// Drops the status emoji the service prefixes check lines with.
pub fn strip_check_marker(text: &str) -> &str {
    text.trim_start_matches(|c: char| {
        matches!(c, '\u{2705}' | '\u{274c}' | '\u{26a0}' | '\u{fe0f}') || c.is_whitespace()
    })
}

pub fn render_page(form: &FormController) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str(&format!("<title>{}</title><style>{}</style></head><body>", TITLE, STYLE));

    html.push_str(&format!(
        "<header><strong>janssens &amp; janssens</strong> <span class=\"muted\">webservices</span> \
         <span class=\"muted\">{}</span></header><main>",
        TITLE
    ));
    html.push_str("<h2>How healthy is your website?</h2>");
    html.push_str(
        "<p class=\"muted\">Enter your URL and get a detailed SEO report with scores, \
         issues and recommendations.</p>",
    );
    html.push_str(&render_form(form));

    match form.state() {
        ScanState::Loading { .. } => html.push_str(&render_loading(true)),
        state => {
            html.push_str(&render_loading(false));
            html.push_str("<div class=\"outcome\">");
            match state {
                ScanState::Success(report) => html.push_str(&render_report(form, report)),
                ScanState::Error(message) => html.push_str(&format!(
                    "<div class=\"error\" role=\"alert\">{}</div>",
                    escape(message)
                )),
                _ => html.push_str(
                    "<div class=\"idle\"><p class=\"muted\">Enter a URL to start scanning</p></div>",
                ),
            }
            html.push_str("</div>");
        }
    }
    html.push_str(SCAN_SCRIPT);

    html.push_str(&format!(
        "</main><footer class=\"muted\">&copy; Janssens &amp; Janssens Webservices \
         <a href=\"{0}\">{0}</a></footer></body></html>",
        CONTACT_URL
    ));
    html
}

fn render_form(form: &FormController) -> String {
    let loading = form.is_loading();
    let disabled = if loading { " disabled" } else { "" };
    let label = if loading { "Scanning..." } else { "Scan" };
    format!(
        "<form method=\"post\" action=\"/\" onsubmit=\"return startScan(this)\">\
         <input type=\"text\" name=\"url\" value=\"{}\" placeholder=\"https://www.example.com\" required{}>\
         <button type=\"submit\"{}>{}</button></form>",
        escape(form.input()),
        disabled,
        disabled,
        label
    )
}

/// The loading panel is on every page. It is shown while a scan is
/// `Loading` and revealed by `startScan` when the form is submitted.
fn render_loading(visible: bool) -> String {
    format!(
        "<div class=\"loading\"{}><p>Scanning website...</p>\
         <p class=\"muted tip\" data-tips=\"{}\">{}</p>\
         <p class=\"muted\">This can take 15-30 seconds depending on the website</p></div>",
        if visible { "" } else { " hidden" },
        LOADING_TIPS.join("|"),
        LOADING_TIPS[0]
    )
}

fn render_report(form: &FormController, report: &ScanResponse) -> String {
    let mut html = String::new();

    html.push_str("<section class=\"card summary\">");
    html.push_str(&render_score_ring(report));
    html.push_str(&format!(
        "<h3>Results for <span class=\"scanned-url\">{}</span></h3>\
         <p class=\"muted\"><span class=\"pages-crawled\">{}</span> pages scanned</p>\
         <p><span class=\"badge passed\">{} checks passed</span> \
         <span class=\"badge issues\">{} issues found</span></p></section>",
        escape(&report.url),
        report.pages_crawled,
        report.total_passed(),
        report.total_issues()
    ));

    let headline = report.headline_issues();
    if !headline.is_empty() {
        html.push_str("<section class=\"card top-issues\"><h3>Most common issues</h3><ul>");
        for issue in headline {
            html.push_str(&format!(
                "<li><span>{}</span> <span class=\"count\">{}x</span></li>",
                escape(&issue.issue),
                issue.count
            ));
        }
        html.push_str("</ul></section>");
    }

    html.push_str("<section class=\"pages\"><h3>Results per page</h3>");
    for (index, page) in report.results.iter().enumerate() {
        html.push_str(&render_page_card(page, index, form.is_card_open(index)));
    }
    html.push_str("</section>");

    if !report.recommendations.is_empty() {
        html.push_str("<section class=\"card recommendations\"><h3>Recommendations</h3><ul>");
        for rec in &report.recommendations {
            html.push_str(&format!("<li>\u{2192} {}</li>", escape(rec)));
        }
        html.push_str("</ul></section>");
    }

    html.push_str(&format!(
        "<section class=\"card cta\"><p class=\"muted\">Need help fixing these issues?</p>\
         <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Contact Janssens &amp; Janssens</a></section>",
        CONTACT_URL
    ));
    html
}

fn render_score_ring(report: &ScanResponse) -> String {
    let color = theme::grade_color(report.grade);
    let circumference = 2.0 * PI * RING_RADIUS;
    let filled = report.overall_score.clamp(0.0, 100.0) / 100.0;
    let offset = circumference - filled * circumference;

    format!(
        "<div class=\"score\"><svg width=\"160\" height=\"160\" viewBox=\"0 0 100 100\" style=\"transform:rotate(-90deg)\">\
         <circle cx=\"50\" cy=\"50\" r=\"{r}\" fill=\"none\" stroke=\"{track}\" stroke-width=\"8\"/>\
         <circle cx=\"50\" cy=\"50\" r=\"{r}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"8\" \
         stroke-linecap=\"round\" stroke-dasharray=\"{circ:.2}\" stroke-dashoffset=\"{offset:.2}\"/></svg>\
         <p class=\"overall-score\" style=\"color:{color}\">{score}<span class=\"muted\">/100</span></p>\
         <p class=\"grade\" style=\"color:{color}\">Grade {grade}</p></div>",
        r = RING_RADIUS,
        track = theme::RING_TRACK,
        color = color,
        circ = circumference,
        offset = offset,
        score = report.overall_score.round(),
        grade = report.grade,
    )
}

fn render_page_card(page: &PageResult, index: usize, open: bool) -> String {
    let mut html = format!(
        "<details class=\"page\" data-index=\"{}\"{}><summary>\
         <span class=\"page-score\" style=\"color:{}\">{}</span>\
         <span><span class=\"page-title\">{}</span><br><span class=\"muted\">{}</span></span>\
         <span class=\"muted\">{}ms</span></summary><div class=\"body\">",
        index,
        if open { " open" } else { "" },
        theme::score_color(page.score),
        page.score,
        escape(page.display_title()),
        escape(&page.url),
        page.load_ms
    );

    if !page.passed.is_empty() {
        html.push_str(&format!("<h4>Passed ({})</h4>", page.passed.len()));
        for item in &page.passed {
            html.push_str(&render_check(CheckKind::Pass, item));
        }
    }
    if !page.issues.is_empty() {
        html.push_str(&format!("<h4>Issues ({})</h4>", page.issues.len()));
        for item in &page.issues {
            html.push_str(&render_check(CheckKind::Issue, item));
        }
    }

    html.push_str("</div></details>");
    html
}

fn render_check(kind: CheckKind, text: &str) -> String {
    let class = match kind {
        CheckKind::Pass => "pass",
        CheckKind::Issue => "issue",
    };
    format!(
        "<div class=\"check {}\"><span class=\"icon\">{}</span><span class=\"text\">{}</span></div>",
        class,
        check_icon(kind, text),
        escape(strip_check_marker(text))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Grade, TopIssue};
    use crate::controller::tests::report;
    use crate::error::{AppError, UNREACHABLE_MESSAGE};
    use scraper::{Html, Selector};

    fn select<'a>(doc: &'a Html, css: &str) -> Vec<scraper::ElementRef<'a>> {
        let selector = Selector::parse(css).unwrap();
        doc.select(&selector).collect()
    }

    fn text(el: &scraper::ElementRef<'_>) -> String {
        el.text().collect::<String>()
    }

    fn finished(resp: ScanResponse) -> FormController {
        let mut form = FormController::new();
        form.set_input("example.com");
        form.begin_scan().unwrap();
        form.finish_scan(Ok(resp));
        form
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href=\"x\">'&'</a>"), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn strips_status_markers() {
        assert_eq!(strip_check_marker("✅ Title present"), "Title present");
        assert_eq!(strip_check_marker("⚠️ Slow page"), "Slow page");
        assert_eq!(strip_check_marker("❌  No H1"), "No H1");
        assert_eq!(strip_check_marker("Plain"), "Plain");
    }

    #[test]
    fn issue_icons() {
        assert_eq!(check_icon(CheckKind::Pass, "anything"), "\u{2705}");
        assert_eq!(check_icon(CheckKind::Issue, "⚠️ Slow page"), "\u{26a0}\u{fe0f}");
        assert_eq!(check_icon(CheckKind::Issue, "❌ No H1"), "\u{274c}");
        assert_eq!(check_icon(CheckKind::Issue, "No H1"), "\u{274c}");
    }

    #[test]
    fn idle_page_shows_hint_and_enabled_form() {
        let doc = Html::parse_document(&render_page(&FormController::new()));
        assert_eq!(select(&doc, ".idle").len(), 1);
        let button = &select(&doc, "form button")[0];
        assert!(button.value().attr("disabled").is_none());
        assert_eq!(text(button), "Scan");
    }

    #[test]
    fn loading_page_disables_form() {
        let mut form = FormController::new();
        form.set_input("example.com");
        form.begin_scan().unwrap();
        let doc = Html::parse_document(&render_page(&form));
        let button = &select(&doc, "form button")[0];
        assert!(button.value().attr("disabled").is_some());
        assert_eq!(text(button), "Scanning...");
        assert_eq!(text(&select(&doc, ".tip")[0]), LOADING_TIPS[0]);
        assert!(select(&doc, ".loading")[0].value().attr("hidden").is_none());
        assert!(select(&doc, ".outcome").is_empty());
        assert!(select(&doc, ".error").is_empty());
    }

    #[test]
    fn settled_pages_carry_hidden_loading_panel() {
        let mut failed = FormController::new();
        failed.set_input("example.com");
        failed.begin_scan().unwrap();
        failed.finish_scan(Err(AppError::Network("refused".into())));

        for form in [FormController::new(), failed, finished(report(2))] {
            let doc = Html::parse_document(&render_page(&form));
            let panels = select(&doc, ".loading");
            assert_eq!(panels.len(), 1);
            assert!(panels[0].value().attr("hidden").is_some());
            let tips = select(&doc, ".loading .tip")[0].value().attr("data-tips").unwrap().to_string();
            assert_eq!(tips, LOADING_TIPS.join("|"));
            assert_eq!(select(&doc, ".outcome").len(), 1);
            let form_el = &select(&doc, "form")[0];
            assert_eq!(form_el.value().attr("onsubmit"), Some("return startScan(this)"));
        }
    }

    #[test]
    fn error_page_shows_banner_only() {
        let form = finished(report(0));
        let doc = Html::parse_document(&render_page(&form));
        assert_eq!(text(&select(&doc, ".error")[0]), UNREACHABLE_MESSAGE);
        assert!(select(&doc, ".summary").is_empty());
        assert!(select(&doc, ".idle").is_empty());
    }

    #[test]
    fn error_page_for_failed_request() {
        let mut form = FormController::new();
        form.set_input("example.com");
        form.begin_scan().unwrap();
        form.finish_scan(Err(AppError::Network("refused".into())));
        let doc = Html::parse_document(&render_page(&form));
        assert_eq!(text(&select(&doc, ".error")[0]), AppError::Network(String::new()).user_message());
    }

    #[test]
    fn report_renders_summary_and_cards() {
        let mut resp = report(2);
        resp.results[1].title = String::new();
        resp.results[1].issues = vec!["⚠️ Slow <page>".to_string()];
        resp.top_issues = (1..=7).map(|i| TopIssue { issue: format!("issue {i}"), count: i }).collect();
        resp.recommendations = vec!["Compress images".to_string()];
        let doc = Html::parse_document(&render_page(&finished(resp)));

        assert_eq!(text(&select(&doc, ".scanned-url")[0]), "https://example.com");
        assert_eq!(text(&select(&doc, ".pages-crawled")[0]), "2");
        assert_eq!(text(&select(&doc, ".badge.passed")[0]), "2 checks passed");
        assert_eq!(text(&select(&doc, ".badge.issues")[0]), "2 issues found");
        assert_eq!(select(&doc, ".top-issues li").len(), 5);
        assert_eq!(text(&select(&doc, ".top-issues .count")[0]), "1x");
        assert_eq!(select(&doc, ".recommendations li").len(), 1);

        let cards = select(&doc, "details.page");
        assert_eq!(cards.len(), 2);
        let titles = select(&doc, ".page-title");
        assert_eq!(text(&titles[1]), crate::api::models::UNTITLED_PAGE);

        let issue_texts = select(&doc, "details.page[data-index=\"1\"] .check.issue .text");
        assert_eq!(text(&issue_texts[0]), "Slow <page>");
    }

    #[test]
    fn open_cards_render_open_attribute() {
        let mut form = finished(report(3));
        form.toggle_card(1);
        let doc = Html::parse_document(&render_page(&form));
        let open: Vec<_> = select(&doc, "details.page")
            .iter()
            .map(|card| card.value().attr("open").is_some())
            .collect();
        assert_eq!(open, vec![false, true, false]);
    }

    #[test]
    fn ring_color_follows_grade_not_score() {
        let mut resp = report(1);
        resp.overall_score = 95.0;
        resp.grade = Grade::D;
        let doc = Html::parse_document(&render_page(&finished(resp)));
        let grade = &select(&doc, ".grade")[0];
        assert_eq!(text(grade), "Grade D");
        assert_eq!(grade.value().attr("style"), Some(format!("color:{}", theme::ORANGE).as_str()));
    }

    #[test]
    fn fractional_score_is_rounded_for_display() {
        let mut resp = report(1);
        resp.overall_score = 72.5;
        let doc = Html::parse_document(&render_page(&finished(resp)));
        assert_eq!(text(&select(&doc, ".overall-score")[0]), "73/100");
    }
}
