use crate::domain::model::{TravelAdvice, TravelRequest};
use crate::utils::error::{AdvisorError, Result};
use handlebars::Handlebars;
use serde_json::{json, Value};

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Travel Advisor</title>
<style>
body { background-color: #121212; color: #ffffff; font-family: 'Montserrat', sans-serif; margin: 0; }
main { display: flex; gap: 32px; padding: 24px; }
aside { background-color: #1f1f1f; padding: 20px; border-radius: 8px; min-width: 280px; }
h1, h2 { text-align: center; font-weight: 600; }
label { display: block; color: #66d9ef; font-size: 16px; font-weight: bold; margin-top: 12px; }
input { width: 100%; padding: 8px; background-color: #1e1e1e; color: #66d9ef; border: 1px solid #66d9ef; border-radius: 8px; }
button { margin-top: 16px; background-color: #66d9ef; color: #000000; font-size: 16px; font-weight: bold; border: none; border-radius: 8px; padding: 8px 16px; cursor: pointer; }
button:hover { background-color: #33ccff; color: #ffffff; }
.results { flex: 1; }
.output-section { padding: 15px; border-radius: 8px; background-color: #1e1e1e; margin-bottom: 20px; box-shadow: 0 0 10px rgba(0, 255, 255, 0.2); }
.output-header { font-size: 20px; color: #66d9ef; font-weight: bold; margin-bottom: 10px; }
.output-content { font-size: 16px; line-height: 1.5; white-space: pre-wrap; }
.notice { padding: 12px; border-radius: 8px; margin-bottom: 16px; }
.notice.success { background-color: #1b3d2a; }
.notice.warning { background-color: #4a3b12; }
.notice.error { background-color: #4a1a1a; }
</style>
</head>
<body>
<h1>✈️ Travel Advisor with JamAI Base</h1>
<p style="text-align:center">Powered by JamAI Base generative tables</p>
<main>{{> form}}<section class="results">{{#if notice}}{{> notice}}{{/if}}{{> advice_sections}}{{#if download}}{{> download_form}}{{/if}}</section></main>
</body>
</html>"#;

const FORM_TEMPLATE: &str = r#"<aside><h2>✨ Enter your Travel Details</h2><form method="post" action="/advice">
<label for="home_country">🌍 Home Country</label><input id="home_country" name="home_country" type="text" placeholder="Enter your home country" value="{{form.home_country}}">
<label for="desired_country">🌎 Desired Country</label><input id="desired_country" name="desired_country" type="text" placeholder="Enter your desired destination" value="{{form.desired_country}}">
<label for="activity">🏖️ Preferred Activity</label><input id="activity" name="activity" type="text" placeholder="Enter your preferred activity" value="{{form.activity}}">
<button type="submit">🥳 Get Travel Advice</button></form></aside>"#;

const NOTICE_TEMPLATE: &str = r#"<div class="notice {{notice.kind}}">{{notice.message}}</div>"#;

const ADVICE_SECTIONS_TEMPLATE: &str = r#"{{#each sections}}<div class="output-section"><div class="output-header">{{header}}</div><div class="output-content">{{value}}</div></div>{{/each}}"#;

// 下載按鈕：把三個值帶回 `/advice/report`，伺服器端不保留狀態
const DOWNLOAD_FORM_TEMPLATE: &str = r#"<form method="post" action="/advice/report"><input type="hidden" name="flight_duration" value="{{download.flight_duration}}"><input type="hidden" name="currency" value="{{download.currency}}"><input type="hidden" name="activity_locations" value="{{download.activity_locations}}"><button type="submit">Download PDF Report</button></form>"#;

const TEMPLATES: [(&str, &str); 5] = [
    ("page", PAGE_TEMPLATE),
    ("form", FORM_TEMPLATE),
    ("notice", NOTICE_TEMPLATE),
    ("advice_sections", ADVICE_SECTIONS_TEMPLATE),
    ("download_form", DOWNLOAD_FORM_TEMPLATE),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

fn template_error<E: std::fmt::Display>(e: E) -> AdvisorError {
    AdvisorError::TemplateError {
        message: e.to_string(),
    }
}

/// 建立並註冊所有頁面模板；`{{value}}` 一律經過 HTML 跳脫
pub fn template_engine() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);

    for (name, template) in TEMPLATES {
        handlebars
            .register_template_string(name, template)
            .map_err(template_error)?;
    }

    Ok(handlebars)
}

fn sections(advice: Option<&TravelAdvice>) -> Value {
    match advice {
        Some(advice) => json!([
            {"header": "✈️ Flight Duration:", "value": advice.flight_duration},
            {"header": "💰 Currency:", "value": advice.currency},
            {"header": "🏖️ Activity Locations:", "value": advice.activity_locations},
        ]),
        None => json!([]),
    }
}

fn page_context(
    request: Option<&TravelRequest>,
    notice: Option<(NoticeKind, &str)>,
    advice: Option<&TravelAdvice>,
) -> Value {
    let form = match request {
        Some(r) => json!({
            "home_country": r.home_country,
            "desired_country": r.desired_country,
            "activity": r.activity,
        }),
        None => json!({"home_country": "", "desired_country": "", "activity": ""}),
    };
    let notice = notice.map(|(kind, message)| json!({"kind": kind.class(), "message": message}));

    json!({
        "form": form,
        "notice": notice,
        "sections": sections(advice),
        "download": advice,
    })
}

fn render_page(engine: &Handlebars<'static>, context: &Value) -> Result<String> {
    engine.render("page", context).map_err(template_error)
}

/// One styled block per advice field.
pub fn advice_sections(engine: &Handlebars<'static>, advice: &TravelAdvice) -> Result<String> {
    engine
        .render("advice_sections", &json!({"sections": sections(Some(advice))}))
        .map_err(template_error)
}

pub fn index_page(engine: &Handlebars<'static>) -> Result<String> {
    render_page(engine, &page_context(None, None, None))
}

pub fn advice_page(
    engine: &Handlebars<'static>,
    request: &TravelRequest,
    advice: &TravelAdvice,
) -> Result<String> {
    let notice = (
        NoticeKind::Success,
        "Your travel details were successfully added to the table!",
    );
    render_page(engine, &page_context(Some(request), Some(notice), Some(advice)))
}

pub fn message_page(
    engine: &Handlebars<'static>,
    request: Option<&TravelRequest>,
    kind: NoticeKind,
    message: &str,
) -> Result<String> {
    render_page(engine, &page_context(request, Some((kind, message)), None))
}
