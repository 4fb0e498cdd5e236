use crate::domain::model::TravelAdvice;
use crate::utils::error::{AdvisorError, Result};
use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// 下載時提供給瀏覽器的檔名
pub const DOWNLOAD_FILENAME: &str = "Travel_Advice_Report.pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 8.0;
const TITLE_SIZE_PT: f32 = 16.0;
const BODY_SIZE_PT: f32 = 12.0;
const WRAP_COLUMNS: usize = 90;
const PT_TO_MM: f32 = 0.3528;

/// 內建字型無法編碼的字元以此替代
pub const UNENCODABLE_PLACEHOLDER: char = '?';

// WinAnsiEncoding 在 0x80..=0x9F 區段額外定義的字元
const WIN_ANSI_EXTRAS: [char; 27] = [
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// Font used to draw the report.
#[derive(Debug, Clone, Default)]
pub enum ReportFont {
    /// Helvetica. Only WinAnsi text can be drawn.
    #[default]
    Builtin,
    /// TrueType font bytes embedded into every report.
    External(Arc<Vec<u8>>),
}

impl ReportFont {
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let bytes = std::fs::read(Path::new(path))?;
                tracing::info!("Using report font {} ({} bytes)", path, bytes.len());
                Ok(ReportFont::External(Arc::new(bytes)))
            }
            None => Ok(ReportFont::Builtin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Heading(String),
    Text(String),
    Blank,
}

/// 報告的純文字版面，先組好內容再繪製成 PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContent {
    pub title: String,
    pub lines: Vec<ReportLine>,
}

impl ReportContent {
    pub fn from_advice(title: &str, advice: &TravelAdvice) -> Self {
        let mut lines = vec![ReportLine::Heading("Your Travel Details:".to_string())];

        let fields = [
            ("Flight Duration", &advice.flight_duration),
            ("Currency", &advice.currency),
            ("Activity Locations", &advice.activity_locations),
        ];
        for (index, (label, value)) in fields.into_iter().enumerate() {
            if index > 0 {
                lines.push(ReportLine::Blank);
            }
            let labelled = format!("{}: {}", label, value);
            lines.extend(wrap_text(&labelled, WRAP_COLUMNS).into_iter().map(ReportLine::Text));
        }

        Self {
            title: title.to_string(),
            lines,
        }
    }

    pub fn plain_text(&self) -> String {
        let mut out = vec![self.title.clone()];
        for line in &self.lines {
            match line {
                ReportLine::Heading(text) | ReportLine::Text(text) => out.push(text.clone()),
                ReportLine::Blank => out.push(String::new()),
            }
        }
        out.join("\n")
    }
}

/// Greedy word wrap. Embedded newlines start a new line and words longer
/// than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.chars().count() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                lines.push(head);
            }

            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// 每次請求產生不重複的檔名，避免覆寫
pub fn unique_report_filename(now: DateTime<Utc>) -> String {
    format!(
        "travel_advice_report_{}.pdf",
        now.format("%Y%m%dT%H%M%S%.3fZ")
    )
}

fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(&c)
}

/// Replaces every character the builtin fonts cannot encode and returns the
/// number of replacements.
pub fn to_win_ansi(text: &str) -> (String, usize) {
    let mut replaced = 0;
    let safe = text
        .chars()
        .map(|c| {
            if is_win_ansi(c) {
                c
            } else {
                replaced += 1;
                UNENCODABLE_PLACEHOLDER
            }
        })
        .collect();
    (safe, replaced)
}

fn pdf_error<E: std::fmt::Debug>(e: E) -> AdvisorError {
    AdvisorError::PdfError {
        message: format!("{:?}", e),
    }
}

/// Draws the report on a single A4 page and returns the PDF bytes.
pub fn render_pdf(content: &ReportContent, font: &ReportFont) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        content.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let (bold, regular) = match font {
        ReportFont::Builtin => (
            doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
            doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
        ),
        ReportFont::External(bytes) => {
            let embedded = doc
                .add_external_font(Cursor::new(bytes.as_slice()))
                .map_err(pdf_error)?;
            (embedded.clone(), embedded)
        }
    };
    let canvas = doc.get_page(page).get_layer(layer);

    let mut replaced = 0usize;
    let mut prepare = |text: &str| match font {
        ReportFont::Builtin => {
            let (safe, count) = to_win_ansi(text);
            replaced += count;
            safe
        }
        ReportFont::External(_) => text.to_string(),
    };

    // 標題置中 (Helvetica 平均字寬約為字級的一半)
    let title = prepare(&content.title);
    let title_width_mm = title.chars().count() as f32 * TITLE_SIZE_PT * 0.5 * PT_TO_MM;
    let title_x = ((PAGE_WIDTH_MM - title_width_mm) / 2.0).max(MARGIN_MM);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
    canvas.use_text(title, TITLE_SIZE_PT, Mm(title_x), Mm(y), &bold);
    y -= LINE_HEIGHT_MM * 2.0;

    let mut dropped = 0usize;
    for line in &content.lines {
        if y < MARGIN_MM {
            dropped += 1;
            continue;
        }
        match line {
            ReportLine::Heading(text) => {
                canvas.use_text(prepare(text), BODY_SIZE_PT, Mm(MARGIN_MM), Mm(y), &bold)
            }
            ReportLine::Text(text) => {
                canvas.use_text(prepare(text), BODY_SIZE_PT, Mm(MARGIN_MM), Mm(y), &regular)
            }
            ReportLine::Blank => {}
        }
        y -= LINE_HEIGHT_MM;
    }

    if replaced > 0 {
        tracing::warn!(
            "⚠️ Report font cannot encode {} characters; drawn as '{}'. Set report.font_path to a Unicode TrueType font",
            replaced,
            UNENCODABLE_PLACEHOLDER
        );
    }
    if dropped > 0 {
        tracing::warn!("Report truncated: {} lines did not fit on the page", dropped);
    }

    let bytes = doc.save_to_bytes().map_err(pdf_error)?;
    tracing::debug!("Rendered PDF report ({} bytes)", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lopdf::content::Content;
    use lopdf::{Document, Object};

    /// 讀回 PDF 中每個 `Tj` 繪出的文字 (WinAnsi 的 ASCII/Latin-1 區段)
    fn drawn_text(bytes: &[u8]) -> Vec<String> {
        let mut doc = Document::load_mem(bytes).unwrap();
        doc.decompress();

        let mut lines = Vec::new();
        for (_, page_id) in doc.get_pages() {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            for operation in content.operations {
                if operation.operator != "Tj" {
                    continue;
                }
                if let Some(Object::String(text, _)) = operation.operands.first() {
                    lines.push(text.iter().map(|&b| b as char).collect());
                }
            }
        }
        lines
    }

    fn advice() -> TravelAdvice {
        TravelAdvice {
            flight_duration: "11h".to_string(),
            currency: "JPY".to_string(),
            activity_locations: "Mt. Fuji".to_string(),
        }
    }

    #[test]
    fn test_report_content_layout() {
        let content = ReportContent::from_advice("Travel Advice Report", &advice());

        assert_eq!(content.title, "Travel Advice Report");
        assert_eq!(
            content.lines,
            vec![
                ReportLine::Heading("Your Travel Details:".to_string()),
                ReportLine::Text("Flight Duration: 11h".to_string()),
                ReportLine::Blank,
                ReportLine::Text("Currency: JPY".to_string()),
                ReportLine::Blank,
                ReportLine::Text("Activity Locations: Mt. Fuji".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_pdf_produces_pdf_bytes() {
        let content = ReportContent::from_advice("Travel Advice Report", &advice());
        let bytes = render_pdf(&content, &ReportFont::Builtin).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(
            drawn_text(&bytes),
            vec![
                "Travel Advice Report",
                "Your Travel Details:",
                "Flight Duration: 11h",
                "Currency: JPY",
                "Activity Locations: Mt. Fuji",
            ]
        );
    }

    #[test]
    fn test_unencodable_characters_stay_visible() {
        let japanese = TravelAdvice {
            activity_locations: "富士山 (Mt. Fuji)".to_string(),
            ..advice()
        };
        let content = ReportContent::from_advice("Travel Advice Report", &japanese);
        let bytes = render_pdf(&content, &ReportFont::Builtin).unwrap();

        let lines = drawn_text(&bytes);
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Activity Locations: ??? (Mt. Fuji)")
        );
    }

    #[test]
    fn test_to_win_ansi() {
        assert_eq!(to_win_ansi("Café – 5€"), ("Café – 5€".to_string(), 0));
        assert_eq!(to_win_ansi("東京 Tokyo"), ("?? Tokyo".to_string(), 2));
        assert_eq!(to_win_ansi(""), (String::new(), 0));
    }

    #[test]
    fn test_report_font_load() {
        assert!(matches!(ReportFont::load(None).unwrap(), ReportFont::Builtin));

        let err = ReportFont::load(Some("/nonexistent/font.ttf")).unwrap_err();
        assert!(matches!(err, AdvisorError::IoError(_)));
    }

    #[test]
    fn test_render_pdf_survives_overflowing_content() {
        let long = TravelAdvice {
            activity_locations: "trail ".repeat(2000),
            ..advice()
        };
        let content = ReportContent::from_advice("Travel Advice Report", &long);
        assert!(content.lines.len() > 40);

        let bytes = render_pdf(&content, &ReportFont::Builtin).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("a b c", 3), vec!["a b", "c"]);
        assert_eq!(wrap_text("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(wrap_text("one\ntwo", 80), vec!["one", "two"]);
        assert_eq!(wrap_text("", 80), vec![""]);
    }

    #[test]
    fn test_unique_report_filename() {
        let first = Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap();
        let second = first + chrono::Duration::milliseconds(5);

        assert_eq!(
            unique_report_filename(first),
            "travel_advice_report_20261016T083000.000Z.pdf"
        );
        assert_ne!(unique_report_filename(first), unique_report_filename(second));
    }
}
