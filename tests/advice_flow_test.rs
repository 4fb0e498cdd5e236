mod common;

use anyhow::Result;
use common::{drawn_text, mock_add_ok, mock_rows, row, test_config, ADD_PATH, ROWS_PATH};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use travel_advisor::core::report::{
    render_pdf, unique_report_filename, ReportContent, ReportFont,
};
use travel_advisor::core::Storage;
use travel_advisor::web::render;
use travel_advisor::{Advisor, AdvisorError, GenTableClient, LocalStorage, TravelRequest};

/// 完整流程：新增列 -> 讀取 -> 顯示 -> 匯出
#[tokio::test]
async fn test_end_to_end_usa_japan_hiking() -> Result<()> {
    let server = MockServer::start();

    let add_mock = server.mock(|when, then| {
        when.method(POST).path(ADD_PATH).json_body(json!({
            "data": [{
                "Home Country": "USA",
                "Desired Country": "Japan",
                "Preferred Activity": "hiking"
            }],
            "table_id": "Travel_Advisor",
            "stream": false
        }));
        then.status(200);
    });
    let rows_mock = mock_rows(
        &server,
        vec![row(("USA", "Japan", "hiking"), ("11h", "JPY", "Mt. Fuji"))],
    );

    let advisor = Advisor::new(GenTableClient::new(test_config(&server.base_url()))?);
    let request = TravelRequest::new("USA", "Japan", "hiking");

    let advice = advisor.advise(&request).await?;

    add_mock.assert();
    rows_mock.assert();
    assert_eq!(advice.flight_duration, "11h");
    assert_eq!(advice.currency, "JPY");
    assert_eq!(advice.activity_locations, "Mt. Fuji");

    let engine = render::template_engine()?;
    let html = render::advice_sections(&engine, &advice)?;
    assert!(html.contains(">11h<"));
    assert!(html.contains(">JPY<"));
    assert!(html.contains(">Mt. Fuji<"));

    let content = ReportContent::from_advice("Travel Advice Report", &advice);
    assert_eq!(
        content.plain_text(),
        "Travel Advice Report\nYour Travel Details:\nFlight Duration: 11h\n\nCurrency: JPY\n\nActivity Locations: Mt. Fuji"
    );

    // 匯出到暫存目錄，檔名每次不同
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let written = storage
        .write_file(&unique_report_filename(chrono::Utc::now()), &render_pdf(&content, &ReportFont::Builtin)?)
        .await?;

    let bytes = std::fs::read(&written)?;
    assert!(bytes.starts_with(b"%PDF"));
    let drawn = drawn_text(&bytes);
    for line in [
        "Flight Duration: 11h",
        "Currency: JPY",
        "Activity Locations: Mt. Fuji",
    ] {
        assert!(drawn.contains(&line.to_string()), "missing {:?} in {:?}", line, drawn);
    }
    assert!(written.contains("travel_advice_report_"));

    Ok(())
}

#[tokio::test]
async fn test_submission_failure_reports_status_and_skips_retrieval() -> Result<()> {
    let server = MockServer::start();

    let add_mock = server.mock(|when, then| {
        when.method(POST).path(ADD_PATH);
        then.status(503).body("upstream unavailable");
    });
    let rows_mock = mock_rows(&server, vec![]);

    let advisor = Advisor::new(GenTableClient::new(test_config(&server.base_url()))?);
    let err = advisor
        .advise(&TravelRequest::new("USA", "Japan", "hiking"))
        .await
        .unwrap_err();

    add_mock.assert();
    assert_eq!(rows_mock.hits(), 0);
    assert!(err.to_string().contains("503"));
    assert!(err.user_friendly_message().contains("upstream unavailable"));

    Ok(())
}

#[tokio::test]
async fn test_retrieval_failure_is_an_error() -> Result<()> {
    let server = MockServer::start();

    mock_add_ok(&server);
    server.mock(|when, then| {
        when.method(GET).path(ROWS_PATH);
        then.status(500).body("database exploded");
    });

    let advisor = Advisor::new(GenTableClient::new(test_config(&server.base_url()))?);
    let err = advisor
        .advise(&TravelRequest::new("USA", "Japan", "hiking"))
        .await
        .unwrap_err();

    assert!(matches!(err, AdvisorError::RetrievalError { status: 500, .. }));
    assert!(!err.is_warning());

    Ok(())
}

#[tokio::test]
async fn test_lookup_outcomes_are_distinct() -> Result<()> {
    let request = TravelRequest::new("USA", "Japan", "hiking");

    // 空表格
    let server = MockServer::start();
    mock_add_ok(&server);
    mock_rows(&server, vec![]);
    let advisor = Advisor::new(GenTableClient::new(test_config(&server.base_url()))?);
    assert!(matches!(
        advisor.advise(&request).await,
        Err(AdvisorError::NoDataError)
    ));

    // 有資料但沒有相符的列
    let server = MockServer::start();
    mock_add_ok(&server);
    mock_rows(
        &server,
        vec![row(("USA", "Italy", "hiking"), ("10h", "EUR", "Dolomites"))],
    );
    let advisor = Advisor::new(GenTableClient::new(test_config(&server.base_url()))?);
    assert!(matches!(
        advisor.advise(&request).await,
        Err(AdvisorError::NoMatchError)
    ));

    // 相符但輸出欄位不完整
    let server = MockServer::start();
    mock_add_ok(&server);
    mock_rows(
        &server,
        vec![row(("USA", "Japan", "hiking"), ("11h", "JPY", ""))],
    );
    let advisor = Advisor::new(GenTableClient::new(test_config(&server.base_url()))?);
    match advisor.advise(&request).await {
        Err(AdvisorError::MissingDetailsError { missing }) => {
            assert_eq!(missing, "Activity Locations")
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_newest_duplicate_row_wins() -> Result<()> {
    let server = MockServer::start();
    mock_add_ok(&server);
    mock_rows(
        &server,
        vec![
            row(("USA", "Japan", "hiking"), ("14h", "JPY", "Stale answer")),
            row(("USA", "Japan", "hiking"), ("11h", "JPY", "Mt. Fuji")),
        ],
    );

    let advisor = Advisor::new(GenTableClient::new(test_config(&server.base_url()))?);
    let advice = advisor
        .advise(&TravelRequest::new("USA", "Japan", "hiking"))
        .await?;

    assert_eq!(advice.flight_duration, "11h");
    assert_eq!(advice.activity_locations, "Mt. Fuji");

    Ok(())
}

#[tokio::test]
async fn test_blank_fields_issue_no_http_calls() -> Result<()> {
    let server = MockServer::start();
    let add_mock = mock_add_ok(&server);
    let rows_mock = mock_rows(&server, vec![]);

    let advisor = Advisor::new(GenTableClient::new(test_config(&server.base_url()))?);

    for request in [
        TravelRequest::new("", "Japan", "hiking"),
        TravelRequest::new("USA", "", "hiking"),
        TravelRequest::new("USA", "Japan", "  "),
    ] {
        let err = advisor.advise(&request).await.unwrap_err();
        assert!(matches!(err, AdvisorError::ValidationError { .. }));
    }

    assert_eq!(add_mock.hits(), 0);
    assert_eq!(rows_mock.hits(), 0);

    Ok(())
}
