use clap::Parser;
use travel_advisor::core::report::{render_pdf, unique_report_filename, ReportContent, ReportFont};
use travel_advisor::core::Storage;
use travel_advisor::utils::error::ErrorSeverity;
use travel_advisor::utils::{logger, validation::Validate};
use travel_advisor::web::{self, AppState};
use travel_advisor::{
    Advisor, AdvisorConfig, AdvisorError, CliConfig, Command, GenTableClient, LocalStorage,
    TravelRequest,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting travel-advisor");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match cli.load_config() {
        Ok(config) => run(&cli, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ travel-advisor failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4, // 警告：查無建議或欄位空白
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: AdvisorConfig) -> Result<(), AdvisorError> {
    // 驗證配置
    config.validate()?;

    let bind_address = config.bind_address().to_string();
    let output_path = config.output_path().to_string();
    let report = config.report.clone();
    let advisor = Advisor::new(GenTableClient::new(config)?);

    match &cli.command {
        Command::Serve { .. } => {
            let state = AppState::new(advisor, &report)?;
            web::serve(state, &bind_address).await
        }
        Command::Advise {
            home_country,
            desired_country,
            activity,
            ..
        } => {
            let request = TravelRequest::new(
                home_country.as_str(),
                desired_country.as_str(),
                activity.as_str(),
            );
            let advice = advisor.advise(&request).await?;

            println!("✈️  Flight Duration: {}", advice.flight_duration);
            println!("💰 Currency: {}", advice.currency);
            println!("🏖️  Activity Locations: {}", advice.activity_locations);

            let font = ReportFont::load(report.font_path.as_deref())?;
            let content = ReportContent::from_advice(&report.title, &advice);
            let bytes = render_pdf(&content, &font)?;
            let storage = LocalStorage::new(output_path);
            let written = storage
                .write_file(&unique_report_filename(chrono::Utc::now()), &bytes)
                .await?;

            tracing::info!("📁 Report saved to: {}", written);
            println!("📁 Report saved to: {}", written);
            Ok(())
        }
    }
}
