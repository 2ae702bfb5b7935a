use clap::Parser;
use listing_ledger::capture::{inspect_image, OcrImageSource, StdinSource, TextFileSource};
use listing_ledger::config::{CaptureArgs, Command};
use listing_ledger::core::engine::RunReport;
use listing_ledger::domain::ports::TextSource;
use listing_ledger::sinks::{extract_spreadsheet_id, sinks_from_config};
use listing_ledger::utils::logger;
use listing_ledger::utils::validation::validate_spreadsheet_id;
use listing_ledger::{
    AppSettings, CaptureOutcome, CliConfig, LedgerEngine, LedgerError, ListingParser,
    ListingPipeline, Result, TesseractOcr,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_format);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ listing-ledger failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: CliConfig) -> Result<()> {
    let mut settings = AppSettings::load(&config.settings).await?;

    match config.command {
        Command::Capture(args) => {
            args.apply_overrides(&mut settings);
            args.check_settings(&settings)?;
            capture(&args, &settings).await
        }
        Command::SetSheet { target, worksheet } => {
            let spreadsheet_id = extract_spreadsheet_id(&target)?;
            settings.sheet.spreadsheet_id = Some(spreadsheet_id.clone());
            if let Some(worksheet) = worksheet {
                settings.sheet.worksheet_name = worksheet;
            }
            validate_spreadsheet_id("sheet.spreadsheet_id", &spreadsheet_id)?;
            settings.save(&config.settings).await?;
            println!(
                "✅ Sheet set: {} / {}",
                spreadsheet_id, settings.sheet.worksheet_name
            );
            Ok(())
        }
        Command::ShowSettings => {
            let mut shown = settings.clone();
            if shown.sheet.access_token.is_some() {
                shown.sheet.access_token = Some("<redacted>".to_string());
            }
            print!("{}", toml::to_string_pretty(&shown)?);
            Ok(())
        }
    }
}

async fn capture(args: &CaptureArgs, settings: &AppSettings) -> Result<()> {
    let report = match (&args.text, &args.image) {
        (Some(path), _) if path == "-" => run_pipeline(StdinSource, args, settings).await?,
        (Some(path), _) => run_pipeline(TextFileSource::new(path), args, settings).await?,
        (None, Some(image)) => {
            let outcome = inspect_image(image);
            if let CaptureOutcome::Failed { reason } = &outcome {
                tracing::warn!("Capture unusable: {}", reason);
            }

            let ocr = TesseractOcr::new(settings.ocr.tesseract_cmd.clone());
            match ocr.version().await {
                Ok(version) => tracing::debug!("Using {}", version),
                Err(e) => tracing::warn!("{}", e),
            }

            let source = OcrImageSource::new(ocr, outcome, args.mode);
            run_pipeline(source, args, settings).await?
        }
        (None, None) => {
            return Err(LedgerError::config(
                "either --text or --image is required",
            ))
        }
    };

    print_report(&report, args.json)?;
    Ok(())
}

async fn run_pipeline<T: TextSource>(
    source: T,
    args: &CaptureArgs,
    settings: &AppSettings,
) -> Result<RunReport> {
    let sinks = if args.dry_run {
        Vec::new()
    } else {
        sinks_from_config(settings)?
    };

    let parser = ListingParser::new(settings.parser.clone());
    let pipeline = ListingPipeline::new(source, parser, sinks);
    LedgerEngine::new(pipeline)
        .with_dry_run(args.dry_run)
        .run()
        .await
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report.parse.records)?);
    } else {
        for record in &report.parse.records {
            println!("{}", record);
        }
    }

    if !report.has_usable_data() {
        eprintln!("⚠️  No usable listings found. Check the OCR text or selection.");
        return Ok(());
    }

    match &report.saved {
        Some(summary) if summary.all_saved() => println!("✅ {}", summary.status_line()),
        Some(summary) => {
            return Err(LedgerError::SinkError {
                sink: "save".to_string(),
                message: summary.status_line(),
            })
        }
        None => println!("🔍 Dry run: {} listing(s) not saved", report.parse.records.len()),
    }

    Ok(())
}
