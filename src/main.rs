use clap::Parser;
use survey_form::core::session::HELP;
use survey_form::utils::error::ErrorSeverity;
use survey_form::utils::{logger, validation::Validate};
use survey_form::{
    run_session, CliConfig, ConsoleNotifier, FormError, ResponseFile, RunMode, SurveyConfig,
    SurveyForm, SurveyRecord,
};
use tokio::io::{AsyncWriteExt, BufReader};

fn exit_code(e: &FormError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report_failure(e: &FormError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e).max(1));
}

fn interactive_form(survey: &SurveyConfig, notifier: ConsoleNotifier) -> SurveyForm<ConsoleNotifier> {
    let mut form = SurveyForm::new(survey.schema(), notifier);
    form.subscribe(|record: &SurveyRecord| {
        tracing::debug!(
            "Record changed: {} language(s), {} framework(s)",
            record.languages.len(),
            record.frameworks.len()
        );
    });
    form
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 載入問卷設定；未指定時使用預設值
    let survey = match &args.config {
        Some(path) => match SurveyConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => SurveyConfig::default(),
    };

    logger::init_logger(
        args.verbose,
        args.json_logs || survey.json_logs(),
        survey.log_level(),
    );
    tracing::info!("🚀 Starting survey '{}'", survey.survey.name);
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    if let Err(e) = survey.validate() {
        report_failure(&e);
    }

    let notifier = ConsoleNotifier::new().echo_json(args.echo_json);

    match args.mode() {
        RunMode::Response(path) => {
            tracing::info!("📁 Loading response from: {}", path);
            let record = match ResponseFile::from_file(&path).and_then(ResponseFile::into_record) {
                Ok(record) => record,
                Err(e) => report_failure(&e),
            };

            let mut form = SurveyForm::with_record(record, survey.schema(), notifier);
            if let Err(e) = form.submit() {
                report_failure(&e);
            }
        }
        RunMode::Script(path) => {
            tracing::info!("📜 Replaying commands from: {}", path);
            let file = match tokio::fs::File::open(&path).await {
                Ok(file) => file,
                Err(e) => report_failure(&FormError::from(e)),
            };

            let mut form = interactive_form(&survey, notifier);
            let mut stdout = tokio::io::stdout();
            let summary = run_session(&mut form, BufReader::new(file), &mut stdout).await?;

            if summary.submissions == 0 {
                eprintln!("❌ The script finished without a successful submit");
                std::process::exit(2);
            }
        }
        RunMode::Interactive => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(format!("{}\n\n", HELP).as_bytes())
                .await?;

            let mut form = interactive_form(&survey, notifier);
            run_session(&mut form, BufReader::new(tokio::io::stdin()), &mut stdout).await?;
        }
    }

    Ok(())
}
