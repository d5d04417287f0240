use anyhow::Result;
use survey_form::core::schema::{IssueKind, MSG_RATE_RECOMMENDATION};
use survey_form::{ConsoleNotifier, FormError, Language, ResponseFile, SurveyConfig, SurveyForm};
use tempfile::TempDir;

/// 從 TOML 回覆檔載入並送出
#[test]
fn test_submit_toml_response() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let response_path = temp_dir.path().join("answers.toml");
    std::fs::write(
        &response_path,
        r#"
email = "someone@example.org"
age = "42"
sex = "female"

[[languages]]
value = "ts"
experience = 65
recommendation = 70
"#,
    )?;

    let record = ResponseFile::from_file(&response_path)?.into_record()?;
    let mut form = SurveyForm::with_record(
        record,
        SurveyConfig::default().schema(),
        ConsoleNotifier::with_writer(Vec::new()).echo_json(true),
    );

    let submission = form.submit()?;
    assert_eq!(submission.age, 42);
    assert_eq!(submission.sex.as_deref(), Some("female"));
    assert_eq!(submission.languages[0].value, Language::TypeScript);
    assert_eq!(form.sink().notified(), 1);
    Ok(())
}

#[test]
fn test_json_response_with_unrated_row_fails_validation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let response_path = temp_dir.path().join("answers.json");
    std::fs::write(
        &response_path,
        r#"{"email": "", "age": 30, "languages": [{"value": "go", "experience": 50}]}"#,
    )?;

    let record = ResponseFile::from_file(&response_path)?.into_record()?;
    let mut form = SurveyForm::with_record(
        record,
        SurveyConfig::default().schema(),
        ConsoleNotifier::with_writer(Vec::new()),
    );

    let Err(FormError::Validation(report)) = form.submit() else {
        panic!("unrated recommendation should fail validation");
    };
    assert_eq!(report.row_message("languages", "go"), Some(MSG_RATE_RECOMMENDATION));
    assert!(report.has_kind(IssueKind::RecommendationOutOfRange));
    assert_eq!(form.sink().notified(), 0);
    Ok(())
}

#[test]
fn test_unsupported_extension_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let response_path = temp_dir.path().join("answers.yaml");
    std::fs::write(&response_path, "age: 30")?;

    let err = ResponseFile::from_file(&response_path).unwrap_err();
    assert!(matches!(err, FormError::InvalidConfigValueError { .. }));
    Ok(())
}

#[test]
fn test_config_disables_frameworks() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("survey.toml");
    std::fs::write(
        &config_path,
        "[survey]\nname = \"languages only\"\n\n[questions]\nframeworks = false\n",
    )?;
    let config = SurveyConfig::from_file(&config_path)?;

    let record = ResponseFile::from_json_str(
        r#"{"age": 18, "frameworks": [{"value": "angular"}]}"#,
    )?
    .into_record()?;

    let mut form = SurveyForm::with_record(
        record,
        config.schema(),
        ConsoleNotifier::with_writer(Vec::new()),
    );
    let submission = form.submit()?;
    assert!(submission.frameworks.is_empty());
    Ok(())
}
