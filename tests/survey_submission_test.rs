use survey_form::core::schema::{IssueKind, MSG_AGE_TOO_HIGH, MSG_INVALID_EMAIL};
use survey_form::domain::model::UNRATED;
use survey_form::domain::ports::SubmissionSink;
use survey_form::{
    Catalog, FormError, Language, RatedEntry, RatedEntryList, ScoreField, SurveyForm,
    SurveySchema, SurveySubmission,
};

#[derive(Default)]
struct RecordingSink {
    received: Vec<SurveySubmission>,
}

impl SubmissionSink for RecordingSink {
    fn on_success(&mut self, submission: &SurveySubmission) {
        self.received.push(submission.clone());
    }
}

fn new_form() -> SurveyForm<RecordingSink> {
    SurveyForm::new(SurveySchema::default(), RecordingSink::default())
}

fn entry(value: Language, experience: i32, recommendation: i32) -> RatedEntry<Language> {
    RatedEntry {
        value,
        experience,
        recommendation,
    }
}

/// 空清單加入 py 之後只有一筆未評分的項目
#[test]
fn test_add_to_empty_list() {
    let mut form = new_form();
    form.add_language(Language::Python).unwrap();

    assert_eq!(
        form.record().languages.entries(),
        &[entry(Language::Python, UNRATED, UNRATED)]
    );
}

#[test]
fn test_set_experience_on_first_row() {
    let mut form = new_form();
    form.add_language(Language::Python).unwrap();
    form.add_language(Language::Go).unwrap();

    form.set_language_score(0, ScoreField::Experience, 80).unwrap();

    assert_eq!(
        form.record().languages.entries(),
        &[
            entry(Language::Python, 80, UNRATED),
            entry(Language::Go, UNRATED, UNRATED)
        ]
    );
}

#[test]
fn test_rename_keeps_scores() {
    let mut list = RatedEntryList::from_entries(vec![entry(Language::Python, 80, 30)]).unwrap();
    list.change_entry_value(0, Language::Rust).unwrap();

    assert_eq!(list.entries(), &[entry(Language::Rust, 80, 30)]);
}

#[test]
fn test_out_of_range_age_blocks_submission() {
    let mut form = new_form();
    form.set_age("200");

    let err = form.submit().unwrap_err();
    let FormError::Validation(report) = err else {
        panic!("expected validation failure, got {:?}", err);
    };
    assert_eq!(report.field("age"), Some(MSG_AGE_TOO_HIGH));
    assert!(report.has_kind(IssueKind::AgeOutOfRange));
    assert!(form.sink().received.is_empty());
}

/// 只有空白或前後帶空白的 email 都不能送出
#[test]
fn test_padded_email_blocks_submission() {
    for email in ["   ", " a@b.io "] {
        let mut form = new_form();
        form.set_email(email);
        form.set_age("30");

        let err = form.submit().unwrap_err();
        let FormError::Validation(report) = err else {
            panic!("expected validation failure, got {:?}", err);
        };
        assert_eq!(report.field("email"), Some(MSG_INVALID_EMAIL));
        assert!(form.sink().received.is_empty());
    }
}

#[test]
fn test_valid_submission_notifies_once() {
    let mut form = new_form();
    form.set_email("");
    form.set_age("30");
    form.add_language(Language::Python).unwrap();
    form.set_language_score(0, ScoreField::Experience, 50).unwrap();
    form.set_language_score(0, ScoreField::Recommendation, 50).unwrap();

    let submission = form.submit().unwrap();

    assert_eq!(form.sink().received.len(), 1);
    assert_eq!(form.sink().received[0], submission);
    assert_eq!(submission.email, None);
    assert_eq!(submission.age, 30);
    assert_eq!(submission.languages, vec![entry(Language::Python, 50, 50)]);
}

#[test]
fn test_available_for_add_shrinks_with_each_pick() {
    let mut form = new_form();
    for (picked, &value) in Language::ALL.iter().enumerate() {
        let available = form.languages_for_add();
        assert_eq!(available.len(), Language::ALL.len() - picked);
        assert_eq!(available[0], value);
        form.add_language(value).unwrap();
    }
    assert!(form.languages_for_add().is_empty());
}

#[test]
fn test_fix_and_resubmit() {
    let mut form = new_form();
    form.set_email("broken@");
    form.set_age("29");
    assert!(form.submit().is_err());
    assert!(form.errors().and_then(|r| r.field("email")).is_some());

    form.set_email("fixed@example.com");
    assert!(form.errors().is_none());

    let submission = form.submit().unwrap();
    assert_eq!(submission.email.as_deref(), Some("fixed@example.com"));
    assert_eq!(form.submit_count(), 2);
    assert_eq!(form.sink().received.len(), 1);
}
