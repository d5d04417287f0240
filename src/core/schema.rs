//! Submit-time schema validation of a [`SurveyRecord`].
//!
//! The rated-entry lists never validate themselves; this pass checks every
//! field at once and reports each problem under its field path so a host can
//! render the messages inline.

use crate::domain::catalog::Catalog;
use crate::domain::model::{
    RatedEntry, SurveyRecord, SurveySubmission, MAX_AGE, MAX_SCORE, MIN_AGE, MIN_SCORE,
};
use crate::domain::rated_list::{RatedEntryList, ScoreField};
use crate::utils::validation::is_valid_email;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email";
pub const MSG_AGE_NOT_A_NUMBER: &str = "Please enter a number.";
pub const MSG_AGE_NOT_INTEGER: &str = "Expected integer, received float";
pub const MSG_AGE_TOO_LOW: &str = "Please enter your actual age.";
pub const MSG_AGE_TOO_HIGH: &str =
    "The oldest person in the world is 116. Please enter your actual age.";
pub const MSG_NOT_IN_CATALOG: &str = "Please select a value from the list";
pub const MSG_RATE_EXPERIENCE: &str = "Please rate your experience";
pub const MSG_RATE_RECOMMENDATION: &str = "Please enter your recommendation";
pub const MSG_SCORE_TOO_HIGH: &str = "Number must be less than or equal to 100";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    InvalidEmail,
    AgeNotANumber,
    AgeNotInteger,
    AgeOutOfRange,
    EntryNotInCatalog,
    DuplicateEntry,
    ExperienceOutOfRange,
    RecommendationOutOfRange,
}

/// Location of a field inside the form, e.g. `languages[2].experience`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPath {
    pub field: String,
    pub index: Option<usize>,
    pub sub_field: Option<String>,
}

impl FieldPath {
    pub fn field(name: &str) -> Self {
        Self {
            field: name.to_string(),
            index: None,
            sub_field: None,
        }
    }

    pub fn row(field: &str, index: usize, sub_field: &str) -> Self {
        Self {
            field: field.to_string(),
            index: Some(index),
            sub_field: Some(sub_field.to_string()),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if let Some(index) = self.index {
            write!(f, "[{}]", index)?;
        }
        if let Some(sub) = &self.sub_field {
            write!(f, ".{}", sub)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub path: FieldPath,
    /// Code of the list entry the issue belongs to, for list rows.
    pub entry: Option<String>,
    pub kind: IssueKind,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: FieldPath, kind: IssueKind, message: &str) -> Self {
        Self {
            path,
            entry: None,
            kind,
            message: message.to_string(),
        }
    }

    fn for_entry(mut self, code: &str) -> Self {
        self.entry = Some(code.to_string());
        self
    }

    /// An imported row whose code is not part of the catalog.
    pub fn not_in_catalog<V: Catalog>(index: usize, code: &str) -> Self {
        Self::new(
            FieldPath::row(V::FIELD, index, "value"),
            IssueKind::EntryNotInCatalog,
            MSG_NOT_IN_CATALOG,
        )
        .for_entry(code)
    }

    /// An imported row repeating a code already used earlier in the list.
    pub fn duplicate<V: Catalog>(index: usize, code: &str) -> Self {
        Self::new(
            FieldPath::row(V::FIELD, index, "value"),
            IssueKind::DuplicateEntry,
            &format!("{} is already in the list", code),
        )
        .for_entry(code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_kind(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    /// First message reported for an exact path.
    pub fn for_path(&self, path: &FieldPath) -> Option<&str> {
        self.issues
            .iter()
            .find(|i| &i.path == path)
            .map(|i| i.message.as_str())
    }

    /// First message for a top-level field such as `email` or `age`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.for_path(&FieldPath::field(name))
    }

    /// Message shown under a list row, looked up by the row's entry code.
    ///
    /// Experience problems win over recommendation problems.
    pub fn row_message(&self, list_field: &str, code: &str) -> Option<&str> {
        let row_issue = |sub: &str| {
            self.issues.iter().find(|i| {
                i.path.field == list_field
                    && i.entry.as_deref() == Some(code)
                    && i.path.sub_field.as_deref() == Some(sub)
            })
        };

        row_issue("value")
            .or_else(|| row_issue(ScoreField::Experience.name()))
            .or_else(|| row_issue(ScoreField::Recommendation.name()))
            .map(|i| i.message.as_str())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {}", issue.path, issue.message)?;
        }
        Ok(())
    }
}

/// Which optional questions the survey asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSet {
    pub sex: bool,
    pub languages: bool,
    pub frameworks: bool,
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self {
            sex: true,
            languages: true,
            frameworks: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SurveySchema {
    questions: QuestionSet,
}

impl SurveySchema {
    pub fn new(questions: QuestionSet) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> QuestionSet {
        self.questions
    }

    /// Checks the whole record, collecting every issue.
    pub fn validate(
        &self,
        record: &SurveyRecord,
    ) -> std::result::Result<SurveySubmission, ValidationReport> {
        let mut report = ValidationReport::new();

        // 不做 trim：前後空白本身就是無效的 email
        let email = record.email.as_str();
        if !email.is_empty() && !is_valid_email(email) {
            report.push(FieldIssue::new(
                FieldPath::field("email"),
                IssueKind::InvalidEmail,
                MSG_INVALID_EMAIL,
            ));
        }

        let age = validate_age(&record.age, &mut report);

        if self.questions.languages {
            validate_entries(&record.languages, &mut report);
        }
        if self.questions.frameworks {
            validate_entries(&record.frameworks, &mut report);
        }

        match age {
            Some(age) if report.is_empty() => Ok(SurveySubmission {
                email: (!email.is_empty()).then(|| email.to_string()),
                age,
                sex: if self.questions.sex {
                    record
                        .sex
                        .as_deref()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                } else {
                    None
                },
                languages: if self.questions.languages {
                    record.languages.entries().to_vec()
                } else {
                    Vec::new()
                },
                frameworks: if self.questions.frameworks {
                    record.frameworks.entries().to_vec()
                } else {
                    Vec::new()
                },
                submitted_at: chrono::Utc::now(),
            }),
            _ => Err(report),
        }
    }
}

/// Reads numeric text the way a browser number coercion does.
///
/// Accepts decimal and exponent forms, unsigned `0x` / `0o` / `0b` integers
/// and `Infinity` with an optional sign. Blank text reads as 0.
fn coerce_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    let lower = text.get(..2).map(str::to_ascii_lowercase);
    let radix = match lower.as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return Some(digits.chars().fold(0.0, |acc, c| {
            acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
        }));
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // f64::from_str 也吃 "inf" / "nan"，這些在表單裡不算數字
    if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// 年齡欄位是文字輸入，先轉成數字再檢查；空白視為 0
fn validate_age(raw: &str, report: &mut ValidationReport) -> Option<u8> {
    let parsed = coerce_number(raw);

    let Some(number) = parsed else {
        report.push(FieldIssue::new(
            FieldPath::field("age"),
            IssueKind::AgeNotANumber,
            MSG_AGE_NOT_A_NUMBER,
        ));
        return None;
    };

    let before = report.len();
    if number.fract() != 0.0 || !number.is_finite() {
        report.push(FieldIssue::new(
            FieldPath::field("age"),
            IssueKind::AgeNotInteger,
            MSG_AGE_NOT_INTEGER,
        ));
    }
    if number < MIN_AGE as f64 {
        report.push(FieldIssue::new(
            FieldPath::field("age"),
            IssueKind::AgeOutOfRange,
            MSG_AGE_TOO_LOW,
        ));
    }
    if number > MAX_AGE as f64 {
        report.push(FieldIssue::new(
            FieldPath::field("age"),
            IssueKind::AgeOutOfRange,
            MSG_AGE_TOO_HIGH,
        ));
    }

    if report.len() > before {
        return None;
    }
    u8::try_from(number as i64).ok()
}

fn validate_entries<V: Catalog>(list: &RatedEntryList<V>, report: &mut ValidationReport) {
    for (index, entry) in list.entries().iter().enumerate() {
        validate_score(entry, index, ScoreField::Experience, report);
        validate_score(entry, index, ScoreField::Recommendation, report);
    }
}

fn validate_score<V: Catalog>(
    entry: &RatedEntry<V>,
    index: usize,
    field: ScoreField,
    report: &mut ValidationReport,
) {
    let (score, kind, too_low) = match field {
        ScoreField::Experience => (
            entry.experience,
            IssueKind::ExperienceOutOfRange,
            MSG_RATE_EXPERIENCE,
        ),
        ScoreField::Recommendation => (
            entry.recommendation,
            IssueKind::RecommendationOutOfRange,
            MSG_RATE_RECOMMENDATION,
        ),
    };

    let message = if score < MIN_SCORE {
        too_low
    } else if score > MAX_SCORE {
        MSG_SCORE_TOO_HIGH
    } else {
        return;
    };

    report.push(
        FieldIssue::new(FieldPath::row(V::FIELD, index, field.name()), kind, message)
            .for_entry(entry.value.code()),
    );
}
