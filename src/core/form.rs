use crate::core::schema::{SurveySchema, ValidationReport};
use crate::domain::catalog::{Catalog, Framework, Language};
use crate::domain::model::{SurveyRecord, SurveySubmission};
use crate::domain::ports::{ChangeListener, SubmissionSink};
use crate::domain::rated_list::{RatedEntryList, ScoreField};
use crate::utils::error::{FormError, Result};

/// Catalogs that back one of the record's rated lists.
pub trait FormList: Catalog {
    fn list(record: &SurveyRecord) -> &RatedEntryList<Self>;
    fn list_mut(record: &mut SurveyRecord) -> &mut RatedEntryList<Self>;
}

impl FormList for Language {
    fn list(record: &SurveyRecord) -> &RatedEntryList<Self> {
        &record.languages
    }

    fn list_mut(record: &mut SurveyRecord) -> &mut RatedEntryList<Self> {
        &mut record.languages
    }
}

impl FormList for Framework {
    fn list(record: &SurveyRecord) -> &RatedEntryList<Self> {
        &record.frameworks
    }

    fn list_mut(record: &mut SurveyRecord) -> &mut RatedEntryList<Self> {
        &mut record.frameworks
    }
}

/// Form controller: owns the draft record and drives validation and submission.
pub struct SurveyForm<S: SubmissionSink> {
    record: SurveyRecord,
    schema: SurveySchema,
    sink: S,
    listeners: Vec<Box<dyn ChangeListener>>,
    submit_count: usize,
    report: ValidationReport,
}

impl<S: SubmissionSink> SurveyForm<S> {
    pub fn new(schema: SurveySchema, sink: S) -> Self {
        Self::with_record(SurveyRecord::default(), schema, sink)
    }

    pub fn with_record(record: SurveyRecord, schema: SurveySchema, sink: S) -> Self {
        Self {
            record,
            schema,
            sink,
            listeners: Vec::new(),
            submit_count: 0,
            report: ValidationReport::new(),
        }
    }

    pub fn record(&self) -> &SurveyRecord {
        &self.record
    }

    pub fn schema(&self) -> &SurveySchema {
        &self.schema
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn is_submitted(&self) -> bool {
        self.submit_count > 0
    }

    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Errors to display; empty until the first submit attempt.
    pub fn errors(&self) -> Option<&ValidationReport> {
        (self.is_submitted() && !self.report.is_empty()).then_some(&self.report)
    }

    /// Message under row `index` of list `V`, resolved through the row's current value.
    pub fn row_error<V: FormList>(&self, index: usize) -> Option<&str> {
        let entry = V::list(&self.record).get(index)?;
        self.errors()?.row_message(V::FIELD, entry.value.code())
    }

    pub fn language_row_error(&self, index: usize) -> Option<&str> {
        self.row_error::<Language>(index)
    }

    fn commit(&mut self) {
        if self.is_submitted() {
            // 送出過一次後，每次修改都重新驗證，錯誤訊息跟著更正即時消失
            self.report = match self.schema.validate(&self.record) {
                Ok(_) => ValidationReport::new(),
                Err(report) => report,
            };
        }
        for listener in &mut self.listeners {
            listener.on_change(&self.record);
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.record.email = email.into();
        self.commit();
    }

    pub fn set_age(&mut self, age: impl Into<String>) {
        self.record.age = age.into();
        self.commit();
    }

    pub fn set_sex(&mut self, sex: Option<String>) {
        self.record.sex = sex;
        self.commit();
    }

    pub fn list<V: FormList>(&self) -> &RatedEntryList<V> {
        V::list(&self.record)
    }

    /// Applies a fallible edit to a copy of list `V` and swaps it in on success.
    pub fn edit_list<V: FormList, T>(
        &mut self,
        edit: impl FnOnce(&mut RatedEntryList<V>) -> Result<T>,
    ) -> Result<T> {
        let mut next = V::list(&self.record).clone();
        let out = edit(&mut next)?;
        *V::list_mut(&mut self.record) = next;
        self.commit();
        Ok(out)
    }

    pub fn edit_languages<T>(
        &mut self,
        edit: impl FnOnce(&mut RatedEntryList<Language>) -> Result<T>,
    ) -> Result<T> {
        self.edit_list(edit)
    }

    pub fn edit_frameworks<T>(
        &mut self,
        edit: impl FnOnce(&mut RatedEntryList<Framework>) -> Result<T>,
    ) -> Result<T> {
        self.edit_list(edit)
    }

    pub fn add_language(&mut self, value: Language) -> Result<()> {
        self.edit_languages(|list| list.add_entry(value))
    }

    pub fn change_language(&mut self, index: usize, value: Language) -> Result<()> {
        self.edit_languages(|list| list.change_entry_value(index, value))
    }

    pub fn set_language_score(&mut self, index: usize, field: ScoreField, score: i32) -> Result<()> {
        self.edit_languages(|list| list.set_score(index, field, score))
    }

    pub fn remove_language(&mut self, value: Language) -> bool {
        self.edit_languages(|list| Ok(list.remove_entry(value)))
            .unwrap_or(false)
    }

    pub fn languages_for_add(&self) -> Vec<Language> {
        self.record.languages.available_for_add()
    }

    /// Validates the whole record; on success hands it to the sink exactly once.
    pub fn submit(&mut self) -> Result<SurveySubmission> {
        self.submit_count += 1;
        tracing::debug!("Submit attempt #{}", self.submit_count);

        match self.schema.validate(&self.record) {
            Ok(submission) => {
                self.report = ValidationReport::new();
                self.sink.on_success(&submission);
                Ok(submission)
            }
            Err(report) => {
                tracing::warn!("Validation failed with {} issue(s)", report.len());
                self.report = report.clone();
                Err(FormError::Validation(report))
            }
        }
    }
}
