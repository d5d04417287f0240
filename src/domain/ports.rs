use crate::domain::model::{SurveyRecord, SurveySubmission};

/// Receives a submission once it has passed validation.
pub trait SubmissionSink {
    fn on_success(&mut self, submission: &SurveySubmission);
}

/// Observes every committed change to the draft record.
pub trait ChangeListener {
    fn on_change(&mut self, record: &SurveyRecord);
}

impl<F> ChangeListener for F
where
    F: FnMut(&SurveyRecord),
{
    fn on_change(&mut self, record: &SurveyRecord) {
        self(record)
    }
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for Box<S> {
    fn on_success(&mut self, submission: &SurveySubmission) {
        (**self).on_success(submission)
    }
}
