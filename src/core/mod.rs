pub mod form;
pub mod schema;
pub mod session;

pub use crate::domain::model::{RatedEntry, SurveyRecord, SurveySubmission};
pub use crate::domain::ports::{ChangeListener, SubmissionSink};
pub use crate::utils::error::Result;
