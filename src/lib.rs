pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::notifier::ConsoleNotifier;
pub use config::{response_file::ResponseFile, toml_config::SurveyConfig, RunMode};
pub use crate::core::{
    form::SurveyForm,
    schema::{SurveySchema, ValidationReport},
    session::run_session,
};
pub use domain::catalog::{Catalog, Framework, Language};
pub use domain::model::{RatedEntry, SurveyRecord, SurveySubmission};
pub use domain::rated_list::{RatedEntryList, ScoreField};
pub use utils::error::{FormError, Result};
