use crate::domain::catalog::{Framework, Language};
use crate::domain::rated_list::RatedEntryList;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score value of a freshly added row that has not been rated yet.
pub const UNRATED: i32 = -1;
pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 116;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatedEntry<V> {
    pub value: V,
    pub experience: i32,
    pub recommendation: i32,
}

impl<V> RatedEntry<V> {
    pub fn unrated(value: V) -> Self {
        Self {
            value,
            experience: UNRATED,
            recommendation: UNRATED,
        }
    }
}

/// 表單草稿：隨使用者輸入逐欄更新，送出時才整體驗證
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyRecord {
    pub email: String,
    /// Raw text of the age input; parsed only during validation.
    pub age: String,
    pub sex: Option<String>,
    pub languages: RatedEntryList<Language>,
    pub frameworks: RatedEntryList<Framework>,
}

/// A record that passed validation and was handed to the submission sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub email: Option<String>,
    pub age: u8,
    pub sex: Option<String>,
    pub languages: Vec<RatedEntry<Language>>,
    pub frameworks: Vec<RatedEntry<Framework>>,
    pub submitted_at: DateTime<Utc>,
}
