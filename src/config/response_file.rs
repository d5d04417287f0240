//! Pre-filled answers loaded from a TOML or JSON file.

use crate::core::schema::{FieldIssue, ValidationReport};
use crate::domain::catalog::{Catalog, Framework, Language};
use crate::domain::model::{RatedEntry, SurveyRecord, UNRATED};
use crate::domain::rated_list::RatedEntryList;
use crate::utils::error::{FormError, Result};
use crate::utils::validation::validate_path;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn unrated() -> i32 {
    UNRATED
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAge {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawAge {
    fn into_text(self) -> String {
        match self {
            RawAge::Int(n) => n.to_string(),
            RawAge::Float(n) => n.to_string(),
            RawAge::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub value: String,
    #[serde(default = "unrated")]
    pub experience: i32,
    #[serde(default = "unrated")]
    pub recommendation: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseFile {
    #[serde(default)]
    pub email: String,
    pub age: Option<RawAge>,
    pub sex: Option<String>,
    #[serde(default)]
    pub languages: Vec<RawEntry>,
    #[serde(default)]
    pub frameworks: Vec<RawEntry>,
}

impl ResponseFile {
    /// 依副檔名決定格式：`.json` 或 `.toml`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        validate_path("response", &path.to_string_lossy())?;
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(FormError::InvalidConfigValueError {
                field: "response".to_string(),
                value: path.display().to_string(),
                reason: format!(
                    "Unsupported response file extension {:?}; use .json or .toml",
                    other.unwrap_or("")
                ),
            }),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FormError::ConfigValidationError {
            field: "response".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Converts the raw answers into a draft record.
    ///
    /// Codes outside the catalog and repeated codes are reported per row.
    pub fn into_record(self) -> Result<SurveyRecord> {
        let mut report = ValidationReport::new();
        let languages = convert_entries::<Language>(self.languages, &mut report);
        let frameworks = convert_entries::<Framework>(self.frameworks, &mut report);

        if !report.is_empty() {
            return Err(FormError::Validation(report));
        }

        Ok(SurveyRecord {
            email: self.email,
            age: self.age.map(RawAge::into_text).unwrap_or_default(),
            sex: self.sex,
            languages: RatedEntryList::from_entries(languages)?,
            frameworks: RatedEntryList::from_entries(frameworks)?,
        })
    }
}

fn convert_entries<V: Catalog>(raw: Vec<RawEntry>, report: &mut ValidationReport) -> Vec<RatedEntry<V>> {
    let mut entries: Vec<RatedEntry<V>> = Vec::with_capacity(raw.len());

    for (index, entry) in raw.into_iter().enumerate() {
        let Some(value) = V::from_code(&entry.value) else {
            report.push(FieldIssue::not_in_catalog::<V>(index, &entry.value));
            continue;
        };
        if entries.iter().any(|e| e.value == value) {
            report.push(FieldIssue::duplicate::<V>(index, &entry.value));
            continue;
        }
        entries.push(RatedEntry {
            value,
            experience: entry.experience,
            recommendation: entry.recommendation,
        });
    }

    entries
}
