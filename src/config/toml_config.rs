use crate::core::schema::{QuestionSet, SurveySchema};
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    pub survey: SurveyInfo,
    #[serde(default)]
    pub questions: QuestionsConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsConfig {
    #[serde(default = "enabled")]
    pub sex: bool,
    #[serde(default = "enabled")]
    pub languages: bool,
    #[serde(default = "enabled")]
    pub frameworks: bool,
}

impl Default for QuestionsConfig {
    fn default() -> Self {
        Self {
            sex: true,
            languages: true,
            frameworks: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            survey: SurveyInfo {
                name: "Survey".to_string(),
                description: None,
                version: None,
            },
            questions: QuestionsConfig::default(),
            logging: None,
        }
    }
}

impl SurveyConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FormError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SURVEY_NAME})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FormError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn question_set(&self) -> QuestionSet {
        QuestionSet {
            sex: self.questions.sex,
            languages: self.questions.languages,
            frameworks: self.questions.frameworks,
        }
    }

    pub fn schema(&self) -> SurveySchema {
        SurveySchema::new(self.question_set())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl Validate for SurveyConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("survey.name", &self.survey.name)?;

        if !self.questions.languages && !self.questions.frameworks && !self.questions.sex {
            tracing::warn!("All optional questions are disabled; only email and age will be asked");
        }

        if let Some(level) = self.log_level() {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[survey]
name = "dev-survey"
description = "Which languages do you use?"
version = "1.0.0"

[questions]
frameworks = false

[logging]
level = "debug"
json = true
"#;

        let config = SurveyConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.survey.name, "dev-survey");
        assert!(config.questions.languages);
        assert!(!config.questions.frameworks);
        assert!(config.question_set().sex);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_questions_section_is_optional() {
        let config = SurveyConfig::from_toml_str("[survey]\nname = \"s\"\n").unwrap();
        assert_eq!(config.question_set(), QuestionSet::default());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SURVEY_FORM_TEST_NAME", "from-env");

        let config =
            SurveyConfig::from_toml_str("[survey]\nname = \"${SURVEY_FORM_TEST_NAME}\"\n").unwrap();
        assert_eq!(config.survey.name, "from-env");

        std::env::remove_var("SURVEY_FORM_TEST_NAME");
    }

    #[test]
    fn test_config_validation() {
        let blank = SurveyConfig::from_toml_str("[survey]\nname = \"  \"\n").unwrap();
        assert!(blank.validate().is_err());

        let loud =
            SurveyConfig::from_toml_str("[survey]\nname = \"s\"\n[logging]\nlevel = \"loud\"\n")
                .unwrap();
        assert!(loud.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SurveyConfig::from_toml_str("[survey\nname = 1").unwrap_err();
        assert!(matches!(err, FormError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[survey]\nname = \"file-test\"\n")
            .unwrap();

        let config = SurveyConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.survey.name, "file-test");
    }
}
