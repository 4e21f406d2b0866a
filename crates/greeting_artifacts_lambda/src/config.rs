use greeting_artifacts_core::document::DocumentContent;
use greeting_artifacts_core::spreadsheet::SpreadsheetTemplate;
use greeting_artifacts_core::storage_keys::KeyStrategy;
use thiserror::Error;

pub const BUCKET_ENV: &str = "GREETING_ARTIFACTS_BUCKET";
pub const LEGACY_BUCKET_ENV: &str = "S3_BUCKET";
pub const PREFIX_ENV: &str = "GREETING_ARTIFACTS_PREFIX";
pub const KEY_STRATEGY_ENV: &str = "GREETING_ARTIFACT_KEYS";
pub const DOCUMENT_CONTENT_ENV: &str = "GREETING_DOCUMENT_CONTENT";
pub const SPREADSHEET_TEMPLATE_ENV: &str = "GREETING_SPREADSHEET_TEMPLATE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("GREETING_ARTIFACTS_BUCKET (or S3_BUCKET) must be configured")]
    MissingBucket,

    #[error("{variable} has unsupported value '{value}' (expected one of: {expected})")]
    InvalidValue {
        variable: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings resolved once per execution environment.
///
/// Storage credentials are never part of this; the S3 client picks them up
/// from the platform's default credential chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub bucket: String,
    pub prefix: Option<String>,
    pub key_strategy: KeyStrategy,
    pub document_content: DocumentContent,
    pub spreadsheet_template: SpreadsheetTemplate,
}

impl HandlerConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: None,
            key_strategy: KeyStrategy::default(),
            document_content: DocumentContent::default(),
            spreadsheet_template: SpreadsheetTemplate::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bucket = read(BUCKET_ENV)
            .or_else(|| read(LEGACY_BUCKET_ENV))
            .ok_or(ConfigError::MissingBucket)?;

        Ok(Self {
            bucket,
            prefix: read(PREFIX_ENV),
            key_strategy: parse_setting(
                read(KEY_STRATEGY_ENV),
                KEY_STRATEGY_ENV,
                KeyStrategy::EXPECTED_VALUES,
                KeyStrategy::parse,
            )?,
            document_content: parse_setting(
                read(DOCUMENT_CONTENT_ENV),
                DOCUMENT_CONTENT_ENV,
                DocumentContent::EXPECTED_VALUES,
                DocumentContent::parse,
            )?,
            spreadsheet_template: parse_setting(
                read(SPREADSHEET_TEMPLATE_ENV),
                SPREADSHEET_TEMPLATE_ENV,
                SpreadsheetTemplate::EXPECTED_VALUES,
                SpreadsheetTemplate::parse,
            )?,
        })
    }
}

fn parse_setting<T: Default>(
    raw: Option<String>,
    variable: &'static str,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(T::default()),
        Some(value) => parse(&value).ok_or(ConfigError::InvalidValue {
            variable,
            value,
            expected,
        }),
    }
}
