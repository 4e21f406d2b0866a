use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStrategy {
    /// Every invocation writes the same object keys; concurrent invocations
    /// overwrite each other's artifacts.
    #[default]
    Fixed,
    /// Keys carry the invocation timestamp.
    Timestamped,
}

impl KeyStrategy {
    pub const EXPECTED_VALUES: &'static str = "fixed, timestamped";

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fixed" => Some(Self::Fixed),
            "timestamped" => Some(Self::Timestamped),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Timestamped => "timestamped",
        }
    }
}

pub fn artifact_file_name(
    default_file_name: &str,
    strategy: KeyStrategy,
    invoked_at: DateTime<Utc>,
) -> String {
    match strategy {
        KeyStrategy::Fixed => default_file_name.to_string(),
        KeyStrategy::Timestamped => {
            let stamp = invoked_at.format("%Y%m%dT%H%M%S%3fZ");
            match default_file_name.rsplit_once('.') {
                Some((stem, extension)) => format!("{stem}-{stamp}.{extension}"),
                None => format!("{default_file_name}-{stamp}"),
            }
        }
    }
}

pub fn artifact_object_key(base_prefix: Option<&str>, file_name: &str) -> String {
    let trimmed = base_prefix.unwrap_or_default().trim_matches('/');
    if trimmed.is_empty() {
        file_name.to_string()
    } else {
        format!("{trimmed}/{file_name}")
    }
}
