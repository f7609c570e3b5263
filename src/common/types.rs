use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One chat turn, authored locally or by the remote assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content: String,
    pub is_user: bool,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            timestamp: Utc::now(),
        }
    }
}

/// Accepts RFC 3339 strings and epoch milliseconds. Anything else decodes to
/// the Unix epoch so a single bad entry does not sink the whole history.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &raw {
        serde_json::Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|time| time.with_timezone(&Utc)),
        serde_json::Value::Number(number) => {
            number.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis)
        }
        _ => None,
    };

    Ok(parsed.unwrap_or_else(|| {
        log::warn!("Unreadable message timestamp {raw}; falling back to epoch");
        DateTime::<Utc>::UNIX_EPOCH
    }))
}
