use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Identifier minted once, when a script is first saved
pub type ScriptId = String;

/// A stored unit of text the user reads from during playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: ScriptId,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds
    pub created_at: i64,
}

impl Script {
    /// A brand-new script stamped with `now`
    pub fn create_at(
        now: DateTime<Utc>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            title: title.into(),
            content: content.into(),
            created_at: now.timestamp_millis(),
        }
    }

    /// Creation date in long form, in local time
    pub fn created_display(&self) -> String {
        match Local.timestamp_millis_opt(self.created_at).single() {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None => "unknown date".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_at_derives_id_and_timestamp_from_the_same_instant() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 5).unwrap();
        let script = Script::create_at(now, "Intro", "Hello");
        assert_eq!(script.id, "2024-03-09T18:30:05.000Z");
        assert_eq!(script.created_at, now.timestamp_millis());
    }

    #[test]
    fn serializes_with_original_field_names() {
        let script = Script {
            id: "a".to_string(),
            title: "T".to_string(),
            content: "C".to_string(),
            created_at: 42,
        };
        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(
            json,
            r#"{"id":"a","title":"T","content":"C","createdAt":42}"#
        );
    }
}
