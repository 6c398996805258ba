//! Custom serde helpers.

/// RFC 3339 UTC timestamps with exactly three fractional digits.
///
/// chrono's default serializer trims trailing zeros from the fraction, which
/// breaks lexical ordering of stored timestamps. Fixing the precision makes
/// string order and chronological order agree.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Enrollment {
///     #[serde(with = "skillsphere_core::serde::timestamp_millis")]
///     enrolled_at: DateTime<Utc>,
/// }
/// ```
pub mod timestamp_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::timestamp_millis;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "timestamp_millis")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_whole_seconds_keep_fraction() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"2025-03-01T12:00:00.000Z"}"#);
    }

    #[test]
    fn test_lexical_order_matches_time_order() {
        let earlier = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let later = earlier + Duration::milliseconds(500);
        assert!(timestamp_millis::format(&earlier) < timestamp_millis::format(&later));
    }

    #[test]
    fn test_deserialize_accepts_offsets() {
        let parsed: Stamped =
            serde_json::from_str(r#"{"at":"2025-03-01T14:00:00+02:00"}"#).unwrap();
        assert_eq!(parsed.at, Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
    }
}
