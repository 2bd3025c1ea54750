pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time.format(DATE_FMT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)
    }
}

// same format as serializer for nullable timestamps such as checked_in
pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        time.map(|t| t.format(DATE_FMT).to_string()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        str_time.map(|s| NaiveDateTime::parse_from_str(&s, DATE_FMT).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Serialize};
    use crate::utils::date::{opt_serializer, serializer};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "serializer")]
        at: NaiveDateTime,
        #[serde(with = "opt_serializer")]
        closed: Option<NaiveDateTime>,
    }

    #[tokio::test]
    async fn test_should_write_and_read_timestamps() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_milli_opt(10, 15, 30, 250).unwrap();
        let stamp = Stamp { at, closed: None };
        let json = serde_json::to_string(&stamp).unwrap();
        assert_eq!(r#"{"at":"2024-03-09T10:15:30.250","closed":null}"#, json);
        assert_eq!(stamp, serde_json::from_str::<Stamp>(json.as_str()).unwrap());

        let closed = Stamp { at, closed: Some(at) };
        let json = serde_json::to_string(&closed).unwrap();
        assert_eq!(closed, serde_json::from_str::<Stamp>(json.as_str()).unwrap());
    }
}
