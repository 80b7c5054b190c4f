//! BSON encodings shared by the Mongo repositories.
//!
//! The driver writes documents with the raw serializer, which is not
//! human-readable: a `Uuid` field lands as 16 bytes of generic binary, not as
//! its hyphenated string. Filter values have to be encoded the same way or
//! they never match.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, spec::BinarySubtype, Binary, Bson};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Encode an id exactly as the driver stores a `Uuid` field
pub fn uuid_to_bson(id: Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}

/// Serde `with` module for `DateTime<Utc>` fields of stored documents.
///
/// BSON gets a native date so `createdAt` sorts chronologically. JSON and any
/// other human-readable format keep chrono's RFC 3339 string.
pub mod bson_datetime {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            value.serialize(serializer)
        } else {
            bson::DateTime::from_millis(value.timestamp_millis()).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            DateTime::<Utc>::deserialize(deserializer)
        } else {
            let stored = bson::DateTime::deserialize(deserializer)?;
            DateTime::from_timestamp_millis(stored.timestamp_millis())
                .ok_or_else(|| de::Error::custom("stored date is out of range"))
        }
    }

    /// Same encoding for optional timestamps
    pub mod option {
        use super::*;

        struct Stored<'a>(&'a DateTime<Utc>);

        impl Serialize for Stored<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                super::serialize(self.0, serializer)
            }
        }

        struct Loaded(DateTime<Utc>);

        impl<'de> Deserialize<'de> for Loaded {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                super::deserialize(deserializer).map(Loaded)
            }
        }

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => serializer.serialize_some(&Stored(value)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(Option::<Loaded>::deserialize(deserializer)?.map(|Loaded(value)| value))
        }
    }
}
