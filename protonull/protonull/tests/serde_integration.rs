use prost_types::{Duration, Timestamp};
use protonull::{JsonNullable, WireNullable};
use serde::{Deserialize, Serialize};

/// `google.protobuf.Empty` is generated as the unit type.
type Empty = ();

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Record {
    id: u32,
    timeout: WireNullable<Option<Duration>>,
    marker: JsonNullable<Option<Empty>>,
    #[serde(default)]
    created: JsonNullable<Option<Timestamp>>,
}

#[test]
fn invalid_fields_serialize_as_null() {
    let record = Record {
        id: 1,
        ..Default::default()
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": 1, "timeout": null, "marker": null, "created": null})
    );
}

#[test]
fn valid_fields_serialize_with_canonical_mapping() {
    let record = Record {
        id: 2,
        timeout: WireNullable::from_message(Some(Duration {
            seconds: 90,
            nanos: 0,
        })),
        marker: JsonNullable::from_message(Some(())),
        created: JsonNullable::default(),
    };
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(
        json,
        r#"{"id":2,"timeout":"90s","marker":{},"created":null}"#
    );
}

#[test]
fn null_and_empty_object_stay_distinct() {
    let record: Record =
        serde_json::from_str(r#"{"id":3,"timeout":null,"marker":{}}"#).unwrap();

    assert!(!record.timeout.is_valid());
    assert_eq!(record.timeout.object, None);

    assert!(record.marker.is_valid());
    assert_eq!(record.marker.object, Some(()));

    assert!(!record.created.is_valid());
}

#[test]
fn record_round_trip() {
    let record = Record {
        id: 4,
        timeout: WireNullable::from_message(Some(Duration {
            seconds: 5,
            nanos: 0,
        })),
        marker: JsonNullable::new(None, false),
        created: JsonNullable::from_message(Some(Timestamp {
            seconds: 86_400,
            nanos: 0,
        })),
    };
    let json = serde_json::to_vec(&record).unwrap();
    let decoded: Record = serde_json::from_slice(&json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn malformed_field_fails_deserialization() {
    let result = serde_json::from_str::<Record>(r#"{"id":5,"timeout":56,"marker":null}"#);
    assert!(result.is_err());
}
