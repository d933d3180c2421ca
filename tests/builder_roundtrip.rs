//! End-to-end exercises of grouped product codecs against the built-in
//! plain provider, plus property-based round-trip checks.

use indexmap::IndexMap;

use treble::codec::enums::EnumNameCodec;
use treble::codec::map::MapCodec;
use treble::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Severity {
    Info,
    Warning,
    Critical,
}
enum_repr!(Severity => Info, Warning, Critical);

#[derive(Clone, PartialEq, Debug)]
struct Incident {
    title: String,
    severity: Severity,
    acknowledged: bool,
    assignee: Option<String>,
    affected_hosts: Vec<String>,
    metrics: IndexMap<String, f64>,
}

impl Incident {
    fn new(
        title: String,
        severity: Severity,
        acknowledged: bool,
        assignee: Option<String>,
        affected_hosts: Vec<String>,
        metrics: IndexMap<String, f64>,
    ) -> Self {
        Self {
            title,
            severity,
            acknowledged,
            assignee,
            affected_hosts,
            metrics,
        }
    }
}

fn incident_codec() -> impl Codec<Value = Incident> {
    CodecBuilder::group6(
        STRING
            .not_empty()
            .configure("title", |i: &Incident| &i.title),
        EnumNameCodec::<Severity>::new().configure("severity", |i: &Incident| &i.severity),
        BOOLEAN.configure("acknowledged", |i: &Incident| &i.acknowledged),
        STRING
            .optional()
            .configure("assignee", |i: &Incident| &i.assignee),
        STRING
            .non_empty_list()
            .configure("affected_hosts", |i: &Incident| &i.affected_hosts),
        MapCodec::new(STRING, DOUBLE).configure("metrics", |i: &Incident| &i.metrics),
    )
    .create(Incident::new)
}

fn sample_incident() -> Incident {
    let mut metrics = IndexMap::new();
    metrics.insert("error_rate".to_owned(), 0.034);
    metrics.insert("p99_latency_ms".to_owned(), 812.0);
    Incident::new(
        "database replica lag".to_owned(),
        Severity::Critical,
        false,
        Some("oncall-primary".to_owned()),
        vec!["db-3".to_owned(), "db-4".to_owned()],
        metrics,
    )
}

#[test]
fn six_field_incident_round_trips() {
    let p = PlainProvider;
    let codec = incident_codec();
    let value = sample_incident();
    let element = codec
        .encode_start(&p, p.empty(), &value)
        .expect("encoding a well-formed incident");
    assert_eq!(codec.decode_start(&p, &element).unwrap(), value);
}

#[test]
fn optional_assignee_is_absent_from_the_tree() {
    let p = PlainProvider;
    let codec = incident_codec();
    let mut value = sample_incident();
    value.assignee = None;
    let element = codec.encode_start(&p, p.empty(), &value).unwrap();
    match &element {
        Value::Object(map) => assert!(!map.contains_key("assignee")),
        other => panic!("expected an object, got {other:?}"),
    }
    assert_eq!(codec.decode_start(&p, &element).unwrap(), value);
}

#[test]
fn decode_failures_are_reported_exhaustively() {
    let p = PlainProvider;
    let codec = incident_codec();
    // Only two of six fields present, one of them malformed.
    let mut entries = IndexMap::new();
    entries.insert("title".to_owned(), Value::String("x".to_owned()));
    entries.insert("severity".to_owned(), Value::String("Fatal".to_owned()));
    let element = Value::Object(entries);
    let err = codec.decode_start(&p, &element).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.starts_with("Unable to decode some fields: "));
    for field in ["severity", "acknowledged", "affected_hosts", "metrics"] {
        assert!(rendered.contains(field), "missing {field} in: {rendered}");
    }
    // The optional field and the valid title are not part of the report.
    assert!(!rendered.contains("assignee"));
    assert!(!rendered.contains("title:"));
}

#[test]
fn constraint_violations_surface_through_the_group() {
    let p = PlainProvider;
    let codec = incident_codec();
    let mut value = sample_incident();
    value.title = String::new();
    let err = codec.encode_start(&p, p.empty(), &value).unwrap_err();
    assert!(err.to_string().contains("does not meet constraints"));
}

#[test]
fn two_groups_merge_into_one_container() {
    let p = PlainProvider;

    #[derive(Clone, PartialEq, Debug)]
    struct Header {
        id: i64,
    }
    #[derive(Clone, PartialEq, Debug)]
    struct Body {
        payload: String,
    }

    let header = CodecBuilder::group1(LONG.configure("id", |h: &Header| &h.id))
        .create(|id| Header { id });
    let body = CodecBuilder::group1(STRING.configure("payload", |b: &Body| &b.payload))
        .create(|payload| Body { payload });

    let element = header
        .encode_start(&p, p.empty(), &Header { id: 12 })
        .unwrap();
    let element = body
        .encode_start(
            &p,
            element,
            &Body {
                payload: "ping".to_owned(),
            },
        )
        .unwrap();
    match &element {
        Value::Object(map) => {
            assert!(map.contains_key("id"));
            assert!(map.contains_key("payload"));
        }
        other => panic!("expected an object, got {other:?}"),
    }
    assert_eq!(header.decode_start(&p, &element).unwrap(), Header { id: 12 });
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn integer_lists_round_trip(values in proptest::collection::vec(any::<i32>(), 0..64)) {
            let p = PlainProvider;
            let codec = INTEGER.list();
            let element = codec.encode_start(&p, p.empty(), &values).unwrap();
            prop_assert_eq!(codec.decode_start(&p, &element).unwrap(), values);
        }

        #[test]
        fn strings_round_trip(value in ".*") {
            let p = PlainProvider;
            let element = STRING.encode_start(&p, p.empty(), &value).unwrap();
            prop_assert_eq!(STRING.decode_start(&p, &element).unwrap(), value);
        }

        #[test]
        fn longs_survive_key_transcoding(value in any::<i64>()) {
            let p = PlainProvider;
            let key = LONG.encode_key(&p, &value).unwrap();
            prop_assert_eq!(LONG.decode_key(&p, &key).unwrap(), value);
        }

        #[test]
        fn grouped_incidents_round_trip(
            title in "[a-z]{1,12}",
            acknowledged in any::<bool>(),
            hosts in proptest::collection::vec("[a-z]{1,8}", 1..5),
        ) {
            let p = PlainProvider;
            let codec = incident_codec();
            let value = Incident::new(
                title,
                Severity::Warning,
                acknowledged,
                None,
                hosts,
                IndexMap::new(),
            );
            let element = codec.encode_start(&p, p.empty(), &value).unwrap();
            prop_assert_eq!(codec.decode_start(&p, &element).unwrap(), value);
        }
    }
}
