//! Serde roundtrip and JsonSchema validation tests for the wire types.

use dig_core::*;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn capernaum() -> Discovery {
    Discovery {
        id: DiscoveryId::new("42"),
        title: "Capernaum Synagogue".into(),
        description: "White limestone synagogue over a basalt foundation".into(),
        latitude: 32.8811,
        longitude: 35.5750,
        bible_era: Era::NewTestament,
        region: "Israel".into(),
        kind: DiscoveryType::Ruin,
        source_link: "https://en.wikipedia.org/wiki/Capernaum".into(),
        image_url: Some("https://example.org/capernaum.jpg".into()),
    }
}

roundtrip_and_validate!(discovery_roundtrip, Discovery, capernaum());

roundtrip_and_validate!(
    discovery_without_image_roundtrip,
    Discovery,
    Discovery {
        image_url: None,
        ..capernaum()
    }
);

roundtrip_and_validate!(draft_roundtrip, DiscoveryDraft, capernaum().draft());

roundtrip_and_validate!(
    admin_roundtrip,
    Admin,
    Admin {
        username: "yadin".into(),
        first_name: "Yigael".into(),
        last_name: "Yadin".into(),
        role: Role::Admin,
    }
);

roundtrip_and_validate!(
    new_admin_roundtrip,
    NewAdmin,
    NewAdmin {
        first_name: "Kathleen".into(),
        last_name: "Kenyon".into(),
        username: "kenyon".into(),
        password: "jericho".into(),
        role: Role::SuperAdmin,
    }
);

roundtrip_and_validate!(
    login_response_roundtrip,
    LoginResponse,
    LoginResponse {
        token: Some("a.b.c".into()),
    }
);

roundtrip_and_validate!(
    filter_state_roundtrip,
    FilterState,
    FilterState {
        bible_era: Some(Era::OldTestament),
        region: None,
        kind: Some(DiscoveryType::Inscription),
    }
);

#[test]
fn backend_list_payload_parses() {
    let payload = r#"[
        {"id":1,"title":"Tunnel","description":"","latitude":31.7767,"longitude":35.2345,
         "bibleEra":"Old Testament","region":"Jerusalem","type":"Altar","sourceLink":""},
        {"id":"b7","title":"Pool of Siloam","description":"Rock-cut pool","latitude":31.7706,
         "longitude":35.2354,"bibleEra":"New Testament","region":"Jerusalem","type":"Ruin",
         "sourceLink":"https://en.wikipedia.org/wiki/Pool_of_Siloam"}
    ]"#;

    let discoveries: Vec<Discovery> = serde_json::from_str(payload).unwrap();
    assert_eq!(discoveries.len(), 2);
    assert_eq!(discoveries[0].id.as_str(), "1");
    assert_eq!(discoveries[1].id.as_str(), "b7");
    assert_eq!(discoveries[1].kind, DiscoveryType::Ruin);
}
