use leadtalks_core::seed::demo_data;
use leadtalks_core::{format_phone, ConfigError, CoreConfig, Stage, StageColor, StoreData};
use serde_json::{json, Value};

#[test]
fn lead_uses_presentation_keys() {
    let data = demo_data().unwrap();
    let lead = serde_json::to_value(&data.leads[0]).unwrap();

    assert_eq!(lead["nomeLead"], "Dr. João Pafuncio Siqueira, Clínica coração");
    assert_eq!(lead["etapaFunil"], "novo");
    assert_eq!(lead["valorVenda"], json!(2000.0));
    assert_eq!(lead["criadoEm"], "2025-09-17T00:00:00");
    assert!(lead.get("atualizadoEm").is_none());
    assert!(lead.get("name").is_none());
}

#[test]
fn meeting_times_serialize_as_hours_and_minutes() {
    let data = demo_data().unwrap();
    let meeting = serde_json::to_value(&data.events[0]).unwrap();

    assert_eq!(meeting["tipo"], "reuniao");
    assert_eq!(meeting["horaInicio"], "13:00");
    assert_eq!(meeting["horaFim"], "13:30");
    assert_eq!(meeting["data"], "2025-10-30");
    assert!(meeting.get("status").is_none());
}

#[test]
fn store_data_survives_a_json_round_trip() {
    let data = demo_data().unwrap();
    let raw = serde_json::to_string(&data).unwrap();
    let back: StoreData = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, data);

    let partial: StoreData = serde_json::from_str(r#"{"etapas":[]}"#).unwrap();
    assert!(partial.leads.is_empty());
    assert!(partial.contacts.is_empty());
}

#[test]
fn unknown_stage_colors_are_rejected() {
    let valid: Stage = serde_json::from_value(json!({
        "id": "fechado",
        "label": "Fechado",
        "cor": "roxo",
        "ordem": 4
    }))
    .unwrap();
    assert_eq!(valid.color, StageColor::Roxo);

    let invalid: Result<Stage, _> = serde_json::from_value(json!({
        "id": "fechado",
        "label": "Fechado",
        "cor": "bg-undefined-100",
        "ordem": 4
    }));
    assert!(invalid.is_err());
    assert!(StageColor::from_key("dourado").is_err());
    assert_eq!(
        StageColor::from_background_class("bg-red-100").unwrap(),
        StageColor::Vermelho
    );
}

#[test]
fn core_config_defaults_and_overrides() {
    let defaults = CoreConfig::from_json_str("{}").unwrap();
    assert_eq!(defaults.author, "Agência Brakeel");
    assert_eq!(defaults.system_author, "Sistema");

    let custom = CoreConfig::from_json_str(r#"{"system_author":"Robô"}"#).unwrap();
    assert_eq!(custom.system_author, "Robô");
    assert_eq!(custom.author, defaults.author);

    assert!(matches!(
        CoreConfig::from_json_str(r#"{"system_author":""}"#),
        Err(ConfigError::BlankField("system_author"))
    ));
    assert!(matches!(
        CoreConfig::from_json_str("not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn phone_mask_matches_stored_contacts() {
    let data = demo_data().unwrap();
    let phones: Vec<String> = data
        .contacts
        .iter()
        .map(|contact| format_phone(&contact.phone))
        .collect();
    assert_eq!(
        phones,
        vec![
            "(67) 99999-9999",
            "(67) 99142-6269",
            "(67) 99142-6269",
            "(67) 99264-0107",
        ]
    );

    let raw: Value = serde_json::to_value(&data.contacts[3]).unwrap();
    assert_eq!(raw["dataEntrada"], "2025-09-01");
}
