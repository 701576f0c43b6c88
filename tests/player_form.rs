use courtvision_terminal::player_form::{parse_optional_number, PlayerForm, PlayerFormError};

fn valid_form() -> PlayerForm {
    PlayerForm {
        player_name: "Jalen Brooks".to_string(),
        birth_date: Some("1999-04-02".to_string()),
        height_inches: Some(78),
        weight_lbs: Some(215),
        position: Some("sf".to_string()),
        jersey_number: Some(0),
    }
}

#[test]
fn accepts_a_complete_form() {
    assert_eq!(valid_form().validate(), Ok(()));
}

#[test]
fn optional_fields_may_be_blank() {
    let form = PlayerForm {
        player_name: "  Solo  ".to_string(),
        birth_date: Some("   ".to_string()),
        position: Some(String::new()),
        ..PlayerForm::default()
    };
    assert_eq!(form.validate(), Ok(()));
    let normalized = form.normalized();
    assert_eq!(normalized.player_name, "Solo");
    assert_eq!(normalized.birth_date, None);
    assert_eq!(normalized.position, None);
}

#[test]
fn normalizing_uppercases_the_position() {
    assert_eq!(valid_form().normalized().position.as_deref(), Some("SF"));
}

#[test]
fn name_is_required_and_bounded() {
    let mut form = valid_form();
    form.player_name = "   ".to_string();
    assert_eq!(form.validate(), Err(PlayerFormError::MissingName));
    form.player_name = "x".repeat(255);
    assert_eq!(form.validate(), Ok(()));
    form.player_name = "x".repeat(256);
    assert_eq!(form.validate(), Err(PlayerFormError::NameTooLong));
}

#[test]
fn birth_date_must_be_iso() {
    let mut form = valid_form();
    form.birth_date = Some("04/02/1999".to_string());
    assert_eq!(
        form.validate(),
        Err(PlayerFormError::InvalidBirthDate("04/02/1999".to_string()))
    );
    form.birth_date = Some("1999-02-30".to_string());
    assert!(form.validate().is_err());
}

#[test]
fn numeric_fields_follow_api_limits() {
    let mut form = valid_form();
    form.height_inches = Some(100);
    assert_eq!(
        form.validate(),
        Err(PlayerFormError::OutOfRange {
            field: "height_inches",
            min: 1,
            max: 99
        })
    );

    let mut form = valid_form();
    form.weight_lbs = Some(0);
    assert!(matches!(
        form.validate(),
        Err(PlayerFormError::OutOfRange { field: "weight_lbs", .. })
    ));

    let mut form = valid_form();
    form.jersey_number = Some(99);
    assert_eq!(form.validate(), Ok(()));
    form.jersey_number = Some(100);
    assert!(form.validate().is_err());
}

#[test]
fn position_is_limited_to_ten_chars() {
    let mut form = valid_form();
    form.position = Some("POINTGUARDS".to_string());
    assert_eq!(form.validate(), Err(PlayerFormError::PositionTooLong));
}

#[test]
fn parses_optional_numbers() {
    assert_eq!(parse_optional_number("height_inches", None), Ok(None));
    assert_eq!(parse_optional_number("height_inches", Some("  ")), Ok(None));
    assert_eq!(parse_optional_number("height_inches", Some(" 81 ")), Ok(Some(81)));
    let err = parse_optional_number("weight_lbs", Some("heavy")).expect_err("not a number");
    assert_eq!(err.to_string(), "weight_lbs must be a whole number, got \"heavy\"");
}

#[test]
fn serializes_with_api_field_names() {
    let json = serde_json::to_value(valid_form().normalized()).expect("form serializes");
    assert_eq!(json["player_name"], "Jalen Brooks");
    assert_eq!(json["position"], "SF");
    assert_eq!(json["jersey_number"], 0);
}
