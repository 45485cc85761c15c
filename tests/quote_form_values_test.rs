use hairbuysell_quotes::dto::{QuoteField, QuoteFormValues, TEXTURE_OPTIONS};
use hairbuysell_quotes::service::prefill::texture_slug;

fn valid_values() -> QuoteFormValues {
    QuoteFormValues {
        name: "Jo".to_string(),
        email: "jo@example.com".to_string(),
        hair_type: "Virgin Hair".to_string(),
        length: "18".to_string(),
        color: "Natural Black".to_string(),
        texture: "body-wave".to_string(),
        quantity: "3 bundles".to_string(),
        details: String::new(),
    }
}

#[test]
fn test_valid_form_passes_without_details() {
    assert!(valid_values().check().is_ok());
}

#[test]
fn test_each_required_field_reports_its_message() {
    let cases = [
        (QuoteField::Name, "Name must be at least 2 characters."),
        (QuoteField::Email, "Please enter a valid email address."),
        (QuoteField::HairType, "Please select a hair type."),
        (QuoteField::Length, "Please specify a length."),
        (QuoteField::Color, "Please specify a color."),
        (QuoteField::Texture, "Please select a texture."),
        (QuoteField::Quantity, "Please enter a quantity."),
    ];
    for (field, message) in cases {
        let mut values = valid_values();
        values.set(field, "");
        let errors = values.check().unwrap_err();
        assert_eq!(errors.len(), 1, "{field}");
        assert_eq!(errors[0].field, field);
        assert_eq!(errors[0].message, message);
    }
}

#[test]
fn test_blank_details_are_absent() {
    let mut values = valid_values();
    assert_eq!(values.details_opt(), None);
    values.details = "   ".to_string();
    assert_eq!(values.details_opt(), None);
    values.details = "HD lace".to_string();
    assert_eq!(values.details_opt().as_deref(), Some("HD lace"));
}

#[test]
fn test_form_json_uses_wire_names() {
    let parsed: QuoteFormValues = serde_json::from_str(
        r#"{"name":"Jo","email":"jo@example.com","hairType":"Wigs","quantity":"1 wig"}"#,
    )
    .unwrap();
    assert_eq!(parsed.hair_type, "Wigs");
    assert_eq!(parsed.texture, "");
    assert_eq!(QuoteField::HairType.to_string(), "hairType");
}

#[test]
fn test_texture_options_are_slugs_of_their_labels() {
    for (value, label) in TEXTURE_OPTIONS {
        assert_eq!(texture_slug(label), value);
    }
}
