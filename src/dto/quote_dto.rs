use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::util::error;

/// Values held by the quote form. Every field starts out empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteFormValues {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, message = "Please select a hair type."))]
    pub hair_type: String,

    #[validate(length(min = 1, message = "Please specify a length."))]
    pub length: String,

    #[validate(length(min = 1, message = "Please specify a color."))]
    pub color: String,

    #[validate(length(min = 1, message = "Please select a texture."))]
    pub texture: String,

    #[validate(length(min = 1, message = "Please enter a quantity."))]
    pub quantity: String,

    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteField {
    Name,
    Email,
    HairType,
    Length,
    Color,
    Texture,
    Quantity,
    Details,
}

impl QuoteField {
    pub const ALL: [QuoteField; 8] = [
        QuoteField::Name,
        QuoteField::Email,
        QuoteField::HairType,
        QuoteField::Length,
        QuoteField::Color,
        QuoteField::Texture,
        QuoteField::Quantity,
        QuoteField::Details,
    ];

    /// Fields filled from a product listing. They are read-only while a
    /// product context is loaded.
    pub const PRODUCT_DERIVED: [QuoteField; 4] = [
        QuoteField::HairType,
        QuoteField::Length,
        QuoteField::Color,
        QuoteField::Texture,
    ];

    /// Name used by the form on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteField::Name => "name",
            QuoteField::Email => "email",
            QuoteField::HairType => "hairType",
            QuoteField::Length => "length",
            QuoteField::Color => "color",
            QuoteField::Texture => "texture",
            QuoteField::Quantity => "quantity",
            QuoteField::Details => "details",
        }
    }

    fn struct_field(&self) -> &'static str {
        match self {
            QuoteField::HairType => "hair_type",
            other => other.as_str(),
        }
    }

    pub fn is_product_derived(&self) -> bool {
        Self::PRODUCT_DERIVED.contains(self)
    }
}

impl std::fmt::Display for QuoteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl QuoteFormValues {
    pub fn get(&self, field: QuoteField) -> &str {
        match field {
            QuoteField::Name => &self.name,
            QuoteField::Email => &self.email,
            QuoteField::HairType => &self.hair_type,
            QuoteField::Length => &self.length,
            QuoteField::Color => &self.color,
            QuoteField::Texture => &self.texture,
            QuoteField::Quantity => &self.quantity,
            QuoteField::Details => &self.details,
        }
    }

    pub fn set(&mut self, field: QuoteField, value: impl Into<String>) {
        let value = value.into();
        match field {
            QuoteField::Name => self.name = value,
            QuoteField::Email => self.email = value,
            QuoteField::HairType => self.hair_type = value,
            QuoteField::Length => self.length = value,
            QuoteField::Color => self.color = value,
            QuoteField::Texture => self.texture = value,
            QuoteField::Quantity => self.quantity = value,
            QuoteField::Details => self.details = value,
        }
    }

    /// Runs the form schema and returns one error per invalid field, in
    /// form order.
    pub fn check(&self) -> Result<(), Vec<error::ValidationError>> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };
        let field_errors = errors.field_errors();

        let mut out = Vec::new();
        for field in QuoteField::ALL {
            let found = field_errors
                .get(field.struct_field())
                .or_else(|| field_errors.get(field.as_str()));
            if let Some(first) = found.and_then(|errs| errs.first()) {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field));
                out.push(error::ValidationError { field, message });
            }
        }
        Err(out)
    }

    /// Optional details, with blank input treated as absent.
    pub fn details_opt(&self) -> Option<String> {
        let trimmed = self.details.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(self.details.clone())
        }
    }
}

/// Texture choices offered by the form: (value, label).
pub const TEXTURE_OPTIONS: [(&str, &str); 6] = [
    ("straight", "Straight"),
    ("wavy", "Wavy"),
    ("curly", "Curly"),
    ("kinky-curly", "Kinky Curly"),
    ("body-wave", "Body Wave"),
    ("deep-wave", "Deep Wave"),
];
