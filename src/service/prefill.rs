use crate::dto::quote_dto::QuoteFormValues;
use crate::model::Product;

pub const SELLER_FALLBACK_LABEL: &str = "the vendor";

pub const GENERAL_INQUIRY_SENT: &str =
    "Your general inquiry has been sent to our team. A vendor will contact you shortly.";

const LENGTH_UNITS: [&str; 3] = ["inches", "inch", "in"];

/// Strips a trailing unit from a listing length: `"18 inches"` becomes `"18"`.
pub fn normalize_length(raw: &str) -> String {
    let trimmed = raw.trim();
    for unit in LENGTH_UNITS {
        if let Some(number) = strip_suffix_ignore_case(trimmed, unit) {
            let number = number.trim_end();
            if !number.is_empty() && number.chars().last().is_some_and(|c| c.is_ascii_digit()) {
                return number.to_string();
            }
        }
    }
    trimmed.trim_end_matches('"').trim_end().to_string()
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// Lowercased, hyphen-joined form of a texture name: `"Body Wave"` becomes
/// `"body-wave"`.
pub fn texture_slug(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Overwrites the listing-derived fields and clears quantity and details.
/// Name and email are left alone.
pub fn apply_product(values: &mut QuoteFormValues, product: &Product) {
    values.hair_type = product.category.clone();
    values.length = normalize_length(&product.specs.length);
    values.color = product.specs.color.clone();
    values.texture = texture_slug(&product.specs.texture);
    values.quantity.clear();
    values.details.clear();
}

pub fn general_inquiry_product_name(values: &QuoteFormValues) -> String {
    format!("General Inquiry: {}", values.hair_type)
}

/// Free-text description of what a general inquiry is asking for.
pub fn general_inquiry_details(values: &QuoteFormValues) -> String {
    let extra = values.details_opt().unwrap_or_else(|| "None".to_string());
    format!(
        "Category: {}\nLength: {} inches\nColor: {}\nTexture: {}\n\nAdditional Details: {}",
        values.hair_type, values.length, values.color, values.texture, extra
    )
}

pub fn product_request_sent(product_name: &str, company_name: Option<&str>) -> String {
    format!(
        "Your request for \"{}\" has been sent to {}. They will contact you shortly.",
        product_name,
        company_name.unwrap_or(SELLER_FALLBACK_LABEL)
    )
}
