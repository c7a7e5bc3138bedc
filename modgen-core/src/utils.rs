//! Shared naming utilities for code generation.

/// Split an identifier into lowercase words.
///
/// Dashes, underscores and spaces separate words, as does a lowercase-to-uppercase
/// transition (`vehicleSeries` -> `["vehicle", "series"]`).
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }

        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }

        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a string to PascalCase (e.g., "vehicle-series" -> "VehicleSeries")
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase (e.g., "vehicle-series" -> "vehicleSeries")
pub fn to_camel_case(s: &str) -> String {
    let words = words(s);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Convert a string to snake_case (e.g., "VehicleSeries" -> "vehicle_series")
pub fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

/// Convert a string to kebab-case (e.g., "vehicle_series" -> "vehicle-series")
pub fn to_kebab_case(s: &str) -> String {
    words(s).join("-")
}

/// Convert a string to SCREAMING_SNAKE_CASE (e.g., "wipers" -> "WIPERS")
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Convert a string to a human readable title (e.g., "year_start" -> "Year Start")
pub fn to_title_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Words whose plural is the same as the singular.
const UNCOUNTABLE: &[&str] = &["series", "species", "equipment", "information", "data"];

/// Naive English pluralisation of the last word of an identifier.
///
/// Keeps the separator style of the input. Irregular plurals must be given
/// explicitly in configuration.
pub fn pluralize(s: &str) -> String {
    let lower = s.to_lowercase();
    if UNCOUNTABLE.iter().any(|w| lower.ends_with(w)) {
        return s.to_string();
    }

    if let Some(stem) = s.strip_suffix('y') {
        let before = stem.chars().last();
        if before.is_some_and(|c| !"aeiou".contains(c.to_ascii_lowercase())) {
            return format!("{}ies", stem);
        }
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
        return format!("{}es", s);
    }

    format!("{}s", s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("wiper"), "Wiper");
        assert_eq!(to_pascal_case("vehicle-series"), "VehicleSeries");
        assert_eq!(to_pascal_case("vehicle_model"), "VehicleModel");
        assert_eq!(to_pascal_case("vehicleMake"), "VehicleMake");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("wiper"), "wiper");
        assert_eq!(to_camel_case("vehicle-series"), "vehicleSeries");
        assert_eq!(to_camel_case("year_start"), "yearStart");
        assert_eq!(to_camel_case("VehicleMake"), "vehicleMake");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Hello"), "hello");
        assert_eq!(to_snake_case("HelloWorld"), "hello_world");
        assert_eq!(to_snake_case("hello-world"), "hello_world");
        assert_eq!(to_snake_case("product_variant"), "product_variant");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("vehicle_series"), "vehicle-series");
        assert_eq!(to_kebab_case("WiperKit"), "wiper-kit");
        assert_eq!(to_kebab_case("wipers"), "wipers");
    }

    #[test]
    fn test_to_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("wipers"), "WIPERS");
        assert_eq!(to_screaming_snake_case("vehicle-fitments"), "VEHICLE_FITMENTS");
    }

    #[test]
    fn test_to_title_case() {
        assert_eq!(to_title_case("year_start"), "Year Start");
        assert_eq!(to_title_case("name"), "Name");
        assert_eq!(to_title_case("vehicle-series"), "Vehicle Series");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("wiper"), "wipers");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("key"), "keys");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("vehicle-series"), "vehicle-series");
        assert_eq!(pluralize("vehicle-make"), "vehicle-makes");
    }
}
