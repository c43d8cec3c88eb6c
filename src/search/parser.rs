use crate::models::{Currency, OperationType, ParsedSearch, PropertyType, SearchFilters};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const FALLBACK_INTERPRETATION: &str = "Búsqueda general";
const SEPARATOR: &str = " • ";

/// Buenos Aires neighborhoods, in priority order
pub const ZONES: &[&str] = &[
    "palermo",
    "recoleta",
    "belgrano",
    "caballito",
    "villa crespo",
    "almagro",
    "barrio norte",
    "colegiales",
    "nuñez",
    "saavedra",
    "villa urquiza",
    "puerto madero",
    "san telmo",
    "microcentro",
];

const OPERATIONS: &[(&[&str], OperationType, &str)] = &[
    (
        &["alquiler", "alquilar", "rentar"],
        OperationType::Alquiler,
        "Búsqueda de alquiler",
    ),
    (
        &["venta", "comprar", "compra"],
        OperationType::Venta,
        "Búsqueda de venta",
    ),
];

const CURRENCIES: &[(&[&str], Currency, &str)] = &[
    (&["dolar", "usd", "u$s"], Currency::Usd, "Precio en dólares"),
    (&["peso", "ars", "$"], Currency::Ars, "Precio en pesos"),
];

const PROPERTY_TYPES: &[(&[&str], PropertyType, &str)] = &[
    (
        &["departamento", "depto"],
        PropertyType::Departamento,
        "Tipo: Departamento",
    ),
    (&["casa"], PropertyType::Casa, "Tipo: Casa"),
    (&["ph"], PropertyType::Ph, "Tipo: PH"),
    (&["local"], PropertyType::Local, "Tipo: Local comercial"),
    (&["oficina"], PropertyType::Oficina, "Tipo: Oficina"),
];

static PRICE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*(?:a|hasta|-)\s*([0-9]+)").unwrap());

static MAX_PRICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:hasta|máximo|max)\s*([0-9]+)").unwrap());

static BEDROOMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)\s*(?:ambiente|ambientes|amb|dormitorio|dormitorios)").unwrap()
});

/// A detection rule: reads the lower-cased query, sets at most one filter
/// field and returns the interpretation fragment when it fires.
type Rule = fn(&str, &mut SearchFilters) -> Option<String>;

/// Evaluation order is output order.
const RULES: &[Rule] = &[
    detect_operation,
    detect_currency,
    detect_price,
    detect_zone,
    detect_bedrooms,
    detect_property_type,
    detect_guarantors,
    detect_pets,
];

/// Interpret a free-text property search into structured filters.
///
/// Never fails: text with nothing recognizable yields empty filters and the
/// generic interpretation.
pub fn parse_search_query(query_text: &str) -> ParsedSearch {
    let lower = query_text.to_lowercase();
    let mut filters = SearchFilters::default();

    let fragments: Vec<String> = RULES
        .iter()
        .filter_map(|rule| rule(&lower, &mut filters))
        .collect();

    let interpretation = if fragments.is_empty() {
        FALLBACK_INTERPRETATION.to_string()
    } else {
        fragments.join(SEPARATOR)
    };

    debug!("Interpreted {:?} as {}", query_text, interpretation);

    ParsedSearch {
        query_text: query_text.to_string(),
        filters,
        interpretation,
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// First table entry with a matching keyword wins
fn first_match<T: Copy>(text: &str, table: &[(&[&str], T, &str)]) -> Option<(T, String)> {
    table
        .iter()
        .find(|(keywords, _, _)| contains_any(text, keywords))
        .map(|(_, value, label)| (*value, label.to_string()))
}

fn capture_number<T: std::str::FromStr>(caps: &regex::Captures, group: usize) -> Option<T> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

fn detect_operation(text: &str, filters: &mut SearchFilters) -> Option<String> {
    let (operation, label) = first_match(text, OPERATIONS)?;
    filters.operation = Some(operation);
    Some(label)
}

fn detect_currency(text: &str, filters: &mut SearchFilters) -> Option<String> {
    let (currency, label) = first_match(text, CURRENCIES)?;
    filters.currency = Some(currency);
    Some(label)
}

fn detect_price(text: &str, filters: &mut SearchFilters) -> Option<String> {
    // Bounds are kept in textual order, even when min > max. A matched range
    // always shadows the max-only rule, even if a bound does not fit.
    if let Some(caps) = PRICE_RANGE.captures(text) {
        let min: u64 = capture_number(&caps, 1)?;
        let max: u64 = capture_number(&caps, 2)?;
        filters.min_price = Some(min);
        filters.max_price = Some(max);
        return Some(format!("Precio entre {} y {}", min, max));
    }

    let caps = MAX_PRICE.captures(text)?;
    let max: u64 = capture_number(&caps, 1)?;
    filters.max_price = Some(max);
    Some(format!("Precio hasta {}", max))
}

fn detect_zone(text: &str, filters: &mut SearchFilters) -> Option<String> {
    let zone = ZONES.iter().find(|zone| text.contains(*zone))?;
    filters.zone = Some(zone.to_string());
    Some(format!("Zona: {}", capitalize(zone)))
}

fn detect_bedrooms(text: &str, filters: &mut SearchFilters) -> Option<String> {
    let caps = BEDROOMS.captures(text)?;
    let bedrooms: u32 = capture_number(&caps, 1)?;
    filters.bedrooms = Some(bedrooms);
    Some(format!("{} ambientes", bedrooms))
}

fn detect_property_type(text: &str, filters: &mut SearchFilters) -> Option<String> {
    let (property_type, label) = first_match(text, PROPERTY_TYPES)?;
    filters.property_type = Some(property_type);
    Some(label)
}

fn detect_guarantors(text: &str, filters: &mut SearchFilters) -> Option<String> {
    if !contains_any(text, &["garantia", "garante"]) {
        return None;
    }
    let required = !text.contains("sin");
    filters.has_salary_guarantors = Some(required);
    Some(if required { "Con garantía" } else { "Sin garantía" }.to_string())
}

fn detect_pets(text: &str, filters: &mut SearchFilters) -> Option<String> {
    if !contains_any(text, &["mascota", "perro", "gato"]) {
        return None;
    }
    let allowed = !text.contains("sin");
    filters.pets_allowed = Some(allowed);
    Some(if allowed { "Acepta mascotas" } else { "Sin mascotas" }.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_query_text_is_kept_verbatim() {
        let query = "  Depto en PALERMO  ";
        assert_eq!(parse_search_query(query).query_text, query);
    }

    #[test]
    fn test_same_input_same_output() {
        let query = "alquiler depto 2 ambientes palermo hasta 800 usd con mascotas";
        assert_eq!(parse_search_query(query), parse_search_query(query));
    }

    #[test]
    fn test_case_insensitive_zone() {
        assert_eq!(parse_search_query("PALERMO").filters.zone, Some("palermo".to_string()));
        assert_eq!(parse_search_query("palermo").filters.zone, Some("palermo".to_string()));
    }

    #[test]
    fn test_alquiler_beats_venta() {
        let parsed = parse_search_query("venta o alquiler");
        assert_eq!(parsed.filters.operation, Some(OperationType::Alquiler));
        assert!(parsed.interpretation.starts_with("Búsqueda de alquiler"));
    }

    #[test]
    fn test_zone_list_order_beats_text_order() {
        let parsed = parse_search_query("recoleta o palermo");
        assert_eq!(parsed.filters.zone, Some("palermo".to_string()));
        assert_eq!(parsed.interpretation, "Zona: Palermo");
    }

    #[test]
    fn test_max_price_with_currency_and_zone() {
        let parsed = parse_search_query("depto hasta 800 dolares en palermo");
        let f = &parsed.filters;

        assert_eq!(f.max_price, Some(800));
        assert_eq!(f.min_price, None);
        assert_eq!(f.currency, Some(Currency::Usd));
        assert_eq!(f.zone, Some("palermo".to_string()));
        assert_eq!(f.property_type, Some(PropertyType::Departamento));
        assert_eq!(
            parsed.interpretation,
            "Precio en dólares • Precio hasta 800 • Zona: Palermo • Tipo: Departamento"
        );
    }

    #[test]
    fn test_price_range() {
        let f = parse_search_query("alquiler 500 a 900").filters;
        assert_eq!(f.operation, Some(OperationType::Alquiler));
        assert_eq!(f.min_price, Some(500));
        assert_eq!(f.max_price, Some(900));
    }

    #[test]
    fn test_price_range_keeps_textual_order() {
        let parsed = parse_search_query("900 - 500");
        assert_eq!(parsed.filters.min_price, Some(900));
        assert_eq!(parsed.filters.max_price, Some(500));
        assert_eq!(parsed.interpretation, "Precio entre 900 y 500");
    }

    #[test]
    fn test_max_price_accented_keyword() {
        let f = parse_search_query("Máximo 1200").filters;
        assert_eq!(f.max_price, Some(1200));
        assert_eq!(f.min_price, None);
    }

    #[test]
    fn test_oversized_number_is_ignored() {
        let parsed = parse_search_query("hasta 99999999999999999999999");
        assert_eq!(parsed.filters.max_price, None);
        assert_eq!(parsed.interpretation, FALLBACK_INTERPRETATION);
    }

    #[test]
    fn test_oversized_range_does_not_fall_back_to_max_price() {
        let parsed = parse_search_query("99999999999999999999 hasta 5");
        assert_eq!(parsed.filters.min_price, None);
        assert_eq!(parsed.filters.max_price, None);
        assert_eq!(parsed.interpretation, FALLBACK_INTERPRETATION);
    }

    #[test]
    fn test_bedrooms() {
        let parsed = parse_search_query("2 ambientes en caballito");
        assert_eq!(parsed.filters.bedrooms, Some(2));
        assert_eq!(parsed.filters.zone, Some("caballito".to_string()));
        assert_eq!(parsed.interpretation, "Zona: Caballito • 2 ambientes");
    }

    #[test]
    fn test_multi_word_zone_capitalization() {
        let parsed = parse_search_query("villa crespo");
        assert_eq!(parsed.filters.zone, Some("villa crespo".to_string()));
        assert_eq!(parsed.interpretation, "Zona: Villa crespo");
    }

    #[test]
    fn test_property_type_priority() {
        assert_eq!(
            parse_search_query("casa o departamento").filters.property_type,
            Some(PropertyType::Departamento)
        );
        assert_eq!(
            parse_search_query("oficina o local").filters.property_type,
            Some(PropertyType::Local)
        );
    }

    #[test]
    fn test_no_match_fallback() {
        let parsed = parse_search_query("xyz abcdef");
        assert!(parsed.filters.is_empty());
        assert_eq!(parsed.interpretation, "Búsqueda general");
    }

    #[test]
    fn test_empty_query() {
        let parsed = parse_search_query("");
        assert!(parsed.filters.is_empty());
        assert_eq!(parsed.interpretation, "Búsqueda general");
    }

    #[test]
    fn test_negations() {
        let parsed = parse_search_query("sin garantia sin mascotas");
        assert_eq!(parsed.filters.has_salary_guarantors, Some(false));
        assert_eq!(parsed.filters.pets_allowed, Some(false));
        assert_eq!(parsed.interpretation, "Sin garantía • Sin mascotas");
    }

    #[test]
    fn test_positive_requirements() {
        let f = parse_search_query("con garante, acepta perro").filters;
        assert_eq!(f.has_salary_guarantors, Some(true));
        assert_eq!(f.pets_allowed, Some(true));
    }

    #[test]
    fn test_dollar_beats_peso() {
        let f = parse_search_query("u$s o pesos").filters;
        assert_eq!(f.currency, Some(Currency::Usd));
        let f = parse_search_query("$ 300000").filters;
        assert_eq!(f.currency, Some(Currency::Ars));
    }

    #[test]
    fn test_full_fragment_order() {
        let parsed =
            parse_search_query("Alquilar departamento 3 amb en Belgrano 500 a 700 USD con garantia y gato");
        assert_eq!(
            parsed.interpretation,
            "Búsqueda de alquiler • Precio en dólares • Precio entre 500 y 700 • Zona: Belgrano \
             • 3 ambientes • Tipo: Departamento • Con garantía • Acepta mascotas"
        );
    }

    proptest! {
        #[test]
        fn prop_parse_is_total_and_deterministic(query in any::<String>()) {
            let first = parse_search_query(&query);
            prop_assert_eq!(&first.query_text, &query);
            prop_assert!(!first.interpretation.is_empty());
            prop_assert_eq!(first, parse_search_query(&query));
        }

        #[test]
        fn prop_zone_ignores_case(words in "[a-zñ ]{0,40}") {
            let lower = parse_search_query(&words).filters.zone;
            let upper = parse_search_query(&words.to_uppercase()).filters.zone;
            prop_assert_eq!(lower, upper);
        }
    }
}
