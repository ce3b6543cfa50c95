#[must_use]
pub(super) fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[must_use]
pub(super) fn parse_usize_at_least(raw: Option<&str>, default_value: usize, min_value: usize) -> usize {
    raw.and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|value| *value >= min_value)
        .unwrap_or(default_value)
}

#[must_use]
pub(super) fn parse_unit_interval(raw: Option<&str>, default_value: f32) -> f32 {
    raw.and_then(|raw| raw.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite() && (0.0..=1.0).contains(value))
        .unwrap_or(default_value)
}

/// Comma-separated list; blank entries dropped. `None` when nothing usable remains.
#[must_use]
pub(super) fn parse_list(raw: Option<&str>) -> Option<Vec<String>> {
    let items: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_fall_back_when_invalid_or_too_small() {
        assert_eq!(parse_usize_at_least(Some(" 5 "), 3, 1), 5);
        assert_eq!(parse_usize_at_least(Some("0"), 3, 1), 3);
        assert_eq!(parse_usize_at_least(Some("x"), 3, 1), 3);
        assert_eq!(parse_usize_at_least(None, 3, 1), 3);
        assert!((parse_unit_interval(Some("1.5"), 0.5) - 0.5).abs() < f32::EPSILON);
        assert!((parse_unit_interval(Some("0.7"), 0.5) - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn list_parser_drops_blank_entries() {
        assert_eq!(
            parse_list(Some("__, ,#_")),
            Some(vec!["__".to_string(), "#_".to_string()])
        );
        assert_eq!(parse_list(Some(" , ")), None);
        assert_eq!(non_empty(Some("  ".to_string())), None);
    }
}
