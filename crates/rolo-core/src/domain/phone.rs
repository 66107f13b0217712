/// National numbers are capped at the first ten digits; shorter inputs are
/// kept as-is without padding or a minimum-length check.
pub const MAX_PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPhone {
    pub country_code: String,
    pub phone: String,
}

/// Splits a free-form phone value into a `+<digits>` country code and a
/// digits-only national number.
///
/// A leading `+<digits>` run in the raw phone wins; otherwise the explicit
/// country-code column value is used when non-empty, falling back to the
/// caller's default. Pure and deterministic.
pub fn normalize_phone(
    raw_phone: &str,
    raw_country_code: Option<&str>,
    default_country_code: &str,
) -> NormalizedPhone {
    let trimmed = raw_phone.trim();

    let (country_code, rest) = if let Some(stripped) = trimmed.strip_prefix('+') {
        let digits = stripped
            .chars()
            .take_while(|ch| ch.is_ascii_digit())
            .count();
        if digits > 0 {
            let code = format!("+{}", &stripped[..digits]);
            (code, &stripped[digits..])
        } else {
            (fallback_code(raw_country_code, default_country_code), stripped)
        }
    } else {
        (fallback_code(raw_country_code, default_country_code), trimmed)
    };

    let phone: String = rest
        .chars()
        .filter(|ch| ch.is_ascii_digit())
        .take(MAX_PHONE_DIGITS)
        .collect();

    NormalizedPhone {
        country_code,
        phone,
    }
}

fn fallback_code(raw_country_code: Option<&str>, default_country_code: &str) -> String {
    match raw_country_code.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => default_country_code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_phone;

    #[test]
    fn normalize_phone_extracts_plus_prefix_as_country_code() {
        let value = normalize_phone("+44 20 7946 0958", Some(""), "+1");
        assert_eq!(value.country_code, "+44");
        assert_eq!(value.phone, "2079460958");
    }

    #[test]
    fn normalize_phone_strips_formatting() {
        let value = normalize_phone("(415) 555-1212", None, "+1");
        assert_eq!(value.country_code, "+1");
        assert_eq!(value.phone, "4155551212");
    }

    #[test]
    fn normalize_phone_prefers_explicit_column_over_default() {
        let value = normalize_phone("98765 43210", Some("+91"), "+1");
        assert_eq!(value.country_code, "+91");
        assert_eq!(value.phone, "9876543210");
    }

    #[test]
    fn normalize_phone_truncates_to_ten_digits() {
        let value = normalize_phone("123456789012345", None, "+1");
        assert_eq!(value.phone, "1234567890");
    }

    #[test]
    fn normalize_phone_keeps_short_numbers_as_is() {
        let value = normalize_phone("555-12", None, "+1");
        assert_eq!(value.phone, "55512");
    }

    #[test]
    fn normalize_phone_bare_plus_falls_back_to_default() {
        let value = normalize_phone("+ 4155551212", None, "+1");
        assert_eq!(value.country_code, "+1");
        assert_eq!(value.phone, "4155551212");
    }
}
