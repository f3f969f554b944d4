//! Strict form decoding for `cpu.api`.
//!
//! The contract is deliberately narrow: exactly one `name=value` pair, the
//! name exactly `counter`, the value an integer. Anything else is a bad
//! request. No percent-decoding; the field is a bare integer by contract.

/// Split a form-encoded string into `(name, value)` pairs. A pair without
/// `=` gets an empty value.
pub fn parse(raw: &str) -> Vec<(&str, &str)> {
    raw.split('&')
        .filter(|p| !p.is_empty())
        .map(|p| p.split_once('=').unwrap_or((p, "")))
        .collect()
}

/// The single `counter` field, or `None` when the request does not match
/// the contract.
pub fn single_counter(raw: &str) -> Option<i64> {
    let fields = parse(raw);
    match fields.as_slice() {
        [("counter", value)] => value.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_one_counter_field() {
        assert_eq!(single_counter("counter=4"), Some(4));
        assert_eq!(single_counter("counter=0"), Some(0));
        assert_eq!(single_counter("counter=-1"), Some(-1));
    }

    #[test]
    fn rejects_wrong_name() {
        assert_eq!(single_counter("count=4"), None);
        assert_eq!(single_counter("counters=4"), None);
    }

    #[test]
    fn rejects_extra_or_missing_fields() {
        assert_eq!(single_counter(""), None);
        assert_eq!(single_counter("counter=4&x=1"), None);
        assert_eq!(single_counter("x=1&counter=4"), None);
    }

    #[test]
    fn rejects_non_integer_value() {
        assert_eq!(single_counter("counter=abc"), None);
        assert_eq!(single_counter("counter="), None);
    }

    #[test]
    fn pair_without_equals_has_empty_value() {
        assert_eq!(parse("counter"), vec![("counter", "")]);
        assert_eq!(single_counter("counter"), None);
    }
}
