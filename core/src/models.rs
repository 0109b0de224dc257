use serde::{Deserialize, Serialize};

/// One logged food entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub meal: String,
    pub cals: i64,
}

impl Item {
    #[must_use]
    pub fn new(id: i64, meal: impl Into<String>, cals: i64) -> Self {
        Self {
            id,
            meal: meal.into(),
            cals,
        }
    }
}

/// Largest calorie magnitude accepted from the form.
pub const MAX_CALS: i64 = 1_000_000;

/// Sum of `cals` over a snapshot, saturating at the `i64` bounds.
#[must_use]
pub fn total_cals(items: &[Item]) -> i64 {
    items.iter().fold(0, |acc, i| acc.saturating_add(i.cals))
}

/// A meal label is accepted as long as it is not the empty string.
#[must_use]
pub fn is_valid_meal(meal: &str) -> bool {
    !meal.is_empty()
}

/// Parse a calories field with integer-prefix semantics.
///
/// Leading whitespace is skipped, one optional sign is accepted, then the
/// longest run of ASCII digits is read. Anything after the digits is ignored,
/// so `"120kcal"` parses as 120. Returns `None` when no digit follows or the
/// magnitude exceeds [`MAX_CALS`].
#[must_use]
pub fn parse_cals(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let value: i64 = rest[..end].parse().ok()?;
    if value > MAX_CALS {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Form contents that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealInput {
    pub meal: String,
    pub cals: i64,
}

impl MealInput {
    /// Validate raw form text. `None` means the form must be ignored.
    #[must_use]
    pub fn from_form(meal: &str, cals: &str) -> Option<Self> {
        if !is_valid_meal(meal) {
            return None;
        }
        let cals = parse_cals(cals)?;
        Some(Self {
            meal: meal.to_string(),
            cals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cals_plain() {
        assert_eq!(parse_cals("200"), Some(200));
        assert_eq!(parse_cals("0"), Some(0));
        assert_eq!(parse_cals("  42"), Some(42));
    }

    #[test]
    fn test_parse_cals_signed() {
        assert_eq!(parse_cals("-15"), Some(-15));
        assert_eq!(parse_cals("+15"), Some(15));
        assert_eq!(parse_cals("-"), None);
        assert_eq!(parse_cals("+-3"), None);
    }

    #[test]
    fn test_parse_cals_trailing_garbage() {
        assert_eq!(parse_cals("120kcal"), Some(120));
        assert_eq!(parse_cals("12.9"), Some(12));
        assert_eq!(parse_cals("7 cals"), Some(7));
    }

    #[test]
    fn test_parse_cals_not_a_number() {
        assert_eq!(parse_cals("abc"), None);
        assert_eq!(parse_cals(""), None);
        assert_eq!(parse_cals("   "), None);
        assert_eq!(parse_cals("kcal120"), None);
    }

    #[test]
    fn test_parse_cals_out_of_range() {
        assert_eq!(parse_cals("99999999999999999999999"), None);
        assert_eq!(parse_cals("9223372036854775807"), None);
        assert_eq!(parse_cals("1000001"), None);
        assert_eq!(parse_cals("-1000001"), None);
        assert_eq!(parse_cals("1000000"), Some(MAX_CALS));
        assert_eq!(parse_cals("-1000000"), Some(-MAX_CALS));
    }

    #[test]
    fn test_total_cals_saturates() {
        let items = vec![Item::new(1, "a", i64::MAX), Item::new(2, "b", 1)];
        assert_eq!(total_cals(&items), i64::MAX);
    }

    #[test]
    fn test_is_valid_meal() {
        assert!(is_valid_meal("Eggs"));
        // Only the empty string is rejected
        assert!(is_valid_meal(" "));
        assert!(!is_valid_meal(""));
    }

    #[test]
    fn test_meal_input_from_form() {
        assert_eq!(
            MealInput::from_form("Toast", "100"),
            Some(MealInput {
                meal: "Toast".to_string(),
                cals: 100
            })
        );
        assert_eq!(MealInput::from_form("", "100"), None);
        assert_eq!(MealInput::from_form("Toast", "abc"), None);
    }

    #[test]
    fn test_total_cals() {
        let items = vec![Item::new(1, "Eggs", 200), Item::new(2, "Toast", 100)];
        assert_eq!(total_cals(&items), 300);
        assert_eq!(total_cals(&[]), 0);
    }

    #[test]
    fn test_item_json_shape() {
        let json = serde_json::to_string(&Item::new(3, "Salad", 150)).unwrap();
        assert_eq!(json, r#"{"id":3,"meal":"Salad","cals":150}"#);
    }
}
