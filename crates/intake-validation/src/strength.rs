//! Password strength check
//!
//! A password is strong when it is long enough and carries at least one
//! character from each of four classes: lowercase, uppercase, digit, and the
//! special set `@$!%*?&`. Classes are ASCII; other characters count toward
//! length only.

/// Characters accepted as the "special" class
pub const SPECIAL_CHARS: &str = "@$!%*?&";

/// Breakdown of which strength requirements a password meets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub long_enough: bool,
    pub has_lower: bool,
    pub has_upper: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl PasswordStrength {
    pub fn assess(value: &str, min_length: usize) -> Self {
        Self {
            long_enough: value.chars().count() >= min_length,
            has_lower: value.chars().any(|c| c.is_ascii_lowercase()),
            has_upper: value.chars().any(|c| c.is_ascii_uppercase()),
            has_digit: value.chars().any(|c| c.is_ascii_digit()),
            has_special: value.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }

    pub fn is_strong(&self) -> bool {
        self.long_enough && self.has_lower && self.has_upper && self.has_digit && self.has_special
    }

    /// Names of the unmet requirements, for diagnostics
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.long_enough, "length"),
            (self.has_lower, "lowercase"),
            (self.has_upper, "uppercase"),
            (self.has_digit, "digit"),
            (self.has_special, "special"),
        ]
        .into_iter()
        .filter_map(|(met, name)| (!met).then_some(name))
        .collect()
    }
}

pub fn is_strong_password(value: &str, min_length: usize) -> bool {
    PasswordStrength::assess(value, min_length).is_strong()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_passwords() {
        assert!(is_strong_password("Abcdefg1!", 8));
        assert!(is_strong_password("P@ssw0rd", 8));
        assert!(is_strong_password("xY9&xY9&", 8));
    }

    #[test]
    fn test_each_missing_class_fails() {
        // Missing uppercase
        assert!(!is_strong_password("abcdefg1!", 8));
        // Missing lowercase
        assert!(!is_strong_password("ABCDEFG1!", 8));
        // Missing digit
        assert!(!is_strong_password("Abcdefgh!", 8));
        // Missing special
        assert!(!is_strong_password("Abcdefg12", 8));
        // Too short
        assert!(!is_strong_password("Abc1!", 8));
    }

    #[test]
    fn test_special_set_is_narrow() {
        // '#' and '-' are not in the accepted special set
        assert!(!is_strong_password("Abcdefg1#", 8));
        assert!(!is_strong_password("Abcdefg1-", 8));
    }

    #[test]
    fn test_missing_report() {
        let strength = PasswordStrength::assess("abc", 8);
        assert_eq!(strength.missing(), vec!["length", "uppercase", "digit", "special"]);
        assert!(PasswordStrength::assess("Abcdefg1!", 8).missing().is_empty());
    }
}
