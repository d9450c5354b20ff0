use intake_validation::{check_submission, ErrorKind, Field, FieldValues, Validator};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn form(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn check(field: Field, value: &str) -> (bool, Option<ErrorKind>) {
    let mut validator = Validator::new(form(&[(field.as_str(), value)]));
    let valid = validator.validate_field(field);
    (valid, validator.error_kind(field))
}

#[rstest]
#[case("Jo", None)]
#[case("J", Some(ErrorKind::NameTooShort))]
#[case(&"a".repeat(51), Some(ErrorKind::NameTooLong))]
#[case(&"a".repeat(50), None)]
#[case("Anne-Marie O'Brien", None)]
#[case("John3", Some(ErrorKind::NameInvalidCharacters))]
#[case("", Some(ErrorKind::NameRequired))]
fn name_rules(#[case] value: &str, #[case] expected: Option<ErrorKind>) {
    assert_eq!(check(Field::Name, value), (expected.is_none(), expected));
}

#[rstest]
#[case("a@b.co", None)]
#[case("not-an-email", Some(ErrorKind::EmailInvalid))]
#[case("", Some(ErrorKind::EmailRequired))]
#[case("  a@b.co  ", None)]
#[case("o'brien@example.com", None)]
#[case("first.last+tag@mail.example.co.uk", None)]
#[case(".a@b.co", Some(ErrorKind::EmailInvalid))]
#[case("a.@b.co", Some(ErrorKind::EmailInvalid))]
#[case("a..b@b.co", Some(ErrorKind::EmailInvalid))]
#[case("a@-b.co", Some(ErrorKind::EmailInvalid))]
#[case("a@b-.co", Some(ErrorKind::EmailInvalid))]
#[case("a@b..co", Some(ErrorKind::EmailInvalid))]
fn email_rules(#[case] value: &str, #[case] expected: Option<ErrorKind>) {
    assert_eq!(check(Field::Email, value), (expected.is_none(), expected));
}

#[rstest]
#[case("", None)]
#[case("123-456-7890", None)]
#[case("1234567890", None)]
#[case("12345", Some(ErrorKind::PhoneInvalid))]
fn phone_rules(#[case] value: &str, #[case] expected: Option<ErrorKind>) {
    assert_eq!(check(Field::Phone, value), (expected.is_none(), expected));
}

#[rstest]
#[case("17", Some(ErrorKind::AgeInvalid))]
#[case("18", None)]
#[case("120", None)]
#[case("121", Some(ErrorKind::AgeInvalid))]
#[case("abc", Some(ErrorKind::AgeInvalid))]
#[case("", Some(ErrorKind::AgeRequired))]
fn age_rules(#[case] value: &str, #[case] expected: Option<ErrorKind>) {
    assert_eq!(check(Field::Age, value), (expected.is_none(), expected));
}

#[rstest]
#[case("us", None)]
#[case("xx", Some(ErrorKind::CountryInvalid))]
#[case("US", Some(ErrorKind::CountryInvalid))]
#[case("", Some(ErrorKind::CountryRequired))]
fn country_rules(#[case] value: &str, #[case] expected: Option<ErrorKind>) {
    assert_eq!(check(Field::Country, value), (expected.is_none(), expected));
}

#[rstest]
#[case(&"m".repeat(501), Some(ErrorKind::MessageTooLong))]
#[case(&"m".repeat(500), None)]
#[case("", None)]
#[case("   ", None)]
fn message_rules(#[case] value: &str, #[case] expected: Option<ErrorKind>) {
    assert_eq!(check(Field::Message, value), (expected.is_none(), expected));
}

#[rstest]
#[case(&"é".repeat(500), None)]
#[case(&"é".repeat(501), Some(ErrorKind::MessageTooLong))]
fn message_length_counts_characters(#[case] value: &str, #[case] expected: Option<ErrorKind>) {
    assert_eq!(check(Field::Message, value), (expected.is_none(), expected));
}

#[rstest]
#[case(Field::Name, ErrorKind::NameTooShort)]
#[case(Field::Age, ErrorKind::AgeInvalid)]
#[case(Field::Country, ErrorKind::CountryInvalid)]
#[case(Field::Password, ErrorKind::PasswordWeak)]
fn zero_is_a_present_value(#[case] field: Field, #[case] expected: ErrorKind) {
    assert_eq!(check(field, "0"), (false, Some(expected)));
}

#[test]
fn non_numeric_age_shares_range_message() {
    let mut low = Validator::new(form(&[("age", "17")]));
    let mut text = Validator::new(form(&[("age", "abc")]));
    low.validate_age();
    text.validate_age();
    assert_eq!(low.error(Field::Age), text.error(Field::Age));
}

#[test]
fn password_strength_and_mismatch() {
    let mut strong = Validator::new(form(&[
        ("password", "Abcdefg1!"),
        ("confirmPassword", "Abcdefg1!"),
    ]));
    assert!(strong.validate_password());

    let mut no_upper = Validator::new(form(&[
        ("password", "abcdefg1!"),
        ("confirmPassword", "abcdefg1!"),
    ]));
    assert!(!no_upper.validate_password());
    assert_eq!(no_upper.error_kind(Field::Password), Some(ErrorKind::PasswordWeak));

    let mut mismatch = Validator::new(form(&[
        ("password", "Abcdefg1!"),
        ("confirmPassword", "different"),
    ]));
    assert!(!mismatch.validate_password());
    assert!(!mismatch.has_error(Field::Password));
    assert_eq!(
        mismatch.error_kind(Field::ConfirmPassword),
        Some(ErrorKind::PasswordMismatch)
    );
}

#[rstest]
#[case(&[])]
#[case(&[("name", "Jo"), ("email", "a@b.co")])]
#[case(&[
    ("name", "Jo"),
    ("email", "a@b.co"),
    ("password", "Abcdefg1!"),
    ("confirmPassword", "Abcdefg1!"),
    ("age", "18"),
    ("country", "ca"),
])]
#[case(&[
    ("name", "Jo"),
    ("email", "a@b.co"),
    ("password", "Abcdefg1!"),
    ("confirmPassword", "Abcdefg1?"),
    ("age", "18"),
    ("country", "ca"),
])]
fn validate_all_agrees_with_error_map(#[case] pairs: &[(&str, &str)]) {
    let mut validator = Validator::new(form(pairs));
    let valid = validator.validate_all();
    assert_eq!(valid, validator.errors().is_empty());
}

#[test]
fn single_field_checks_are_idempotent() {
    let data = form(&[("name", "John3"), ("age", "abc"), ("country", "xx")]);
    let mut validator = Validator::new(data);

    for field in [Field::Name, Field::Age, Field::Country, Field::Phone] {
        let first = (validator.validate_field(field), validator.error(field).map(String::from));
        let second = (validator.validate_field(field), validator.error(field).map(String::from));
        assert_eq!(first, second);
    }
}

#[test]
fn sanitized_output_never_has_secrets() {
    let data = form(&[
        ("name", "Jo"),
        ("password", "Abcdefg1!"),
        ("confirmPassword", "whatever"),
    ]);
    let validator = Validator::new(data);
    let sanitized = validator.sanitized_data();
    assert!(!sanitized.contains_key("password"));
    assert!(!sanitized.contains_key("confirmPassword"));
    assert_eq!(sanitized.len(), 1);

    let full = check_submission(form(&[("password", "x"), ("confirmPassword", "x")]));
    assert!(!full.valid);
    assert!(full.sanitized.is_none());
}
