/*!
 * Tests for ISO language code utilities
 */

use shadowsub::language_utils::{
    get_language_name, normalize_to_part1_or_part2t, validate_language_code, LanguageCodeType,
};

#[test]
fn test_validate_language_code_withKnownCodes_shouldReportType() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("EN").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("eng").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("fre").unwrap(), LanguageCodeType::Part2B);
}

#[test]
fn test_validate_language_code_withUnknownCodes_shouldFail() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalize_to_part1_or_part2t_withThreeLetterCodes_shouldPreferTwoLetters() {
    assert_eq!(normalize_to_part1_or_part2t("eng").unwrap(), "en");
    assert_eq!(normalize_to_part1_or_part2t("ger").unwrap(), "de");
    assert_eq!(normalize_to_part1_or_part2t(" en ").unwrap(), "en");
}

#[test]
fn test_get_language_name_withCaptionCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fra").unwrap(), "French");
    assert!(get_language_name("zz").is_err());
}
