use rematch::parse_regex;

fn test_pattern(pattern: &str, text: &str, expected: bool) {
    let regex = parse_regex(pattern).expect(&format!("Failed to parse pattern: {}", pattern));
    let result = regex.find_match(text);
    assert_eq!(result, expected,
        "Pattern '{}' against text '{}' - expected: {}, got: {}",
        pattern, text, expected, result);
}

#[cfg(test)]
mod dollar_tests {
    use super::*;

    #[test]
    fn test_mid_pattern_dollar_never_anchors() {
        test_pattern("o$o", "Hello", false);
    }

    #[test]
    fn test_mid_pattern_dollar_is_literal() {
        test_pattern("o$o", "foo$of", true);
    }

    #[test]
    fn test_starred_dollar() {
        test_pattern("$*", "anything", true);
        test_pattern("^a$*b", "a$$b", true);
    }

    #[test]
    fn test_trailing_dollar_never_literal() {
        test_pattern("a$", "a$", false);
    }
}

#[cfg(test)]
mod star_position_tests {
    use super::*;

    #[test]
    fn test_leading_star_is_literal() {
        test_pattern("*a", "x*ay", true);
        test_pattern("*a", "aaa", false);
    }

    #[test]
    fn test_star_after_star() {
        test_pattern("a**", "b", false);
        test_pattern("a**", "b*", true);
    }

    #[test]
    fn test_star_of_star() {
        test_pattern("^x**y$", "x***y", true);
        test_pattern("^x**y$", "xy", true);
    }

    #[test]
    fn test_star_after_start_anchor() {
        test_pattern("^*", "*abc", true);
        test_pattern("^*", "a*", false);
    }
}

#[cfg(test)]
mod no_extended_syntax_tests {
    use super::*;

    #[test]
    fn test_caret_after_start() {
        test_pattern("^^", "^a", true);
        test_pattern("^^", "a^", false);
        test_pattern("a^b", "xa^by", true);
    }

    #[test]
    fn test_plus_is_literal() {
        test_pattern("a+", "aaa", false);
        test_pattern("a+", "a+b", true);
    }

    #[test]
    fn test_question_is_literal() {
        test_pattern("a?", "b", false);
        test_pattern("a?", "why a?", true);
    }

    #[test]
    fn test_brackets_are_literal() {
        test_pattern("[abc]", "a", false);
        test_pattern("[abc]", "x[abc]y", true);
    }

    #[test]
    fn test_group_and_alternation_are_literal() {
        test_pattern("(a|b)", "a", false);
        test_pattern("(a|b)", "(a|b)", true);
    }

    #[test]
    fn test_backslash_does_not_escape() {
        test_pattern("\\d", "5", false);
        test_pattern("\\d", "a\\d", true);
        test_pattern("a\\.b", "a.b", false);
    }

    #[test]
    fn test_dot_cannot_be_forced_literal() {
        test_pattern("a.b", "axb", true);
        test_pattern("a.b", "a.b", true);
    }
}
