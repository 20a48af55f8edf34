//! SQL utility functions

use std::sync::LazyLock;

use regex::Regex;

static PLAIN_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid")
});

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Use this when building LIKE patterns from user input to prevent
/// unintended pattern matching.
///
/// # Example
///
/// ```
/// use gridquery::utils::sql::escape_like_pattern;
///
/// let user_input = "100% match_test";
/// let pattern = format!("%{}%", escape_like_pattern(user_input));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Whether `s` can be used as an unquoted SQL identifier
pub fn is_plain_identifier(s: &str) -> bool {
    PLAIN_IDENTIFIER.is_match(s)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LikeToken {
    Literal(char),
    AnyOne,
    AnyMany,
}

fn tokenize_like(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            // A trailing lone backslash matches itself
            '\\' => tokens.push(LikeToken::Literal(chars.next().unwrap_or('\\'))),
            '%' => tokens.push(LikeToken::AnyMany),
            '_' => tokens.push(LikeToken::AnyOne),
            other => tokens.push(LikeToken::Literal(other)),
        }
    }
    tokens
}

/// Match `text` against a LIKE pattern using `\` as the escape character.
///
/// Case-sensitive, like the default collation of DuckDB and PostgreSQL.
pub fn like_matches(pattern: &str, text: &str) -> bool {
    let tokens = tokenize_like(pattern);
    let text: Vec<char> = text.chars().collect();

    // matched[j]: tokens consumed so far match text[..j]
    let mut matched = vec![false; text.len() + 1];
    matched[0] = true;

    for token in tokens {
        let mut next = vec![false; text.len() + 1];
        match token {
            LikeToken::AnyMany => {
                let mut reachable = false;
                for j in 0..=text.len() {
                    reachable |= matched[j];
                    next[j] = reachable;
                }
            }
            LikeToken::AnyOne => {
                for j in 0..text.len() {
                    next[j + 1] = matched[j];
                }
            }
            LikeToken::Literal(c) => {
                for j in 0..text.len() {
                    next[j + 1] = matched[j] && text[j] == c;
                }
            }
        }
        matched = next;
    }

    matched[text.len()]
}
