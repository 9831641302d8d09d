//! Lexer for SGF game records using logos

use logos::{Lexer, Logos};

use crate::error::ParseError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(";")]
    Semicolon,

    /// Property identifier, normalized to its uppercase letters
    #[regex(r"[A-Za-z]+", normalize_ident)]
    PropIdent(String),

    /// Bracketed property value with escapes already resolved
    #[token("[", lex_value)]
    Value(String),
}

/// FF[3] allowed long identifiers such as `AddBlack`; only the uppercase
/// letters are significant.
fn normalize_ident(lex: &mut Lexer<Token>) -> String {
    let upper: String = lex.slice().chars().filter(|c| c.is_ascii_uppercase()).collect();
    if upper.is_empty() {
        lex.slice().to_ascii_uppercase()
    } else {
        upper
    }
}

/// Consume a value up to the matching unescaped `]`
fn lex_value(lex: &mut Lexer<Token>) -> Option<String> {
    let rest = lex.remainder();
    let mut value = String::new();
    let mut chars = rest.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            ']' => {
                lex.bump(i + 1);
                return Some(value);
            }
            '\\' => match chars.next() {
                // Soft line break: the escaped newline (and its pair) disappears
                Some((_, first @ ('\n' | '\r'))) => {
                    let pair = if first == '\n' { '\r' } else { '\n' };
                    if chars.peek().map(|&(_, c)| c) == Some(pair) {
                        chars.next();
                    }
                }
                Some((_, escaped)) => value.push(escaped),
                None => break,
            },
            other => value.push(other),
        }
    }

    // Unterminated: swallow the rest so the error spans it
    lex.bump(rest.len());
    None
}

/// Lex input string into tokens with spans
///
/// Spans are shifted by `offset` so they refer to the enclosing text.
pub fn lex(input: &str, offset: usize) -> impl Iterator<Item = Result<(Token, Span), ParseError>> + '_ {
    Token::lexer(input).spanned().map(move |(tok, span)| {
        let shifted = span.start + offset..span.end + offset;
        match tok {
            Ok(t) => Ok((t, shifted)),
            Err(()) => {
                let slice = &input[span.clone()];
                if slice.starts_with('[') {
                    Err(ParseError::Syntax {
                        span: shifted,
                        message: "unterminated property value".to_string(),
                        expected: vec!["']'".to_string()],
                    })
                } else {
                    let found = slice.chars().next().unwrap_or(' ');
                    Err(ParseError::syntax(
                        shifted,
                        format!("unexpected character '{}'", found.escape_default()),
                    ))
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input, 0)
            .map(|r| r.expect("Should lex").0)
            .collect()
    }

    #[test]
    fn test_structure_tokens() {
        assert_eq!(
            tokens("(;)"),
            vec![Token::ParenOpen, Token::Semicolon, Token::ParenClose]
        );
    }

    #[test]
    fn test_property_with_values() {
        assert_eq!(
            tokens("AB[aa][bb]"),
            vec![
                Token::PropIdent("AB".to_string()),
                Token::Value("aa".to_string()),
                Token::Value("bb".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_between_values() {
        assert_eq!(
            tokens("AW [cc]\n  [dd]"),
            vec![
                Token::PropIdent("AW".to_string()),
                Token::Value("cc".to_string()),
                Token::Value("dd".to_string()),
            ]
        );
    }

    #[test]
    fn test_long_identifier_normalized() {
        assert_eq!(tokens("AddBlack"), vec![Token::PropIdent("AB".to_string())]);
        assert_eq!(tokens("sz"), vec![Token::PropIdent("SZ".to_string())]);
    }

    #[test]
    fn test_escaped_bracket() {
        assert_eq!(
            tokens(r"C[a \] b]"),
            vec![
                Token::PropIdent("C".to_string()),
                Token::Value("a ] b".to_string()),
            ]
        );
    }

    #[test]
    fn test_escaped_backslash() {
        assert_eq!(tokens(r"[a\\]"), vec![Token::Value(r"a\".to_string())]);
    }

    #[test]
    fn test_soft_line_break_removed() {
        assert_eq!(tokens("[ab\\\ncd]"), vec![Token::Value("abcd".to_string())]);
        assert_eq!(tokens("[ab\\\r\ncd]"), vec![Token::Value("abcd".to_string())]);
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(
            tokens("B[]"),
            vec![Token::PropIdent("B".to_string()), Token::Value(String::new())]
        );
    }

    #[test]
    fn test_spans_are_offset() {
        let spans: Vec<_> = lex("B[cc]", 10).map(|r| r.unwrap().1).collect();
        assert_eq!(spans, vec![10..11, 11..15]);
    }

    #[test]
    fn test_unterminated_value() {
        let results: Vec<_> = lex("(;B[cc", 0).collect();
        let err = results
            .into_iter()
            .find_map(Result::err)
            .expect("Should fail");
        match err {
            ParseError::Syntax { message, span, .. } => {
                assert_eq!(message, "unterminated property value");
                assert_eq!(span, 3..6);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex("(;B[cc]%)", 0)
            .find_map(Result::err)
            .expect("Should fail");
        assert!(err.to_string().contains("unexpected character '%'"));
    }
}
