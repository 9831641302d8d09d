//! Error types for SGF parsing and interpretation

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::board::BoardSize;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("unsupported board size '{value}' (expected 9, 13 or 19)")]
    UnsupportedBoardSize { value: String, span: Span },

    #[error("invalid point '{value}' in property {property}")]
    InvalidPoint {
        property: String,
        value: String,
        span: Span,
    },

    #[error("point '{value}' in property {property} is outside the {size} board")]
    PointOutOfRange {
        property: String,
        value: String,
        size: BoardSize,
        span: Span,
    },
}

impl ParseError {
    /// Create a syntax error with no expectations
    pub fn syntax(span: Span, message: impl Into<String>) -> Self {
        Self::Syntax {
            span,
            message: message.into(),
            expected: vec![],
        }
    }

    /// Source span of the offending input
    pub fn span(&self) -> &Span {
        match self {
            Self::Syntax { span, .. }
            | Self::UnsupportedBoardSize { span, .. }
            | Self::InvalidPoint { span, .. }
            | Self::PointOutOfRange { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span().clone();
        let (message, detail) = match self {
            ParseError::Syntax {
                message, expected, ..
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                (message.clone(), format!("{}{}", message, expected_str))
            }
            other => (other.to_string(), other.to_string()),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(detail)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        if written.is_err() {
            return format!("{}: {}", filename, self);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::sgf::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::sgf::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::sgf::lexer::Token) -> String {
    use crate::sgf::lexer::Token;
    match tok {
        Token::ParenOpen => "'('".to_string(),
        Token::ParenClose => "')'".to_string(),
        Token::Semicolon => "';'".to_string(),
        Token::PropIdent(s) => format!("property '{}'", s),
        Token::Value(v) => format!("value [{}]", v),
    }
}
