//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::sgf::ast::*;
use crate::sgf::lexer::{self, Token};

/// Parse SGF text into a collection of game trees
///
/// Anything before the first `(` is ignored, as SGF files often carry a
/// free-form header.
pub fn parse(input: &str) -> Result<Collection, Vec<ParseError>> {
    let len = input.len();
    let Some(start) = collection_start(input) else {
        return Err(vec![ParseError::Syntax {
            span: len..len,
            message: "no game tree found".to_string(),
            expected: vec!["'('".to_string()],
        }]);
    };

    let tokens = lexer::lex(&input[start..], start)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| vec![e])?;

    // Turn the token list into a stream that chumsky can use
    let token_stream = Stream::from_iter(tokens.into_iter().map(|(tok, span)| (tok, span.into())))
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    collection_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Offset of the first `(` that opens a game tree
///
/// A tree opens with `(` followed by `;`, possibly after whitespace, so
/// parentheses in a free-form header are skipped. Without such a `(` the
/// first one is used and the grammar reports what is wrong with it.
fn collection_start(input: &str) -> Option<usize> {
    input
        .match_indices('(')
        .map(|(i, _)| i)
        .find(|&i| input[i + 1..].trim_start().starts_with(';'))
        .or_else(|| input.find('('))
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn collection_parser<'a, I>() -> impl Parser<'a, I, Collection, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let ident = select! {
        Token::PropIdent(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    let value = select! {
        Token::Value(v) => v,
    }
    .map_with(|v, e| Spanned::new(v, span_range(&e.span())));

    let property = ident
        .then(value.repeated().at_least(1).collect::<Vec<_>>())
        .map(|(ident, values)| Property { ident, values });

    let node = just(Token::Semicolon)
        .ignore_then(property.repeated().collect::<Vec<_>>())
        .map_with(|properties, e| Spanned::new(Node { properties }, span_range(&e.span())));

    // A game tree holds at least one node and any number of nested variations
    let game_tree = recursive(|tree| {
        node.repeated()
            .at_least(1)
            .collect::<Vec<_>>()
            .then(tree.repeated().collect::<Vec<GameTree>>())
            .delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
            .map_with(|(sequence, variations), e| GameTree {
                sequence,
                variations,
                span: span_range(&e.span()),
            })
            .boxed()
    });

    game_tree
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|trees| Collection { trees })
}
