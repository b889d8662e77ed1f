use winnow::combinator::{alt, not, preceded, terminated};
use winnow::error::{ErrMode, ModalResult};
use winnow::prelude::*;
use winnow::token::{one_of, rest, take_while};

use crate::{Comparator, LogicalOp};

use super::error::ConditionError;

// -- Tokens -----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'i> {
    Operand(&'i str),
    Op(LogicalOp),
    Open,
    Close,
}

const KEYWORDS: [&str; 2] = ["AND", "OR"];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

fn keyword(input: &mut &str) -> ModalResult<LogicalOp> {
    terminated(
        alt(("AND".value(LogicalOp::And), "OR".value(LogicalOp::Or))),
        not(one_of(is_word_char)),
    )
    .parse_next(input)
}

/// True if `text` opens with a whole-word `AND` or `OR`.
fn starts_with_keyword(text: &str) -> bool {
    KEYWORDS.iter().any(|kw| {
        text.strip_prefix(kw)
            .is_some_and(|after| !after.chars().next().is_some_and(is_word_char))
    })
}

/// Everything up to the next parenthesis or whole-word keyword that is not
/// inside a single-quoted literal.
fn operand_text<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let text: &'i str = input;
    let mut end = text.len();
    let mut in_quote = false;
    let mut prev: Option<char> = None;

    for (idx, c) in text.char_indices() {
        if in_quote {
            in_quote = c != '\'';
        } else if c == '\'' {
            in_quote = true;
        } else if c == '(' || c == ')' {
            end = idx;
            break;
        } else if idx > 0 && !prev.is_some_and(is_word_char) && starts_with_keyword(&text[idx..]) {
            end = idx;
            break;
        }
        prev = Some(c);
    }

    if end == 0 {
        return Err(ErrMode::from_input(input));
    }
    let (head, tail) = text.split_at(end);
    *input = tail;
    Ok(head)
}

fn operand<'i>(input: &mut &'i str) -> ModalResult<Token<'i>> {
    let text = operand_text(input)?;
    Ok(Token::Operand(text.trim()))
}

fn token<'i>(input: &mut &'i str) -> ModalResult<Token<'i>> {
    alt((
        '('.value(Token::Open),
        ')'.value(Token::Close),
        keyword.map(Token::Op),
        operand,
    ))
    .parse_next(input)
}

/// Split a rule string into operands, `AND`/`OR` keywords and parentheses.
///
/// Keywords only count as whole words, and neither keywords nor parentheses
/// split a single-quoted literal.
pub(crate) fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut remaining = input;
    let mut tokens = Vec::new();
    while let Ok(tok) = preceded(ws, token).parse_next(&mut remaining) {
        tokens.push(tok);
    }
    tokens
}

// -- Conditions -------------------------------------------------------------

/// Borrowed pieces of a validated condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ConditionParts<'i> {
    pub(crate) attribute: &'i str,
    pub(crate) comparator: Comparator,
    pub(crate) literal: &'i str,
}

fn condition<'i>(input: &mut &'i str) -> ModalResult<(&'i str, &'i str, &'i str)> {
    let attribute = take_while(1.., is_word_char).parse_next(input)?;
    ws.parse_next(input)?;
    let comparator = take_while(1.., ['<', '>', '=', '!']).parse_next(input)?;
    ws.parse_next(input)?;
    let literal = rest.verify(|s: &str| !s.is_empty()).parse_next(input)?;
    Ok((attribute, comparator, literal))
}

/// Validate condition text and split it into attribute, comparator and the
/// raw literal.
pub(crate) fn split_condition(text: &str) -> Result<ConditionParts<'_>, ConditionError> {
    let trimmed = text.trim();
    let (attribute, symbol, literal) =
        condition
            .parse(trimmed)
            .map_err(|_| ConditionError::InvalidFormat {
                condition: trimmed.to_owned(),
            })?;
    let comparator =
        Comparator::from_symbol(symbol).ok_or_else(|| ConditionError::UnsupportedComparator {
            condition: trimmed.to_owned(),
            comparator: symbol.to_owned(),
        })?;
    Ok(ConditionParts {
        attribute,
        comparator,
        literal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
    }

    #[test]
    fn tokenize_single_condition() {
        assert_eq!(ops("  age > 30  "), vec![Token::Operand("age > 30")]);
    }

    #[test]
    fn tokenize_and_or_parens() {
        assert_eq!(
            ops("(a > 1 OR b > 2) AND c > 3"),
            vec![
                Token::Open,
                Token::Operand("a > 1"),
                Token::Op(LogicalOp::Or),
                Token::Operand("b > 2"),
                Token::Close,
                Token::Op(LogicalOp::And),
                Token::Operand("c > 3"),
            ]
        );
    }

    #[test]
    fn tokenize_without_spaces_around_parens() {
        assert_eq!(
            ops("(a>1)AND(b>2)"),
            vec![
                Token::Open,
                Token::Operand("a>1"),
                Token::Close,
                Token::Op(LogicalOp::And),
                Token::Open,
                Token::Operand("b>2"),
                Token::Close,
            ]
        );
    }

    #[test]
    fn keywords_inside_identifiers_do_not_split() {
        assert_eq!(
            ops("ORDER_COUNT > 3 AND BRAND = 'x'"),
            vec![
                Token::Operand("ORDER_COUNT > 3"),
                Token::Op(LogicalOp::And),
                Token::Operand("BRAND = 'x'"),
            ]
        );
    }

    #[test]
    fn quoted_literals_are_not_split() {
        assert_eq!(
            ops("status = 'A AND (B)' OR x > 1"),
            vec![
                Token::Operand("status = 'A AND (B)'"),
                Token::Op(LogicalOp::Or),
                Token::Operand("x > 1"),
            ]
        );
    }

    #[test]
    fn lower_case_keywords_are_operand_text() {
        assert_eq!(ops("a > 1 and b > 2"), vec![Token::Operand("a > 1 and b > 2")]);
    }

    #[test]
    fn tokenize_empty_and_blank() {
        assert!(ops("").is_empty());
        assert!(ops("   \t\n").is_empty());
    }

    #[test]
    fn split_condition_parts() {
        let parts = split_condition(" department = 'Sales' ").unwrap();
        assert_eq!(parts.attribute, "department");
        assert_eq!(parts.comparator, Comparator::Eq);
        assert_eq!(parts.literal, "'Sales'");
    }

    #[test]
    fn split_all_comparators() {
        for c in Comparator::ALL {
            let text = format!("x {} 1", c.symbol());
            assert_eq!(split_condition(&text).unwrap().comparator, c, "failed for {c}");
        }
    }

    #[test]
    fn split_rejects_missing_value() {
        assert_eq!(
            split_condition("age >"),
            Err(ConditionError::InvalidFormat {
                condition: "age >".into()
            })
        );
    }

    #[test]
    fn split_rejects_missing_comparator() {
        assert!(matches!(
            split_condition("age 30"),
            Err(ConditionError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn split_rejects_non_word_attribute() {
        assert!(matches!(
            split_condition("user.age > 30"),
            Err(ConditionError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn split_reports_unsupported_comparator_run() {
        assert_eq!(
            split_condition("age >> 30"),
            Err(ConditionError::UnsupportedComparator {
                condition: "age >> 30".into(),
                comparator: ">>".into(),
            })
        );
        assert!(matches!(
            split_condition("age == 30"),
            Err(ConditionError::UnsupportedComparator { comparator, .. }) if comparator == "=="
        ));
    }
}
