use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while1},
    character::complete::{char, multispace0, multispace1, none_of, satisfy},
    combinator::{cut, map, not, peek, recognize, value, verify},
    multi::{fold_many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::ast::{Combinator, Operator};

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Case-insensitive keyword not followed by an identifier character.
pub fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(kw), not(satisfy(is_ident_char)))
}

/// Parse an identifier (table, column or alias name, optionally qualified).
pub fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| is_ident_char(c) || c == '.'),
    ))(input)
}

/// Parse AND / OR.
pub fn parse_combinator(input: &str) -> IResult<&str, Combinator> {
    alt((
        value(Combinator::And, keyword("AND")),
        value(Combinator::Or, keyword("OR")),
    ))(input)
}

/// Parse a comparison operator. Longer symbols are tried first.
pub fn parse_operator(input: &str) -> IResult<&str, Operator> {
    alt((
        value(Operator::Lte, tag("<=")),
        value(Operator::Gte, tag(">=")),
        value(Operator::Ne, alt((tag("!="), tag("<>")))),
        value(Operator::Eq, alt((tag("=="), tag("=")))),
        value(Operator::Lt, tag("<")),
        value(Operator::Gt, tag(">")),
        value(Operator::Like, keyword("LIKE")),
        value(Operator::Between, keyword("BETWEEN")),
        value(Operator::In, keyword("IN")),
    ))(input)
}

/// Parse a single-quoted string; `''` stands for one quote.
pub fn parse_quoted_string(input: &str) -> IResult<&str, String> {
    delimited(
        char('\''),
        fold_many0(
            alt((value('\'', tag("''")), none_of("'"))),
            String::new,
            |mut acc, c| {
                acc.push(c);
                acc
            },
        ),
        char('\''),
    )(input)
}

/// Parse a quoted string or a bare token running to the next whitespace.
pub fn parse_value(input: &str) -> IResult<&str, String> {
    alt((
        parse_quoted_string,
        map(take_while1(|c: char| !c.is_whitespace()), String::from),
    ))(input)
}

/// One IN item. The list is stored comma-joined, so a quoted item may not
/// carry a comma of its own; that fails hard with `ErrorKind::Verify`.
fn parse_list_item(input: &str) -> IResult<&str, String> {
    preceded(
        multispace0,
        alt((
            preceded(
                peek(char('\'')),
                cut(verify(parse_quoted_string, |s: &str| !s.contains(','))),
            ),
            map(take_while1(|c: char| c != ',' && c != ')'), |s: &str| {
                s.trim().to_string()
            }),
        )),
    )(input)
}

fn parse_list_items(input: &str) -> IResult<&str, Vec<String>> {
    separated_list1(tuple((multispace0, char(','))), parse_list_item)(input)
}

/// Parse an IN list, with or without parentheses, into `a, b, c` form.
pub fn parse_in_list(input: &str) -> IResult<&str, String> {
    map(
        alt((
            delimited(char('('), parse_list_items, preceded(multispace0, char(')'))),
            parse_list_items,
        )),
        |items| items.join(", "),
    )(input)
}

/// Parse `<ws> kw <ws>` with mandatory whitespace on both sides.
pub fn spaced_keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, ()> {
    value((), tuple((multispace1, keyword(kw), multispace1)))
}
