//! Text forms of filters and rules, as typed on the command line.
//!
//! ```text
//! [AND|OR] <column> <op> <value> [AND <value>] [/cs]
//! [WHEN] <column> <op> <value> THEN <value> [ELSE <value>] AS <alias>
//! ```
//!
//! Values are single-quoted (`''` escapes a quote) or bare tokens. A leading
//! AND/OR on a filter sets how the *previous* filter joins this one.

pub mod tokens;

#[cfg(test)]
mod tests;

use nom::{
    character::complete::{multispace0, multispace1},
    combinator::{all_consuming, opt},
    error::ErrorKind,
    sequence::{preceded, terminated},
    IResult,
};

use crate::ast::{CaseRule, Combinator, FilterSpec, Operator};
use crate::error::{ExtractError, ExtractResult};
use self::tokens::*;

const CASE_SENSITIVE_MARK: &str = "/cs";

fn parse_filter_line(input: &str) -> IResult<&str, (Option<Combinator>, FilterSpec)> {
    let (input, _) = multispace0(input)?;
    let (input, combinator) = opt(terminated(parse_combinator, multispace1))(input)?;
    let (input, column) = parse_identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, op) = parse_operator(input)?;
    let (input, _) = multispace0(input)?;

    let (input, (value, value2)) = match op {
        Operator::Between => {
            let (input, low) = parse_value(input)?;
            let (input, _) = spaced_keyword("AND")(input)?;
            let (input, high) = parse_value(input)?;
            (input, (low, Some(high)))
        }
        Operator::In => {
            let (input, list) = parse_in_list(input)?;
            (input, (list, None))
        }
        _ => {
            let (input, v) = parse_value(input)?;
            (input, (v, None))
        }
    };
    let (input, _) = multispace0(input)?;

    let mut spec = FilterSpec::new(column, op, value);
    spec.value2 = value2;
    Ok((input, (combinator, spec)))
}

fn parse_rule_line(input: &str) -> IResult<&str, CaseRule> {
    let (input, _) = multispace0(input)?;
    let (input, _) = opt(terminated(keyword("WHEN"), multispace1))(input)?;
    let (input, column) = parse_identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, op) = parse_operator(input)?;
    let (input, _) = multispace0(input)?;
    let (input, value) = parse_value(input)?;
    let (input, _) = spaced_keyword("THEN")(input)?;
    let (input, then_value) = parse_value(input)?;
    let (input, else_value) = opt(preceded(spaced_keyword("ELSE"), parse_value))(input)?;
    let (input, _) = spaced_keyword("AS")(input)?;
    let (input, alias) = parse_identifier(input)?;
    let (input, _) = multispace0(input)?;

    Ok((
        input,
        CaseRule {
            column: column.to_string(),
            op,
            value,
            then_value,
            else_value,
            alias: alias.to_string(),
        },
    ))
}

/// Parse one filter line, returning the leading combinator if present.
pub fn parse_filter(line: &str) -> ExtractResult<(Option<Combinator>, FilterSpec)> {
    let trimmed = line.trim_end();
    let (body, case_sensitive) = match trimmed
        .strip_suffix(CASE_SENSITIVE_MARK)
        .filter(|rest| rest.ends_with(char::is_whitespace))
    {
        Some(rest) => (rest, true),
        None => (trimmed, false),
    };

    let (_, (combinator, spec)) = all_consuming(parse_filter_line)(body).map_err(|e| match e {
        nom::Err::Failure(err) if err.code == ErrorKind::Verify => ExtractError::Parse(format!(
            "invalid filter '{}': a quoted IN item cannot contain ','",
            line
        )),
        e => ExtractError::Parse(format!("invalid filter '{}': {}", line, e)),
    })?;
    Ok((combinator, spec.case_sensitive(case_sensitive)))
}

/// Parse filter lines into an ordered list.
///
/// A combinator leading line `n` becomes the combinator of filter `n - 1`.
pub fn parse_filters<S: AsRef<str>>(lines: &[S]) -> ExtractResult<Vec<FilterSpec>> {
    let mut filters = Vec::with_capacity(lines.len());
    extend_filters(&mut filters, lines)?;
    Ok(filters)
}

/// Parse filter lines onto the end of `filters`.
///
/// A leading combinator on the first line joins it to the last filter
/// already in the list; it is an error only when the list is empty.
pub fn extend_filters<S: AsRef<str>>(
    filters: &mut Vec<FilterSpec>,
    lines: &[S],
) -> ExtractResult<()> {
    for line in lines {
        let (combinator, spec) = parse_filter(line.as_ref())?;
        if let Some(combinator) = combinator {
            match filters.last_mut() {
                Some(prev) => prev.combinator = combinator,
                None => {
                    return Err(ExtractError::Parse(format!(
                        "first filter cannot start with {}",
                        combinator
                    )));
                }
            }
        }
        filters.push(spec);
    }
    Ok(())
}

/// Parse one CASE rule line.
pub fn parse_rule(line: &str) -> ExtractResult<CaseRule> {
    let (_, rule) = all_consuming(parse_rule_line)(line)
        .map_err(|e| ExtractError::Parse(format!("invalid rule '{}': {}", line, e)))?;
    Ok(rule)
}
