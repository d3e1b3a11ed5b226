use pretty_assertions::assert_eq;

use crate::ast::builders::*;
use crate::ast::{CaseRule, Operator};
use crate::error::ExtractError;
use crate::transpiler::{Dialect, ParamContext, CaseExpressionBuilder, build_case_when};

#[test]
fn test_single_rule_with_else() {
    let rules = vec![CaseRule {
        column: "status".into(),
        op: Operator::Eq,
        value: "active".into(),
        then_value: "Y".into(),
        else_value: Some("N".into()),
        alias: "is_active".into(),
    }];
    assert_eq!(
        build_case_when(&rules).unwrap(),
        "CASE\nWHEN status = 'active' THEN 'Y' ELSE 'N'\nEND AS is_active"
    );
}

#[test]
fn test_rule_without_else() {
    let rules = vec![when_like("email", "%@corp.com").then("internal").alias("audience")];
    assert_eq!(
        build_case_when(&rules).unwrap(),
        "CASE\nWHEN email LIKE '%@corp.com' THEN 'internal'\nEND AS audience"
    );
}

#[test]
fn test_blank_else_is_omitted() {
    let rules = vec![when_eq("a", "1").then("x").otherwise("").alias("flag")];
    assert_eq!(
        build_case_when(&rules).unwrap(),
        "CASE\nWHEN a = '1' THEN 'x'\nEND AS flag"
    );
}

#[test]
fn test_multiple_rules_use_first_alias() {
    let rules = vec![
        when_eq("tier", "gold").then("A").alias("segment"),
        when_ne("tier", "gold").then("B").otherwise("C").alias("ignored"),
    ];
    let sql = build_case_when(&rules).unwrap();
    assert!(sql.starts_with("CASE\n"));
    assert!(sql.ends_with("\nEND AS segment"));
    assert_eq!(sql.lines().filter(|l| l.starts_with("WHEN ")).count(), 2);
    assert!(sql.contains("WHEN tier != 'gold' THEN 'B' ELSE 'C'\n"));
}

#[test]
fn test_empty_rules_fail() {
    assert!(matches!(build_case_when(&[]), Err(ExtractError::EmptyRuleSet)));
}

#[test]
fn test_bad_alias_fails() {
    let rules = vec![when_eq("a", "1").then("x").alias("")];
    assert!(matches!(
        build_case_when(&rules),
        Err(ExtractError::InvalidIdentifier(_))
    ));
}

#[test]
fn test_rule_operator_restricted() {
    let mut rule = when_eq("a", "1").then("x").alias("flag");
    rule.op = Operator::Gt;
    assert!(matches!(
        build_case_when(&[rule]),
        Err(ExtractError::UnsupportedOperator { .. })
    ));
}

#[test]
fn test_values_escaped() {
    let rules = vec![when_eq("name", "D'Arcy").then("it's").alias("note")];
    assert_eq!(
        build_case_when(&rules).unwrap(),
        "CASE\nWHEN name = 'D''Arcy' THEN 'it''s'\nEND AS note"
    );
}

#[test]
fn test_parameterized_rule() {
    let rules = vec![when_eq("status", "active").then("Y").otherwise("N").alias("is_active")];
    let mut ctx = ParamContext::new(Dialect::Postgres);
    let sql = CaseExpressionBuilder::new().build_with(&rules, &mut ctx).unwrap();
    assert_eq!(sql, "CASE\nWHEN status = $1 THEN $2 ELSE $3\nEND AS is_active");
    assert_eq!(ctx.finish(sql).params, vec!["active", "Y", "N"]);
}
