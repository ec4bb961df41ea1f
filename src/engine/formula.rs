//! Cost-rate formula evaluation.
//!
//! Administrators author the cost-rate formula as a template with named
//! placeholders, e.g. `{salary}/52/38*(1+{payrollTaxPercentage})`. After
//! substitution the text must pass a character whitelist and is then run
//! through a hand-written tokenizer and recursive-descent parser over
//! `BigDecimal`. No identifiers, function calls, or member access are
//! reachable from formula text; the whitelist is a security boundary and
//! must not be widened.

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use regex::Regex;

use crate::config::SystemConfig;
use crate::error::EngineError;

/// Digits, whitespace, arithmetic operators, grouping, and braces. Braces
/// pass the gate so that an unresolved placeholder fails later with a
/// message naming the stray token instead of a blanket character error.
const ALLOWED_EXPRESSION: &str = r"^[0-9\s+\-*/.(){}]*$";

/// Derive an hourly cost rate from an annual salary and the configured
/// formula. The result is rounded to two decimal places, half-up.
pub fn calculate_cost_rate(
    salary: &BigDecimal,
    config: &SystemConfig,
) -> Result<BigDecimal, EngineError> {
    let template = config
        .cost_rate_formula
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| EngineError::config("cost rate formula not configured"))?;

    if *salary <= BigDecimal::zero() {
        return Err(EngineError::validation("invalid salary"));
    }

    let payroll_tax = percentage_field(
        config.payroll_tax_percentage.as_ref(),
        "payrollTaxPercentage",
    )?;
    let insurance = percentage_field(config.insurance_percentage.as_ref(), "insurancePercentage")?;
    let superannuation = percentage_field(
        config.superannuation_percentage.as_ref(),
        "superannuationPercentage",
    )?;
    let threshold = config
        .payroll_tax_free_threshold
        .clone()
        .ok_or_else(|| EngineError::config("payrollTaxFreeThreshold not configured"))?;

    // Percentages substitute as fractions; salary and threshold as-is.
    let substituted = template
        .replace("{salary}", &salary.to_string())
        .replace("{payrollTaxPercentage}", &payroll_tax.to_string())
        .replace("{payrollTaxFreeThreshold}", &threshold.to_string())
        .replace("{insurancePercentage}", &insurance.to_string())
        .replace("{superannuationPercentage}", &superannuation.to_string());

    let allowed = Regex::new(ALLOWED_EXPRESSION).unwrap();
    if !allowed.is_match(&substituted) {
        return Err(EngineError::FormulaSyntax(format!(
            "formula contains disallowed characters after substitution: {}",
            substituted
        )));
    }

    let result = evaluate(&substituted)?;
    Ok(result.with_scale_round(2, RoundingMode::HalfUp))
}

/// Whole-number percent (15) to decimal fraction (0.15). Unset → config
/// error naming the field the admin form uses.
fn percentage_field(value: Option<&BigDecimal>, name: &str) -> Result<BigDecimal, EngineError> {
    let whole = value.ok_or_else(|| EngineError::config(format!("{} not configured", name)))?;
    Ok(whole.clone() / BigDecimal::from(100))
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(BigDecimal),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EngineError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal.parse::<BigDecimal>().map_err(|e| {
                    EngineError::FormulaEvaluation(format!(
                        "invalid numeric literal '{}': {}",
                        literal, e
                    ))
                })?;
                tokens.push(Token::Number(value));
            }
            other => {
                // Unresolved placeholders leave braces behind and land here.
                return Err(EngineError::FormulaEvaluation(format!(
                    "unexpected character '{}' in formula",
                    other
                )));
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<BigDecimal, EngineError> {
        let mut value = self.term()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.pos += 1;
                    value = value + self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value = value - self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<BigDecimal, EngineError> {
        let mut value = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value = value * self.factor()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor.is_zero() {
                        return Err(EngineError::FormulaEvaluation(
                            "division by zero".to_string(),
                        ));
                    }
                    value = value / divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // factor := number | '(' expression ')' | ('+' | '-') factor
    fn factor(&mut self) -> Result<BigDecimal, EngineError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::Plus) => self.factor(),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(EngineError::FormulaEvaluation(
                        "unbalanced parentheses".to_string(),
                    )),
                }
            }
            Some(token) => Err(EngineError::FormulaEvaluation(format!(
                "unexpected token {:?}",
                token
            ))),
            None => Err(EngineError::FormulaEvaluation(
                "unexpected end of formula".to_string(),
            )),
        }
    }
}

/// Evaluate a substituted arithmetic expression. Exact decimal arithmetic
/// throughout, so the only runtime failure is division by zero.
pub(crate) fn evaluate(expression: &str) -> Result<BigDecimal, EngineError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    if parser.pos != parser.tokens.len() {
        return Err(EngineError::FormulaEvaluation(
            "trailing input after expression".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn evaluates_operator_precedence() {
        assert_eq!(evaluate("2+3*4").unwrap(), dec("14"));
        assert_eq!(evaluate("(2+3)*4").unwrap(), dec("20"));
        assert_eq!(evaluate("10-4/2").unwrap(), dec("8"));
    }

    #[test]
    fn evaluates_unary_minus() {
        assert_eq!(evaluate("-3+5").unwrap(), dec("2"));
        assert_eq!(evaluate("2*-3").unwrap(), dec("-6"));
    }

    #[test]
    fn division_by_zero_fails() {
        let err = evaluate("1/0").unwrap_err();
        assert!(matches!(err, EngineError::FormulaEvaluation(_)));
    }

    #[test]
    fn unbalanced_parentheses_fail() {
        assert!(matches!(
            evaluate("(1+2").unwrap_err(),
            EngineError::FormulaEvaluation(_)
        ));
        assert!(matches!(
            evaluate("1+2)").unwrap_err(),
            EngineError::FormulaEvaluation(_)
        ));
    }

    #[test]
    fn empty_and_trailing_input_fail() {
        assert!(matches!(
            evaluate("").unwrap_err(),
            EngineError::FormulaEvaluation(_)
        ));
        assert!(matches!(
            evaluate("1 2").unwrap_err(),
            EngineError::FormulaEvaluation(_)
        ));
    }

    #[test]
    fn leftover_braces_fail_as_stray_tokens() {
        assert!(matches!(
            evaluate("{salaryy}/52").unwrap_err(),
            EngineError::FormulaEvaluation(_)
        ));
    }
}
