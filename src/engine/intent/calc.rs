// Vaani Engine — Arithmetic expression evaluator
//
// Conventional recursive-descent parser over `+ - * / ( )` and
// floating-point literals:
//
//   expression := term (('+'|'-') term)*
//   term       := factor (('*'|'/') factor)*
//   factor     := number | '(' expression ')'
//
// Left-to-right associativity, two precedence levels, no unary minus —
// a leading `-` is rejected as malformed rather than guessed at.
// Division by zero is not special-cased: it propagates IEEE-754
// infinity/NaN like any other float operation.

use crate::atoms::error::{AssistantError, AssistantResult};

/// Evaluate an arithmetic expression.
/// Fails with `MalformedExpression` on mismatched parentheses, empty
/// operands, or trailing garbage.
pub fn evaluate(expr: &str) -> AssistantResult<f64> {
    let mut p = Parser { bytes: expr.as_bytes(), pos: 0 };
    let value = p.expression()?;
    p.skip_spaces();
    if p.pos != p.bytes.len() {
        return Err(malformed(format!("unexpected input at offset {}", p.pos)));
    }
    Ok(value)
}

/// Render a result the way the assistant speaks it: integral values
/// without a fractional part, everything else at full precision.
pub fn format_result(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn malformed(msg: impl Into<String>) -> AssistantError {
    AssistantError::MalformedExpression(msg.into())
}

// ── Parser ─────────────────────────────────────────────────────────────────

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn skip_spaces(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos] == b' ' {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_spaces();
        self.bytes.get(self.pos).copied()
    }

    fn expression(&mut self) -> AssistantResult<f64> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == b'+' {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> AssistantResult<f64> {
        let mut value = self.factor()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == b'*' {
                value *= rhs;
            } else {
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> AssistantResult<f64> {
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let value = self.expression()?;
                if self.peek() != Some(b')') {
                    return Err(malformed("missing closing parenthesis"));
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.number(),
            Some(c) => Err(malformed(format!("unexpected character '{}'", c as char))),
            None => Err(malformed("empty operand")),
        }
    }

    fn number(&mut self) -> AssistantResult<f64> {
        let start = self.pos;
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_digit() || self.bytes[self.pos] == b'.')
        {
            self.pos += 1;
        }
        // Safe: the slice contains only ASCII digits and dots.
        let literal = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("");
        literal
            .parse::<f64>()
            .map_err(|_| malformed(format!("bad number literal '{}'", literal)))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
        assert_eq!(evaluate("10-4-3").unwrap(), 3.0);
        assert_eq!(evaluate("24/4/2").unwrap(), 3.0);
        assert_eq!(evaluate("1+2-3+4").unwrap(), 4.0);
    }

    #[test]
    fn floats_and_spaces() {
        assert_eq!(evaluate("10/4").unwrap(), 2.5);
        assert_eq!(evaluate(" 1.5 * 2 ").unwrap(), 3.0);
        assert_eq!(evaluate("0.5+0.25").unwrap(), 0.75);
    }

    #[test]
    fn nested_parentheses() {
        assert_eq!(evaluate("((1+2)*(3+4))").unwrap(), 21.0);
        assert_eq!(evaluate("2*(3+(4*5))").unwrap(), 46.0);
    }

    #[test]
    fn malformed_inputs_rejected() {
        assert!(evaluate("").is_err());
        assert!(evaluate("(2+3").is_err());
        assert!(evaluate("2+3)").is_err());
        assert!(evaluate("2+").is_err());
        assert!(evaluate("*3").is_err());
        assert!(evaluate("2 3").is_err());
        assert!(evaluate("1..2").is_err());
    }

    #[test]
    fn unary_minus_rejected() {
        assert!(evaluate("-5").is_err());
        assert!(evaluate("3*-2").is_err());
    }

    #[test]
    fn division_by_zero_is_ieee() {
        assert!(evaluate("1/0").unwrap().is_infinite());
        assert!(evaluate("0/0").unwrap().is_nan());
    }

    #[test]
    fn result_formatting() {
        assert_eq!(format_result(14.0), "14");
        assert_eq!(format_result(2.5), "2.5");
        assert_eq!(format_result(0.75), "0.75");
    }
}
