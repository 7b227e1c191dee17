//! Post-order evaluation of expression trees.
//!
//! [`Evaluator`] walks a finished tree children-first with an explicit value
//! stack, so arbitrarily deep trees evaluate without recursion. An absent
//! child evaluates to `0.0`, which is how unary operators and trailing
//! operators without a right operand are handled.
//!
//! Arithmetic that has no finite real result is reported instead of being
//! propagated as an IEEE special value:
//! - a zero divisor in `/` or `%` is [`EvalError::DivisionByZero`],
//! - an operand outside a function's real domain is [`EvalError::DomainError`],
//! - an infinite or NaN result from finite operands, or a literal beyond the
//!   range of `f64`, is [`EvalError::ArithmeticOverflow`].

use crate::{EvalError, Item, OperationKind};
use arena_tree::{Arena, Tree};
use std::f64::consts::PI;

/// Largest `n` whose factorial is finite in `f64`.
const MAX_FACTORIAL: f64 = 170.0;

/// Evaluates trees whose nodes live in one arena.
pub struct Evaluator<'a> {
    arena: &'a Arena<Item>,
}

impl<'a> Evaluator<'a> {
    pub fn new(arena: &'a Arena<Item>) -> Self {
        Self { arena }
    }

    /// Computes the value of `tree`.
    ///
    /// # Errors
    /// Returns the first [`EvalError`] met in post-order, or
    /// [`EvalError::Tree`] if the tree does not belong to this arena.
    pub fn evaluate(&self, tree: &Tree) -> Result<f64, EvalError> {
        let order = tree.post_order(self.arena)?;
        let mut values: Vec<f64> = Vec::with_capacity(order.len());
        for id in order {
            let node = self.arena.get(id)?;
            let right = match node.right() {
                Some(_) => values.pop().unwrap_or_default(),
                None => 0.0,
            };
            let left = match node.left() {
                Some(_) => values.pop().unwrap_or_default(),
                None => 0.0,
            };
            values.push(apply(node.data(), left, right)?);
        }
        let result = values.pop().unwrap_or_default();
        log::debug!("evaluated to {result}");
        Ok(result)
    }
}

/// Applies one node. Unary operations read only `right`; factorial reads
/// only `left`.
fn apply(item: &Item, left: f64, right: f64) -> Result<f64, EvalError> {
    use OperationKind::*;

    let op = item.kind;
    let domain = |ok: bool, value: f64| {
        if ok {
            Ok(())
        } else {
            Err(EvalError::DomainError { op, value })
        }
    };
    let x = right;

    let result = match op {
        Number | E | Pi | Phi if item.value.is_finite() => return Ok(item.value),
        Number | E | Pi | Phi => return Err(EvalError::ArithmeticOverflow { op }),
        OpenParen | CloseParen => x,
        Sin => x.sin(),
        Cos => x.cos(),
        Tan => x.tan(),
        Sinh => x.sinh(),
        Cosh => x.cosh(),
        Tanh => x.tanh(),
        Exp => x.exp(),
        Asin => {
            domain((-1.0..=1.0).contains(&x), x)?;
            x.asin()
        }
        Acos => {
            domain((-1.0..=1.0).contains(&x), x)?;
            x.acos()
        }
        Atan => x.atan(),
        Asinh => x.asinh(),
        Acosh => {
            domain(x >= 1.0, x)?;
            x.acosh()
        }
        Atanh => {
            domain(x > -1.0 && x < 1.0, x)?;
            x.atanh()
        }
        Ln => {
            domain(x > 0.0, x)?;
            x.ln()
        }
        Log => {
            domain(x > 0.0, x)?;
            x.log10()
        }
        Ltwo => {
            domain(x > 0.0, x)?;
            x.log2()
        }
        Sqrt => {
            domain(x >= 0.0, x)?;
            x.sqrt()
        }
        Curt => x.cbrt(),
        Gamma => {
            domain(!(x <= 0.0 && x.fract() == 0.0), x)?;
            gamma(x)
        }
        Factorial => {
            domain(left >= 0.0 && left.fract() == 0.0, left)?;
            if left > MAX_FACTORIAL {
                return Err(EvalError::ArithmeticOverflow { op });
            }
            factorial(left as u32)
        }
        Power => {
            domain(left >= 0.0 || right.fract() == 0.0, left)?;
            left.powf(right)
        }
        Multiply => left * right,
        Divide | Remainder if right == 0.0 => return Err(EvalError::DivisionByZero(op)),
        Divide => left / right,
        Remainder => left % right,
        Positive => x.abs(),
        Negative => -x,
        Plus => left + right,
        Minus => left - right,
    };

    if !result.is_finite() && left.is_finite() && right.is_finite() {
        return Err(EvalError::ArithmeticOverflow { op });
    }
    log::trace!("{left} {op} {right} = {result}");
    Ok(result)
}

fn factorial(n: u32) -> f64 {
    (2..=n).map(f64::from).product()
}

/// Lanczos approximation (g = 7, n = 9) with reflection below one half.
///
/// The power `t^(x + 0.5)` is applied in two halves around `e^-t`, so it
/// stays finite wherever the result does.
fn gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEF: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let t = x + G + 0.5;
    let series = COEF
        .iter()
        .enumerate()
        .skip(1)
        .fold(COEF[0], |acc, (i, c)| acc + c / (x + i as f64));
    let half = t.powf((x + 0.5) / 2.0);
    (2.0 * PI).sqrt() * half * (half * (-t).exp()) * series
}
