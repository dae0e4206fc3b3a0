use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::{Error, Result};

pub const DIVIDE_BY_ZERO_MESSAGE: &str = "Cannot divide by zero";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationReport {
    pub sum: f64,
    pub difference: f64,
    pub product: f64,
    /// `None` when the divisor is zero.
    pub quotient: Option<f64>,
    pub power: f64,
}

pub fn perform_calculations(a: f64, b: f64) -> CalculationReport {
    CalculationReport {
        sum: a + b,
        difference: a - b,
        product: a * b,
        quotient: (b != 0.0).then(|| a / b),
        power: a.powf(b),
    }
}

impl fmt::Display for CalculationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sum: {}", format_number(self.sum))?;
        writeln!(f, "difference: {}", format_number(self.difference))?;
        writeln!(f, "product: {}", format_number(self.product))?;
        match self.quotient {
            Some(quotient) => writeln!(f, "quotient: {quotient:.2}")?,
            None => writeln!(f, "quotient: {DIVIDE_BY_ZERO_MESSAGE}")?,
        }
        write!(f, "power: {}", format_number(self.power))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Average {
    pub sum: f64,
    pub count: usize,
    pub average: f64,
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sum: {}, count: {}, average: {:.2}",
            format_number(self.sum),
            self.count,
            self.average
        )
    }
}

pub fn calculate_average(numbers: &[f64]) -> Result<Average> {
    if numbers.is_empty() {
        return Err(Error::InvalidInput(
            "average requires a non-empty list of numbers".into(),
        ));
    }
    let sum = numbers.iter().sum::<f64>();
    Ok(Average {
        sum,
        count: numbers.len(),
        average: sum / numbers.len() as f64,
    })
}

/// Renders integral values without a fractional part (`5`, not `5.0`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == value.trunc() && value.abs() < 1e21 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim() {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "*" => Ok(Self::Multiply),
            "/" => Ok(Self::Divide),
            other => Err(Error::InvalidInput(format!("unknown operator: {other}"))),
        }
    }
}

/// Result of the two-operand integer calculator. Division is true division
/// and yields a float; the other operators stay exact.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Integer(BigInt),
    Float(f64),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

pub fn parse_integer(raw: &str) -> Result<BigInt> {
    raw.trim()
        .parse::<BigInt>()
        .map_err(|_| Error::InvalidInput(format!("not an integer: {}", raw.trim())))
}

pub fn calculate(a: &BigInt, b: &BigInt, operator: Operator) -> Result<Outcome> {
    let outcome = match operator {
        Operator::Add => Outcome::Integer(a + b),
        Operator::Subtract => Outcome::Integer(a - b),
        Operator::Multiply => Outcome::Integer(a * b),
        Operator::Divide => {
            if b.is_zero() {
                return Err(Error::InvalidInput("division by zero".into()));
            }
            Outcome::Float(true_divide(a, b))
        }
    };
    Ok(outcome)
}

const QUOTIENT_BITS: i64 = 64;

// Operands beyond the f64 range are divided as integers first: the quotient
// is scaled so it keeps QUOTIENT_BITS significant bits, then scaled back.
fn true_divide(a: &BigInt, b: &BigInt) -> f64 {
    let shift = QUOTIENT_BITS + b.bits() as i64 - a.bits() as i64;
    let scaled = if shift >= 0 {
        (a << shift as usize) / b
    } else {
        a / (b << shift.unsigned_abs() as usize)
    };
    let mantissa = scaled.to_f64().unwrap_or(f64::NAN);
    // Split the exponent so neither factor underflows before the product.
    let exponent = -shift;
    let half = (exponent / 2).clamp(-2_000, 2_000) as i32;
    let rest = (exponent - exponent / 2).clamp(-2_000, 2_000) as i32;
    mantissa * 2f64.powi(half) * 2f64.powi(rest)
}

/// `"{a} {op} {b} = {result}"`, the calculator's one-line transcript.
pub fn describe_calculation(a: &BigInt, b: &BigInt, operator: Operator) -> Result<String> {
    let outcome = calculate(a, b, operator)?;
    Ok(format!("{a} {} {b} = {outcome}", operator.symbol()))
}
