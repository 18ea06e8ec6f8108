use std::fmt;

use crate::games::converter::ConvertError;

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub base: String,
    pub target: String,
    pub rate: f64,
}

impl Conversion {
    pub fn converted(&self) -> f64 {
        self.amount * self.rate
    }
}

/// `100.00 USD = 8312.50 INR`
impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            self.amount,
            self.base,
            self.converted(),
            self.target
        )
    }
}

pub fn parse_amount(text: &str) -> Result<f64, ConvertError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ConvertError::InvalidAmount(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_rounds_to_cents() {
        let conversion = Conversion {
            amount: 12.5,
            base: "USD".into(),
            target: "INR".into(),
            rate: 83.1234,
        };
        assert_eq!(conversion.to_string(), "12.50 USD = 1039.04 INR");
    }

    #[test]
    fn amounts_must_be_finite_numbers() {
        assert_eq!(parse_amount(" 42 ").unwrap(), 42.0);
        assert_eq!(parse_amount("0.5").unwrap(), 0.5);
        assert!(matches!(parse_amount("ten"), Err(ConvertError::InvalidAmount(s)) if s == "ten"));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }
}
