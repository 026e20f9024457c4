//! Amount formatting passed explicitly into template rendering

use serde::{Deserialize, Serialize};

/// Formatting rules for monetary amounts in rendered documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountFormat {
    pub decimal_separator: char,
    pub thousands_separator: char,
    /// Appended after the number, e.g. `" €"`
    pub suffix: String,
}

impl AmountFormat {
    /// German notation: `1.234,56 €`
    pub fn german() -> Self {
        Self {
            decimal_separator: ',',
            thousands_separator: '.',
            suffix: " €".to_string(),
        }
    }

    /// Same rules without the currency suffix
    pub fn without_suffix(mut self) -> Self {
        self.suffix.clear();
        self
    }

    /// Format to 2 decimals with digit grouping
    pub fn format(&self, value: f64) -> String {
        let cents = (value.abs() * 100.0).round() as u64;
        let whole = (cents / 100).to_string();
        let frac = cents % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(c);
        }

        let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
        format!("{}{}{}{:02}{}", sign, grouped, self.decimal_separator, frac, self.suffix)
    }
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self::german()
    }
}
