use std::fmt;

/// A single income (positive) or expense (negative) entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    category: String,
    description: String,
    amount: i64,
}

impl Record {
    pub fn new(category: impl Into<String>, description: impl Into<String>, amount: i64) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            amount,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.category, self.description, self.amount)
    }
}
