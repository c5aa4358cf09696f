//! Identifications and tax numbers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An official identification document of a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    /// The identification type code, defined in reference data
    pub identification_type: String,
    /// The document number
    pub number: String,
    /// Issuing country (ISO 3166-1 alpha-2)
    pub country_of_issue: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}

impl Identification {
    pub fn new(identification_type: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            identification_type: identification_type.into(),
            number: number.into(),
            country_of_issue: None,
            issue_date: None,
            expiry_date: None,
        }
    }

    pub fn with_country_of_issue(mut self, country: impl Into<String>) -> Self {
        self.country_of_issue = Some(country.into());
        self
    }

    pub fn with_issue_date(mut self, issue_date: NaiveDate) -> Self {
        self.issue_date = Some(issue_date);
        self
    }

    pub fn with_expiry_date(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// Whether the document has expired as of the given date
    pub fn is_expired_at(&self, date: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < date)
    }
}

/// A tax registration number of a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxNumber {
    /// The tax number type code, defined in reference data
    pub tax_number_type: String,
    pub number: String,
    /// Issuing country (ISO 3166-1 alpha-2)
    pub country: Option<String>,
}

impl TaxNumber {
    pub fn new(tax_number_type: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            tax_number_type: tax_number_type.into(),
            number: number.into(),
            country: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}
