use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EmploymentDetails, LoanDetails, PersonalDetails};

/// The three sections an application is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Loan,
    Personal,
    Employment,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loan => "loan",
            Self::Personal => "personal",
            Self::Employment => "employment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "loan" => Some(Self::Loan),
            "personal" => Some(Self::Personal),
            "employment" => Some(Self::Employment),
            _ => None,
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Loan => &[
                Field::VehicleType,
                Field::Amount,
                Field::TermMonths,
                Field::Deposit,
            ],
            Self::Personal => &[
                Field::Title,
                Field::FirstName,
                Field::LastName,
                Field::Email,
                Field::Phone,
                Field::Address,
                Field::Postcode,
                Field::DateOfBirth,
            ],
            Self::Employment => &[
                Field::Status,
                Field::Employer,
                Field::JobTitle,
                Field::Income,
                Field::EmploymentYears,
            ],
        }
    }
}

/// Every editable field, in form order.
///
/// The ordering is used to list validation errors top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    VehicleType,
    Amount,
    TermMonths,
    Deposit,
    Title,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Postcode,
    DateOfBirth,
    Status,
    Employer,
    JobTitle,
    Income,
    EmploymentYears,
}

impl Field {
    /// The field's form key, e.g. `firstName`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::VehicleType => "vehicleType",
            Self::Amount => "amount",
            Self::TermMonths => "termMonths",
            Self::Deposit => "deposit",
            Self::Title => "title",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Postcode => "postcode",
            Self::DateOfBirth => "dateOfBirth",
            Self::Status => "status",
            Self::Employer => "employer",
            Self::JobTitle => "jobTitle",
            Self::Income => "income",
            Self::EmploymentYears => "employmentYears",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Self::VehicleType | Self::Amount | Self::TermMonths | Self::Deposit => Section::Loan,
            Self::Title
            | Self::FirstName
            | Self::LastName
            | Self::Email
            | Self::Phone
            | Self::Address
            | Self::Postcode
            | Self::DateOfBirth => Section::Personal,
            Self::Status
            | Self::Employer
            | Self::JobTitle
            | Self::Income
            | Self::EmploymentYears => Section::Employment,
        }
    }

    /// Looks a field up by its form key within a section.
    ///
    /// `term` is accepted as an alias for `termMonths`.
    pub fn parse(
        section: Section,
        name: &str,
    ) -> Option<Self> {
        let name = name.trim();
        if section == Section::Loan && name == "term" {
            return Some(Self::TermMonths);
        }
        section
            .fields()
            .iter()
            .copied()
            .find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The evolving record of one finance application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationState {
    pub loan: LoanDetails,
    pub personal: PersonalDetails,
    pub employment: EmploymentDetails,
}

impl ApplicationState {
    /// A fresh application with the given loan seed and empty sections.
    pub fn new(loan: LoanDetails) -> Self {
        Self {
            loan,
            personal: PersonalDetails::default(),
            employment: EmploymentDetails::default(),
        }
    }
}
