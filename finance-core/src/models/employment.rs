use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Employed,
    FullTime,
    PartTime,
    SelfEmployed,
    Retired,
    Student,
    Unemployed,
    Other,
}

impl EmploymentStatus {
    pub fn all() -> &'static [EmploymentStatus] {
        &[
            EmploymentStatus::Employed,
            EmploymentStatus::FullTime,
            EmploymentStatus::PartTime,
            EmploymentStatus::SelfEmployed,
            EmploymentStatus::Retired,
            EmploymentStatus::Student,
            EmploymentStatus::Unemployed,
            EmploymentStatus::Other,
        ]
    }

    /// Choices on the full application's employment step.
    pub fn application_options() -> &'static [EmploymentStatus] {
        &[
            EmploymentStatus::Employed,
            EmploymentStatus::SelfEmployed,
            EmploymentStatus::Retired,
            EmploymentStatus::Student,
            EmploymentStatus::Unemployed,
            EmploymentStatus::Other,
        ]
    }

    /// Choices on the quick quote's finance step.
    pub fn quick_quote_options() -> &'static [EmploymentStatus] {
        &[
            EmploymentStatus::FullTime,
            EmploymentStatus::PartTime,
            EmploymentStatus::SelfEmployed,
            EmploymentStatus::Retired,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employed => "employed",
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::SelfEmployed => "self-employed",
            Self::Retired => "retired",
            Self::Student => "student",
            Self::Unemployed => "unemployed",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Employed => "Employed",
            Self::FullTime => "Full-time employed",
            Self::PartTime => "Part-time employed",
            Self::SelfEmployed => "Self-Employed",
            Self::Retired => "Retired",
            Self::Student => "Student",
            Self::Unemployed => "Unemployed",
            Self::Other => "Other",
        }
    }

    /// Accepts kebab-case, camelCase (`selfEmployed`) and spaced labels.
    pub fn parse(s: &str) -> Option<Self> {
        let mut normalized = String::with_capacity(s.len() + 2);
        let mut previous = ' ';
        for c in s.trim().chars() {
            if c.is_ascii_uppercase() && previous.is_ascii_lowercase() {
                normalized.push('-');
            }
            normalized.push(match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            });
            previous = c;
        }
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
    }

    /// Whether employer, job title and years in the job apply.
    pub fn has_employer(&self) -> bool {
        matches!(
            self,
            Self::Employed | Self::FullTime | Self::PartTime | Self::SelfEmployed
        )
    }
}

/// Employment details as typed into the form.
///
/// `income` and `employment_years` stay as text until validation, which
/// reads them as whole numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentDetails {
    pub status: Option<EmploymentStatus>,
    pub employer: String,
    pub job_title: String,
    pub income: String,
    pub employment_years: String,
}

impl EmploymentDetails {
    pub fn has_employer(&self) -> bool {
        self.status.is_some_and(|status| status.has_employer())
    }

    /// Label for the employer field, which names a business for the self-employed.
    pub fn employer_label(&self) -> &'static str {
        match self.status {
            Some(EmploymentStatus::SelfEmployed) => "Business Name",
            _ => "Employer Name",
        }
    }
}
