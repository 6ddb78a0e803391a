use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Title {
    Mr,
    Mrs,
    Miss,
    Ms,
    Dr,
}

impl Title {
    pub fn all() -> &'static [Title] {
        &[Title::Mr, Title::Mrs, Title::Miss, Title::Ms, Title::Dr]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mr => "mr",
            Self::Mrs => "mrs",
            Self::Miss => "miss",
            Self::Ms => "ms",
            Self::Dr => "dr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mr => "Mr",
            Self::Mrs => "Mrs",
            Self::Miss => "Miss",
            Self::Ms => "Ms",
            Self::Dr => "Dr",
        }
    }

    /// Accepts either the value or the label, ignoring case and a trailing dot.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().trim_end_matches('.').to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|title| title.as_str() == normalized)
    }
}

/// Personal details as typed into the form.
///
/// Text fields hold the raw input; they are checked when the applicant
/// tries to leave the step. `date_of_birth` is an ISO `YYYY-MM-DD` string,
/// the form a date input delivers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub title: Option<Title>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub postcode: String,
    pub date_of_birth: String,
}

impl PersonalDetails {
    /// Name as shown on the review step, e.g. `MR John Smith`.
    pub fn display_name(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(title) = self.title {
            parts.push(title.as_str().to_ascii_uppercase());
        }
        for name in [&self.first_name, &self.last_name] {
            let name = name.trim();
            if !name.is_empty() {
                parts.push(name.to_string());
            }
        }
        parts.join(" ")
    }
}
