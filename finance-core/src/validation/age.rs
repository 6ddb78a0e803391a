use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How an applicant's age is worked out from their date of birth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgePolicy {
    /// Current year minus birth year, ignoring month and day. Someone born
    /// in December 2008 counts as 18 throughout 2026.
    #[default]
    CalendarYear,
    /// Completed years, counting the birthday itself as the day the year
    /// completes.
    ExactBirthday,
}

impl AgePolicy {
    pub fn age_on(
        &self,
        date_of_birth: NaiveDate,
        today: NaiveDate,
    ) -> i32 {
        let years = today.year() - date_of_birth.year();
        match self {
            Self::CalendarYear => years,
            Self::ExactBirthday => {
                let birthday_pending =
                    (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day());
                if birthday_pending { years - 1 } else { years }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        year: i32,
        month: u32,
        day: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn calendar_year_ignores_month_and_day() {
        let today = date(2026, 1, 1);

        assert_eq!(AgePolicy::CalendarYear.age_on(date(2008, 12, 31), today), 18);
    }

    #[test]
    fn exact_birthday_waits_for_the_birthday() {
        let dob = date(2008, 10, 15);

        assert_eq!(AgePolicy::ExactBirthday.age_on(dob, date(2026, 10, 14)), 17);
        assert_eq!(AgePolicy::ExactBirthday.age_on(dob, date(2026, 10, 15)), 18);
    }

    #[test]
    fn exact_birthday_handles_leap_day_births() {
        let dob = date(2008, 2, 29);

        assert_eq!(AgePolicy::ExactBirthday.age_on(dob, date(2026, 2, 28)), 17);
        assert_eq!(AgePolicy::ExactBirthday.age_on(dob, date(2026, 3, 1)), 18);
    }

    #[test]
    fn future_dates_give_negative_ages() {
        let today = date(2026, 10, 14);

        assert_eq!(AgePolicy::CalendarYear.age_on(date(2030, 1, 1), today), -4);
    }
}
