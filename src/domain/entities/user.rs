//! Domain entity representing a registered user.

use chrono::{Datelike, NaiveDate};

/// A persisted user record.
///
/// `id` is assigned by storage on creation and never changes afterwards.
/// `dob` carries no time-of-day component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub dob: NaiveDate,
}

impl User {
    pub fn new(id: i32, name: String, dob: NaiveDate) -> Self {
        Self { id, name, dob }
    }

    /// Age in whole years as of `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        calculate_age(self.dob, today)
    }
}

/// Input data for creating or fully replacing a user.
///
/// Updates replace both fields; there is no partial patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub dob: NaiveDate,
}

/// Computes age from a birth date and the current date.
///
/// The year difference is reduced by one when `(month, day)` of `today` sorts
/// before the birthday, i.e. the birthday has not happened yet this year.
/// A February 29 birthday therefore counts from March 1 in non-leap years.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - dob.year();

    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age - 1
    } else {
        age
    }
}
