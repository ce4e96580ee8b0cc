/*
 * Coordinated Daily Activity Pattern Simulation (CDAPS)
 * Copyright (c)  2022. Sam Ralph
 *
 * This file is part of CDAPS.
 *
 * CDAPS is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, version 3 of the License.
 *
 * CDAPS is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with CDAPS.  If not, see <https://www.gnu.org/licenses/>.
 *
 */

use std::fmt::{Display, Formatter};

use enum_map::{enum_map, Enum, EnumMap};
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The daily activity type of a single person
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enum, EnumIter, Serialize, Deserialize)]
pub enum Activity {
    Mandatory,
    NonMandatory,
    Home,
}

/// A value per activity, e.g. the utilities returned by a calculator
pub type ActivityUtilities = EnumMap<Activity, f64>;

/// Whether each activity can be chosen
pub type Availability = EnumMap<Activity, bool>;

impl Activity {
    /// The single character code used in pattern strings
    pub fn code(&self) -> char {
        match self {
            Activity::Mandatory => 'M',
            Activity::NonMandatory => 'N',
            Activity::Home => 'H',
        }
    }
    pub fn from_code(code: char) -> Option<Activity> {
        match code {
            'M' => Some(Activity::Mandatory),
            'N' => Some(Activity::NonMandatory),
            'H' => Some(Activity::Home),
            _ => None,
        }
    }
    /// Position of this activity in the fixed order M, N, H
    pub fn index(&self) -> usize {
        *self as usize
    }
    /// The next activity in the order M -> N -> H -> M, and whether it wrapped around
    pub fn next_with_carry(&self) -> (Activity, bool) {
        match self {
            Activity::Mandatory => (Activity::NonMandatory, false),
            Activity::NonMandatory => (Activity::Home, false),
            Activity::Home => (Activity::Mandatory, true),
        }
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

pub fn activity_utilities(mandatory: f64, non_mandatory: f64, home: f64) -> ActivityUtilities {
    enum_map! {
        Activity::Mandatory => mandatory,
        Activity::NonMandatory => non_mandatory,
        Activity::Home => home,
    }
}

/// Every activity is always available to the joint choice
pub fn all_available() -> Availability {
    enum_map! { _ => true }
}

/// Builds the pattern string for a sequence of activities
pub fn pattern_to_string(pattern: &[Activity]) -> String {
    pattern.iter().map(Activity::code).collect()
}

/// Parses a pattern string, returning None if it contains an unknown code
pub fn pattern_from_str(pattern: &str) -> Option<Vec<Activity>> {
    pattern.chars().map(Activity::from_code).collect()
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use crate::models::activity::{pattern_from_str, pattern_to_string, Activity};

    #[test]
    fn codes_round_trip() {
        for activity in Activity::iter() {
            assert_eq!(Activity::from_code(activity.code()), Some(activity));
        }
        assert_eq!(Activity::from_code('X'), None);
    }

    #[test]
    fn indexes_follow_fixed_order() {
        let indexes: Vec<usize> = Activity::iter().map(|activity| activity.index()).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn only_home_wraps() {
        assert_eq!(Activity::Mandatory.next_with_carry(), (Activity::NonMandatory, false));
        assert_eq!(Activity::NonMandatory.next_with_carry(), (Activity::Home, false));
        assert_eq!(Activity::Home.next_with_carry(), (Activity::Mandatory, true));
    }

    #[test]
    fn patterns_parse() {
        let pattern = pattern_from_str("MNH").unwrap();
        assert_eq!(pattern, vec![Activity::Mandatory, Activity::NonMandatory, Activity::Home]);
        assert_eq!(pattern_to_string(&pattern), "MNH");
        assert!(pattern_from_str("MXH").is_none());
    }
}
