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

use std::collections::HashMap;

use load_household_data::tables::persons::{EmploymentCategory, PersonType, StudentCategory};

use crate::models::activity::{Activity, ActivityUtilities, Availability};
use crate::models::household::Household;
use crate::models::person::Person;
use crate::utility::{CdapUtilityCalculators, UtilityCalculator, UtilityContext};

pub fn worker(person_num: u8, age: u8) -> Person {
    Person::new(
        person_num,
        age,
        PersonType::FullTimeWorker,
        EmploymentCategory::FullTime,
        StudentCategory::NonStudent,
    )
}

pub fn part_time_worker(person_num: u8, age: u8) -> Person {
    Person::new(
        person_num,
        age,
        PersonType::PartTimeWorker,
        EmploymentCategory::PartTime,
        StudentCategory::NonStudent,
    )
}

pub fn retiree(person_num: u8, age: u8) -> Person {
    Person::new(
        person_num,
        age,
        PersonType::Retired,
        EmploymentCategory::NotEmployed,
        StudentCategory::NonStudent,
    )
}

pub fn child(person_num: u8, age: u8, person_type: PersonType) -> Person {
    let student_category = if person_type == PersonType::Preschool {
        StudentCategory::NonStudent
    } else {
        StudentCategory::GradeOrHighSchool
    };
    Person::new(
        person_num,
        age,
        person_type,
        EmploymentCategory::UnderAge16,
        student_category,
    )
}

pub fn household_of(id: u32, persons: Vec<Person>) -> Household {
    Household::new(id, persons, 0).unwrap()
}

/// Returns the same utilities for every evaluation, unless the first person has their own entry
#[derive(Clone)]
pub struct FixedUtilities {
    default: ActivityUtilities,
    by_person: HashMap<u8, ActivityUtilities>,
}

impl FixedUtilities {
    pub fn constant(default: ActivityUtilities) -> FixedUtilities {
        FixedUtilities {
            default,
            by_person: HashMap::new(),
        }
    }
    pub fn with_person(mut self, person_num: u8, utilities: ActivityUtilities) -> FixedUtilities {
        self.by_person.insert(person_num, utilities);
        self
    }
}

impl UtilityCalculator for FixedUtilities {
    fn solve(&mut self, context: &UtilityContext, _availability: &Availability) -> ActivityUtilities {
        context
            .persons
            .first()
            .and_then(|person| self.by_person.get(&person.person_num()))
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    fn boxed_clone(&self) -> Box<dyn UtilityCalculator> {
        Box::new(self.clone())
    }
}

pub fn calculators(
    individual: FixedUtilities,
    pair: FixedUtilities,
    triple: FixedUtilities,
    all_members: FixedUtilities,
) -> CdapUtilityCalculators {
    CdapUtilityCalculators::new(
        Box::new(individual),
        Box::new(pair),
        Box::new(triple),
        Box::new(all_members),
    )
}

/// Zero utilities everywhere, apart from the individual ones
pub fn individual_only(individual: ActivityUtilities) -> CdapUtilityCalculators {
    let zero = FixedUtilities::constant(ActivityUtilities::default());
    calculators(FixedUtilities::constant(individual), zero.clone(), zero.clone(), zero)
}

pub fn pattern(code: &str) -> Vec<Activity> {
    crate::models::activity::pattern_from_str(code).unwrap()
}
