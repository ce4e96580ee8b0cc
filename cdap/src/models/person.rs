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

use serde::Serialize;

use load_household_data::tables::persons::{
    EmploymentCategory, PersonRecord, PersonType, StudentCategory, MIN_ADULT_AGE,
};

use crate::models::activity::Activity;

/// A household member, and the activity assigned to them by the model
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Person {
    /// The 1-based original slot in the household
    person_num: u8,
    age: u8,
    person_type: PersonType,
    employment_category: EmploymentCategory,
    student_category: StudentCategory,
    /// Set once the household's pattern has been chosen
    pub activity: Option<Activity>,
}

impl Person {
    pub fn new(
        person_num: u8,
        age: u8,
        person_type: PersonType,
        employment_category: EmploymentCategory,
        student_category: StudentCategory,
    ) -> Person {
        Person {
            person_num,
            age,
            person_type,
            employment_category,
            student_category,
            activity: None,
        }
    }
    pub fn person_num(&self) -> u8 {
        self.person_num
    }
    pub fn age(&self) -> u8 {
        self.age
    }
    pub fn person_type(&self) -> PersonType {
        self.person_type
    }
    pub fn employment_category(&self) -> EmploymentCategory {
        self.employment_category
    }
    pub fn student_category(&self) -> StudentCategory {
        self.student_category
    }

    pub fn is_full_time_worker(&self) -> bool {
        self.employment_category == EmploymentCategory::FullTime
    }
    pub fn is_part_time_worker(&self) -> bool {
        self.employment_category == EmploymentCategory::PartTime
    }
    pub fn is_worker(&self) -> bool {
        self.is_full_time_worker() || self.is_part_time_worker()
    }
    pub fn is_preschool_child(&self) -> bool {
        self.person_type == PersonType::Preschool
    }
    pub fn is_student_non_driving(&self) -> bool {
        self.person_type == PersonType::StudentNonDriving
    }
    pub fn is_student_driving(&self) -> bool {
        self.person_type == PersonType::StudentDriving
    }
    pub fn is_university_student(&self) -> bool {
        self.person_type == PersonType::UniversityStudent
    }
    pub fn is_non_worker(&self) -> bool {
        self.person_type == PersonType::NonWorker
    }
    pub fn is_retired(&self) -> bool {
        self.person_type == PersonType::Retired
    }
    /// Preschoolers and school students of either driving status
    pub fn is_child(&self) -> bool {
        self.is_preschool_child() || self.is_student_non_driving() || self.is_student_driving()
    }
    pub fn is_adult(&self) -> bool {
        self.age >= MIN_ADULT_AGE
    }
}

impl From<&PersonRecord> for Person {
    fn from(record: &PersonRecord) -> Self {
        Person::new(
            record.person_num,
            record.age,
            record.person_type,
            record.employment_category,
            record.student_category,
        )
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Person {}: {}, age {}, {:?}, {:?}",
            self.person_num,
            self.person_type.name(),
            self.age,
            self.employment_category,
            self.student_category
        )
    }
}

#[cfg(test)]
mod tests {
    use load_household_data::tables::persons::{EmploymentCategory, PersonType, StudentCategory};

    use crate::models::person::Person;

    #[test]
    fn worker_status_comes_from_employment() {
        let student_with_job = Person::new(
            1,
            20,
            PersonType::UniversityStudent,
            EmploymentCategory::PartTime,
            StudentCategory::CollegeOrHigher,
        );
        assert!(student_with_job.is_part_time_worker());
        assert!(student_with_job.is_worker());
        assert!(!student_with_job.is_full_time_worker());
    }

    #[test]
    fn children_and_adults() {
        let toddler = Person::new(
            2,
            3,
            PersonType::Preschool,
            EmploymentCategory::UnderAge16,
            StudentCategory::NonStudent,
        );
        assert!(toddler.is_child());
        assert!(!toddler.is_adult());
        let teenager = Person::new(
            3,
            18,
            PersonType::StudentDriving,
            EmploymentCategory::NotEmployed,
            StudentCategory::GradeOrHighSchool,
        );
        assert!(teenager.is_child());
        assert!(!teenager.is_adult());
        let retiree = Person::new(
            4,
            70,
            PersonType::Retired,
            EmploymentCategory::NotEmployed,
            StudentCategory::NonStudent,
        );
        assert!(!retiree.is_child());
        assert!(retiree.is_adult());
    }
}
