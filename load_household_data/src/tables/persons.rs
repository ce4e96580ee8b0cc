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

//! Person rows from the synthetic population, and the classifications used by the activity models

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::parsing_error::{DataLoadingError, ParseErrorType};
use crate::tables::PreProcessingTable;

/// The age at which a person is counted as an adult
pub const MIN_ADULT_AGE: u8 = 19;

/// The eight person types, in the order of their 1-based codes in the population files
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enum, EnumIter, Serialize, Deserialize)]
pub enum PersonType {
    FullTimeWorker,
    PartTimeWorker,
    UniversityStudent,
    NonWorker,
    Retired,
    StudentDriving,
    StudentNonDriving,
    Preschool,
}

impl PersonType {
    pub fn name(&self) -> &'static str {
        match self {
            PersonType::FullTimeWorker => "Full-time worker",
            PersonType::PartTimeWorker => "Part-time worker",
            PersonType::UniversityStudent => "University student",
            PersonType::NonWorker => "Non-worker",
            PersonType::Retired => "Retired",
            PersonType::StudentDriving => "Student of driving age",
            PersonType::StudentNonDriving => "Student of non-driving age",
            PersonType::Preschool => "Child too young for school",
        }
    }
    /// Four character label used in the trace tables
    pub fn abbreviation(&self) -> &'static str {
        match self {
            PersonType::FullTimeWorker => "FT W",
            PersonType::PartTimeWorker => "PT W",
            PersonType::UniversityStudent => "UNIV",
            PersonType::NonWorker => "NONW",
            PersonType::Retired => "RETR",
            PersonType::StudentDriving => "SCHD",
            PersonType::StudentNonDriving => "SCHN",
            PersonType::Preschool => "PRES",
        }
    }
    pub fn code(&self) -> u8 {
        *self as u8 + 1
    }
}

impl Display for PersonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for PersonType {
    type Error = DataLoadingError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PersonType::FullTimeWorker),
            2 => Ok(PersonType::PartTimeWorker),
            3 => Ok(PersonType::UniversityStudent),
            4 => Ok(PersonType::NonWorker),
            5 => Ok(PersonType::Retired),
            6 => Ok(PersonType::StudentDriving),
            7 => Ok(PersonType::StudentNonDriving),
            8 => Ok(PersonType::Preschool),
            _ => Err(DataLoadingError::ValueParsingError {
                source: ParseErrorType::InvalidDataType {
                    value: Some(code.to_string()),
                    expected_type: "Person type code in 1..=8".to_string(),
                },
            }),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum EmploymentCategory {
    FullTime,
    PartTime,
    NotEmployed,
    UnderAge16,
}

impl TryFrom<u8> for EmploymentCategory {
    type Error = DataLoadingError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(EmploymentCategory::FullTime),
            2 => Ok(EmploymentCategory::PartTime),
            3 => Ok(EmploymentCategory::NotEmployed),
            4 => Ok(EmploymentCategory::UnderAge16),
            _ => Err(DataLoadingError::ValueParsingError {
                source: ParseErrorType::InvalidDataType {
                    value: Some(code.to_string()),
                    expected_type: "Employment category code in 1..=4".to_string(),
                },
            }),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum StudentCategory {
    GradeOrHighSchool,
    CollegeOrHigher,
    NonStudent,
}

impl TryFrom<u8> for StudentCategory {
    type Error = DataLoadingError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(StudentCategory::GradeOrHighSchool),
            2 => Ok(StudentCategory::CollegeOrHigher),
            3 => Ok(StudentCategory::NonStudent),
            _ => Err(DataLoadingError::ValueParsingError {
                source: ParseErrorType::InvalidDataType {
                    value: Some(code.to_string()),
                    expected_type: "Student category code in 1..=3".to_string(),
                },
            }),
        }
    }
}

/// One row of `persons.csv`
#[derive(Debug, Deserialize)]
pub struct PreProcessingPersonRecord {
    pub hh_id: u32,
    pub person_num: u8,
    age: u8,
    person_type: u8,
    employment_category: u8,
    student_category: u8,
}

impl PreProcessingTable for PreProcessingPersonRecord {
    fn get_household_id(&self) -> u32 {
        self.hh_id
    }
}

/// A validated person, with the codes converted into their classifications
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PersonRecord {
    /// The 1-based slot of this person in their household
    pub person_num: u8,
    pub age: u8,
    pub person_type: PersonType,
    pub employment_category: EmploymentCategory,
    pub student_category: StudentCategory,
}

impl TryFrom<&PreProcessingPersonRecord> for PersonRecord {
    type Error = DataLoadingError;

    fn try_from(record: &PreProcessingPersonRecord) -> Result<Self, Self::Error> {
        Ok(PersonRecord {
            person_num: record.person_num,
            age: record.age,
            person_type: PersonType::try_from(record.person_type)?,
            employment_category: EmploymentCategory::try_from(record.employment_category)?,
            student_category: StudentCategory::try_from(record.student_category)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use strum::IntoEnumIterator;

    use crate::tables::persons::{EmploymentCategory, PersonType, StudentCategory};

    #[test]
    fn person_type_codes_round_trip() {
        for person_type in PersonType::iter() {
            assert_eq!(PersonType::try_from(person_type.code()).unwrap(), person_type);
            assert_eq!(person_type.abbreviation().len(), 4);
        }
        assert!(PersonType::try_from(0).is_err());
        assert!(PersonType::try_from(9).is_err());
    }

    #[test]
    fn category_codes_are_one_based() {
        assert_eq!(EmploymentCategory::try_from(1).unwrap(), EmploymentCategory::FullTime);
        assert_eq!(EmploymentCategory::try_from(4).unwrap(), EmploymentCategory::UnderAge16);
        assert!(EmploymentCategory::try_from(5).is_err());
        assert_eq!(StudentCategory::try_from(3).unwrap(), StudentCategory::NonStudent);
        assert!(StudentCategory::try_from(0).is_err());
    }
}
