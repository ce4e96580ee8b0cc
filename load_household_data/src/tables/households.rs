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

use std::convert::TryFrom;

use serde::Deserialize;

use crate::parsing_error::{DataLoadingError, ParseErrorType};
use crate::tables::persons::{PersonRecord, PreProcessingPersonRecord};
use crate::tables::PreProcessingTable;

/// One row of `households.csv`
#[derive(Debug, Deserialize)]
pub struct PreProcessingHouseholdRecord {
    pub hh_id: u32,
}

impl PreProcessingTable for PreProcessingHouseholdRecord {
    fn get_household_id(&self) -> u32 {
        self.hh_id
    }
}

/// A household, with all of its members in their original order
#[derive(Clone, Debug)]
pub struct HouseholdRecord {
    pub hh_id: u32,
    /// Sorted by person number, which runs from 1 to the household size
    pub persons: Vec<PersonRecord>,
}

impl HouseholdRecord {
    pub fn size(&self) -> usize {
        self.persons.len()
    }
}

impl<'a> TryFrom<&'a Vec<PreProcessingPersonRecord>> for HouseholdRecord {
    type Error = DataLoadingError;
    /// Consolidates all the person rows of one household
    ///
    /// Every row must share the same household id, and the person numbers must be exactly 1..=n
    fn try_from(records: &'a Vec<PreProcessingPersonRecord>) -> Result<Self, Self::Error> {
        if records.is_empty() {
            return Err(DataLoadingError::ValueParsingError {
                source: ParseErrorType::IsEmpty {
                    message: String::from("Person list is empty, can't build a HouseholdRecord!"),
                },
            });
        }
        let hh_id = records[0].get_household_id();
        let mut persons = Vec::with_capacity(records.len());
        for record in records {
            if record.get_household_id() != hh_id {
                return Err(DataLoadingError::ValueParsingError {
                    source: ParseErrorType::Mismatching {
                        message: String::from("Mis matching household ids for person records"),
                        value_1: hh_id.to_string(),
                        value_2: record.get_household_id().to_string(),
                    },
                });
            }
            persons.push(PersonRecord::try_from(record)?);
        }
        persons.sort_by_key(|person| person.person_num);
        for (index, person) in persons.iter().enumerate() {
            if person.person_num as usize != index + 1 {
                return Err(DataLoadingError::invalid_household(
                    hh_id,
                    format!(
                        "person numbers must run from 1 to {} without gaps, found {} at position {}",
                        persons.len(),
                        person.person_num,
                        index + 1
                    ),
                ));
            }
        }
        Ok(HouseholdRecord { hh_id, persons })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use crate::tables::households::HouseholdRecord;
    use crate::tables::persons::PreProcessingPersonRecord;

    fn rows(data: &str) -> Vec<PreProcessingPersonRecord> {
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        reader.deserialize().collect::<Result<_, _>>().unwrap()
    }

    #[test]
    fn persons_are_sorted_by_person_num() {
        let records = rows(
            "hh_id,person_num,age,person_type,employment_category,student_category\n\
             7,2,10,7,4,1\n\
             7,1,40,1,1,3\n",
        );
        let household = HouseholdRecord::try_from(&records).unwrap();
        assert_eq!(household.hh_id, 7);
        assert_eq!(household.size(), 2);
        assert_eq!(household.persons[0].age, 40);
        assert_eq!(household.persons[1].person_num, 2);
    }

    #[test]
    fn gaps_in_person_numbers_are_rejected() {
        let records = rows(
            "hh_id,person_num,age,person_type,employment_category,student_category\n\
             7,1,40,1,1,3\n\
             7,3,10,7,4,1\n",
        );
        assert!(HouseholdRecord::try_from(&records).is_err());
    }

    #[test]
    fn mixed_households_are_rejected() {
        let records = rows(
            "hh_id,person_num,age,person_type,employment_category,student_category\n\
             7,1,40,1,1,3\n\
             8,2,10,7,4,1\n",
        );
        assert!(HouseholdRecord::try_from(&records).is_err());
        assert!(HouseholdRecord::try_from(&Vec::<PreProcessingPersonRecord>::new()).is_err());
    }
}
