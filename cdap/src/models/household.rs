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

use load_household_data::tables::checkpoint::CheckpointRecord;
use load_household_data::tables::households::HouseholdRecord;
use load_household_data::tables::results::{HouseholdResultRecord, PersonResultRecord};

use crate::error::CdapError;
use crate::models::activity::{pattern_from_str, pattern_to_string, Activity};
use crate::models::person::Person;
use crate::random::HouseholdRandom;

/// A household, its members in original order, and its random stream
#[derive(Clone, Debug)]
pub struct Household {
    id: u32,
    /// Index `i` holds person number `i + 1`
    persons: Vec<Person>,
    random: HouseholdRandom,
    /// One character per person, in original order
    cdap_pattern: Option<String>,
    /// The draw count recorded once the pattern was chosen
    cdap_random_count: u32,
}

/// Initialisation
impl Household {
    /// Builds a household, with person numbers expected to run from 1 to n in order
    pub fn new(id: u32, persons: Vec<Person>, base_seed: u64) -> Result<Household, CdapError> {
        if persons.is_empty() {
            return Err(CdapError::invalid_household(id, "household has no persons"));
        }
        for (index, person) in persons.iter().enumerate() {
            if person.person_num() as usize != index + 1 {
                return Err(CdapError::invalid_household(
                    id,
                    format!("person at slot {} has person number {}", index + 1, person.person_num()),
                ));
            }
        }
        Ok(Household {
            id,
            persons,
            random: HouseholdRandom::new(base_seed, id),
            cdap_pattern: None,
            cdap_random_count: 0,
        })
    }

    pub fn from_record(record: &HouseholdRecord, base_seed: u64) -> Result<Household, CdapError> {
        let persons = record.persons.iter().map(Person::from).collect();
        Household::new(record.hh_id, persons, base_seed)
    }

    /// Restores the outcome of an earlier run, leaving the random stream where that run left it
    pub fn restore(&mut self, checkpoint: &CheckpointRecord, base_seed: u64) -> Result<(), CdapError> {
        if checkpoint.hh_id != self.id {
            return Err(CdapError::invalid_household(
                self.id,
                format!("checkpoint belongs to household {}", checkpoint.hh_id),
            ));
        }
        let pattern = pattern_from_str(&checkpoint.cdap_pattern).ok_or_else(|| {
            CdapError::invalid_household(
                self.id,
                format!("checkpoint pattern '{}' contains an unknown activity", checkpoint.cdap_pattern),
            )
        })?;
        self.random = HouseholdRandom::resume(base_seed, self.id, checkpoint.cdap_random_count);
        self.set_pattern(&pattern)
    }
}

impl Household {
    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn size(&self) -> usize {
        self.persons.len()
    }
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }
    /// Returns the person at the given 0-based slot
    pub fn person(&self, index: usize) -> Result<&Person, CdapError> {
        self.persons.get(index).ok_or(CdapError::PersonIndexOutOfRange {
            household_id: self.id,
            index: index + 1,
            size: self.persons.len(),
        })
    }
    pub fn random_mut(&mut self) -> &mut HouseholdRandom {
        &mut self.random
    }
    pub fn draw_count(&self) -> u32 {
        self.random.draw_count()
    }
    pub fn cdap_pattern(&self) -> Option<&str> {
        self.cdap_pattern.as_deref()
    }
    pub fn cdap_random_count(&self) -> u32 {
        self.cdap_random_count
    }
    pub fn has_pattern(&self) -> bool {
        self.cdap_pattern.is_some()
    }

    /// Stores the chosen pattern (original person order) and each person's activity
    ///
    /// Overwrites the outcome of any previous pass
    pub fn set_pattern(&mut self, pattern: &[Activity]) -> Result<(), CdapError> {
        if pattern.len() != self.persons.len() {
            return Err(CdapError::invalid_household(
                self.id,
                format!(
                    "pattern of length {} does not match household size {}",
                    pattern.len(),
                    self.persons.len()
                ),
            ));
        }
        for (person, activity) in self.persons.iter_mut().zip(pattern) {
            person.activity = Some(*activity);
        }
        self.cdap_pattern = Some(pattern_to_string(pattern));
        self.cdap_random_count = self.random.draw_count();
        Ok(())
    }
}

/// Output
impl Household {
    pub fn to_result_record(&self) -> Option<HouseholdResultRecord> {
        let pattern = self.cdap_pattern.as_ref()?;
        Some(HouseholdResultRecord {
            hh_id: self.id,
            size: self.size(),
            cdap_pattern: pattern.clone(),
            cdap_random_count: self.cdap_random_count,
        })
    }
    pub fn to_person_records(&self) -> Vec<PersonResultRecord> {
        self.persons
            .iter()
            .filter_map(|person| {
                person.activity.map(|activity| PersonResultRecord {
                    hh_id: self.id,
                    person_num: person.person_num(),
                    person_type: person.person_type().code(),
                    activity: activity.code(),
                })
            })
            .collect()
    }
}

impl Display for Household {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Household {} of size {} (seed {}, {} draws)",
            self.id,
            self.size(),
            self.random.seed(),
            self.random.draw_count()
        )?;
        for person in &self.persons {
            writeln!(f, "    {}", person)?;
        }
        Ok(())
    }
}
