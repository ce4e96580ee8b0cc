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

use std::fmt::Debug;

use serde::de::DeserializeOwned;

pub mod checkpoint;
pub mod households;
pub mod persons;
pub mod results;

/// This is used to load in a CSV file, and each row corresponds to one struct
pub trait PreProcessingTable: Debug + DeserializeOwned + Sized {
    /// The household this row belongs to
    fn get_household_id(&self) -> u32;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HouseholdTableNames {
    Households,
    Persons,
    CdapCheckpoint,
    HouseholdResults,
    PersonResults,
}

impl HouseholdTableNames {
    pub fn get_filename(&self) -> &str {
        match self {
            HouseholdTableNames::Households => "households.csv",
            HouseholdTableNames::Persons => "persons.csv",
            HouseholdTableNames::CdapCheckpoint => "cdap_checkpoint.csv",
            HouseholdTableNames::HouseholdResults => "household_cdap_results.csv",
            HouseholdTableNames::PersonResults => "person_cdap_results.csv",
        }
    }
}
