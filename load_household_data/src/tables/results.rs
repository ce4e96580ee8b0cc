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

use serde::Serialize;

/// One row of `household_cdap_results.csv`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HouseholdResultRecord {
    pub hh_id: u32,
    pub size: usize,
    pub cdap_pattern: String,
    pub cdap_random_count: u32,
}

/// One row of `person_cdap_results.csv`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersonResultRecord {
    pub hh_id: u32,
    pub person_num: u8,
    pub person_type: u8,
    pub activity: char,
}
