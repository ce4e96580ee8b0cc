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

use serde::{Deserialize, Serialize};

use crate::tables::PreProcessingTable;

/// The coordinated daily activity pattern result of a household from an earlier run
///
/// Used to resume a population part way through, without re-drawing the households already completed
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckpointRecord {
    pub hh_id: u32,
    pub cdap_pattern: String,
    /// The number of random draws the household had consumed once the pattern was chosen
    pub cdap_random_count: u32,
}

impl PreProcessingTable for CheckpointRecord {
    fn get_household_id(&self) -> u32 {
        self.hh_id
    }
}
