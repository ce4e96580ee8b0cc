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

use std::fmt::{Debug, Display, Formatter};

pub enum CdapError {
    /// A modeled person was requested outside of `1..=size`
    PersonIndexOutOfRange {
        household_id: u32,
        index: usize,
        size: usize,
    },
    /// No alternative carried any probability mass
    NoAvailableAlternative {
        household_id: u32,
    },
    InvalidUtility {
        household_id: u32,
        alternative: String,
        utility: f64,
    },
    InvalidHousehold {
        household_id: u32,
        message: String,
    },
    Configuration {
        message: String,
    },
}

impl CdapError {
    pub fn invalid_household<T: Display>(household_id: u32, message: T) -> CdapError {
        CdapError::InvalidHousehold {
            household_id,
            message: message.to_string(),
        }
    }
    pub fn configuration<T: Display>(message: T) -> CdapError {
        CdapError::Configuration {
            message: message.to_string(),
        }
    }
    /// The household the error occurred in, if it is tied to one
    pub fn household_id(&self) -> Option<u32> {
        match self {
            CdapError::PersonIndexOutOfRange { household_id, .. }
            | CdapError::NoAvailableAlternative { household_id }
            | CdapError::InvalidUtility { household_id, .. }
            | CdapError::InvalidHousehold { household_id, .. } => Some(*household_id),
            CdapError::Configuration { .. } => None,
        }
    }
}

impl Debug for CdapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CdapError::PersonIndexOutOfRange {
                household_id,
                index,
                size,
            } => {
                write!(
                    f,
                    "Person index {} is out of range for household {} of size {}",
                    index, household_id, size
                )
            }
            CdapError::NoAvailableAlternative { household_id } => {
                write!(f, "No available CDAP alternatives to choose for household {}", household_id)
            }
            CdapError::InvalidUtility {
                household_id,
                alternative,
                utility,
            } => {
                write!(
                    f,
                    "Alternative {} of household {} has an invalid utility: {}",
                    alternative, household_id, utility
                )
            }
            CdapError::InvalidHousehold {
                household_id,
                message,
            } => {
                write!(f, "Household {} is invalid: {}", household_id, message)
            }
            CdapError::Configuration { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
        }
    }
}

impl Display for CdapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {:?}", self)
    }
}

impl std::error::Error for CdapError {}

impl From<serde_json::Error> for CdapError {
    fn from(e: serde_json::Error) -> Self {
        CdapError::Configuration {
            message: e.to_string(),
        }
    }
}

impl From<std::io::Error> for CdapError {
    fn from(e: std::io::Error) -> Self {
        CdapError::Configuration {
            message: e.to_string(),
        }
    }
}
