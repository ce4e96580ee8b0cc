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

#[derive(Debug)]
pub enum ParseErrorType {
    /// The value is not the expected data type
    InvalidDataType {
        value: Option<String>,
        expected_type: String,
    },
    /// The collection is expected to contain one or more values
    IsEmpty { message: String },
    /// Two values should be equal, but are not
    Mismatching {
        message: String,
        value_1: String,
        value_2: String,
    },
    /// This occurs when the value corresponding to a key in a map is not there
    MissingKey { context: String, key: String },
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::InvalidDataType {
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "Invalid Data Type: Expected {} got {:?}",
                    expected_type, value
                )
            }
            ParseErrorType::IsEmpty { message } => {
                write!(f, "Object is empty: {}", message)
            }
            ParseErrorType::Mismatching {
                message,
                value_1,
                value_2,
            } => {
                write!(
                    f,
                    "Values ({}) and  ({}) should be matching. {}",
                    value_1, value_2, message
                )
            }
            ParseErrorType::MissingKey { context, key } => {
                write!(f, "Missing Key! Context: {}. Key: {}", context, key)
            }
        }
    }
}

impl std::error::Error for ParseErrorType {}

pub enum DataLoadingError {
    /// An error occurs trying to parse or convert a Value
    ValueParsingError {
        source: ParseErrorType,
    },
    /// An error occurs reading from or writing to disk
    IOError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A household in the population is malformed
    InvalidHousehold {
        household_id: u32,
        message: String,
    },
}

impl DataLoadingError {
    pub fn invalid_household(household_id: u32, message: String) -> DataLoadingError {
        DataLoadingError::InvalidHousehold {
            household_id,
            message,
        }
    }
}

impl std::error::Error for DataLoadingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            DataLoadingError::ValueParsingError { ref source } => Some(source),
            DataLoadingError::IOError { ref source } => source.source(),
            DataLoadingError::InvalidHousehold { .. } => None,
        }
    }
}

impl From<csv::Error> for DataLoadingError {
    fn from(err: csv::Error) -> Self {
        DataLoadingError::IOError {
            source: Box::new(err),
        }
    }
}

impl From<std::io::Error> for DataLoadingError {
    fn from(e: std::io::Error) -> Self {
        DataLoadingError::IOError {
            source: Box::new(e),
        }
    }
}

impl Debug for DataLoadingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for DataLoadingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLoadingError::ValueParsingError { source } => {
                write!(f, "\nAn error occurred loading Household Data\n     Type: ParsingError\n        Source: {} ", source)
            }
            DataLoadingError::IOError { source } => {
                write!(
                    f,
                    "\nAn error occurred loading Household Data\n     Type: IoError\n     Source: {} ",
                    source
                )
            }
            DataLoadingError::InvalidHousehold {
                household_id,
                message,
            } => {
                write!(
                    f,
                    "\nAn error occurred loading Household Data\n     Type: InvalidHousehold\n     Household: {}, {} ",
                    household_id, message
                )
            }
        }
    }
}
