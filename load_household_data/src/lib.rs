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
#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use serde::Serialize;

use crate::parsing_error::{DataLoadingError, ParseErrorType};
use crate::tables::checkpoint::CheckpointRecord;
use crate::tables::households::{HouseholdRecord, PreProcessingHouseholdRecord};
use crate::tables::persons::PreProcessingPersonRecord;
use crate::tables::results::{HouseholdResultRecord, PersonResultRecord};
use crate::tables::{HouseholdTableNames, PreProcessingTable};

pub mod parsing_error;
pub mod tables;

/// This is a container for the synthetic population, and any checkpoint from a previous run
pub struct HouseholdData {
    /// In the order of `households.csv`
    pub households: Vec<HouseholdRecord>,
    /// Household ID -> Result of an earlier run
    pub checkpoint: HashMap<u32, CheckpointRecord>,
}

/// Initialization
impl HouseholdData {
    /// Loads the household and person tables from the given directory
    ///
    /// If `resume` is set, the checkpoint table is read as well when it exists
    pub fn load_all_tables(data_directory: &str, resume: bool) -> Result<HouseholdData, DataLoadingError> {
        let start = Instant::now();
        let directory = Path::new(data_directory);
        let households_file = directory.join(HouseholdTableNames::Households.get_filename());
        let persons_file = directory.join(HouseholdTableNames::Persons.get_filename());
        info!("Reading households from '{}'", households_file.display());
        let households = HouseholdData::read_population(
            File::open(&households_file)?,
            File::open(&persons_file)?,
        )?;
        let checkpoint_file = directory.join(HouseholdTableNames::CdapCheckpoint.get_filename());
        let checkpoint = if resume {
            if checkpoint_file.exists() {
                HouseholdData::read_checkpoint(File::open(&checkpoint_file)?)?
            } else {
                warn!(
                    "No checkpoint exists at '{}', every household will be simulated",
                    checkpoint_file.display()
                );
                HashMap::new()
            }
        } else {
            HashMap::new()
        };
        info!(
            "Loaded {} households in {:.2} seconds",
            households.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(HouseholdData {
            households,
            checkpoint,
        })
    }

    /// Reads any table where each row is one struct
    pub fn read_generic_table<T: PreProcessingTable, R: Read>(reader: R) -> Result<Vec<T>, DataLoadingError> {
        let mut reader = csv::Reader::from_reader(reader);
        let data: Result<Vec<T>, csv::Error> = reader.deserialize().collect();
        Ok(data?)
    }

    /// Groups the person rows by household, keeping the order of the households table
    pub fn read_population<R: Read, S: Read>(
        households: R,
        persons: S,
    ) -> Result<Vec<HouseholdRecord>, DataLoadingError> {
        let household_rows: Vec<PreProcessingHouseholdRecord> =
            HouseholdData::read_generic_table(households)?;
        let person_rows: Vec<PreProcessingPersonRecord> = HouseholdData::read_generic_table(persons)?;

        let mut persons_by_household: HashMap<u32, Vec<PreProcessingPersonRecord>> =
            HashMap::with_capacity(household_rows.len());
        for row in person_rows {
            persons_by_household
                .entry(row.get_household_id())
                .or_default()
                .push(row);
        }

        let mut households = Vec::with_capacity(household_rows.len());
        for row in household_rows {
            let persons = persons_by_household.remove(&row.hh_id).ok_or_else(|| {
                DataLoadingError::invalid_household(row.hh_id, "household has no persons".to_string())
            })?;
            households.push(HouseholdRecord::try_from(&persons)?);
        }
        if let Some(hh_id) = persons_by_household.keys().next() {
            return Err(DataLoadingError::ValueParsingError {
                source: ParseErrorType::MissingKey {
                    context: "Person rows reference a household missing from the households table"
                        .to_string(),
                    key: hh_id.to_string(),
                },
            });
        }
        Ok(households)
    }

    pub fn read_checkpoint<R: Read>(reader: R) -> Result<HashMap<u32, CheckpointRecord>, DataLoadingError> {
        let rows: Vec<CheckpointRecord> = HouseholdData::read_generic_table(reader)?;
        Ok(rows.into_iter().map(|row| (row.hh_id, row)).collect())
    }
}

/// Output
impl HouseholdData {
    pub fn write_records<T: Serialize, W: Write>(writer: W, records: &[T]) -> Result<(), DataLoadingError> {
        let mut writer = csv::Writer::from_writer(writer);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes both result tables into the output directory, creating it if needed
    pub fn write_results(
        output_directory: &str,
        household_results: &[HouseholdResultRecord],
        person_results: &[PersonResultRecord],
    ) -> Result<(), DataLoadingError> {
        let directory = Path::new(output_directory);
        std::fs::create_dir_all(directory)?;
        let household_file = directory.join(HouseholdTableNames::HouseholdResults.get_filename());
        let person_file = directory.join(HouseholdTableNames::PersonResults.get_filename());
        HouseholdData::write_records(File::create(&household_file)?, household_results)?;
        HouseholdData::write_records(File::create(&person_file)?, person_results)?;
        info!(
            "Wrote {} household and {} person results to '{}'",
            household_results.len(),
            person_results.len(),
            directory.display()
        );
        Ok(())
    }
}
