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
use std::path::Path;

use anyhow::Context;
use log::{error, info};

use cdap::model::CoordinatedDailyActivityPatternModel;
use cdap::simulator::Simulator;
use cdap::statistics::Timer;
use load_household_data::tables::HouseholdTableNames;
use load_household_data::HouseholdData;

use crate::arguments::{Arguments, SimMode};
use crate::load_data::{load_config, load_model_inputs};

pub const SUMMARY_FILENAME: &str = "cdap_summary.json";

pub enum RuntimeError {
    MissingCheckpoint { filename: String },
}

impl std::error::Error for RuntimeError {}

impl Debug for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::MissingCheckpoint { filename } => {
                write!(f, "Cannot resume as the checkpoint file '{}' does not exist", filename)
            }
        }
    }
}

pub fn execute_arguments(arguments: Arguments) -> anyhow::Result<()> {
    match arguments.mode {
        SimMode::Simulate => simulate(arguments),
        SimMode::Resume => resume(arguments),
    }
}

fn simulate(arguments: Arguments) -> anyhow::Result<()> {
    info!("Choosing daily activity patterns for the population in '{}'", arguments.data_directory);
    run_population(&arguments, false)
}

fn resume(arguments: Arguments) -> anyhow::Result<()> {
    let checkpoint = Path::new(&arguments.data_directory)
        .join(HouseholdTableNames::CdapCheckpoint.get_filename());
    if !checkpoint.exists() {
        return Err(RuntimeError::MissingCheckpoint {
            filename: checkpoint.to_string_lossy().to_string(),
        }
        .into());
    }
    info!("Resuming from '{}'", checkpoint.display());
    run_population(&arguments, true)
}

fn run_population(arguments: &Arguments, resume: bool) -> anyhow::Result<()> {
    let mut timer = Timer::default();
    let config = load_config(arguments)?;
    let (household_data, calculators) = load_model_inputs(arguments, &config, resume)?;
    timer.code_block_finished(format!(
        "Loaded {} households",
        household_data.households.len()
    ));

    let mut households = Simulator::build_population(&household_data, config.base_seed)?;
    drop(household_data);
    timer.code_block_finished("Built the population".to_string());

    let model = CoordinatedDailyActivityPatternModel::new(calculators, &config)
        .context("Failed to build the model")?;
    let simulator = Simulator::new(model, &config);
    let report = simulator.run(&mut households)?;
    timer.code_block_finished(format!(
        "Simulated {} households, {} restored from the checkpoint",
        report.simulated, report.resumed
    ));
    for failure in &report.failures {
        error!("Skipped household {}: {}", failure.household_id, failure.error);
    }

    let household_results: Vec<_> = households
        .iter()
        .filter_map(|household| household.to_result_record())
        .collect();
    let person_results: Vec<_> = households
        .iter()
        .flat_map(|household| household.to_person_records())
        .collect();
    HouseholdData::write_results(&arguments.output_directory, &household_results, &person_results)
        .context(format!("Failed to write results to '{}'", arguments.output_directory))?;

    report.summary.log_report();
    let summary_file = Path::new(&arguments.output_directory).join(SUMMARY_FILENAME);
    report
        .summary
        .dump_to_file(&summary_file.to_string_lossy())
        .context("Failed to write the summary")?;
    timer.code_block_finished("Wrote results".to_string());
    timer.finished();
    Ok(())
}
