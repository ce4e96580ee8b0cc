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

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use enum_map::{enum_map, EnumMap};
use log::{info, warn};
use num_format::Locale;
use serde::{Deserialize, Serialize};

use load_household_data::tables::persons::PersonType;

use crate::error::CdapError;
use crate::models::activity::{activity_utilities, Activity};

/// The most persons whose activities are chosen jointly
pub const MAX_MODELED_SIZE: usize = 5;

pub use load_household_data::tables::persons::MIN_ADULT_AGE;

/// The utility a calculator returns for an activity that cannot be chosen
pub const UNAVAILABLE_UTILITY: f64 = -999.0;
/// Alternatives with a utility below this are excluded from the choice
pub const UNAVAILABLE_UTILITY_THRESHOLD: f64 = -999.0;
/// Alternatives with a utility below this get no probability
pub const NEGLIGIBLE_UTILITY_THRESHOLD: f64 = -400.0;

/// How many households between progress messages
pub const DEBUG_ITERATION_PRINT: usize = 100_000;

pub const NUMBER_FORMATTING: Locale = Locale::en;

pub const DEFAULT_CONFIG_FILENAME: &str = "cdap_config.json";

/// How activities are assigned to members beyond the modeled five
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraMemberModelConfig {
    /// Every extra member gets a Non-Mandatory activity
    NonMandatoryStub,
    /// One draw per extra member from the proportions of their person type
    FixedProportions,
}

impl Default for ExtraMemberModelConfig {
    fn default() -> Self {
        ExtraMemberModelConfig::NonMandatoryStub
    }
}

/// What to do when a single household cannot be simulated
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop the whole run at the first failure
    Abort,
    /// Log the household, leave it without a pattern, and carry on
    SkipHousehold,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Abort
    }
}

pub type ActivityProportions = EnumMap<PersonType, EnumMap<Activity, f64>>;

/// Daily activity shares of persons in households larger than five, by person type
pub fn default_fixed_proportions() -> ActivityProportions {
    enum_map! {
        PersonType::FullTimeWorker => activity_utilities(0.79647, 0.09368, 0.10985),
        PersonType::PartTimeWorker => activity_utilities(0.61678, 0.25757, 0.12565),
        PersonType::UniversityStudent => activity_utilities(0.69229, 0.15641, 0.15130),
        PersonType::NonWorker => activity_utilities(0.0, 0.67169, 0.32831),
        PersonType::Retired => activity_utilities(0.0, 0.54295, 0.45705),
        PersonType::StudentDriving => activity_utilities(0.77609, 0.06004, 0.16387),
        PersonType::StudentNonDriving => activity_utilities(0.68514, 0.09144, 0.22342),
        PersonType::Preschool => activity_utilities(0.14056, 0.06512, 0.79432),
    }
}

/// The runtime configuration of the model, read from a JSON file
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Added to the household ID to seed each household's random stream
    pub base_seed: u64,
    pub extra_member_model: ExtraMemberModelConfig,
    pub fixed_proportions: ActivityProportions,
    /// Households whose choice is logged in detail
    pub trace_households: Vec<u32>,
    pub failure_policy: FailurePolicy,
    /// JSON file with the utility table, relative to the data directory
    pub utility_table: Option<String>,
    pub progress_interval: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            base_seed: 0,
            extra_member_model: ExtraMemberModelConfig::default(),
            fixed_proportions: default_fixed_proportions(),
            trace_households: Vec::new(),
            failure_policy: FailurePolicy::default(),
            utility_table: None,
            progress_interval: DEBUG_ITERATION_PRINT,
        }
    }
}

impl ModelConfig {
    /// Reads the configuration, falling back to the defaults if the file doesn't exist
    pub fn load_from_file(filename: &str) -> Result<ModelConfig, CdapError> {
        if !Path::new(filename).exists() {
            warn!("Config file '{}' does not exist, using the default configuration", filename);
            return Ok(ModelConfig::default());
        }
        let file = File::open(filename)?;
        let config: ModelConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        info!("Loaded configuration from '{}'", filename);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CdapError> {
        if self.progress_interval == 0 {
            return Err(CdapError::configuration("progress_interval must be positive"));
        }
        for (person_type, proportions) in self.fixed_proportions.iter() {
            let mut total: f64 = 0.0;
            for (activity, proportion) in proportions.iter() {
                if !proportion.is_finite() || *proportion < 0.0 {
                    return Err(CdapError::configuration(format!(
                        "Fixed proportion for {} doing {:?} is invalid: {}",
                        person_type, activity, proportion
                    )));
                }
                total += *proportion;
            }
            if total > 1.0 + 1e-6 {
                return Err(CdapError::configuration(format!(
                    "Fixed proportions for {} sum to {}, more than 1",
                    person_type, total
                )));
            }
        }
        Ok(())
    }
}
