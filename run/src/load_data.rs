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

use std::path::Path;

use anyhow::Context;
use log::{info, warn};

use cdap::config::{ModelConfig, DEFAULT_CONFIG_FILENAME};
use cdap::utility::{CdapUtilityCalculators, PersonTypeUtilityTable};
use load_household_data::HouseholdData;

use crate::arguments::Arguments;

/// Reads the model configuration, applying any command line overrides
pub fn load_config(arguments: &Arguments) -> anyhow::Result<ModelConfig> {
    let filename = match &arguments.config_file {
        Some(filename) => filename.to_string(),
        None => Path::new(&arguments.data_directory)
            .join(DEFAULT_CONFIG_FILENAME)
            .to_string_lossy()
            .to_string(),
    };
    let mut config = ModelConfig::load_from_file(&filename)
        .context(format!("Failed to load the model configuration from '{}'", filename))?;
    if let Some(base_seed) = arguments.base_seed {
        info!("Overriding the base seed with {}", base_seed);
        config.base_seed = base_seed;
    }
    Ok(config)
}

/// Builds the utility calculators from the table named in the config
pub fn load_utility_calculators(
    config: &ModelConfig,
    data_directory: &str,
) -> anyhow::Result<CdapUtilityCalculators> {
    let table = match &config.utility_table {
        Some(filename) => {
            let path = Path::new(data_directory).join(filename);
            PersonTypeUtilityTable::load_from_file(&path.to_string_lossy())
                .context(format!("Failed to load the utility table '{}'", path.display()))?
        }
        None => {
            warn!("No utility table is configured, every alternative will have zero utility");
            PersonTypeUtilityTable::default()
        }
    };
    Ok(table.into_calculators())
}

/// Loads the population and the utility calculators at the same time
pub fn load_model_inputs(
    arguments: &Arguments,
    config: &ModelConfig,
    resume: bool,
) -> anyhow::Result<(HouseholdData, CdapUtilityCalculators)> {
    let (household_data, calculators) = rayon::join(
        || {
            HouseholdData::load_all_tables(&arguments.data_directory, resume)
                .context(format!("Failed to load the population from '{}'", arguments.data_directory))
        },
        || load_utility_calculators(config, &arguments.data_directory),
    );
    Ok((household_data?, calculators?))
}
