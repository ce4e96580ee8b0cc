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

use anyhow::Context;
use log::info;

use crate::arguments::Arguments;
use crate::execute_modes::execute_arguments;

mod arguments;
mod execute_modes;
mod load_data;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    pretty_env_logger::init_timed();
    let arguments = Arguments::load_from_arguments()?;

    let number_of_threads = arguments.number_of_threads.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(number_of_threads)
        .build_global()
        .context("Failed to build the thread pool")?;
    info!("Using {} threads", number_of_threads);
    info!("Using mode {:?} for directory: '{}'", arguments.mode, arguments.data_directory);

    execute_arguments(arguments)
}
