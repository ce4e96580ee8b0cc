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

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufWriter;
use std::ops::AddAssign;
use std::time::Instant;

use enum_map::EnumMap;
use log::info;
use num_format::ToFormattedString;
use serde::{Deserialize, Serialize};
use serde_json::to_writer;
use strum::IntoEnumIterator;

use load_household_data::tables::persons::PersonType;

use crate::config::NUMBER_FORMATTING;
use crate::error::CdapError;
use crate::models::activity::Activity;
use crate::models::household::Household;

/// A simple struct for benchmarking how long a block of code takes
#[derive(Debug)]
pub struct Timer {
    function_timer: Instant,
    code_block_timer: Instant,
    pub function_times: HashMap<String, f64>,
}

impl Timer {
    /// Call this to record how long has elapsed since the last call
    #[inline]
    pub fn code_block_finished(&mut self, message: String) {
        let elapsed = self.code_block_timer.elapsed().as_secs_f64();
        info!(
            "{} in {:.2} seconds. Total time: {:.2} seconds",
            message,
            elapsed,
            self.function_timer.elapsed().as_secs_f64()
        );
        self.function_times.insert(message, elapsed);
        self.code_block_timer = Instant::now();
    }
    pub fn finished(&mut self) -> HashMap<String, f64> {
        self.function_times
            .insert("total".to_string(), self.function_timer.elapsed().as_secs_f64());
        self.function_times.clone()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            function_timer: Instant::now(),
            code_block_timer: Instant::now(),
            function_times: Default::default(),
        }
    }
}

/// Counts of the chosen patterns, mergeable across workers
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CdapSummary {
    /// Household size -> Pattern -> Households
    pattern_counts: BTreeMap<usize, BTreeMap<String, u64>>,
    /// Person type -> Activity -> Persons
    activity_counts: EnumMap<PersonType, EnumMap<Activity, u64>>,
}

impl CdapSummary {
    /// Adds a household, if it has a pattern
    pub fn add_household(&mut self, household: &Household) {
        let pattern = match household.cdap_pattern() {
            Some(pattern) => pattern,
            None => return,
        };
        *self
            .pattern_counts
            .entry(household.size())
            .or_default()
            .entry(pattern.to_string())
            .or_default() += 1;
        for person in household.persons() {
            if let Some(activity) = person.activity {
                self.activity_counts[person.person_type()][activity] += 1;
            }
        }
    }

    pub fn household_count(&self) -> u64 {
        self.pattern_counts.values().flat_map(|patterns| patterns.values()).sum()
    }
    pub fn pattern_count(&self, household_size: usize, pattern: &str) -> u64 {
        self.pattern_counts
            .get(&household_size)
            .and_then(|patterns| patterns.get(pattern))
            .copied()
            .unwrap_or(0)
    }
    pub fn activity_count(&self, person_type: PersonType, activity: Activity) -> u64 {
        self.activity_counts[person_type][activity]
    }

    /// Logs the activity counts per person type, then the pattern counts per household size
    pub fn log_report(&self) {
        info!("Coordinated Daily Activity Pattern Model Results");
        let mut header = format!("{:<30}", "Person type");
        for activity in Activity::iter() {
            header += &format!("{:>10}", activity.code());
        }
        header += &format!("{:>10}", "Total");
        info!("{}", header);

        let mut column_totals: EnumMap<Activity, u64> = EnumMap::default();
        for person_type in PersonType::iter() {
            let mut row = format!("{:<30}", person_type.name());
            let mut row_total: u64 = 0;
            for (activity, count) in self.activity_counts[person_type].iter() {
                row += &format!("{:>10}", count.to_formatted_string(&NUMBER_FORMATTING));
                row_total += *count;
                column_totals[activity] += *count;
            }
            row += &format!("{:>10}", row_total.to_formatted_string(&NUMBER_FORMATTING));
            info!("{}", row);
        }
        let mut total_row = format!("{:<30}", "Total");
        for count in column_totals.values() {
            total_row += &format!("{:>10}", count.to_formatted_string(&NUMBER_FORMATTING));
        }
        let persons: u64 = column_totals.values().sum();
        total_row += &format!("{:>10}", persons.to_formatted_string(&NUMBER_FORMATTING));
        info!("{}", total_row);

        info!("{:<18}{:>10}", "Pattern", "Count");
        for patterns in self.pattern_counts.values() {
            for (pattern, count) in patterns {
                info!("{:<18}{:>10}", pattern, count.to_formatted_string(&NUMBER_FORMATTING));
            }
        }
        info!(
            "{:<18}{:>10}",
            "Total",
            self.household_count().to_formatted_string(&NUMBER_FORMATTING)
        );
    }

    pub fn dump_to_file(&self, filename: &str) -> Result<(), CdapError> {
        let file = File::create(filename)?;
        to_writer(BufWriter::new(file), self)?;
        info!("Dumped summary to file: {}", filename);
        Ok(())
    }
}

impl AddAssign for CdapSummary {
    fn add_assign(&mut self, rhs: Self) {
        for (size, patterns) in rhs.pattern_counts {
            let entry = self.pattern_counts.entry(size).or_default();
            for (pattern, count) in patterns {
                *entry.entry(pattern).or_default() += count;
            }
        }
        for (person_type, counts) in rhs.activity_counts.iter() {
            for (activity, count) in counts.iter() {
                self.activity_counts[person_type][activity] += *count;
            }
        }
    }
}

impl Display for CdapSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} households across {} household sizes",
            self.household_count().to_formatted_string(&NUMBER_FORMATTING),
            self.pattern_counts.len()
        )
    }
}
