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

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::Context;
use log::{info, warn};
use num_format::ToFormattedString;
use rayon::prelude::{IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator};

use load_household_data::HouseholdData;

use crate::config::{FailurePolicy, ModelConfig, NUMBER_FORMATTING};
use crate::error::CdapError;
use crate::model::CoordinatedDailyActivityPatternModel;
use crate::models::household::Household;
use crate::statistics::CdapSummary;

/// A household that could not be simulated
#[derive(Debug)]
pub struct HouseholdFailure {
    pub household_id: u32,
    pub error: CdapError,
}

#[derive(Debug)]
pub struct SimulationReport {
    pub summary: CdapSummary,
    /// Households that had their pattern chosen in this run
    pub simulated: usize,
    /// Households that already had a pattern from a checkpoint
    pub resumed: usize,
    pub failures: Vec<HouseholdFailure>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum HouseholdOutcome {
    Simulated,
    Resumed,
}

/// Runs the model over a whole population in parallel
pub struct Simulator {
    model: CoordinatedDailyActivityPatternModel,
    failure_policy: FailurePolicy,
    progress_interval: usize,
}

/// Initialisation Methods
impl Simulator {
    pub fn new(model: CoordinatedDailyActivityPatternModel, config: &ModelConfig) -> Simulator {
        Simulator {
            model,
            failure_policy: config.failure_policy,
            progress_interval: config.progress_interval.max(1),
        }
    }

    /// Builds the households, restoring the outcome of any household in the checkpoint
    pub fn build_population(data: &HouseholdData, base_seed: u64) -> anyhow::Result<Vec<Household>> {
        let start = Instant::now();
        let mut restored = 0;
        let mut households = Vec::with_capacity(data.households.len());
        for record in &data.households {
            let mut household = Household::from_record(record, base_seed)
                .context(format!("Building household {}", record.hh_id))?;
            if let Some(checkpoint) = data.checkpoint.get(&record.hh_id) {
                household
                    .restore(checkpoint, base_seed)
                    .context(format!("Restoring household {} from the checkpoint", record.hh_id))?;
                restored += 1;
            }
            households.push(household);
        }
        let unmatched = unmatched_checkpoints(data);
        if unmatched > 0 {
            warn!(
                "{} checkpoint rows belong to households missing from the population and were ignored",
                unmatched
            );
        }
        info!(
            "Built {} households ({} restored from the checkpoint) in {:.2} seconds",
            households.len().to_formatted_string(&NUMBER_FORMATTING),
            restored,
            start.elapsed().as_secs_f64()
        );
        Ok(households)
    }
}

/// Checkpoint rows whose household is not in the population
fn unmatched_checkpoints(data: &HouseholdData) -> usize {
    let household_ids: HashSet<u32> = data.households.iter().map(|record| record.hh_id).collect();
    data.checkpoint
        .keys()
        .filter(|hh_id| !household_ids.contains(*hh_id))
        .count()
}

impl Simulator {
    /// Chooses a pattern for every household that doesn't have one yet
    ///
    /// Every worker thread simulates with its own clone of the model
    pub fn run(&self, households: &mut [Household]) -> anyhow::Result<SimulationReport> {
        let start = Instant::now();
        let total = households.len();
        let completed = AtomicUsize::new(0);
        info!(
            "Simulating {} households on {} threads",
            total.to_formatted_string(&NUMBER_FORMATTING),
            rayon::current_num_threads()
        );

        let process = |model: &mut CoordinatedDailyActivityPatternModel,
                       household: &mut Household|
         -> Result<HouseholdOutcome, HouseholdFailure> {
            let outcome = if household.has_pattern() {
                HouseholdOutcome::Resumed
            } else {
                model.apply(household).map_err(|error| HouseholdFailure {
                    household_id: household.id(),
                    error,
                })?;
                HouseholdOutcome::Simulated
            };
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if done % self.progress_interval == 0 {
                info!(
                    "Finished {} of {} households in {:.2} seconds",
                    done.to_formatted_string(&NUMBER_FORMATTING),
                    total.to_formatted_string(&NUMBER_FORMATTING),
                    start.elapsed().as_secs_f64()
                );
            }
            Ok(outcome)
        };

        let results = households
            .par_iter_mut()
            .map_init(|| self.model.clone(), process);
        let (outcomes, failures) = match self.failure_policy {
            FailurePolicy::Abort => {
                let outcomes = results
                    .collect::<Result<Vec<HouseholdOutcome>, HouseholdFailure>>()
                    .map_err(|failure| {
                        anyhow::Error::new(failure.error)
                            .context(format!("Household {} failed, aborting the run", failure.household_id))
                    })?;
                (outcomes, Vec::new())
            }
            FailurePolicy::SkipHousehold => {
                let mut outcomes = Vec::with_capacity(total);
                let mut failures = Vec::new();
                for result in results.collect::<Vec<Result<HouseholdOutcome, HouseholdFailure>>>() {
                    match result {
                        Ok(outcome) => outcomes.push(outcome),
                        Err(failure) => {
                            warn!("Skipping household {}: {}", failure.household_id, failure.error);
                            failures.push(failure);
                        }
                    }
                }
                (outcomes, failures)
            }
        };

        let summary = households
            .par_iter()
            .fold(CdapSummary::default, |mut summary, household| {
                summary.add_household(household);
                summary
            })
            .reduce(CdapSummary::default, |mut a, b| {
                a += b;
                a
            });
        let simulated = outcomes
            .iter()
            .filter(|outcome| **outcome == HouseholdOutcome::Simulated)
            .count();
        let report = SimulationReport {
            summary,
            simulated,
            resumed: outcomes.len() - simulated,
            failures,
        };
        info!(
            "Simulated {} households, {} resumed, {} failed, in {:.2} seconds",
            report.simulated.to_formatted_string(&NUMBER_FORMATTING),
            report.resumed,
            report.failures.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use load_household_data::tables::checkpoint::CheckpointRecord;
    use load_household_data::tables::persons::PersonType;
    use load_household_data::HouseholdData;

    use crate::config::{FailurePolicy, ModelConfig};
    use crate::model::CoordinatedDailyActivityPatternModel;
    use crate::models::activity::{activity_utilities, ActivityUtilities, Availability};
    use crate::models::household::Household;
    use crate::simulator::{unmatched_checkpoints, Simulator};
    use crate::test_utilities::{child, household_of, individual_only, retiree, worker, FixedUtilities};
    use crate::utility::{CdapUtilityCalculators, UtilityCalculator, UtilityContext};

    /// Breaks a single household
    #[derive(Clone)]
    struct NanForHousehold(u32);

    impl UtilityCalculator for NanForHousehold {
        fn solve(&mut self, context: &UtilityContext, _availability: &Availability) -> ActivityUtilities {
            if context.household.id() == self.0 {
                activity_utilities(f64::NAN, 0.0, 0.0)
            } else {
                activity_utilities(0.5, 0.0, -0.5)
            }
        }
        fn boxed_clone(&self) -> Box<dyn UtilityCalculator> {
            Box::new(self.clone())
        }
    }

    fn population() -> Vec<Household> {
        (1..=60)
            .map(|id| {
                let size = (id % 8 + 1) as u8;
                let persons = (1..=size)
                    .map(|num| match num % 3 {
                        0 => child(num, 4 + num, PersonType::StudentNonDriving),
                        1 => worker(num, 30 + num),
                        _ => retiree(num, 66 + num),
                    })
                    .collect();
                household_of(id, persons)
            })
            .collect()
    }

    fn model(config: &ModelConfig) -> CoordinatedDailyActivityPatternModel {
        CoordinatedDailyActivityPatternModel::new(individual_only(activity_utilities(1.0, 0.2, -0.3)), config).unwrap()
    }

    fn config(failure_policy: FailurePolicy) -> ModelConfig {
        let mut config = ModelConfig::default();
        config.failure_policy = failure_policy;
        config.progress_interval = 7;
        config
    }

    #[test]
    fn every_household_gets_a_pattern() {
        let config = config(FailurePolicy::Abort);
        let simulator = Simulator::new(model(&config), &config);
        let mut households = population();
        let report = simulator.run(&mut households).unwrap();
        assert_eq!(report.simulated, 60);
        assert_eq!(report.resumed, 0);
        assert!(report.failures.is_empty());
        assert_eq!(report.summary.household_count(), 60);
        for household in &households {
            assert_eq!(household.cdap_pattern().unwrap().len(), household.size());
        }
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let config = config(FailurePolicy::Abort);
        let simulator = Simulator::new(model(&config), &config);
        let mut parallel = population();
        simulator.run(&mut parallel).unwrap();

        let mut sequential_model = model(&config);
        let mut sequential = population();
        for household in sequential.iter_mut() {
            sequential_model.apply(household).unwrap();
        }
        for (first, second) in parallel.iter().zip(&sequential) {
            assert_eq!(first.cdap_pattern(), second.cdap_pattern());
            assert_eq!(first.cdap_random_count(), second.cdap_random_count());
        }
    }

    #[test]
    fn checkpointed_households_are_not_rerun() {
        let config = config(FailurePolicy::Abort);
        let simulator = Simulator::new(model(&config), &config);
        let mut households = population();
        let checkpoint = CheckpointRecord {
            hh_id: 3,
            cdap_pattern: "HHHH".to_string(),
            cdap_random_count: 9,
        };
        households[2].restore(&checkpoint, 0).unwrap();
        let report = simulator.run(&mut households).unwrap();
        assert_eq!(report.resumed, 1);
        assert_eq!(report.simulated, 59);
        assert_eq!(households[2].cdap_pattern(), Some("HHHH"));
        assert_eq!(households[2].cdap_random_count(), 9);
    }

    fn breaks_household_five(config: &ModelConfig) -> CoordinatedDailyActivityPatternModel {
        let zero: Box<dyn UtilityCalculator> = Box::new(FixedUtilities::constant(activity_utilities(0.0, 0.0, 0.0)));
        CoordinatedDailyActivityPatternModel::new(
            CdapUtilityCalculators::new(Box::new(NanForHousehold(5)), zero.clone(), zero.clone(), zero),
            config,
        )
        .unwrap()
    }

    #[test]
    fn failures_abort_by_default() {
        let config = config(FailurePolicy::Abort);
        let simulator = Simulator::new(breaks_household_five(&config), &config);
        let mut households = population();
        assert!(simulator.run(&mut households).is_err());
    }

    #[test]
    fn failures_can_be_skipped() {
        let config = config(FailurePolicy::SkipHousehold);
        let simulator = Simulator::new(breaks_household_five(&config), &config);
        let mut households = population();
        let report = simulator.run(&mut households).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].household_id, 5);
        assert_eq!(report.simulated, 59);
        assert!(!households[4].has_pattern());
        assert_eq!(report.summary.household_count(), 59);
    }

    #[test]
    fn population_is_built_from_tables() {
        let households = HouseholdData::read_population(
            "hh_id\n1\n2\n".as_bytes(),
            "hh_id,person_num,age,person_type,employment_category,student_category\n\
             1,1,35,1,1,3\n\
             2,1,70,5,3,3\n\
             2,2,68,5,3,3\n"
                .as_bytes(),
        )
        .unwrap();
        let mut checkpoint = HashMap::new();
        checkpoint.insert(
            2,
            CheckpointRecord {
                hh_id: 2,
                cdap_pattern: "NH".to_string(),
                cdap_random_count: 1,
            },
        );
        let data = HouseholdData { households, checkpoint };
        let population = Simulator::build_population(&data, 0).unwrap();
        assert_eq!(population.len(), 2);
        assert!(!population[0].has_pattern());
        assert_eq!(population[1].cdap_pattern(), Some("NH"));
    }

    #[test]
    fn checkpoint_rows_without_a_household_are_ignored() {
        let households = HouseholdData::read_population(
            "hh_id\n1\n".as_bytes(),
            "hh_id,person_num,age,person_type,employment_category,student_category\n\
             1,1,35,1,1,3\n"
                .as_bytes(),
        )
        .unwrap();
        let mut checkpoint = HashMap::new();
        for hh_id in [1, 8, 9].iter() {
            checkpoint.insert(
                *hh_id,
                CheckpointRecord {
                    hh_id: *hh_id,
                    cdap_pattern: "M".to_string(),
                    cdap_random_count: 1,
                },
            );
        }
        let data = HouseholdData { households, checkpoint };
        assert_eq!(unmatched_checkpoints(&data), 2);
        let population = Simulator::build_population(&data, 0).unwrap();
        assert_eq!(population.len(), 1);
        assert_eq!(population[0].cdap_pattern(), Some("M"));
    }
}
