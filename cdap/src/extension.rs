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

use enum_map::EnumMap;
use log::{debug, info};
use serde::Serialize;
use strum::IntoEnumIterator;

use load_household_data::tables::persons::PersonType;

use crate::config::{ActivityProportions, ExtraMemberModelConfig, ModelConfig};
use crate::error::CdapError;
use crate::models::activity::Activity;
use crate::models::household::Household;
use crate::models::person::Person;
use crate::selector::ModeledPersons;

/// The segment an extra household member falls into
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ExtraMemberSegment {
    Worker,
    Student,
    Other,
}

/// What is known about an extra member once the modeled persons have their activities
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExtraMemberContext {
    pub segment: ExtraMemberSegment,
    /// Only evaluated for workers
    pub mandatory_pattern_in_household: bool,
    /// Only evaluated for adults
    pub preschool_child_home_without_adult: bool,
}

impl ExtraMemberContext {
    pub fn new(person: &Person, modeled_persons: &[&Person], chosen: &[Activity]) -> ExtraMemberContext {
        let segment = if person.is_worker() {
            ExtraMemberSegment::Worker
        } else if person.is_student_driving() || person.is_student_non_driving() {
            ExtraMemberSegment::Student
        } else {
            ExtraMemberSegment::Other
        };
        let mandatory_pattern_in_household =
            segment == ExtraMemberSegment::Worker && chosen.contains(&Activity::Mandatory);

        let mut preschool_child_home_without_adult = false;
        if person.is_adult() {
            let mut preschool_child_at_home = false;
            let mut adult_at_home = false;
            for (modeled, activity) in modeled_persons.iter().zip(chosen) {
                if *activity == Activity::Home {
                    preschool_child_at_home |= modeled.is_preschool_child();
                    adult_at_home |= modeled.is_adult();
                }
            }
            preschool_child_home_without_adult = preschool_child_at_home && !adult_at_home;
        }
        ExtraMemberContext {
            segment,
            mandatory_pattern_in_household,
            preschool_child_home_without_adult,
        }
    }
}

/// Assigns activities to the members of a household beyond the modeled five
#[derive(Clone, Debug)]
pub enum ExtraMemberModel {
    /// Every extra member is Non-Mandatory, without consuming any draws
    NonMandatoryStub,
    /// One draw per extra member against the cumulative proportions of their person type
    FixedProportions { cumulative: ActivityProportions },
}

impl ExtraMemberModel {
    pub fn from_config(config: &ModelConfig) -> ExtraMemberModel {
        match config.extra_member_model {
            ExtraMemberModelConfig::NonMandatoryStub => ExtraMemberModel::NonMandatoryStub,
            ExtraMemberModelConfig::FixedProportions => ExtraMemberModel::FixedProportions {
                cumulative: cumulative_proportions(&config.fixed_proportions),
            },
        }
    }

    /// Returns one activity per person in the remainder, in remainder order
    pub fn assign(
        &self,
        household: &mut Household,
        modeled: &ModeledPersons,
        chosen: &[Activity],
        trace: bool,
    ) -> Result<Vec<Activity>, CdapError> {
        if chosen.len() != modeled.modeled_size() {
            return Err(CdapError::invalid_household(
                household.id(),
                format!(
                    "chosen pattern has {} activities for {} modeled persons",
                    chosen.len(),
                    modeled.modeled_size()
                ),
            ));
        }
        let remainder = modeled.remainder();
        match self {
            ExtraMemberModel::NonMandatoryStub => {
                let modeled_persons = modeled.modeled_persons(household)?;
                let mut assigned = Vec::with_capacity(remainder.len());
                for slot in remainder {
                    let person = household.person(*slot)?;
                    let context = ExtraMemberContext::new(person, &modeled_persons, chosen);
                    if trace {
                        info!(
                            target: "cdap",
                            "Extra member {} of household {}: {:?}",
                            person.person_num(),
                            household.id(),
                            context
                        );
                    }
                    // TODO: replace with a distribution segmented on the context once one is estimated
                    assigned.push(Activity::NonMandatory);
                }
                Ok(assigned)
            }
            ExtraMemberModel::FixedProportions { cumulative } => {
                let person_types = remainder
                    .iter()
                    .map(|slot| household.person(*slot).map(Person::person_type))
                    .collect::<Result<Vec<PersonType>, CdapError>>()?;
                let random = household.random_mut();
                let assigned: Vec<Activity> = person_types
                    .iter()
                    .map(|person_type| monte_carlo_selection(&cumulative[*person_type], random.draw()))
                    .collect();
                debug!("Extra members drawn from fixed proportions: {:?}", assigned);
                Ok(assigned)
            }
        }
    }
}

/// Any shortfall from 1 goes to Mandatory, so the final cumulative value is 1
pub fn cumulative_proportions(proportions: &ActivityProportions) -> ActivityProportions {
    let mut cumulative = proportions.clone();
    for (_, row) in cumulative.iter_mut() {
        let total: f64 = row.values().sum();
        row[Activity::Mandatory] += 1.0 - total;
        let mut running: f64 = 0.0;
        for activity in Activity::iter() {
            running += row[activity];
            row[activity] = running;
        }
    }
    cumulative
}

/// The first activity whose cumulative proportion reaches the random number
pub fn monte_carlo_selection(cumulative: &EnumMap<Activity, f64>, random_number: f64) -> Activity {
    Activity::iter()
        .find(|activity| cumulative[*activity] >= random_number)
        .unwrap_or(Activity::Home)
}

#[cfg(test)]
mod tests {
    use load_household_data::tables::persons::PersonType;

    use crate::config::{ExtraMemberModelConfig, ModelConfig};
    use crate::extension::{
        cumulative_proportions, monte_carlo_selection, ExtraMemberContext, ExtraMemberModel, ExtraMemberSegment,
    };
    use crate::models::activity::{activity_utilities, Activity};
    use crate::models::household::Household;
    use crate::selector::ModeledPersons;
    use crate::test_utilities::{child, household_of, part_time_worker, pattern, retiree, worker};

    fn seven_person_household() -> Household {
        household_of(
            31,
            vec![
                worker(1, 45),
                worker(2, 44),
                child(3, 2, PersonType::Preschool),
                child(4, 8, PersonType::StudentNonDriving),
                child(5, 12, PersonType::StudentNonDriving),
                retiree(6, 75),
                part_time_worker(7, 20),
            ],
        )
    }

    #[test]
    fn stub_assigns_non_mandatory_without_drawing() {
        let mut household = seven_person_household();
        let modeled = ModeledPersons::select(&mut household);
        let assigned = ExtraMemberModel::NonMandatoryStub
            .assign(&mut household, &modeled, &pattern("MMHMM"), false)
            .unwrap();
        assert_eq!(assigned, vec![Activity::NonMandatory, Activity::NonMandatory]);
        assert_eq!(household.draw_count(), 0);
    }

    #[test]
    fn context_flags() {
        let household = seven_person_household();
        let persons = household.persons();
        let modeled: Vec<_> = persons[..5].iter().collect();

        let extra_worker = ExtraMemberContext::new(&persons[6], &modeled, &pattern("MMHNN"));
        assert_eq!(extra_worker.segment, ExtraMemberSegment::Worker);
        assert!(extra_worker.mandatory_pattern_in_household);
        assert!(extra_worker.preschool_child_home_without_adult);

        let extra_retiree = ExtraMemberContext::new(&persons[5], &modeled, &pattern("MHHNN"));
        assert_eq!(extra_retiree.segment, ExtraMemberSegment::Other);
        assert!(!extra_retiree.mandatory_pattern_in_household);
        assert!(!extra_retiree.preschool_child_home_without_adult);

        let extra_child = ExtraMemberContext::new(&persons[4], &modeled[..4], &pattern("MMHN"));
        assert_eq!(extra_child.segment, ExtraMemberSegment::Student);
        assert!(!extra_child.preschool_child_home_without_adult);
    }

    #[test]
    fn shortfall_goes_to_mandatory() {
        let mut proportions = ModelConfig::default().fixed_proportions;
        proportions[PersonType::Retired] = activity_utilities(0.5, 0.2, 0.2);
        let cumulative = cumulative_proportions(&proportions);
        let retired = &cumulative[PersonType::Retired];
        assert!((retired[Activity::Mandatory] - 0.6).abs() < 1e-9);
        assert!((retired[Activity::NonMandatory] - 0.8).abs() < 1e-9);
        assert!((retired[Activity::Home] - 1.0).abs() < 1e-9);

        assert_eq!(monte_carlo_selection(retired, 0.59), Activity::Mandatory);
        assert_eq!(monte_carlo_selection(retired, 0.61), Activity::NonMandatory);
        assert_eq!(monte_carlo_selection(retired, 0.99), Activity::Home);
    }

    #[test]
    fn fixed_proportions_draw_once_per_extra_member() {
        let mut config = ModelConfig::default();
        config.extra_member_model = ExtraMemberModelConfig::FixedProportions;
        config.fixed_proportions[PersonType::Retired] = activity_utilities(0.0, 0.0, 1.0);
        config.fixed_proportions[PersonType::PartTimeWorker] = activity_utilities(1.0, 0.0, 0.0);
        let model = ExtraMemberModel::from_config(&config);

        let mut household = seven_person_household();
        let modeled = ModeledPersons::select(&mut household);
        let draws_before = household.draw_count();
        let assigned = model
            .assign(&mut household, &modeled, &pattern("MMHMM"), false)
            .unwrap();
        assert_eq!(assigned, vec![Activity::Home, Activity::Mandatory]);
        assert_eq!(household.draw_count(), draws_before + 2);
    }

    #[test]
    fn chosen_pattern_must_cover_modeled_persons() {
        let mut household = seven_person_household();
        let modeled = ModeledPersons::select(&mut household);
        assert!(ExtraMemberModel::NonMandatoryStub
            .assign(&mut household, &modeled, &pattern("MM"), false)
            .is_err());
    }
}
