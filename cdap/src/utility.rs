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

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use load_household_data::tables::persons::PersonType;

use crate::config::UNAVAILABLE_UTILITY;
use crate::error::CdapError;
use crate::models::activity::{ActivityUtilities, Availability};
use crate::models::household::Household;
use crate::models::person::Person;

/// The combination of modeled persons a utility is evaluated for
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum UtilitySegment {
    OnePerson,
    TwoPeople,
    ThreePeople,
    AllMembers,
}

impl Display for UtilitySegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The attributes a calculator is evaluated against
pub struct UtilityContext<'a> {
    pub household: &'a Household,
    /// The persons covered by this evaluation, in modeled order
    ///
    /// Every modeled person for the all members segment
    pub persons: Vec<&'a Person>,
    /// Number of persons in the joint choice, at most five
    pub modeled_size: usize,
}

/// Maps a set of attributes onto a utility per activity
///
/// Implementations may hold scratch state in `solve`, so every worker owns its own handles
pub trait UtilityCalculator: Send + Sync {
    fn solve(&mut self, context: &UtilityContext, availability: &Availability) -> ActivityUtilities;
    fn boxed_clone(&self) -> Box<dyn UtilityCalculator>;
}

impl Clone for Box<dyn UtilityCalculator> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// The four calculators the joint utility is composed from
#[derive(Clone)]
pub struct CdapUtilityCalculators {
    individual: Box<dyn UtilityCalculator>,
    pair: Box<dyn UtilityCalculator>,
    triple: Box<dyn UtilityCalculator>,
    all_members: Box<dyn UtilityCalculator>,
}

impl CdapUtilityCalculators {
    pub fn new(
        individual: Box<dyn UtilityCalculator>,
        pair: Box<dyn UtilityCalculator>,
        triple: Box<dyn UtilityCalculator>,
        all_members: Box<dyn UtilityCalculator>,
    ) -> CdapUtilityCalculators {
        CdapUtilityCalculators {
            individual,
            pair,
            triple,
            all_members,
        }
    }
    pub fn get_mut(&mut self, segment: UtilitySegment) -> &mut dyn UtilityCalculator {
        match segment {
            UtilitySegment::OnePerson => self.individual.as_mut(),
            UtilitySegment::TwoPeople => self.pair.as_mut(),
            UtilitySegment::ThreePeople => self.triple.as_mut(),
            UtilitySegment::AllMembers => self.all_members.as_mut(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PairUtility {
    pub first: PersonType,
    pub second: PersonType,
    pub utilities: ActivityUtilities,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllMembersUtility {
    pub modeled_size: usize,
    pub utilities: ActivityUtilities,
}

/// A utility table keyed on person types, read from JSON
///
/// Combinations that are not listed contribute nothing
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonTypeUtilityTable {
    pub individual: HashMap<PersonType, ActivityUtilities>,
    pub pairs: Vec<PairUtility>,
    pub triple: ActivityUtilities,
    pub all_members: Vec<AllMembersUtility>,
}

impl PersonTypeUtilityTable {
    pub fn load_from_file(filename: &str) -> Result<PersonTypeUtilityTable, CdapError> {
        let file = File::open(filename).map_err(|e| {
            CdapError::configuration(format!("Cannot open utility table '{}': {}", filename, e))
        })?;
        let table: PersonTypeUtilityTable = serde_json::from_reader(BufReader::new(file))?;
        info!(
            "Loaded utility table from '{}' ({} person types, {} pairs)",
            filename,
            table.individual.len(),
            table.pairs.len()
        );
        Ok(table)
    }

    fn pair_utilities(&self, first: PersonType, second: PersonType) -> Option<&ActivityUtilities> {
        self.pairs
            .iter()
            .find(|pair| {
                (pair.first == first && pair.second == second)
                    || (pair.first == second && pair.second == first)
            })
            .map(|pair| &pair.utilities)
    }

    fn lookup(&self, segment: UtilitySegment, context: &UtilityContext) -> ActivityUtilities {
        let found = match segment {
            UtilitySegment::OnePerson => context
                .persons
                .first()
                .and_then(|person| self.individual.get(&person.person_type())),
            UtilitySegment::TwoPeople => match context.persons.as_slice() {
                [first, second] => self.pair_utilities(first.person_type(), second.person_type()),
                _ => None,
            },
            UtilitySegment::ThreePeople => Some(&self.triple),
            UtilitySegment::AllMembers => self
                .all_members
                .iter()
                .find(|entry| entry.modeled_size == context.modeled_size)
                .map(|entry| &entry.utilities),
        };
        found.copied().unwrap_or_default()
    }

    /// Builds the four calculators, sharing this table
    pub fn into_calculators(self) -> CdapUtilityCalculators {
        let table = Arc::new(self);
        let calculator = |segment| -> Box<dyn UtilityCalculator> {
            Box::new(TableUtilityCalculator {
                table: table.clone(),
                segment,
            })
        };
        CdapUtilityCalculators::new(
            calculator(UtilitySegment::OnePerson),
            calculator(UtilitySegment::TwoPeople),
            calculator(UtilitySegment::ThreePeople),
            calculator(UtilitySegment::AllMembers),
        )
    }
}

#[derive(Clone)]
struct TableUtilityCalculator {
    table: Arc<PersonTypeUtilityTable>,
    segment: UtilitySegment,
}

impl UtilityCalculator for TableUtilityCalculator {
    fn solve(&mut self, context: &UtilityContext, availability: &Availability) -> ActivityUtilities {
        let mut utilities = self.table.lookup(self.segment, context);
        for (activity, available) in availability.iter() {
            if !*available {
                utilities[activity] = UNAVAILABLE_UTILITY;
            }
        }
        utilities
    }

    fn boxed_clone(&self) -> Box<dyn UtilityCalculator> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use load_household_data::tables::persons::PersonType;

    use crate::config::UNAVAILABLE_UTILITY;
    use crate::models::activity::{activity_utilities, all_available, Activity};
    use crate::test_utilities::{child, household_of, worker};
    use crate::utility::{
        AllMembersUtility, PairUtility, PersonTypeUtilityTable, UtilityContext, UtilitySegment,
    };

    fn table() -> PersonTypeUtilityTable {
        let mut table = PersonTypeUtilityTable::default();
        table
            .individual
            .insert(PersonType::FullTimeWorker, activity_utilities(2.0, 0.5, 0.0));
        table.pairs.push(PairUtility {
            first: PersonType::Preschool,
            second: PersonType::FullTimeWorker,
            utilities: activity_utilities(0.0, 0.3, 1.2),
        });
        table.all_members.push(AllMembersUtility {
            modeled_size: 2,
            utilities: activity_utilities(-0.4, 0.0, 0.1),
        });
        table
    }

    #[test]
    fn pairs_are_unordered_and_missing_entries_are_zero() {
        let household = household_of(1, vec![worker(1, 40), child(2, 3, PersonType::Preschool)]);
        let mut calculators = table().into_calculators();
        let persons = household.persons();

        let context = UtilityContext {
            household: &household,
            persons: vec![&persons[0], &persons[1]],
            modeled_size: 2,
        };
        let pair = calculators
            .get_mut(UtilitySegment::TwoPeople)
            .solve(&context, &all_available());
        assert_eq!(pair[Activity::Home], 1.2);

        let context = UtilityContext {
            household: &household,
            persons: vec![&persons[1]],
            modeled_size: 2,
        };
        let individual = calculators
            .get_mut(UtilitySegment::OnePerson)
            .solve(&context, &all_available());
        assert_eq!(individual, activity_utilities(0.0, 0.0, 0.0));
    }

    #[test]
    fn unavailable_activities_are_masked() {
        let household = household_of(1, vec![worker(1, 40)]);
        let mut calculators = table().into_calculators();
        let context = UtilityContext {
            household: &household,
            persons: vec![&household.persons()[0]],
            modeled_size: 1,
        };
        let mut availability = all_available();
        availability[Activity::Mandatory] = false;
        let utilities = calculators
            .get_mut(UtilitySegment::OnePerson)
            .solve(&context, &availability);
        assert_eq!(utilities[Activity::Mandatory], UNAVAILABLE_UTILITY);
        assert_eq!(utilities[Activity::NonMandatory], 0.5);
    }

    #[test]
    fn table_reads_from_json() {
        let json = r#"{
            "individual": {"Retired": {"Mandatory": -3.0, "NonMandatory": 1.0, "Home": 0.0}},
            "all_members": [{"modeled_size": 3, "utilities": {"Mandatory": 0.0, "NonMandatory": 0.0, "Home": 0.7}}]
        }"#;
        let table: PersonTypeUtilityTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.individual[&PersonType::Retired][Activity::Mandatory], -3.0);
        assert_eq!(table.all_members[0].utilities[Activity::Home], 0.7);
        assert!(table.pairs.is_empty());
    }
}
