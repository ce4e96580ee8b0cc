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
use std::sync::Arc;

use log::info;

use crate::aggregator::aggregate_utilities;
use crate::alternatives::AlternativeSets;
use crate::chooser::choose_alternative;
use crate::config::ModelConfig;
use crate::error::CdapError;
use crate::extension::ExtraMemberModel;
use crate::models::activity::{pattern_to_string, Activity};
use crate::models::household::Household;
use crate::remapper::remap_to_original_order;
use crate::selector::ModeledPersons;
use crate::utility::CdapUtilityCalculators;

/// Chooses the joint daily activity pattern of a household
///
/// Each instance owns its alternatives and calculator handles, so parallel workers need a clone each
#[derive(Clone)]
pub struct CoordinatedDailyActivityPatternModel {
    calculators: CdapUtilityCalculators,
    alternative_sets: AlternativeSets,
    extra_member_model: ExtraMemberModel,
    trace_households: Arc<HashSet<u32>>,
}

impl CoordinatedDailyActivityPatternModel {
    pub fn new(
        calculators: CdapUtilityCalculators,
        config: &ModelConfig,
    ) -> Result<CoordinatedDailyActivityPatternModel, CdapError> {
        config.validate()?;
        Ok(CoordinatedDailyActivityPatternModel {
            calculators,
            alternative_sets: AlternativeSets::new()?,
            extra_member_model: ExtraMemberModel::from_config(config),
            trace_households: Arc::new(config.trace_households.iter().copied().collect()),
        })
    }

    pub fn is_traced(&self, household_id: u32) -> bool {
        self.trace_households.contains(&household_id)
    }

    /// Returns the chosen activity of every person, in original person order
    pub fn choose_pattern(&mut self, household: &mut Household) -> Result<Vec<Activity>, CdapError> {
        let trace = self.is_traced(household.id());
        if trace {
            info!(target: "cdap", "Household before CDAP:\n{}", household);
        }
        let modeled = ModeledPersons::select(household);

        let alternatives = self.alternative_sets.get_mut(modeled.modeled_size())?;
        aggregate_utilities(household, &modeled, &mut self.calculators, alternatives, trace)?;
        let outcome = choose_alternative(household.id(), alternatives, household.random_mut(), trace)?;
        let chosen = alternatives
            .get(outcome.index)
            .map(|alternative| alternative.pattern().to_vec())
            .ok_or(CdapError::NoAvailableAlternative {
                household_id: household.id(),
            })?;

        let mut in_modeled_order = chosen.clone();
        if !modeled.remainder().is_empty() {
            let extra = self
                .extra_member_model
                .assign(household, &modeled, &chosen, trace)?;
            in_modeled_order.extend(extra);
        }
        let pattern = remap_to_original_order(household.id(), &modeled, &in_modeled_order)?;
        if trace {
            trace_chosen_pattern(household, &modeled, &pattern);
        }
        Ok(pattern)
    }

    /// Chooses the pattern and stores it on the household and its persons, along with the draw count
    pub fn apply(&mut self, household: &mut Household) -> Result<(), CdapError> {
        let pattern = self.choose_pattern(household)?;
        household.set_pattern(&pattern)
    }
}

/// Persons that were part of the joint choice are marked with `*`
fn trace_chosen_pattern(household: &Household, modeled: &ModeledPersons, pattern: &[Activity]) {
    info!(
        target: "cdap",
        "Chosen pattern for household {}: {}",
        household.id(),
        pattern_to_string(pattern)
    );
    info!(target: "cdap", "{:>8}{:>8}{:>10}", "Person", "Type", "Activity");
    for (slot, (person, activity)) in household.persons().iter().zip(pattern).enumerate() {
        let marker = if modeled.modeled().contains(&slot) { "*" } else { "" };
        info!(
            target: "cdap",
            "{:>8}{:>8}{:>10}{}",
            person.person_num(),
            person.person_type().abbreviation(),
            activity.code(),
            marker
        );
    }
}
