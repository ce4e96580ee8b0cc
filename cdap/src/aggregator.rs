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
//! Composes the per person, pair, triple and whole household utilities into one utility per alternative

use log::info;

use crate::alternatives::AlternativeSet;
use crate::error::CdapError;
use crate::models::activity::{all_available, ActivityUtilities};
use crate::models::household::Household;
use crate::selector::ModeledPersons;
use crate::utility::{CdapUtilityCalculators, UtilityContext, UtilitySegment};

/// Adds the utilities to every alternative where all the given positions share an activity
fn add_where_shared(alternatives: &mut AlternativeSet, positions: &[usize], utilities: &ActivityUtilities) {
    for alternative in alternatives.iter_mut() {
        if let Some(activity) = alternative.shared_activity(positions) {
            alternative.utility += utilities[activity];
        }
    }
}

fn trace_segment(segment: UtilitySegment, positions: &[usize], utilities: &ActivityUtilities) {
    let mut people: Vec<String> = if segment == UtilitySegment::AllMembers {
        Vec::new()
    } else {
        positions.iter().map(|position| (position + 1).to_string()).collect()
    };
    people.resize(3, "--".to_string());
    let values: String = utilities.values().map(|utility| format!("{:>10.4}", utility)).collect();
    info!(
        target: "cdap",
        "{:<30}{:>9}{:>9}{:>9}{}",
        segment.to_string(),
        people[0],
        people[1],
        people[2],
        values
    );
}

/// Fills in the utility of every alternative for this household
///
/// Pair, triple and all member utilities only count towards alternatives where the persons involved share the same activity
pub fn aggregate_utilities(
    household: &Household,
    modeled: &ModeledPersons,
    calculators: &mut CdapUtilityCalculators,
    alternatives: &mut AlternativeSet,
    trace: bool,
) -> Result<(), CdapError> {
    let modeled_size = modeled.modeled_size();
    if alternatives.modeled_size() != modeled_size {
        return Err(CdapError::configuration(format!(
            "Alternatives for {} persons used for household {} with {} modeled persons",
            alternatives.modeled_size(),
            household.id(),
            modeled_size
        )));
    }
    alternatives.reset_utilities();
    let persons = modeled.modeled_persons(household)?;
    let availability = all_available();

    if trace {
        info!(target: "cdap", "CDAP Model: Debug Statement for Household ID: {}", household.id());
        info!(
            target: "cdap",
            "{:<30}{:>9}{:>9}{:>9}{:>10}{:>10}{:>10}",
            "Utility Segment", "PersonA", "PersonB", "PersonC", "M util", "N util", "H util"
        );
    }

    let mut solve = |segment: UtilitySegment, positions: &[usize]| {
        let context = UtilityContext {
            household,
            persons: positions.iter().map(|position| persons[*position]).collect(),
            modeled_size,
        };
        let utilities = calculators.get_mut(segment).solve(&context, &availability);
        if trace {
            trace_segment(segment, positions, &utilities);
        }
        utilities
    };

    for first in 0..modeled_size {
        let utilities = solve(UtilitySegment::OnePerson, &[first]);
        add_where_shared(alternatives, &[first], &utilities);

        for second in first + 1..modeled_size {
            let utilities = solve(UtilitySegment::TwoPeople, &[first, second]);
            add_where_shared(alternatives, &[first, second], &utilities);

            for third in second + 1..modeled_size {
                let utilities = solve(UtilitySegment::ThreePeople, &[first, second, third]);
                add_where_shared(alternatives, &[first, second, third], &utilities);
            }
        }
    }

    // Evaluated once for the whole household
    let everyone: Vec<usize> = (0..modeled_size).collect();
    let utilities = solve(UtilitySegment::AllMembers, everyone.as_slice());
    add_where_shared(alternatives, &everyone, &utilities);

    if let Some(alternative) = alternatives.iter().find(|alternative| !alternative.utility.is_finite()) {
        return Err(CdapError::InvalidUtility {
            household_id: household.id(),
            alternative: alternative.name().to_string(),
            utility: alternative.utility,
        });
    }
    Ok(())
}
