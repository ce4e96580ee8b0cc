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

use log::info;

use crate::alternatives::AlternativeSet;
use crate::config::{NEGLIGIBLE_UTILITY_THRESHOLD, UNAVAILABLE_UTILITY_THRESHOLD};
use crate::error::CdapError;
use crate::random::HouseholdRandom;

/// The alternative drawn for a household
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceOutcome {
    /// Index into the alternative set
    pub index: usize,
    pub random_number: f64,
}

fn exponentiated_utility(utility: f64) -> f64 {
    if utility < UNAVAILABLE_UTILITY_THRESHOLD || utility < NEGLIGIBLE_UTILITY_THRESHOLD {
        0.0
    } else {
        utility.exp()
    }
}

/// Multinomial logit probabilities, in the order of the alternative set
///
/// All zero if no alternative has any weight
pub fn logit_probabilities(alternatives: &AlternativeSet) -> Vec<f64> {
    let weights: Vec<f64> = alternatives
        .iter()
        .map(|alternative| exponentiated_utility(alternative.utility))
        .collect();
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        weights.iter().map(|weight| weight / total).collect()
    } else {
        vec![0.0; weights.len()]
    }
}

/// Returns the first alternative whose cumulative probability reaches the random number
///
/// Alternatives without probability are never chosen. If rounding leaves the random number above
/// the final cumulative probability, the last alternative with probability is returned
pub fn select_with_probabilities(probabilities: &[f64], random_number: f64) -> Option<usize> {
    let mut cumulative: f64 = 0.0;
    let mut last_available = None;
    for (index, probability) in probabilities.iter().enumerate() {
        if *probability <= 0.0 {
            continue;
        }
        cumulative += *probability;
        last_available = Some(index);
        if random_number <= cumulative {
            return Some(index);
        }
    }
    last_available
}

/// Draws one alternative, consuming exactly one value from the household's stream
pub fn choose_alternative(
    household_id: u32,
    alternatives: &AlternativeSet,
    random: &mut HouseholdRandom,
    trace: bool,
) -> Result<ChoiceOutcome, CdapError> {
    if let Some(alternative) = alternatives
        .iter()
        .find(|alternative| exponentiated_utility(alternative.utility).is_infinite())
    {
        return Err(CdapError::InvalidUtility {
            household_id,
            alternative: alternative.name().to_string(),
            utility: alternative.utility,
        });
    }
    let probabilities = logit_probabilities(alternatives);
    if trace {
        info!(
            target: "cdap",
            "{:<12}{:>12}{:>12}{:>12}",
            "Alternative", "Utility", "Probability", "Cumulative"
        );
        let mut cumulative: f64 = 0.0;
        for (alternative, probability) in alternatives.iter().zip(&probabilities) {
            cumulative += *probability;
            info!(
                target: "cdap",
                "{:<12}{:>12.4}{:>12.6}{:>12.6}",
                alternative.name(),
                alternative.utility,
                probability,
                cumulative
            );
        }
    }

    let random_number = random.draw();
    if trace {
        info!(target: "cdap", "randomNumber = {}", random_number);
    }
    let index = select_with_probabilities(&probabilities, random_number)
        .ok_or(CdapError::NoAvailableAlternative { household_id })?;
    Ok(ChoiceOutcome {
        index,
        random_number,
    })
}
