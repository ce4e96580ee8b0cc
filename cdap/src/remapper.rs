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

use crate::error::CdapError;
use crate::models::activity::Activity;
use crate::selector::ModeledPersons;

/// Places each activity, given in modeled order, at its person's original slot
pub fn remap_to_original_order(
    household_id: u32,
    modeled: &ModeledPersons,
    activities: &[Activity],
) -> Result<Vec<Activity>, CdapError> {
    let order = modeled.order();
    if activities.len() != order.len() {
        return Err(CdapError::invalid_household(
            household_id,
            format!("{} activities for {} persons", activities.len(), order.len()),
        ));
    }
    let mut original: Vec<Option<Activity>> = vec![None; order.len()];
    for (slot, activity) in order.iter().zip(activities) {
        match original.get_mut(*slot) {
            Some(entry) if entry.is_none() => *entry = Some(*activity),
            _ => {
                return Err(CdapError::invalid_household(
                    household_id,
                    format!("person slot {} is assigned twice or out of range", slot + 1),
                ))
            }
        }
    }
    original
        .into_iter()
        .enumerate()
        .map(|(slot, activity)| {
            activity.ok_or_else(|| {
                CdapError::invalid_household(household_id, format!("person slot {} has no activity", slot + 1))
            })
        })
        .collect()
}
