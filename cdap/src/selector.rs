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

use log::debug;

use crate::config::MAX_MODELED_SIZE;
use crate::error::CdapError;
use crate::models::household::Household;
use crate::models::person::Person;
use crate::random::HouseholdRandom;

/// The two worker slots come first among the modeled five
const WORKER_SLOTS: usize = 2;

/// The order the persons of a household are modeled in
///
/// Households of up to five keep their original order. Larger households get their five
/// modeled persons first, followed by everyone else in original order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeledPersons {
    household_id: u32,
    /// 0-based original slots
    order: Vec<usize>,
    modeled_size: usize,
}

impl ModeledPersons {
    /// Picks the modeled persons, drawing from the household's stream for any slot without a candidate
    ///
    /// Priority goes to full time then part time workers (two slots), then the youngest three children
    pub fn select(household: &mut Household) -> ModeledPersons {
        let size = household.size();
        if size <= MAX_MODELED_SIZE {
            return ModeledPersons {
                household_id: household.id(),
                order: (0..size).collect(),
                modeled_size: size,
            };
        }

        let mut selected = vec![false; size];
        let mut slots: [Option<usize>; MAX_MODELED_SIZE] = [None; MAX_MODELED_SIZE];

        let persons = household.persons();
        fill_worker_slots(persons, &mut slots[..WORKER_SLOTS], &mut selected, Person::is_full_time_worker);
        fill_worker_slots(persons, &mut slots[..WORKER_SLOTS], &mut selected, Person::is_part_time_worker);
        for slot in WORKER_SLOTS..MAX_MODELED_SIZE {
            // Only look for the next child if the previous one was found
            if slot > WORKER_SLOTS && slots[slot - 1].is_none() {
                break;
            }
            slots[slot] = youngest_unselected_child(persons, &mut selected);
        }

        let random = household.random_mut();
        let mut random_selections = 0;
        for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(draw_unselected_person(random, size, &mut selected));
            random_selections += 1;
        }

        let mut order: Vec<usize> = slots.iter().flatten().copied().collect();
        order.extend((0..size).filter(|index| !selected[*index]));
        debug!(
            "Household {} modeled order {:?} ({} random selections)",
            household.id(),
            order,
            random_selections
        );
        ModeledPersons {
            household_id: household.id(),
            order,
            modeled_size: MAX_MODELED_SIZE,
        }
    }

    pub fn modeled_size(&self) -> usize {
        self.modeled_size
    }
    pub fn household_size(&self) -> usize {
        self.order.len()
    }
    /// Original slots of every person, in modeled order
    pub fn order(&self) -> &[usize] {
        &self.order
    }
    /// Original slots of the jointly modeled persons
    pub fn modeled(&self) -> &[usize] {
        &self.order[..self.modeled_size]
    }
    /// Original slots of the persons beyond the modeled five
    pub fn remainder(&self) -> &[usize] {
        &self.order[self.modeled_size..]
    }

    /// Returns the person at the 1-based modeled position
    pub fn get_cdap_person<'a>(&self, household: &'a Household, position: usize) -> Result<&'a Person, CdapError> {
        if position < 1 || position > self.order.len() {
            return Err(CdapError::PersonIndexOutOfRange {
                household_id: self.household_id,
                index: position,
                size: self.order.len(),
            });
        }
        household.person(self.order[position - 1])
    }

    /// The jointly modeled persons, in modeled order
    pub fn modeled_persons<'a>(&self, household: &'a Household) -> Result<Vec<&'a Person>, CdapError> {
        (1..=self.modeled_size)
            .map(|position| self.get_cdap_person(household, position))
            .collect()
    }
}

/// Fills the empty slots with unselected persons matching the predicate, in original order
fn fill_worker_slots(
    persons: &[Person],
    slots: &mut [Option<usize>],
    selected: &mut [bool],
    predicate: fn(&Person) -> bool,
) {
    for (index, person) in persons.iter().enumerate() {
        let slot = match slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => slot,
            None => return,
        };
        if !selected[index] && predicate(person) {
            *slot = Some(index);
            selected[index] = true;
        }
    }
}

/// Ties go to the child found first
fn youngest_unselected_child(persons: &[Person], selected: &mut [bool]) -> Option<usize> {
    let mut youngest: Option<usize> = None;
    for (index, person) in persons.iter().enumerate() {
        if selected[index] || !person.is_child() {
            continue;
        }
        match youngest {
            Some(current) if persons[current].age() <= person.age() => {}
            _ => youngest = Some(index),
        }
    }
    if let Some(index) = youngest {
        selected[index] = true;
    }
    youngest
}

/// Draws person numbers until an unselected one comes up
///
/// The draw is scaled by the household size and truncated, so person number 0 is rejected and the
/// last person can never be drawn
fn draw_unselected_person(random: &mut HouseholdRandom, size: usize, selected: &mut [bool]) -> usize {
    loop {
        let person_num = (random.draw() * size as f64) as usize;
        if person_num != 0 && !selected[person_num - 1] {
            selected[person_num - 1] = true;
            return person_num - 1;
        }
    }
}
