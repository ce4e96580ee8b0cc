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

use std::fmt::{Display, Formatter};

use crate::config::MAX_MODELED_SIZE;
use crate::error::CdapError;
use crate::models::activity::{pattern_to_string, Activity};

/// One joint assignment of activities to the modeled persons, with its utility for the current household
#[derive(Clone, Debug, PartialEq)]
pub struct Alternative {
    pattern: Vec<Activity>,
    name: String,
    pub utility: f64,
}

impl Alternative {
    fn new(pattern: Vec<Activity>) -> Alternative {
        Alternative {
            name: pattern_to_string(&pattern),
            pattern,
            utility: 0.0,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn pattern(&self) -> &[Activity] {
        &self.pattern
    }
    /// The activity of the modeled person at the 0-based position
    #[inline]
    pub fn activity(&self, position: usize) -> Activity {
        self.pattern[position]
    }
    /// The activity shared by every given position, if they all agree
    pub fn shared_activity(&self, positions: &[usize]) -> Option<Activity> {
        let (first, rest) = positions.split_first()?;
        let activity = self.pattern[*first];
        if rest.iter().all(|position| self.pattern[*position] == activity) {
            Some(activity)
        } else {
            None
        }
    }
    /// The activity of every modeled person, if they all agree
    pub fn uniform_activity(&self) -> Option<Activity> {
        let (first, rest) = self.pattern.split_first()?;
        if rest.iter().all(|activity| activity == first) {
            Some(*first)
        } else {
            None
        }
    }
}

impl Display for Alternative {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.4})", self.name, self.utility)
    }
}

/// Enumerates every pattern of a given length
///
/// Starts at all Mandatory, with the last position cycling fastest through M -> N -> H
pub struct PatternOdometer {
    next: Option<Vec<Activity>>,
}

impl PatternOdometer {
    pub fn new(size: usize) -> PatternOdometer {
        PatternOdometer {
            next: if size == 0 {
                None
            } else {
                Some(vec![Activity::Mandatory; size])
            },
        }
    }
}

impl Iterator for PatternOdometer {
    type Item = Vec<Activity>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        for position in (0..successor.len()).rev() {
            let (activity, carry) = successor[position].next_with_carry();
            successor[position] = activity;
            if !carry {
                self.next = Some(successor);
                break;
            }
        }
        Some(current)
    }
}

/// The 3^k alternatives for households with k modeled persons
#[derive(Clone, Debug)]
pub struct AlternativeSet {
    modeled_size: usize,
    alternatives: Vec<Alternative>,
}

impl AlternativeSet {
    pub fn new(modeled_size: usize) -> Result<AlternativeSet, CdapError> {
        if modeled_size == 0 || modeled_size > MAX_MODELED_SIZE {
            return Err(CdapError::configuration(format!(
                "Cannot build alternatives for {} modeled persons",
                modeled_size
            )));
        }
        let alternatives: Vec<Alternative> = PatternOdometer::new(modeled_size).map(Alternative::new).collect();
        debug_assert_eq!(alternatives.len(), 3_usize.pow(modeled_size as u32));
        Ok(AlternativeSet {
            modeled_size,
            alternatives,
        })
    }
    pub fn modeled_size(&self) -> usize {
        self.modeled_size
    }
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&Alternative> {
        self.alternatives.get(index)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Alternative> {
        self.alternatives.iter()
    }
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Alternative> {
        self.alternatives.iter_mut()
    }
    pub fn reset_utilities(&mut self) {
        for alternative in &mut self.alternatives {
            alternative.utility = 0.0;
        }
    }
}

/// One alternative set per modeled size, owned by a single worker
#[derive(Clone, Debug)]
pub struct AlternativeSets {
    sets: Vec<AlternativeSet>,
}

impl AlternativeSets {
    pub fn new() -> Result<AlternativeSets, CdapError> {
        let sets = (1..=MAX_MODELED_SIZE)
            .map(AlternativeSet::new)
            .collect::<Result<Vec<AlternativeSet>, CdapError>>()?;
        Ok(AlternativeSets { sets })
    }
    pub fn get_mut(&mut self, modeled_size: usize) -> Result<&mut AlternativeSet, CdapError> {
        if modeled_size == 0 || modeled_size > self.sets.len() {
            return Err(CdapError::configuration(format!(
                "No alternatives exist for {} modeled persons",
                modeled_size
            )));
        }
        Ok(&mut self.sets[modeled_size - 1])
    }
}
