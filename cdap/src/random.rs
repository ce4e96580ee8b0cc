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

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// The random number stream owned by a single household
///
/// Every value is taken through [`HouseholdRandom::draw`], so the draw count always equals the
/// number of values consumed, and a stream can be rebuilt at any point from the seed and count
#[derive(Clone, Debug)]
pub struct HouseholdRandom {
    seed: u64,
    rng: XorShiftRng,
    draw_count: u32,
}

impl HouseholdRandom {
    pub fn new(base_seed: u64, household_id: u32) -> HouseholdRandom {
        let seed = base_seed.wrapping_add(household_id as u64);
        HouseholdRandom {
            seed,
            rng: XorShiftRng::seed_from_u64(seed),
            draw_count: 0,
        }
    }

    /// Rebuilds the stream of a household that has already consumed `draw_count` values
    pub fn resume(base_seed: u64, household_id: u32, draw_count: u32) -> HouseholdRandom {
        let mut random = HouseholdRandom::new(base_seed, household_id);
        for _ in 0..draw_count {
            random.draw();
        }
        random
    }

    /// A uniform value in [0, 1)
    #[inline]
    pub fn draw(&mut self) -> f64 {
        self.draw_count += 1;
        self.rng.gen::<f64>()
    }

    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
