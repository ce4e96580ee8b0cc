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

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cdap::config::ModelConfig;
use cdap::model::CoordinatedDailyActivityPatternModel;
use cdap::models::activity::activity_utilities;
use cdap::models::household::Household;
use cdap::models::person::Person;
use cdap::simulator::Simulator;
use cdap::utility::{PairUtility, PersonTypeUtilityTable};
use load_household_data::tables::persons::{EmploymentCategory, PersonType, StudentCategory};

fn synthetic_person(person_num: u8) -> Person {
    match person_num % 4 {
        0 => Person::new(
            person_num,
            40,
            PersonType::FullTimeWorker,
            EmploymentCategory::FullTime,
            StudentCategory::NonStudent,
        ),
        1 => Person::new(
            person_num,
            38,
            PersonType::PartTimeWorker,
            EmploymentCategory::PartTime,
            StudentCategory::NonStudent,
        ),
        2 => Person::new(
            person_num,
            8,
            PersonType::StudentNonDriving,
            EmploymentCategory::UnderAge16,
            StudentCategory::GradeOrHighSchool,
        ),
        _ => Person::new(
            person_num,
            70,
            PersonType::Retired,
            EmploymentCategory::NotEmployed,
            StudentCategory::NonStudent,
        ),
    }
}

/// Households of sizes one to eight
fn synthetic_population(count: u32) -> Vec<Household> {
    (0..count)
        .map(|id| {
            let size = (id % 8) as u8 + 1;
            let persons = (1..=size).map(synthetic_person).collect();
            Household::new(id + 1, persons, 0).unwrap()
        })
        .collect()
}

fn utility_table() -> PersonTypeUtilityTable {
    let mut individual = HashMap::new();
    individual.insert(PersonType::FullTimeWorker, activity_utilities(1.5, 0.2, 0.0));
    individual.insert(PersonType::PartTimeWorker, activity_utilities(0.8, 0.4, 0.0));
    individual.insert(PersonType::StudentNonDriving, activity_utilities(1.2, 0.1, 0.0));
    individual.insert(PersonType::Retired, activity_utilities(-2.0, 0.5, 0.0));
    PersonTypeUtilityTable {
        individual,
        pairs: vec![PairUtility {
            first: PersonType::FullTimeWorker,
            second: PersonType::PartTimeWorker,
            utilities: activity_utilities(0.3, 0.6, 0.9),
        }],
        triple: activity_utilities(0.1, 0.1, 0.2),
        all_members: Vec::new(),
    }
}

fn choose_patterns(c: &mut Criterion) {
    let config = ModelConfig::default();
    let model = CoordinatedDailyActivityPatternModel::new(utility_table().into_calculators(), &config)
        .unwrap();
    let simulator = Simulator::new(model.clone(), &config);

    c.bench_function("Single household of five", |b| {
        let mut model = model.clone();
        b.iter(|| {
            let mut household = synthetic_population(5).remove(4);
            black_box(model.apply(&mut household).unwrap());
        })
    });

    c.bench_function("Population of 10,000", |b| {
        b.iter(|| {
            let mut households = synthetic_population(10_000);
            black_box(simulator.run(&mut households).unwrap());
        })
    });
}

criterion_group!(benches, choose_patterns);
criterion_main!(benches);
