//! Propiedades de la inferencia de contratos.
use std::collections::HashSet;
use std::sync::Arc;

use linearly_core::{from_fn, Contract, Expectation, Expectations, State, Step};
use proptest::prelude::*;

const FIELDS: &[&str] = &["a", "b", "c", "d", "e", "f"];

fn fields(mask: u8) -> Expectations {
    FIELDS.iter()
          .enumerate()
          .filter(|(i, _)| mask & (1 << i) != 0)
          .map(|(_, f)| (f.to_string(), Expectation::present()))
          .collect()
}

fn steps(shapes: &[(u8, u8)]) -> Vec<Arc<dyn Step>> {
    shapes.iter()
          .map(|&(i, o)| {
              Arc::new(from_fn("step", fields(i), fields(o), |s: &State| Ok(s.clone().into()))) as Arc<dyn Step>
          })
          .collect()
}

proptest! {
    #[test]
    fn inputs_are_exactly_the_unsatisfied_requirements(shapes in prop::collection::vec((0u8..64, 0u8..64), 0..6)) {
        let steps = steps(&shapes);
        let contract = Contract::build(&steps);

        let mut produced: HashSet<String> = HashSet::new();
        let mut expected: Vec<String> = Vec::new();
        for step in &steps {
            for field in step.inputs().keys() {
                if !produced.contains(field) && !expected.contains(field) {
                    expected.push(field.clone());
                }
            }
            produced.extend(step.outputs().keys().cloned());
        }

        prop_assert_eq!(contract.inputs().keys().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn outputs_are_the_union_of_step_outputs(shapes in prop::collection::vec((0u8..64, 0u8..64), 0..6)) {
        let steps = steps(&shapes);
        let contract = Contract::build(&steps);

        let union: HashSet<String> = steps.iter().flat_map(|s| s.outputs().into_keys()).collect();
        let inferred: HashSet<String> = contract.outputs().keys().cloned().collect();
        prop_assert_eq!(inferred, union);
    }

    #[test]
    fn building_twice_gives_the_same_contract(shapes in prop::collection::vec((0u8..64, 0u8..64), 0..6)) {
        let steps = steps(&shapes);
        prop_assert_eq!(Contract::build(&steps), Contract::build(&steps));
    }
}
