// Copyright 2025 Cowboy AI, LLC.

use std::collections::BTreeSet;

use cim_prototype::{base, Object, PropertyBag, Prototype, Value};
use proptest::prelude::*;
use proptest::sample::Index;

/// One composition step: a base index and mixin indices into the prototypes built so far
type Step = (Index, Vec<Index>);

struct Built {
    prototypes: Vec<Prototype>,
    /// Expected ancestry, as indices, for each prototype
    ancestry: Vec<BTreeSet<usize>>,
    /// Expected strict delegation ancestors, as indices, for each prototype
    chain: Vec<BTreeSet<usize>>,
}

fn build(steps: &[Step]) -> Built {
    let mut built = Built {
        prototypes: vec![base().clone()],
        ancestry: vec![BTreeSet::from([0])],
        chain: vec![BTreeSet::new()],
    };

    for (n, (parent, mixins)) in steps.iter().enumerate() {
        let len = built.prototypes.len();
        let parent = parent.index(len);
        let mixins: Vec<usize> = mixins.iter().map(|m| m.index(len)).collect();

        let sources: Vec<&Prototype> = mixins.iter().map(|&m| &built.prototypes[m]).collect();
        let proto = built.prototypes[parent].extend(
            &sources,
            PropertyBag::new().with(format!("p{n}"), Value::Int(n as i64)),
        );

        let mut ancestry = built.ancestry[parent].clone();
        ancestry.insert(len);
        for &m in &mixins {
            ancestry.extend(built.ancestry[m].iter().copied());
        }
        let mut chain = built.chain[parent].clone();
        chain.insert(parent);

        built.prototypes.push(proto);
        built.ancestry.push(ancestry);
        built.chain.push(chain);
    }
    built
}

fn steps() -> impl Strategy<Value = Vec<Step>> {
    proptest::collection::vec(
        (any::<Index>(), proptest::collection::vec(any::<Index>(), 0..3)),
        1..10,
    )
}

proptest! {
    #[test]
    fn has_feature_matches_set_union(steps in steps()) {
        let built = build(&steps);
        for (i, proto) in built.prototypes.iter().enumerate() {
            for (j, candidate) in built.prototypes.iter().enumerate() {
                prop_assert_eq!(
                    proto.has_feature(candidate),
                    built.ancestry[i].contains(&j)
                );
            }
            prop_assert!(proto.has_feature(proto));
            prop_assert!(proto.has_feature(base()));
        }
    }

    #[test]
    fn is_prototype_of_matches_delegation_chain(steps in steps()) {
        let built = build(&steps);
        for (i, proto) in built.prototypes.iter().enumerate() {
            prop_assert!(!proto.is_prototype_of(proto));
            for (j, other) in built.prototypes.iter().enumerate() {
                prop_assert_eq!(proto.is_prototype_of(other), built.chain[j].contains(&i));
            }
        }
    }

    #[test]
    fn instances_delegate_queries_to_their_prototype(steps in steps()) {
        let built = build(&steps);
        let last = built.prototypes.len() - 1;
        let instance = built.prototypes[last].new(&[]).unwrap();

        prop_assert_eq!(instance.ancestry(), built.prototypes[last].ancestry());
        for (i, proto) in built.prototypes.iter().enumerate() {
            let expected = i == last || built.chain[last].contains(&i);
            prop_assert_eq!(proto.is_prototype_of(&instance), expected);
            prop_assert!(!instance.is_prototype_of(proto));
        }
    }

    #[test]
    fn own_properties_override_everything(steps in steps()) {
        let built = build(&steps);
        for (n, proto) in built.prototypes.iter().enumerate().skip(1) {
            let key = format!("p{}", n - 1);
            prop_assert_eq!(proto.get(&key), Some(Value::Int((n - 1) as i64)));
        }
    }

    #[test]
    fn prototype_writes_never_change_state(
        steps in steps(),
        key in "[a-z]{1,8}",
        value in any::<i64>(),
    ) {
        let built = build(&steps);
        for proto in &built.prototypes {
            let before = proto.resolved_properties();
            let mut handle = proto.clone();
            prop_assert!(handle.set(&key, Value::Int(value)).unwrap_err().is_frozen_mutation());
            prop_assert!(handle.delete(&key).unwrap_err().is_frozen_mutation());
            prop_assert_eq!(proto.resolved_properties(), before);
        }
    }
}
