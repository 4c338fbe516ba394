//! Dictionaries built with different options must answer every query identically.

use std::collections::BTreeMap;

use fixdict::{
    build_integral_map, build_string_map, build_string_map_by_character,
    build_string_map_by_length, BuildError, Options, StringDictionary,
};
use quickcheck_macros::quickcheck;
use rand::{distributions::Alphanumeric, Rng, SeedableRng};
use rand_pcg::Pcg64;
use test_log::test;

fn integral_options() -> Vec<Options> {
    vec![
        Options::default(),
        Options::default().with_min_load_factor(1.0),
        Options::default().with_min_load_factor(0.01),
        Options::default().with_dense_lookup_threshold(usize::MAX),
        Options::default().with_dense_lookup_threshold(1),
        Options::default().with_binary_search_threshold(0),
        Options::default().with_binary_search_threshold(usize::MAX),
        Options::default().with_adjusts_alignment(false),
        Options::default().with_default_value_is_always_invalid(true),
    ]
}

fn string_options() -> Vec<Options> {
    vec![
        Options::default(),
        Options::default().with_optimization_threshold(usize::MAX),
        Options::default().with_optimization_threshold(0),
        Options::default().with_max_n_iterations(0),
        Options::default()
            .with_max_n_iterations(0)
            .with_binary_search_threshold(usize::MAX),
        Options::default().with_min_load_factor(1.0),
        Options::default().with_adjusts_alignment(false),
    ]
}

#[quickcheck]
fn integral_strategies_agree(entries: Vec<(i16, u32)>, queries: Vec<i32>) -> bool {
    // Values are never zero so that the compact dense layout applies
    let reference = entries
        .into_iter()
        .map(|(key, value)| (key, value.saturating_add(1)))
        .collect::<BTreeMap<_, _>>();

    integral_options().into_iter().all(|options| {
        let dictionary = build_integral_map(reference.clone(), options).unwrap();

        dictionary.len() == reference.len()
            && dictionary.min_key() == reference.keys().next().copied()
            && dictionary.max_key() == reference.keys().next_back().copied()
            && reference
                .iter()
                .all(|(&key, value)| dictionary.get(key) == (value, true))
            && outside_keys(&reference)
                .into_iter()
                .all(|query| dictionary.lookup(query).is_none())
            && queries
                .iter()
                .copied()
                .chain(neighbors(&reference))
                .all(|query| {
                    let expected = i16::try_from(query)
                        .ok()
                        .and_then(|key| reference.get(&key));
                    dictionary.lookup(query) == expected
                })
    })
}

/// Keys just below and above the stored range and the range of `i16`
fn outside_keys<V>(reference: &BTreeMap<i16, V>) -> Vec<i32> {
    let mut keys = vec![i32::from(i16::MIN) - 1, i32::from(i16::MAX) + 1];

    if let (Some(&min), Some(&max)) = (reference.keys().next(), reference.keys().next_back()) {
        keys.extend([i32::from(min) - 1, i32::from(max) + 1]);
    }

    keys
}

/// Direct neighbors of every stored key, which include the edges of every dense range
fn neighbors<V>(reference: &BTreeMap<i16, V>) -> impl Iterator<Item = i32> + '_ {
    reference
        .keys()
        .flat_map(|&key| [i32::from(key) - 1, i32::from(key) + 1])
}

fn agrees_with(dictionary: &StringDictionary<u16>, reference: &BTreeMap<String, u16>) -> bool {
    dictionary.len() == reference.len()
        && reference
            .iter()
            .all(|(key, value)| dictionary.get(key) == (value, true))
}

#[quickcheck]
fn string_strategies_agree(entries: Vec<(String, u16)>, queries: Vec<String>) -> bool {
    let reference = entries.into_iter().collect::<BTreeMap<_, _>>();

    let mut dictionaries = string_options()
        .into_iter()
        .map(|options| build_string_map(reference.clone(), options).unwrap())
        .collect::<Vec<_>>();

    for accelerated in [
        build_string_map_by_length(reference.clone(), Options::default()),
        build_string_map_by_character(reference.clone(), Options::default()),
    ] {
        match accelerated {
            Ok(dictionary) => dictionaries.push(dictionary),
            Err(BuildError::NotApplicable { .. }) => {}
            Err(_) => return false,
        }
    }

    dictionaries.iter().all(|dictionary| {
        agrees_with(dictionary, &reference)
            && queries
                .iter()
                .all(|query| dictionary.lookup(query) == reference.get(query))
    })
}

fn random_key(rng: &mut Pcg64) -> String {
    let length = rng.gen_range(1..16);
    rng.sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[test]
fn random_case_insensitive_keys() {
    let mut rng = Pcg64::seed_from_u64(0x5eed);

    for size in [3, 10, 100, 1000] {
        let reference = (0..size)
            .map(|_| random_key(&mut rng).to_ascii_lowercase())
            .zip(0u16..)
            .collect::<BTreeMap<_, _>>();
        let mixed_case = reference
            .iter()
            .map(|(key, &value)| {
                let key = key
                    .chars()
                    .enumerate()
                    .map(|(index, c)| if index % 2 == 0 { c.to_ascii_uppercase() } else { c })
                    .collect::<String>();
                (key, value)
            })
            .collect::<Vec<_>>();

        for options in string_options() {
            let options = options.with_case_insensitive(true);
            let dictionary = build_string_map(mixed_case.clone(), options).unwrap();

            assert!(agrees_with(&dictionary, &reference));
            for (key, value) in &mixed_case {
                assert_eq!(dictionary.lookup(key), Some(value));
                assert_eq!(dictionary.lookup(&key.to_ascii_uppercase()), Some(value));
            }

            for _ in 0..100 {
                let query = random_key(&mut rng);
                let expected = reference.get(&query.to_ascii_lowercase());
                assert_eq!(dictionary.lookup(&query), expected);
            }
        }
    }
}

#[test]
fn random_integers() {
    let mut rng = Pcg64::seed_from_u64(42);

    for (size, range) in [(10, 20), (100, 1000), (1000, 1_000_000), (1000, i64::MAX)] {
        let reference = (0..size)
            .map(|_| (rng.gen_range(-range..range), rng.gen::<u8>()))
            .collect::<BTreeMap<i64, u8>>();

        for options in integral_options()
            .into_iter()
            .filter(|options| !options.default_value_is_always_invalid)
        {
            let dictionary = build_integral_map(reference.clone(), options).unwrap();

            for (&key, value) in &reference {
                assert_eq!(dictionary.lookup(key), Some(value));
            }

            for _ in 0..1000 {
                let query = rng.gen_range(-range..range);
                assert_eq!(dictionary.lookup(query), reference.get(&query));
            }

            for &key in reference.keys() {
                for query in [key.checked_sub(1), key.checked_add(1)].into_iter().flatten() {
                    assert_eq!(dictionary.lookup(query), reference.get(&query));
                }
            }

            let (Some(&min), Some(&max)) = (reference.keys().next(), reference.keys().next_back())
            else {
                continue;
            };
            for query in [
                i128::from(min) - 1,
                i128::from(max) + 1,
                i128::from(i64::MIN) - 1,
                i128::from(i64::MAX) + 1,
            ] {
                assert_eq!(dictionary.lookup(query), None, "query {query}");
            }
        }
    }
}
