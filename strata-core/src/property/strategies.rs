//! Strategy builders for engine property tests.
//!
//! Each fixture is a strength-descending edge list over a small node
//! alphabet so that merges, repeat edges and ties are all common.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::EdgeList;

const MAX_NODES: usize = 24;
const MAX_EDGES: usize = 60;

/// How edge strengths are assigned during generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum StrengthProfile {
    /// Strengths drawn from a handful of values, so steps hold many edges.
    FewLevels,
    /// Mostly distinct strengths, so most steps hold one edge.
    Distinct,
    /// Few levels plus frequent self-loops.
    WithSelfLoops,
}

/// Generated input plus the context needed to diagnose a failure.
#[derive(Clone, Debug)]
pub(super) struct EdgeFixture {
    pub rows: Vec<(String, String, f64)>,
    pub profile: StrengthProfile,
}

impl EdgeFixture {
    pub(super) fn source(&self) -> EdgeList {
        EdgeList::new(
            "fixture",
            self.rows
                .iter()
                .map(|(a, b, weight)| (a.as_str(), b.as_str(), *weight)),
        )
    }
}

pub(super) fn edge_fixture_strategy() -> impl Strategy<Value = EdgeFixture> {
    (any::<StrengthProfile>(), any::<u64>()).prop_map(|(profile, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(profile, &mut rng)
    })
}

pub(super) fn generate_fixture(profile: StrengthProfile, rng: &mut SmallRng) -> EdgeFixture {
    let node_count = rng.gen_range(2..=MAX_NODES);
    let edge_count = rng.gen_range(1..=MAX_EDGES);
    let levels: u32 = match profile {
        StrengthProfile::FewLevels | StrengthProfile::WithSelfLoops => 4,
        StrengthProfile::Distinct => 1_000,
    };

    let mut rows: Vec<(String, String, f64)> = (0..edge_count)
        .map(|_| {
            let a = rng.gen_range(0..node_count);
            let b = if profile == StrengthProfile::WithSelfLoops && rng.gen_bool(0.2) {
                a
            } else {
                rng.gen_range(0..node_count)
            };
            let weight = f64::from(rng.gen_range(1..=levels));
            (format!("n{a}"), format!("n{b}"), weight)
        })
        .collect();
    rows.sort_by(|left, right| right.2.total_cmp(&left.2));
    EdgeFixture { rows, profile }
}

impl proptest::arbitrary::Arbitrary for StrengthProfile {
    type Parameters = ();
    type Strategy = proptest::strategy::TupleUnion<(
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
    )>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            3 => Just(Self::FewLevels),
            2 => Just(Self::Distinct),
            2 => Just(Self::WithSelfLoops),
        ]
    }
}
