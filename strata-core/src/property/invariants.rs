//! Property runners over generated edge fixtures.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{StrataBuilder, SubgraphStructure};

use super::oracle::oracle_step;
use super::strategies::EdgeFixture;

fn run(fixture: &EdgeFixture, membership: bool) -> Result<SubgraphStructure, TestCaseError> {
    StrataBuilder::new()
        .with_membership(membership)
        .build()
        .and_then(|strata| strata.run(&fixture.source()))
        .map_err(|err| {
            TestCaseError::fail(format!(
                "run failed: {err} (profile={:?}, edges={})",
                fixture.profile,
                fixture.rows.len()
            ))
        })
}

/// Every step row matches the relabelling oracle for the same prefix.
pub(super) fn run_oracle_equivalence_property(fixture: &EdgeFixture) -> TestCaseResult {
    let structure = run(fixture, false)?;
    for step in structure.steps() {
        let expected = oracle_step(&fixture.rows, step.summary.n_edges);
        let mut shapes: Vec<(usize, usize)> = step
            .components
            .iter()
            .map(|detail| (detail.size, detail.edge_count))
            .collect();
        shapes.sort_unstable();
        if step.summary.nodes_seen != expected.nodes_seen || shapes != expected.shapes {
            return Err(TestCaseError::fail(format!(
                "step {} diverged from oracle: nodes_seen={} shapes={shapes:?}, expected {expected:?}",
                step.summary.step, step.summary.nodes_seen
            )));
        }
    }
    Ok(())
}

/// Step rows are internally consistent and monotonic.
pub(super) fn run_structural_invariants_property(fixture: &EdgeFixture) -> TestCaseResult {
    let structure = run(fixture, false)?;
    let mut previous_nodes = 0;
    let mut previous_edges = 0;
    for (position, step) in structure.steps().iter().enumerate() {
        let summary = &step.summary;
        prop_check(summary.step == position + 1, "steps are numbered from one")?;
        prop_check(summary.n_edges > previous_edges, "every step holds an edge")?;
        prop_check(summary.nodes_seen >= previous_nodes, "nodes_seen never shrinks")?;
        prop_check(
            summary.num_components * 2 <= summary.nodes_seen,
            "every component has at least two members",
        )?;
        let total: usize = step.components.iter().map(|detail| detail.size).sum();
        prop_check(total == summary.nodes_seen, "components partition the seen nodes")?;
        prop_check(
            step.components
                .windows(2)
                .all(|pair| matches!(pair, [left, right] if left.component_id < right.component_id)),
            "component rows ascend by id",
        )?;
        prop_check(
            step.components.iter().all(|detail| detail.density > 0.0),
            "density is positive",
        )?;
        previous_nodes = summary.nodes_seen;
        previous_edges = summary.n_edges;
    }
    prop_check(
        structure
            .merges()
            .iter()
            .all(|merge| merge.receiver_size >= merge.donor_size),
        "the larger component receives",
    )?;
    Ok(())
}

/// Stopping early never changes the rows that were emitted.
pub(super) fn run_early_exit_equivalence_property(fixture: &EdgeFixture) -> TestCaseResult {
    let full = run(fixture, false)?;
    let tracked = run(fixture, true)?;
    let emitted = tracked.steps().len();
    prop_check(
        full.steps().get(..emitted) == Some(tracked.steps()),
        "membership run emits a prefix of the full step table",
    )?;
    let Some(exit) = tracked.early_exit() else {
        prop_check(emitted == full.steps().len(), "without exit every step is emitted")?;
        return Ok(());
    };
    prop_check(
        exit.edges_processed + exit.edges_skipped == fixture.rows.len(),
        "processed and skipped edges cover the input",
    )?;
    let exit_nodes = tracked.summaries().last().map(|last| last.nodes_seen);
    let settled = full
        .summaries()
        .skip(emitted)
        .all(|summary| summary.num_components == 1 && Some(summary.nodes_seen) == exit_nodes);
    prop_check(settled, "skipped steps cannot change membership")?;

    let table = tracked
        .membership()
        .ok_or_else(|| TestCaseError::fail("membership table missing"))?;
    prop_check(
        table.snapshots().len() == emitted,
        "one snapshot per emitted step",
    )?;
    Ok(())
}

/// Membership labels group exactly the nodes the oracle puts together.
pub(super) fn run_membership_oracle_property(fixture: &EdgeFixture) -> TestCaseResult {
    let structure = run(fixture, true)?;
    let table = structure
        .membership()
        .ok_or_else(|| TestCaseError::fail("membership table missing"))?;
    let legend = table.legend().nodes();
    for snapshot in table.snapshots() {
        let step = snapshot.step();
        let n_edges = structure
            .steps()
            .get(step.wrapping_sub(1))
            .map(|row| row.summary.n_edges)
            .ok_or_else(|| TestCaseError::fail(format!("snapshot {step} has no step row")))?;
        let expected = oracle_step(&fixture.rows, n_edges);
        let labels = snapshot.labels();
        prop_check(labels.len() == legend.len(), "one label per legend entry")?;
        for (left, (left_node, left_label)) in legend.iter().zip(labels).enumerate() {
            let left_group = expected.groups.get(&**left_node);
            prop_check(
                (*left_label >= 0) == left_group.is_some(),
                "non-negative labels mark exactly the seen nodes",
            )?;
            for (right_node, right_label) in legend.iter().zip(labels).skip(left + 1) {
                let right_group = expected.groups.get(&**right_node);
                let together = left_group.is_some() && left_group == right_group;
                if (left_label == right_label) != together {
                    return Err(TestCaseError::fail(format!(
                        "step {step}: {left_node}={left_label} and {right_node}={right_label} \
                         disagree with oracle grouping (together={together})"
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Running twice over the same input yields identical output.
pub(super) fn run_idempotence_property(fixture: &EdgeFixture) -> TestCaseResult {
    let first = run(fixture, true)?;
    let second = run(fixture, true)?;
    prop_check(first == second, "repeated runs agree")
}

fn prop_check(condition: bool, message: &str) -> TestCaseResult {
    if condition {
        Ok(())
    } else {
        Err(TestCaseError::fail(message.to_owned()))
    }
}
