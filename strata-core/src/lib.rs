//! Strata core library.
//!
//! Folds a strength-descending list of weighted associations into connected
//! subgraphs one edge at a time and reports how the structure evolves at
//! every distinct strength.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod coverage;
mod engine;
mod error;
mod membership;
mod partition;
#[cfg(test)]
mod property;
mod snapshot;
mod source;
mod step;
mod strata;
mod structure;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::StrataBuilder,
    coverage::edges_to_cover,
    engine::{Transition, apply_edge},
    error::{EdgeSourceError, EdgeSourceErrorCode, Result, StrataError, StrataErrorCode},
    membership::{MembershipSnapshot, MembershipSnapshotter, MembershipTable, NodeLegend},
    partition::{Component, ComponentId, MergeOutcome, Partition, PartitionError},
    snapshot::PartitionSnapshot,
    source::{DEFAULT_ORDER_CHECK_WINDOW, EdgeList, EdgeRef, EdgeSource, OrderCheck, verify_order},
    step::{ComponentDetail, Step, StepSummary, closes_step, summarise_step},
    strata::Strata,
    structure::{EarlyExit, MergeEvent, SubgraphStructure},
};
