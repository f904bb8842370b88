//! Model validation orchestration.

pub mod destination;
pub mod graph;
pub mod naming;

use crate::{error::ErrorTree, node::NavModel};

/// Run full model validation in a staged, deterministic order.
pub fn validate_model(model: &NavModel) -> Result<(), ErrorTree> {
    let mut errors = ErrorTree::new();

    // Phase 1: per-destination invariants.
    for dest in &model.destinations {
        destination::validate_destination(model, dest, &mut errors);
    }

    // Phase 2: graph topology.
    graph::validate_graphs(model, &mut errors);

    // Phase 3: model-wide naming.
    naming::validate_unique_names(model, &mut errors);

    errors.result()
}
