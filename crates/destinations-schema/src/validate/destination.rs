use crate::prelude::*;
use std::collections::BTreeSet;

/// Check one destination's arguments, deep links and graph membership.
pub fn validate_destination(model: &NavModel, dest: &DestinationInfo, errs: &mut ErrorTree) {
    let decl = dest.target.qualified_name.as_str();

    // argument names
    let mut seen = BTreeSet::new();
    for arg in &dest.arguments {
        if !seen.insert(arg.name.as_str()) {
            err!(errs, decl, "duplicate navigation argument '{}'", arg.name);
        }
    }

    // deep links
    for link in &dest.deep_links {
        if link.uri_pattern.trim().is_empty() {
            err!(errs, decl, "deep link uri pattern is empty");
            continue;
        }
        for name in link.placeholders() {
            if dest.argument(name).is_none() {
                err!(
                    errs,
                    decl,
                    "deep link '{}' references argument '{name}' which is not an argument of '{}'",
                    link.uri_pattern,
                    dest.name
                );
            }
        }
    }

    // owning graph
    if model.graph(&dest.nav_graph).is_none() {
        err!(
            errs,
            decl,
            "destination belongs to unknown nav graph '{}'",
            dest.nav_graph
        );
    }
}
