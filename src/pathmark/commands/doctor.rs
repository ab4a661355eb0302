use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::HierarchicalStore;

/// Checks the store and, unless `check_only`, repairs whatever is broken.
pub fn run(store: &mut HierarchicalStore, check_only: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(violation) = store.find_violation() else {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    };

    if check_only {
        result.add_message(CmdMessage::warning(format!(
            "Integrity problem: {}",
            violation
        )));
        result.add_message(CmdMessage::info("Run `pathmark doctor` to repair it."));
        return Ok(result);
    }

    let report = store.repair();
    result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
    for line in report.lines() {
        result.add_message(CmdMessage::info(format!("  - {}", line)));
    }
    if report.nodes_removed() > 0 || report.items_removed() > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Dropped {} node(s) and {} item(s) that could not be reattached.",
            report.nodes_removed(),
            report.items_removed()
        )));
    }
    Ok(result.with_repair(report))
}
