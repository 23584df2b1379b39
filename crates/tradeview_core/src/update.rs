use crate::{RunEvent, RunResult, RunStatus, ViewType};

/// Applies one event to the run. Pure apart from mutating `run`.
///
/// Status follows last-write-wins across views, with two exceptions: an empty
/// view does not overwrite `Success` or `PageTooLarge`, and nothing changes once
/// the run was finalized.
pub fn update(run: &mut RunResult, event: RunEvent) {
    if run.is_finalized() {
        return;
    }
    match event {
        RunEvent::NoResults { .. } => {
            if !matches!(run.status(), RunStatus::Success | RunStatus::PageTooLarge) {
                run.set_status(RunStatus::NoResultsFound);
            }
        }
        RunEvent::Oversized { .. } => {
            run.set_status(RunStatus::PageTooLarge);
        }
        RunEvent::PageExtracted { view, records } => {
            run.append(view, records);
        }
        RunEvent::Paginated {
            view,
            expected,
            aborted,
        } => {
            if let Some(message) = aborted {
                run.push_error(view, message);
            }
            // Only the Shipment view takes part in reconciliation.
            if view == ViewType::Shipment {
                run.retain_shipment_expected(expected);
            }
        }
        RunEvent::ViewFailed { view, reason } => {
            run.push_error(view, reason.clone());
            run.set_status(RunStatus::Failed(reason));
        }
        RunEvent::Finalize => {
            if let Some(expected) = run.shipment_expected() {
                let observed = run.record_count(ViewType::Shipment) as u64;
                if observed == expected {
                    run.set_status(RunStatus::Success);
                } else {
                    run.set_status(RunStatus::PleaseReview);
                }
            }
            run.mark_finalized();
        }
    }
}
