use std::sync::Arc;

use crate::failure::FailureRecord;

/// Drops the trailing frames `child` shares with `parent`.
///
/// Frames are compared from the end. The child comes back as-is (same `Arc`)
/// when either trace is empty, when the last frames already differ, or when
/// every child frame matches, so the result never has an empty backtrace.
pub fn truncate(parent: &[String], child: &Arc<FailureRecord>) -> Arc<FailureRecord> {
    let child_bt = child.backtrace();
    if child_bt.is_empty() || parent.is_empty() {
        return Arc::clone(child);
    }

    let first_difference = (1..=child_bt.len()).find(|&from_end| {
        let child_frame = &child_bt[child_bt.len() - from_end];
        parent
            .len()
            .checked_sub(from_end)
            .map(|idx| &parent[idx])
            .is_none_or(|parent_frame| parent_frame != child_frame)
    });

    match first_difference {
        None | Some(1) => Arc::clone(child),
        Some(from_end) => {
            let keep = child_bt.len() - from_end + 1;
            tracing::trace!(
                dropped = child_bt.len() - keep,
                kept = keep,
                "truncated shared backtrace suffix"
            );
            Arc::new(child.with_replaced_backtrace(child_bt[..keep].to_vec()))
        }
    }
}
