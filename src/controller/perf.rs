use crate::page::{EntryType, Page, PerformanceEntry};

use super::Action;

/// Log buffered largest-contentful-paint entries. Returns whether new
/// entries should be observed.
pub(super) fn init(page: &mut Page<Action>) -> bool {
    if !page.window.capabilities.performance_observer {
        return false;
    }
    for entry in page
        .window
        .performance_entries(EntryType::LargestContentfulPaint)
    {
        log_entry(page, &entry);
    }
    true
}

pub(super) fn log_entry(page: &mut Page<Action>, entry: &PerformanceEntry) {
    if entry.entry_type == EntryType::LargestContentfulPaint {
        page.window
            .console
            .log(format!("[perf] {}: {}", entry.name, entry.render_time));
    }
}
