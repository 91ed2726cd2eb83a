use crate::duration_tracker::summary::TaskSummary;

const BAR_WIDTH: usize = 30;

/// One text bar per summary entry, scaled to the longest duration.
pub fn bar_chart_lines(summary: &TaskSummary) -> Vec<String> {
    let longest = summary
        .entries
        .iter()
        .map(|e| e.accumulated_seconds)
        .fold(0.0, f64::max);
    let label_width = summary
        .entries
        .iter()
        .map(|e| e.class_name.chars().count())
        .max()
        .unwrap_or(0);

    summary
        .entries
        .iter()
        .map(|entry| {
            let filled = if longest > 0.0 {
                ((entry.accumulated_seconds / longest) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            format!(
                "{:<width$} |{}{}| {:.1}s",
                entry.class_name,
                "#".repeat(filled),
                " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                entry.accumulated_seconds,
                width = label_width
            )
        })
        .collect()
}
