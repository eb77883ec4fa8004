//! Pure validation and derivation helpers for report data.
//!
//! Everything here is synchronous and side-effect free; the store applies
//! these before committing fetched data, and the view layer uses them to
//! format what it renders.

use crate::types::{LabelRatios, ReportDetail, ReportSummary, SentimentLabel};

/// Check that a fetched report detail is structurally usable.
///
/// A report is complete when it names a ticker and date, carries at least
/// one section, and at least one section has a non-empty sentence list.
/// Incomplete reports must be rejected before they reach the store.
pub fn is_complete_report(report: &ReportDetail) -> bool {
    if report.ticker.is_empty() || report.date.is_empty() {
        return false;
    }
    if report.sections.is_empty() {
        return false;
    }
    report
        .sections
        .values()
        .any(|section| !section.sentences.is_empty())
}

/// Label with the strictly greatest sentence count.
///
/// Labels are compared in the fixed order positive, neutral, negative
/// against a starting maximum of zero, so an all-zero summary is neutral
/// and ties resolve to the first label in that order.
pub fn dominant_sentiment(summary: &ReportSummary) -> SentimentLabel {
    let mut max_label = SentimentLabel::Neutral;
    let mut max_count = 0;

    for label in SentimentLabel::ALL {
        let count = summary.count(label);
        if count > max_count {
            max_count = count;
            max_label = label;
        }
    }

    max_label
}

/// Render a [0, 1] ratio as a percentage with one decimal place.
///
/// Input outside [0, 1] is not clamped and produces the literal
/// out-of-range percentage.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Display label for a 10-K section id.
///
/// Unknown ids pass through unchanged as their own display name.
pub fn section_display_name(section_id: &str) -> &str {
    match section_id {
        "Item_1" => "Business",
        "Item_1A" => "Risk Factors",
        "Item_7" => "Management's Discussion and Analysis",
        "Item_7A" => "Market Risk Disclosures",
        other => other,
    }
}

/// Per-label ratio triple of a report's summary, for distribution charts.
pub fn sentiment_distribution(report: &ReportDetail) -> LabelRatios {
    LabelRatios {
        positive: report.summary.positive_ratio,
        neutral: report.summary.neutral_ratio,
        negative: report.summary.negative_ratio,
    }
}
