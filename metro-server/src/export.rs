//! Plain-text trip receipts.
//!
//! The receipt is for people, not for parsing back: one labelled value per
//! line, with distance and fare rounded to two decimals.

use std::fmt::Write;

use crate::domain::{Metric, Route, TripMetrics, format_minutes};
use crate::planner::FareConfig;

/// Suggested filename for downloads.
pub const RECEIPT_FILENAME: &str = "metro_route.txt";

/// Render a receipt for a trip.
pub fn render_receipt(
    route: &Route,
    metric: Metric,
    metrics: &TripMetrics,
    fare: &FareConfig,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Metro Route Details");
    let _ = writeln!(out, "Source: {}", route.source());
    let _ = writeln!(out, "Destination: {}", route.destination());
    let _ = writeln!(out, "Route Preference: {}", metric.label());
    let _ = writeln!(out, "Route: {}", route.display_path());
    let _ = writeln!(out, "Total Distance: {:.2} km", metrics.distance_km);
    let _ = writeln!(
        out,
        "Estimated Travel Time: {} minutes",
        format_minutes(metrics.time_min)
    );
    let _ = writeln!(out, "Estimated Fare: {}", fare.format(metrics.fare));
    out
}
