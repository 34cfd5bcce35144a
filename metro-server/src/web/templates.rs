//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Metric, format_minutes};

use super::dto::{FavoriteResult, RouteResult, StopResult};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stops: Vec<StopView>,
    pub metrics: Vec<MetricView>,
}

/// Saved favourites page.
#[derive(Template)]
#[template(path = "favorites.html")]
pub struct FavoritesTemplate {
    pub favorites: Vec<FavoriteView>,
}

/// A single saved favourite, shown with its route.
#[derive(Template)]
#[template(path = "favorite_detail.html")]
pub struct FavoriteDetailTemplate {
    pub favorite: FavoriteView,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route details fragment.
#[derive(Template)]
#[template(path = "route_result.html")]
pub struct RouteResultTemplate {
    pub trip: TripView,
}

/// Warning or error message fragment.
#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticeTemplate {
    /// "warning" for expected outcomes, "error" otherwise
    pub kind: &'static str,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Stop option for selectors and route listings.
#[derive(Debug, Clone)]
pub struct StopView {
    pub name: String,
    pub line: String,
    pub label: String,
}

impl StopView {
    pub fn from_result(stop: &StopResult) -> Self {
        Self {
            name: stop.name.clone(),
            line: stop.line.clone(),
            label: format!("{} ({} Line)", stop.name, stop.line),
        }
    }
}

/// Metric choice for the preference radio buttons.
#[derive(Debug, Clone)]
pub struct MetricView {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

impl MetricView {
    pub fn all() -> Vec<Self> {
        Metric::ALL
            .iter()
            .map(|m| MetricView {
                value: m.as_str(),
                label: m.label(),
                checked: *m == Metric::default(),
            })
            .collect()
    }
}

/// Trip details, preformatted for display.
#[derive(Debug, Clone)]
pub struct TripView {
    pub source: String,
    pub destination: String,
    pub metric: &'static str,
    pub preference: &'static str,
    pub path: String,
    pub stops: Vec<RouteStopView>,
    pub distance: String,
    pub time: String,
    pub fare: String,
}

impl TripView {
    pub fn from_result(result: &RouteResult) -> Self {
        let stops = result
            .stops
            .iter()
            .enumerate()
            .map(|(i, stop)| RouteStopView {
                stop: StopView::from_result(stop),
                changes_line: result.hops.get(i).is_some_and(|hop| hop.interchange),
            })
            .collect();

        Self {
            source: result.source.clone(),
            destination: result.destination.clone(),
            metric: result.metric.as_str(),
            preference: result.preference,
            path: result.path.clone(),
            stops,
            distance: format!("{:.2}", result.distance_km),
            time: format_minutes(result.time_min),
            fare: result.fare_display.clone(),
        }
    }
}

/// A stop along a displayed route.
#[derive(Debug, Clone)]
pub struct RouteStopView {
    pub stop: StopView,
    /// Whether the hop leaving this stop changes line
    pub changes_line: bool,
}

/// Saved favourite, preformatted for display.
#[derive(Debug, Clone)]
pub struct FavoriteView {
    pub index: usize,
    /// One-based position for display
    pub number: usize,
    pub summary: String,
    pub saved_at: String,
    pub trip: TripView,
}

impl FavoriteView {
    pub fn from_result(result: &FavoriteResult) -> Self {
        Self {
            index: result.index,
            number: result.index + 1,
            summary: result.summary.clone(),
            saved_at: result.saved_at.clone(),
            trip: TripView::from_result(&result.route),
        }
    }
}
