//! Site-wide search: one query over every catalog collection, grouped by
//! collection for display.

use super::filter_collection;
use crate::catalog::Catalog;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One hit, shaped for the search overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultGroup {
    pub id: String,
    pub label: String,
    pub results: Vec<SearchResultItem>,
}

impl SearchResultGroup {
    fn new(id: &str, label: &str, results: Vec<SearchResultItem>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            results,
        }
    }
}

/// Run `query` against every collection of `catalog`.
///
/// Groups come in a fixed order (events, activities, community, partners,
/// profiles) and empty groups are left out. A blank query returns nothing.
pub fn build_global_search(query: &str, catalog: &Catalog) -> Vec<SearchResultGroup> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let events = filter_collection(catalog.events(), trimmed)
        .into_iter()
        .map(|event| {
            let range = format_date_range(&event.start_time, event.end_time.as_deref());
            let meta = format!(
                "{} · {}",
                event.mode.to_uppercase(),
                range.unwrap_or_default()
            );
            SearchResultItem {
                id: event.id.clone(),
                title: event.title.clone(),
                description: Some(event.description.clone()),
                meta: Some(meta.trim().to_string()),
                tags: Some(event.focus_areas.clone()),
                href: Some(format!("/events/{}", event.id)),
                external: false,
                action_label: Some("View event details".to_string()),
            }
        })
        .collect();

    let activities = filter_collection(catalog.activities(), trimmed)
        .into_iter()
        .map(|activity| SearchResultItem {
            id: activity.id.clone(),
            title: activity.title.clone(),
            description: Some(activity.summary.clone()),
            meta: Some(format!("{} · {}", activity.grade_band, activity.subject)),
            tags: Some(activity.tags.clone()),
            href: Some(format!("/activities/{}", activity.id)),
            external: false,
            action_label: Some("View activity".to_string()),
        })
        .collect();

    let community = filter_collection(catalog.community_topics(), trimmed)
        .into_iter()
        .map(|topic| SearchResultItem {
            id: topic.id.clone(),
            title: topic.title.clone(),
            description: Some(topic.summary.clone()),
            meta: None,
            tags: Some(topic.tags.clone()),
            href: Some(topic.url.clone()),
            external: true,
            action_label: Some("Open discussion".to_string()),
        })
        .collect();

    let partners = filter_collection(catalog.partner_resources(), trimmed)
        .into_iter()
        .map(|resource| SearchResultItem {
            id: resource.id.clone(),
            title: resource.name.clone(),
            description: Some(resource.description.clone()),
            meta: Some(resource.focus.clone()),
            tags: None,
            href: Some(resource.url.clone()),
            external: true,
            action_label: Some("Visit resource".to_string()),
        })
        .collect();

    let profiles = filter_collection(catalog.teacher_profiles(), trimmed)
        .into_iter()
        .map(|profile| SearchResultItem {
            id: profile.id.clone(),
            title: profile.name.clone(),
            description: Some(profile.bio.clone()),
            meta: Some(format!("{} · {}", profile.role, profile.school)),
            tags: Some(profile.expertise.clone()),
            href: None,
            external: false,
            action_label: None,
        })
        .collect();

    [
        SearchResultGroup::new("events", "Events & Live Sessions", events),
        SearchResultGroup::new("activities", "Activities & Routines", activities),
        SearchResultGroup::new("community", "Community Discussions", community),
        SearchResultGroup::new("partners", "Partner Tools & Resources", partners),
        SearchResultGroup::new("profiles", "Teacher Community Profiles", profiles),
    ]
    .into_iter()
    .filter(|group| !group.results.is_empty())
    .collect()
}

const DATE_TIME_FORMAT: &str = "%b %-d, %-I:%M %p";
const TIME_FORMAT: &str = "%-I:%M %p";

/// Human-readable span between two RFC 3339 timestamps.
///
/// Rendered in the start timestamp's own offset. An unparsable start yields
/// `None`; a missing or unparsable end yields the start alone.
pub fn format_date_range(start: &str, end: Option<&str>) -> Option<String> {
    let start = parse_timestamp(start)?;
    let start_label = start.format(DATE_TIME_FORMAT).to_string();

    let Some(end) = end.and_then(parse_timestamp) else {
        return Some(start_label);
    };
    let end = end.with_timezone(&start.timezone());

    let end_label = if start.date_naive() == end.date_naive() {
        end.format(TIME_FORMAT).to_string()
    } else {
        end.format(DATE_TIME_FORMAT).to_string()
    };
    Some(format!("{start_label} – {end_label}"))
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).ok()
}
