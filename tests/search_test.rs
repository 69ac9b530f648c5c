//! Integration tests for keyword filtering and global search.

use scolaia_rs::catalog::Catalog;
use scolaia_rs::search::{
    Searchable, build_global_search, extract_keywords, filter_collection, haystack, search_terms,
};

#[derive(Debug, Clone, PartialEq)]
struct Note {
    id: &'static str,
    title: &'static str,
    bio: Option<&'static str>,
    tags: Vec<String>,
}

impl Searchable for Note {
    fn title(&self) -> Option<&str> {
        Some(self.title)
    }
    fn bio(&self) -> Option<&str> {
        self.bio
    }
    fn tags(&self) -> Option<&[String]> {
        Some(&self.tags)
    }
}

fn note(id: &'static str, title: &'static str, tags: &[&str]) -> Note {
    Note {
        id,
        title,
        bio: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn notes() -> Vec<Note> {
    vec![
        note("n1", "Fractions with paper strips", &["math"]),
        note("n2", "Morning circle routine", &["SEL", "community"]),
        note("n3", "Lab safety walkthrough", &["science", "group roles"]),
        note("n4", "Lesson planning sprint", &["AI", "planning"]),
    ]
}

fn ids(items: &[&Note]) -> Vec<&'static str> {
    items.iter().map(|n| n.id).collect()
}

// ---------------------------------------------------------------------------
// Keyword extraction
// ---------------------------------------------------------------------------

#[test]
fn keywords_drop_stop_words_and_short_tokens() {
    assert_eq!(
        extract_keywords("how can I improve fractions"),
        vec!["improve".to_string(), "fractions".to_string()]
    );
}

#[test]
fn single_stop_word_yields_no_keywords() {
    assert!(extract_keywords("an").is_empty());
    assert_eq!(search_terms("an"), vec!["an".to_string()]);
}

#[test]
fn keywords_are_lower_cased_and_split_on_any_whitespace() {
    assert_eq!(
        extract_keywords("  Classroom\tMANAGEMENT\nstrategies "),
        vec![
            "classroom".to_string(),
            "management".to_string(),
            "strategies".to_string()
        ]
    );
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[test]
fn blank_query_passes_everything_through() {
    let items = notes();
    for query in ["", "   ", "\t\n"] {
        let result = filter_collection(&items, query);
        assert_eq!(result.len(), items.len());
        for (kept, original) in result.iter().zip(&items) {
            assert!(std::ptr::eq(*kept, original));
        }
    }
}

#[test]
fn any_keyword_is_enough() {
    let items = notes();
    let result = filter_collection(&items, "how can I improve fractions");
    assert_eq!(ids(&result), vec!["n1"]);
}

#[test]
fn or_semantics_across_keywords_keeps_input_order() {
    let items = notes();
    let result = filter_collection(&items, "planning science");
    assert_eq!(ids(&result), vec!["n3", "n4"]);
}

#[test]
fn two_letter_query_matches_literally() {
    let items = notes();
    // Too short to be a keyword; the whole query is matched instead.
    let result = filter_collection(&items, "AI");
    assert_eq!(ids(&result), vec!["n4"]);
}

#[test]
fn stop_word_query_matches_the_literal_word() {
    let items = notes();
    // "an" occurs inside "planning"
    let result = filter_collection(&items, "an");
    assert_eq!(ids(&result), vec!["n4"]);
}

#[test]
fn stop_word_phrase_rarely_matches() {
    let items = notes();
    assert!(filter_collection(&items, "how is the").is_empty());
}

#[test]
fn tags_are_searched_as_a_joined_phrase() {
    let items = notes();
    let result = filter_collection(&items, "roles");
    assert_eq!(ids(&result), vec!["n3"]);
}

#[test]
fn filtering_is_idempotent() {
    let items = notes();
    for query in ["planning science", "an", "fractions", "nothing-matches"] {
        let once: Vec<Note> = filter_collection(&items, query)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Note> = filter_collection(&once, query)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice, "query {query:?}");
    }
}

#[test]
fn haystack_follows_field_order_and_skips_missing_fields() {
    let mut n = note("n9", "Peer Feedback", &["Writing", "Rubrics"]);
    assert_eq!(haystack(&n), "peer feedback writing rubrics");

    n.bio = Some("Coach in Berlin");
    assert_eq!(haystack(&n), "peer feedback coach in berlin writing rubrics");
}

#[test]
fn kept_records_contain_a_term_and_dropped_ones_do_not() {
    let catalog = Catalog::builtin().unwrap();
    let activities = catalog.activities();

    for query in ["fractions", "cooperative roles", "AI", "how is the", "circle"] {
        let terms = search_terms(query);
        let kept = filter_collection(activities, query);

        for activity in activities {
            let text = haystack(activity);
            let contains = terms.iter().any(|t| text.contains(t.as_str()));
            let is_kept = kept.iter().any(|k| std::ptr::eq(*k, activity));
            assert_eq!(contains, is_kept, "query {query:?}, activity {}", activity.id);
        }
    }
}

// ---------------------------------------------------------------------------
// Global search
// ---------------------------------------------------------------------------

#[test]
fn global_search_groups_hits_by_collection() {
    let catalog = Catalog::builtin().unwrap();
    let groups = build_global_search("fractions", &catalog);

    let group_ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(group_ids, vec!["events", "activities", "community", "profiles"]);

    let event = &groups[0].results[0];
    assert_eq!(event.id, "event-fractions-live");
    assert_eq!(
        event.meta.as_deref(),
        Some("ONLINE · Mar 12, 3:00 PM – 4:30 PM")
    );
    assert_eq!(event.href.as_deref(), Some("/events/event-fractions-live"));
    assert!(!event.external);

    let topic = &groups[2].results[0];
    assert!(topic.external);
    assert_eq!(topic.action_label.as_deref(), Some("Open discussion"));

    let profile = &groups[3].results[0];
    assert_eq!(profile.title, "Ms. Ramirez");
    assert_eq!(profile.meta.as_deref(), Some("Math Teacher · Lincoln Elementary"));
    assert!(profile.href.is_none());
}

#[test]
fn global_search_partner_hits_use_name_and_focus() {
    let catalog = Catalog::builtin().unwrap();
    let groups = build_global_search("simulation videos", &catalog);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, "partners");
    let hit = &groups[0].results[0];
    assert_eq!(hit.title, "EdTech Labs Library");
    assert_eq!(hit.meta.as_deref(), Some("Science labs"));
    assert!(hit.external);
}

#[test]
fn global_search_ignores_blank_queries() {
    let catalog = Catalog::builtin().unwrap();
    assert!(build_global_search("   ", &catalog).is_empty());
}

#[test]
fn global_search_without_hits_is_empty() {
    let catalog = Catalog::builtin().unwrap();
    assert!(build_global_search("xylophone", &catalog).is_empty());
}
