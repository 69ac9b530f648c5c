//! Immutable in-memory content catalog.
//!
//! Loaded once at startup, either from the built-in JSON bundled with the
//! crate or from a JSON file with the same shape, and shared read-only for
//! the life of the process.

use crate::error::{Error, Result};
use crate::model::content::*;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Every content collection the platform serves.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Catalog {
    activities: Vec<Activity>,
    blog_posts: Vec<BlogPost>,
    community_topics: Vec<CommunityTopic>,
    community_discussions: Vec<CommunityDiscussion>,
    partner_resources: Vec<PartnerResource>,
    teacher_profiles: Vec<TeacherProfile>,
    events: Vec<Event>,
    teacher_stage_talks: Vec<TeacherStageTalk>,
}

impl Catalog {
    /// The content bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog document. Missing collections are empty.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog document from disk.
    ///
    /// A missing or unreadable file is [`Error::Io`]; bad content is
    /// [`Error::Catalog`] naming the file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
            .map_err(|e| Error::Catalog(format!("bad catalog {}: {e}", path.display())))
    }

    /// Identifiers must be unique within a collection so by-id lookups are
    /// unambiguous.
    fn validate(&self) -> Result<()> {
        check_unique("activities", self.activities.iter().map(|a| a.id.as_str()))?;
        check_unique("blogPosts", self.blog_posts.iter().map(|b| b.id.as_str()))?;
        check_unique(
            "communityTopics",
            self.community_topics.iter().map(|t| t.id.as_str()),
        )?;
        check_unique(
            "partnerResources",
            self.partner_resources.iter().map(|p| p.id.as_str()),
        )?;
        check_unique(
            "teacherProfiles",
            self.teacher_profiles.iter().map(|p| p.id.as_str()),
        )?;
        check_unique("events", self.events.iter().map(|e| e.id.as_str()))?;
        check_unique(
            "teacherStageTalks",
            self.teacher_stage_talks.iter().map(|t| t.id.as_str()),
        )?;
        Ok(())
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn blog_posts(&self) -> &[BlogPost] {
        &self.blog_posts
    }

    pub fn community_topics(&self) -> &[CommunityTopic] {
        &self.community_topics
    }

    /// The discussion thread behind a community topic.
    pub fn discussion_for_topic(&self, topic_id: &str) -> Option<&CommunityDiscussion> {
        self.community_discussions
            .iter()
            .find(|d| d.topic_id == topic_id)
    }

    pub fn partner_resources(&self) -> &[PartnerResource] {
        &self.partner_resources
    }

    pub fn teacher_profiles(&self) -> &[TeacherProfile] {
        &self.teacher_profiles
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn teacher_stage_talks(&self) -> &[TeacherStageTalk] {
        &self.teacher_stage_talks
    }
}

fn check_unique<'a>(collection: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(Error::Catalog(format!(
                "duplicate id '{id}' in {collection}"
            )));
        }
    }
    Ok(())
}
