//! Content records served by the catalog and exposed to search.
//!
//! Field names serialize in camelCase, matching the JSON the front end
//! consumes.

use super::Tag;
use serde::{Deserialize, Serialize};

/// A classroom activity or routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub grade_band: String,
    pub subject: String,
    pub duration: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub url: String,
}

/// Entry point to a community discussion thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityTopic {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub url: String,
}

/// The thread behind a [`CommunityTopic`], keyed by `topic_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDiscussion {
    pub topic_id: String,
    pub guiding_prompt: String,
    pub summary: String,
    #[serde(default)]
    pub messages: Vec<DiscussionMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionMessage {
    pub id: String,
    pub author_role: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_profile_id: Option<String>,
    pub timestamp: String,
    pub content: String,
    #[serde(default)]
    pub upvotes: u32,
}

/// External tool or library recommended by a partner organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerResource {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub id: String,
    pub name: String,
    pub role: String,
    pub school: String,
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub avatar_url: String,
}

/// A live session or workshop. Times are RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub topic: String,
    pub mode: String,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_url: Option<String>,
    #[serde(default)]
    pub image_url: String,
}

/// A short talk given by a teacher on the "Teacher on Stage" series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStageTalk {
    pub id: String,
    pub title: String,
    pub teacher_name: String,
    pub teacher_role: String,
    pub school: String,
    pub description: String,
    #[serde(default)]
    pub highlight: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration: String,
    pub scheduled_at: String,
    pub mode: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_url: Option<String>,
    #[serde(default)]
    pub image_url: String,
}
