//! Searchable fields of each content record.
//!
//! Only the fields named by [`Searchable`] are indexed. Profile expertise and
//! event focus areas are display data and stay out of the haystack.

use super::Searchable;
use crate::model::content::*;

impl Searchable for Activity {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
    fn summary(&self) -> Option<&str> {
        Some(&self.summary)
    }
    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }
    fn tags(&self) -> Option<&[String]> {
        Some(&self.tags)
    }
}

impl Searchable for BlogPost {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
    fn summary(&self) -> Option<&str> {
        Some(&self.summary)
    }
    fn tags(&self) -> Option<&[String]> {
        Some(&self.tags)
    }
}

impl Searchable for CommunityTopic {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
    fn summary(&self) -> Option<&str> {
        Some(&self.summary)
    }
    fn tags(&self) -> Option<&[String]> {
        Some(&self.tags)
    }
}

impl Searchable for PartnerResource {
    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
    fn focus(&self) -> Option<&str> {
        Some(&self.focus)
    }
}

impl Searchable for TeacherProfile {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
    fn role(&self) -> Option<&str> {
        Some(&self.role)
    }
    fn bio(&self) -> Option<&str> {
        Some(&self.bio)
    }
}

impl Searchable for Event {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }
}

impl Searchable for TeacherStageTalk {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }
    fn name(&self) -> Option<&str> {
        Some(&self.teacher_name)
    }
    fn role(&self) -> Option<&str> {
        Some(&self.teacher_role)
    }
    fn tags(&self) -> Option<&[String]> {
        Some(&self.tags)
    }
}
