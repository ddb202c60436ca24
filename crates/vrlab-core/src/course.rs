//! Training course content and progress summaries.

use serde::Deserialize;

use crate::share::SharePayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    Video,
    Interactive,
    Quiz,
    HandsOn,
}

impl ModuleKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Interactive => "interactive",
            Self::Quiz => "quiz",
            Self::HandsOn => "hands-on",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseModule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_min: u32,
    pub kind: ModuleKind,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseStats {
    pub students: u32,
    /// Percent of enrolled students who finished.
    pub completion_rate: u8,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseFeature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Course {
    pub title: String,
    pub tagline: String,
    pub url: String,
    pub stats: CourseStats,
    #[serde(default, rename = "feature")]
    pub features: Vec<CourseFeature>,
    #[serde(default, rename = "module")]
    pub modules: Vec<CourseModule>,
}

impl Course {
    pub fn completed_count(&self) -> usize {
        self.modules.iter().filter(|m| m.completed).count()
    }

    /// Rounded percentage of completed modules; 0 for an empty course.
    pub fn progress_percent(&self) -> u8 {
        if self.modules.is_empty() {
            return 0;
        }
        let pct = self.completed_count() as f64 * 100.0 / self.modules.len() as f64;
        pct.round() as u8
    }

    pub fn total_duration_min(&self) -> u32 {
        self.modules.iter().map(|m| m.duration_min).sum()
    }

    /// "5.5 hours", "45 min".
    pub fn total_duration_label(&self) -> String {
        let total = self.total_duration_min();
        if total < 60 {
            return format!("{} min", total);
        }
        let hours = total as f64 / 60.0;
        if total % 60 == 0 {
            format!("{} hours", total / 60)
        } else {
            format!("{:.1} hours", hours)
        }
    }

    pub fn share_payload(&self) -> SharePayload {
        SharePayload {
            title: format!("{} - VR Training Course", self.title),
            text: self.tagline.clone(),
            url: self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(id: &str, minutes: u32, completed: bool) -> CourseModule {
        CourseModule {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            duration_min: minutes,
            kind: ModuleKind::Video,
            difficulty: Difficulty::Beginner,
            completed,
        }
    }

    fn course(modules: Vec<CourseModule>) -> Course {
        Course {
            title: "The Hawk".to_string(),
            tagline: "Learn VR".to_string(),
            url: "https://example.org/course".to_string(),
            stats: CourseStats {
                students: 45,
                completion_rate: 78,
                rating: 4.8,
            },
            features: Vec::new(),
            modules,
        }
    }

    #[test]
    fn test_progress_rounds() {
        let c = course(vec![
            module("a", 45, true),
            module("b", 30, true),
            module("c", 60, false),
            module("d", 75, false),
            module("e", 90, false),
            module("f", 30, false),
        ]);
        assert_eq!(c.completed_count(), 2);
        assert_eq!(c.progress_percent(), 33);
        assert_eq!(c.total_duration_min(), 330);
        assert_eq!(c.total_duration_label(), "5.5 hours");
    }

    #[test]
    fn test_empty_course_has_zero_progress() {
        let c = course(Vec::new());
        assert_eq!(c.progress_percent(), 0);
        assert_eq!(c.total_duration_label(), "0 min");
    }

    #[test]
    fn test_share_payload_uses_course_url() {
        let payload = course(Vec::new()).share_payload();
        assert_eq!(payload.title, "The Hawk - VR Training Course");
        assert_eq!(payload.url, "https://example.org/course");
    }
}
