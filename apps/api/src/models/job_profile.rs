use serde::{Deserialize, Serialize};

/// A target role used to personalise synthetic analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProfile {
    pub id: String,
    pub title: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub minimum_experience: u32,
    pub description: String,
}

/// Creation payload. Any `id` a caller sends is ignored by serde since the
/// field does not exist here; the store always allocates a fresh one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobProfile {
    pub title: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub minimum_experience: u32,
    #[serde(default)]
    pub description: String,
}

impl NewJobProfile {
    pub fn with_id(self, id: String) -> JobProfile {
        JobProfile {
            id,
            title: self.title,
            required_skills: self.required_skills,
            preferred_skills: self.preferred_skills,
            minimum_experience: self.minimum_experience,
            description: self.description,
        }
    }
}
