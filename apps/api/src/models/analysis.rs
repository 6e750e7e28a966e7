use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full analysis attached to a completed resume record.
///
/// Scores are generated independently of each other; only their individual
/// ranges are guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8, // 0 – 100
    pub personal_info: PersonalInfo,
    pub sections: Vec<SectionScore>,
    pub skills: Vec<Skill>,
    pub experience: Experience,
    pub education: Vec<Education>,
    pub job_match: JobMatch,
    pub keywords: Keywords,
    pub formatting: Formatting,
    pub analysis_date: DateTime<Utc>,
    pub text_length: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// Qualitative label for a 0 – 100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            ScoreBand::Excellent
        } else if score >= 70 {
            ScoreBand::Good
        } else if score >= 50 {
            ScoreBand::Average
        } else {
            ScoreBand::Poor
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionScore {
    pub name: String,
    pub score: u8,
    pub status: ScoreBand,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub confidence: f64, // 0.0 – 1.0
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub total_years: u32,
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub title: String,
    pub match_percentage: u8,
    pub missing_skills: Vec<String>,
    pub strengths: Vec<String>,
    /// Display-priority order.
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keywords {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub density: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formatting {
    pub score: u8,
    pub issues: Vec<String>,
}
