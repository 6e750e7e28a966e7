//! Synthetic analysis: a plausible, range-valid `AnalysisResult` generated
//! without reading the uploaded file.
//!
//! Algorithm:
//! 1. base ~ U[60, 95); overall = round(base)
//! 2. each section = clamp(round(base + U[-5, 5)), 0, 100), labelled by band
//! 3. 4 – 8 catalog skills, catalog order, confidence = floor + U[0, spread)
//! 4. job match resolved against the profile when one is given, else defaults
//! 5. formatting = round(80 + U[0, 15)) with 0 – 2 issues

use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::analysis::{
    AnalysisResult, Education, Experience, Formatting, JobMatch, Keywords, PersonalInfo, Position,
    ScoreBand, SectionScore, Skill,
};
use crate::models::job_profile::JobProfile;
use crate::scoring::taxonomy::*;
use crate::scoring::{AnalysisEngine, AnalysisRequest};

pub struct SyntheticAnalysisEngine {
    rng: Mutex<StdRng>,
    /// Probability in [0, 1] that a request fails instead of producing a result.
    failure_rate: f64,
}

impl SyntheticAnalysisEngine {
    pub fn new(failure_rate: f64) -> Self {
        Self::from_rng(StdRng::from_entropy(), failure_rate)
    }

    /// Deterministic engine for tests and reproducible demos.
    pub fn with_seed(seed: u64, failure_rate: f64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), failure_rate)
    }

    fn from_rng(rng: StdRng, failure_rate: f64) -> Self {
        Self {
            rng: Mutex::new(rng),
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    fn generate(&self, request: AnalysisRequest<'_>) -> Result<AnalysisResult, AppError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("synthetic engine rng lock poisoned")))?;

        if self.failure_rate > 0.0 && rng.gen_bool(self.failure_rate) {
            warn!(resume_id = request.resume_id, "simulated analysis failure");
            return Err(AppError::Analysis(format!(
                "Simulated analysis failure for {}",
                request.filename
            )));
        }

        let result = synthesize(&mut *rng, request.job_profile);
        debug!(
            resume_id = request.resume_id,
            overall_score = result.overall_score,
            skills = result.skills.len(),
            "synthesized analysis"
        );
        Ok(result)
    }
}

#[async_trait]
impl AnalysisEngine for SyntheticAnalysisEngine {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn analyze(&self, request: AnalysisRequest<'_>) -> Result<AnalysisResult, AppError> {
        self.generate(request)
    }
}

/// Builds a complete analysis from `rng`. Reads `profile` but mutates nothing.
pub fn synthesize<R: Rng + ?Sized>(rng: &mut R, profile: Option<&JobProfile>) -> AnalysisResult {
    let base: f64 = rng.gen_range(60.0..95.0);
    let overall_score = clamp_score(base);

    let sections = SECTION_NAMES
        .iter()
        .map(|name| {
            let score = clamp_score(base + rng.gen_range(-5.0..5.0));
            SectionScore {
                name: name.to_string(),
                score,
                status: ScoreBand::from_score(score),
                found: true,
            }
        })
        .collect();

    let skills = pick_skills(rng);
    let experience = build_experience(rng, &skills);
    let education = build_education(rng, experience.total_years);
    let job_match = build_job_match(profile, &skills, experience.total_years, overall_score);

    let found: Vec<String> = skills.iter().map(|s| s.name.clone()).collect();
    let missing = match profile {
        Some(_) => job_match.missing_skills.clone(),
        None => DEFAULT_MISSING_KEYWORDS
            .iter()
            .filter(|kw| !contains_ignore_case(&found, kw))
            .map(|kw| kw.to_string())
            .collect(),
    };
    let keywords = Keywords {
        density: found.len() as u32,
        found,
        missing,
    };

    let issue_count = rng.gen_range(0..=2);
    let formatting = Formatting {
        score: clamp_score(80.0 + rng.gen_range(0.0..15.0)),
        issues: FORMATTING_ISSUES
            .choose_multiple(rng, issue_count)
            .map(|s| s.to_string())
            .collect(),
    };

    AnalysisResult {
        overall_score,
        personal_info: build_personal_info(rng),
        sections,
        skills,
        experience,
        education,
        job_match,
        keywords,
        formatting,
        analysis_date: Utc::now(),
        text_length: rng.gen_range(1500..2500),
    }
}

/// Rounds and clamps to the 0 – 100 score range.
pub fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

fn pick_skills<R: Rng + ?Sized>(rng: &mut R) -> Vec<Skill> {
    let count = rng.gen_range(MIN_SKILLS..=MAX_SKILLS).min(SKILL_CATALOG.len());
    let mut picked = index::sample(rng, SKILL_CATALOG.len(), count).into_vec();
    picked.sort_unstable();

    picked
        .into_iter()
        .map(|i| {
            let spec = &SKILL_CATALOG[i];
            let confidence = (spec.floor + rng.gen_range(0.0..spec.spread)).min(1.0);
            Skill {
                name: spec.name.to_string(),
                confidence: (confidence * 100.0).round() / 100.0,
                category: spec.category.to_string(),
            }
        })
        .collect()
}

fn build_personal_info<R: Rng + ?Sized>(rng: &mut R) -> PersonalInfo {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    PersonalInfo {
        name: format!("{first} {last}"),
        email: format!("{}.{}@email.com", first.to_lowercase(), last.to_lowercase()),
        phone: format!(
            "+1 (555) {:03}-{:04}",
            rng.gen_range(100..1000),
            rng.gen_range(0..10000)
        ),
        location: pick(rng, LOCATIONS).to_string(),
    }
}

fn build_experience<R: Rng + ?Sized>(rng: &mut R, skills: &[Skill]) -> Experience {
    let total_years = rng.gen_range(2..=9);
    let start_year = Utc::now().year() - rng.gen_range(1..=total_years.min(4)) as i32;
    Experience {
        total_years,
        positions: vec![Position {
            title: pick(rng, POSITION_TITLES).to_string(),
            company: pick(rng, COMPANIES).to_string(),
            duration: format!("{start_year}-Present"),
            skills: skills.iter().take(3).map(|s| s.name.clone()).collect(),
        }],
    }
}

fn build_education<R: Rng + ?Sized>(rng: &mut R, total_years: u32) -> Vec<Education> {
    let graduated = Utc::now().year() - total_years as i32 - rng.gen_range(0..3);
    vec![Education {
        degree: pick(rng, DEGREES).to_string(),
        institution: pick(rng, INSTITUTIONS).to_string(),
        year: graduated.to_string(),
    }]
}

/// Job match against the resolved profile, or the default title and lists when
/// the profile id did not resolve.
fn build_job_match(
    profile: Option<&JobProfile>,
    skills: &[Skill],
    total_years: u32,
    match_percentage: u8,
) -> JobMatch {
    let generic = GENERIC_RECOMMENDATIONS.iter().map(|s| s.to_string());

    let Some(profile) = profile else {
        return JobMatch {
            title: DEFAULT_JOB_TITLE.to_string(),
            match_percentage,
            missing_skills: DEFAULT_MISSING_SKILLS.iter().map(|s| s.to_string()).collect(),
            strengths: DEFAULT_STRENGTHS.iter().map(|s| s.to_string()).collect(),
            recommendations: generic.collect(),
        };
    };

    let names: Vec<String> = skills.iter().map(|s| s.name.clone()).collect();
    let wanted = profile.required_skills.iter().chain(&profile.preferred_skills);

    let missing_skills: Vec<String> = wanted
        .clone()
        .filter(|s| !contains_ignore_case(&names, s))
        .take(MATCH_LIST_LIMIT)
        .cloned()
        .collect();

    let wanted: Vec<String> = wanted.cloned().collect();
    let mut strengths: Vec<String> = names
        .iter()
        .filter(|n| contains_ignore_case(&wanted, n))
        .take(MATCH_LIST_LIMIT)
        .cloned()
        .collect();
    if strengths.is_empty() {
        strengths = DEFAULT_STRENGTHS.iter().map(|s| s.to_string()).collect();
    }

    let missing_required: Vec<&str> = profile
        .required_skills
        .iter()
        .filter(|s| !contains_ignore_case(&names, s))
        .map(String::as_str)
        .collect();
    let preferred_hits = profile
        .preferred_skills
        .iter()
        .filter(|s| contains_ignore_case(&names, s))
        .count();

    let mut recommendations = Vec::new();
    if !missing_required.is_empty() {
        recommendations.push(format!(
            "Focus on acquiring missing required skills: {}",
            missing_required.join(", ")
        ));
    }
    if preferred_hits * 2 < profile.preferred_skills.len() {
        recommendations.push("Consider learning preferred skills to stand out".to_string());
    }
    if total_years < profile.minimum_experience {
        recommendations.push(format!(
            "Highlight additional experience; the role asks for {}+ years",
            profile.minimum_experience
        ));
    }
    if names.len() < 6 {
        recommendations.push("Add more technical skills to your resume".to_string());
    }
    recommendations.extend(generic);

    JobMatch {
        title: profile.title.clone(),
        match_percentage,
        missing_skills,
        strengths,
        recommendations,
    }
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|h| h.eq_ignore_ascii_case(needle))
}
