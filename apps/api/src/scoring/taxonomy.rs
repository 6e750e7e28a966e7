//! Fixed vocabularies the synthetic engine draws from.

/// A catalog skill with the range its confidence is drawn from:
/// `floor + U[0, spread)`, capped at 1.0.
#[derive(Debug, Clone, Copy)]
pub struct SkillSpec {
    pub name: &'static str,
    pub floor: f64,
    pub spread: f64,
    pub category: &'static str,
}

const fn skill(
    name: &'static str,
    floor: f64,
    spread: f64,
    category: &'static str,
) -> SkillSpec {
    SkillSpec {
        name,
        floor,
        spread,
        category,
    }
}

pub const SKILL_CATALOG: &[SkillSpec] = &[
    skill("JavaScript", 0.85, 0.10, "programming"),
    skill("React", 0.80, 0.15, "web_frontend"),
    skill("Node.js", 0.75, 0.20, "web_backend"),
    skill("Python", 0.70, 0.25, "programming"),
    skill("HTML", 0.90, 0.10, "web_frontend"),
    skill("CSS", 0.85, 0.10, "web_frontend"),
    skill("SQL", 0.70, 0.20, "databases"),
    skill("AWS", 0.60, 0.30, "cloud"),
    skill("TypeScript", 0.65, 0.25, "programming"),
    skill("Vue.js", 0.60, 0.30, "web_frontend"),
];

pub const MIN_SKILLS: usize = 4;
pub const MAX_SKILLS: usize = 8;

pub const SECTION_NAMES: &[&str] = &["Skills Match", "Experience", "Education", "Keywords"];

pub const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Mike", "Sarah", "David", "Emily", "Chris", "Lisa", "Alex", "Maria",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Brown", "Davis", "Wilson", "Miller", "Taylor", "Anderson", "Garcia",
    "Martinez",
];

pub const LOCATIONS: &[&str] = &[
    "San Francisco, CA",
    "New York, NY",
    "Austin, TX",
    "Seattle, WA",
    "Boston, MA",
    "Denver, CO",
    "Chicago, IL",
    "Los Angeles, CA",
];

pub const POSITION_TITLES: &[&str] = &[
    "Software Developer",
    "Senior Developer",
    "Frontend Engineer",
    "Backend Engineer",
    "Full Stack Engineer",
];

pub const COMPANIES: &[&str] = &[
    "Tech Company",
    "Tech Corp",
    "DataTech Inc",
    "Cloudworks",
    "Pixel Labs",
];

pub const DEGREES: &[&str] = &[
    "Bachelor of Science in Computer Science",
    "Bachelor of Engineering in Software Engineering",
    "Master of Science in Computer Science",
];

pub const INSTITUTIONS: &[&str] = &["University", "State University", "Institute of Technology"];

/// Used when the requested job profile does not resolve.
pub const DEFAULT_JOB_TITLE: &str = "Full Stack Developer";
pub const DEFAULT_MISSING_SKILLS: &[&str] = &["GraphQL", "Docker"];
pub const DEFAULT_STRENGTHS: &[&str] = &["Technical skills", "Experience"];
pub const DEFAULT_MISSING_KEYWORDS: &[&str] = &["TypeScript", "AWS"];

/// Appended after any profile-specific advice, in display order.
pub const GENERIC_RECOMMENDATIONS: &[&str] = &[
    "Add more technical projects",
    "Improve keyword optimization",
    "Include quantified achievements",
];

pub const FORMATTING_ISSUES: &[&str] = &[
    "Consider using more bullet points",
    "Add consistent formatting for dates",
    "Avoid tables and multi-column layouts",
    "Use standard section headings",
];

/// Upper bound on missing-skill and strength lists.
pub const MATCH_LIST_LIMIT: usize = 5;
