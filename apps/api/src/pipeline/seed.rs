//! Demo data loaded at startup so the UI has something to show before the
//! first upload.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::analysis::{
    AnalysisResult, Education, Experience, Formatting, JobMatch, Keywords, PersonalInfo, Position,
    ScoreBand, SectionScore, Skill,
};
use crate::models::job_profile::JobProfile;
use crate::models::resume::{ResumeRecord, ResumeStatus};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn section(name: &str, score: u8) -> SectionScore {
    SectionScore {
        name: name.to_string(),
        score,
        status: ScoreBand::from_score(score),
        found: true,
    }
}

fn skill(name: &str, confidence: f64, category: &str) -> Skill {
    Skill {
        name: name.to_string(),
        confidence,
        category: category.to_string(),
    }
}

/// Two completed records, newest first.
pub fn demo_resumes() -> Vec<ResumeRecord> {
    vec![
        ResumeRecord {
            id: "1".to_string(),
            filename: "john_doe_resume.pdf".to_string(),
            upload_date: at(2024, 1, 20, 10, 30),
            status: ResumeStatus::Completed,
            error: None,
            analysis: Some(AnalysisResult {
                overall_score: 87,
                personal_info: PersonalInfo {
                    name: "John Doe".to_string(),
                    email: "john.doe@email.com".to_string(),
                    phone: "+1 (555) 123-4567".to_string(),
                    location: "San Francisco, CA".to_string(),
                },
                sections: vec![
                    section("Skills Match", 92),
                    section("Experience", 85),
                    section("Education", 78),
                    section("Keywords", 90),
                ],
                skills: vec![
                    skill("JavaScript", 0.95, "programming"),
                    skill("React", 0.92, "web_frontend"),
                    skill("Python", 0.88, "programming"),
                    skill("SQL", 0.85, "databases"),
                ],
                experience: Experience {
                    total_years: 5,
                    positions: vec![Position {
                        title: "Senior Developer".to_string(),
                        company: "Tech Corp".to_string(),
                        duration: "2021-Present".to_string(),
                        skills: strings(&["React", "Node.js", "PostgreSQL"]),
                    }],
                },
                education: vec![Education {
                    degree: "Bachelor of Science in Computer Science".to_string(),
                    institution: "University of California".to_string(),
                    year: "2019".to_string(),
                }],
                job_match: JobMatch {
                    title: "Full Stack Developer".to_string(),
                    match_percentage: 87,
                    missing_skills: strings(&["GraphQL", "Docker"]),
                    strengths: strings(&["React expertise", "Full-stack experience"]),
                    recommendations: strings(&[
                        "Add GraphQL experience to improve backend skills",
                        "Include more quantified achievements in your experience section",
                        "Consider adding Docker container knowledge",
                    ]),
                },
                keywords: Keywords {
                    found: strings(&["JavaScript", "React", "Python", "SQL"]),
                    missing: strings(&["GraphQL", "Docker"]),
                    density: 6,
                },
                formatting: Formatting {
                    score: 85,
                    issues: strings(&[
                        "Consider using more bullet points",
                        "Add consistent formatting for dates",
                    ]),
                },
                analysis_date: at(2024, 1, 20, 10, 35),
                text_length: 1850,
            }),
        },
        ResumeRecord {
            id: "2".to_string(),
            filename: "jane_smith_resume.pdf".to_string(),
            upload_date: at(2024, 1, 19, 14, 20),
            status: ResumeStatus::Completed,
            error: None,
            analysis: Some(AnalysisResult {
                overall_score: 92,
                personal_info: PersonalInfo {
                    name: "Jane Smith".to_string(),
                    email: "jane.smith@email.com".to_string(),
                    phone: "+1 (555) 987-6543".to_string(),
                    location: "New York, NY".to_string(),
                },
                sections: vec![
                    section("Skills Match", 95),
                    section("Experience", 90),
                    section("Education", 88),
                    section("Keywords", 93),
                ],
                skills: vec![
                    skill("Python", 0.98, "programming"),
                    skill("Django", 0.94, "web_backend"),
                    skill("PostgreSQL", 0.91, "databases"),
                    skill("Docker", 0.89, "cloud"),
                ],
                experience: Experience {
                    total_years: 6,
                    positions: vec![Position {
                        title: "Lead Backend Developer".to_string(),
                        company: "DataTech Inc".to_string(),
                        duration: "2022-Present".to_string(),
                        skills: strings(&["Python", "Django", "PostgreSQL", "AWS"]),
                    }],
                },
                education: vec![Education {
                    degree: "Master of Science in Computer Science".to_string(),
                    institution: "MIT".to_string(),
                    year: "2020".to_string(),
                }],
                job_match: JobMatch {
                    title: "Backend Developer".to_string(),
                    match_percentage: 92,
                    missing_skills: strings(&["Kubernetes"]),
                    strengths: strings(&[
                        "Python expertise",
                        "Database design",
                        "Cloud architecture",
                    ]),
                    recommendations: strings(&[
                        "Excellent match for senior backend positions",
                        "Consider adding Kubernetes for container orchestration",
                    ]),
                },
                keywords: Keywords {
                    found: strings(&["Python", "Django", "PostgreSQL", "Docker", "AWS"]),
                    missing: strings(&["Kubernetes", "Microservices"]),
                    density: 7,
                },
                formatting: Formatting {
                    score: 92,
                    issues: vec![],
                },
                analysis_date: at(2024, 1, 19, 14, 25),
                text_length: 2100,
            }),
        },
    ]
}

pub fn demo_job_profiles() -> Vec<JobProfile> {
    vec![
        JobProfile {
            id: "fullstack".to_string(),
            title: "Full Stack Developer".to_string(),
            required_skills: strings(&["JavaScript", "React", "Node.js", "HTML", "CSS"]),
            preferred_skills: strings(&["Python", "TypeScript", "PostgreSQL", "AWS"]),
            minimum_experience: 3,
            description: "Full stack web developer with modern JavaScript technologies"
                .to_string(),
        },
        JobProfile {
            id: "frontend".to_string(),
            title: "Frontend Developer".to_string(),
            required_skills: strings(&["JavaScript", "React", "HTML", "CSS"]),
            preferred_skills: strings(&["TypeScript", "Vue.js", "Sass", "Webpack"]),
            minimum_experience: 2,
            description: "Frontend developer focused on user interface development".to_string(),
        },
        JobProfile {
            id: "backend".to_string(),
            title: "Backend Developer".to_string(),
            required_skills: strings(&["Python", "Node.js", "SQL", "API Development"]),
            preferred_skills: strings(&["Django", "Flask", "PostgreSQL", "Redis"]),
            minimum_experience: 3,
            description: "Backend developer for server-side applications".to_string(),
        },
        JobProfile {
            id: "datascientist".to_string(),
            title: "Data Scientist".to_string(),
            required_skills: strings(&["Python", "Machine Learning", "SQL", "Statistics"]),
            preferred_skills: strings(&["TensorFlow", "PyTorch", "R", "Spark"]),
            minimum_experience: 2,
            description: "Data scientist with machine learning expertise".to_string(),
        },
    ]
}
