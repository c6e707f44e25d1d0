// src/types/agent.rs
//! Backend analysis strategies, used for display only

/// Colour tone a view uses for an agent chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Secondary,
    Primary,
    Default,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Secondary => "secondary",
            Tone::Primary => "primary",
            Tone::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agent {
    SkillMatcher,
    ExperienceAnalyzer,
    RelevancyScorer,
    SeniorityDetector,
    GeneralAnalyzer,
}

impl Agent {
    pub const ALL: [Agent; 5] = [
        Agent::SkillMatcher,
        Agent::ExperienceAnalyzer,
        Agent::RelevancyScorer,
        Agent::SeniorityDetector,
        Agent::GeneralAnalyzer,
    ];

    /// Unknown identifiers fall back to the general analyzer.
    pub fn from_id(id: &str) -> Self {
        match id {
            "skill_matcher" => Agent::SkillMatcher,
            "experience_analyzer" => Agent::ExperienceAnalyzer,
            "relevancy_scorer" => Agent::RelevancyScorer,
            "seniority_detector" => Agent::SeniorityDetector,
            _ => Agent::GeneralAnalyzer,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Agent::SkillMatcher => "skill_matcher",
            Agent::ExperienceAnalyzer => "experience_analyzer",
            Agent::RelevancyScorer => "relevancy_scorer",
            Agent::SeniorityDetector => "seniority_detector",
            Agent::GeneralAnalyzer => "general_analyzer",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Agent::SkillMatcher => "Skill Matcher",
            Agent::ExperienceAnalyzer => "Experience Analyzer",
            Agent::RelevancyScorer => "Relevancy Scorer",
            Agent::SeniorityDetector => "Seniority Detector",
            Agent::GeneralAnalyzer => "General Analyzer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Agent::SkillMatcher => "Analyzes technical skills and competencies",
            Agent::ExperienceAnalyzer => "Evaluates work history and career progression",
            Agent::RelevancyScorer => "Scores and ranks candidate relevance",
            Agent::SeniorityDetector => "Identifies leadership and seniority levels",
            Agent::GeneralAnalyzer => "Comprehensive resume analysis",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Agent::SkillMatcher => Tone::Success,
            Agent::ExperienceAnalyzer => Tone::Warning,
            Agent::RelevancyScorer => Tone::Secondary,
            Agent::SeniorityDetector => Tone::Primary,
            Agent::GeneralAnalyzer => Tone::Default,
        }
    }
}

/// Title-case a raw agent identifier: `skill_matcher` -> `Skill Matcher`.
/// Works for identifiers the client does not know about.
pub fn format_agent_name(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
