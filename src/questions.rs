//! Questionnaire definitions: the seven questions and their fixed option
//! vocabularies. These are the only values an answer set can legally carry,
//! although the engine treats unknown values as inert rather than invalid.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'static str>,
    pub options: &'static [QuestionOption],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_hotline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

const fn option(value: &'static str, label: &'static str) -> QuestionOption {
    QuestionOption {
        value,
        label,
        description: None,
    }
}

const fn option_with(
    value: &'static str,
    label: &'static str,
    description: &'static str,
) -> QuestionOption {
    QuestionOption {
        value,
        label,
        description: Some(description),
    }
}

const QUESTIONS: &[Question] = &[
    Question {
        id: "persona",
        prompt: "What best describes you?",
        subtitle: Some("This helps us understand your needs better"),
        options: &[
            option_with(
                "worker",
                "I'm currently working",
                "Employee, freelancer, or self-employed",
            ),
            option_with("job_seeker", "I'm looking for work", "Unemployed or between jobs"),
            option_with(
                "employer",
                "I'm an employer/HR",
                "Business owner or HR professional",
            ),
            option_with(
                "retired",
                "I'm retired",
                "No longer in workforce but interested",
            ),
        ],
        show_hotline: false,
    },
    Question {
        id: "employment_type",
        prompt: "What's your employment type?",
        subtitle: Some("Different employment types have different support available"),
        options: &[
            option("full_time", "Full-time employee"),
            option("part_time", "Part-time/Contract"),
            option("freelancer", "Freelancer/Self-employed"),
            option_with("gig_worker", "Gig worker", "Ride-hailing, delivery, etc."),
        ],
        show_hotline: false,
    },
    Question {
        id: "immediate_need",
        prompt: "What brings you here today?",
        subtitle: Some("We'll match you with the right services"),
        options: &[
            option_with("workplace_issue", "Workplace issue", "Disputes, unfair treatment"),
            option_with(
                "career_growth",
                "Career development",
                "Skills, progression, training",
            ),
            option_with("financial", "Financial pressures", "Cost of living, savings"),
            option_with("community", "Give back", "Volunteer, help others"),
            option_with("personal", "Personal enrichment", "Hobbies, wellness, learning"),
        ],
        show_hotline: false,
    },
    Question {
        id: "urgency",
        prompt: "How urgent is this?",
        subtitle: Some("We can provide immediate help if needed"),
        options: &[
            option("immediate", "Need help now"),
            option("soon", "Within this week"),
            option("planning", "Planning ahead"),
        ],
        show_hotline: true,
    },
    Question {
        id: "life_stage",
        prompt: "Which best describes your life stage?",
        subtitle: Some("Optional - helps us personalize recommendations"),
        options: &[
            option("young", "Young adult (Under 30)"),
            option("mid_career", "Mid-career (30-50)"),
            option("senior", "Senior (50+)"),
            option("parent", "Parent/Caregiver"),
            option("skip", "Prefer not to say"),
        ],
        show_hotline: false,
    },
    Question {
        id: "membership",
        prompt: "Are you a union member?",
        subtitle: Some("Members get access to exclusive benefits"),
        options: &[
            option("yes", "Yes, I'm a member"),
            option("no_interested", "No, but interested"),
            option("not_sure", "Not sure"),
            option("no", "No, just browsing"),
        ],
        show_hotline: false,
    },
    Question {
        id: "channel",
        prompt: "How would you prefer to connect?",
        subtitle: Some("We'll show services available through your preferred channel"),
        options: &[
            option("digital", "Online/App"),
            option("physical", "In-person"),
            option("phone", "Phone/WhatsApp"),
            option("any", "Any method"),
        ],
        show_hotline: false,
    },
];

pub fn all() -> &'static [Question] {
    QUESTIONS
}

pub fn find(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|question| question.id == id)
}
