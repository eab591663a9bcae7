//! Assistant persona: school facts, system instruction and chat surfaces

use std::fmt::Write;
use std::str::FromStr;

pub const SCHOOL_NAME: &str = "Lumina Academy";
const LOCATION: &str = "Sunshine Valley, CA";
const MOTTO: &str = "Claritate ad Excellence";
const MOTTO_TRANSLATION: &str = "Through Clarity to Excellence";
const PRINCIPAL: &str = "Dr. Arthur Lumis";
const CONTACT_EMAIL: &str = "info@luminaacademy.edu";

/// Academic department as cited to the model
#[derive(Debug, Clone, Copy)]
pub struct Department {
    /// Short name used in the admissions guidelines
    pub short_name: &'static str,
    pub head: &'static str,
}

pub const DEPARTMENTS: &[Department] = &[
    Department {
        short_name: "Science & Technology",
        head: "Dr. Sarah Chen",
    },
    Department {
        short_name: "Humanities",
        head: "Prof. James Wilson",
    },
    Department {
        short_name: "Arts",
        head: "Ms. Elena Rodriguez",
    },
];

const ADMISSIONS_GUIDELINES: &[(&str, &str)] = &[
    ("Tuition", "$15,000 per year."),
    (
        "Financial Aid",
        "Available (merit and need-based). 30% of students receive aid.",
    ),
    ("Application Deadline", "January 15, 2024 for Fall 2024."),
    (
        "Admissions Process",
        "Online application, entrance testing, teacher recommendations, and student interview.",
    ),
];

/// Questions offered as one-tap suggestions on the admissions surface
pub const ADMISSIONS_SUGGESTIONS: &[&str] = &[
    "When is the application deadline?",
    "Is financial aid available?",
    "What is the admissions process?",
];

/// Build the system instruction shared by every chat surface
pub fn build_system_prompt() -> String {
    let mut prompt = format!(
        "You are {SCHOOL_NAME}'s AI Admissions Assistant. {SCHOOL_NAME} is a premier private K-12 school in {LOCATION}.\n\
         Motto: \"{MOTTO}\" ({MOTTO_TRANSLATION}). Principal: {PRINCIPAL}.\n\n\
         ADMISSIONS GUIDELINES:\n"
    );

    for (label, value) in ADMISSIONS_GUIDELINES {
        let _ = writeln!(prompt, "- {label}: {value}");
    }

    let departments = DEPARTMENTS
        .iter()
        .map(|d| format!("{} (Head: {})", d.short_name, d.head))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(prompt, "- Departments: {departments}.");

    let _ = write!(
        prompt,
        "\nTone: Polite, professional, and encouraging. Use the school's specific data to answer questions accurately. \
         If you don't know an answer, direct them to contact {CONTACT_EMAIL}."
    );
    prompt
}

/// A chat surface. Each one owns an independent conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// Site-wide floating assistant
    #[default]
    General,
    /// Admissions page guide with quick suggestions
    Admissions,
}

impl Surface {
    pub fn as_str(self) -> &'static str {
        match self {
            Surface::General => "general",
            Surface::Admissions => "admissions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Surface::General => "Lumina Assistant",
            Surface::Admissions => "Admissions AI Guide",
        }
    }

    /// Seeded model turn for a fresh conversation
    pub fn greeting(self) -> &'static str {
        match self {
            Surface::General => {
                "Hello! I'm the Lumina Academy AI Assistant. How can I help you today?"
            }
            Surface::Admissions => {
                "Welcome to Lumina Admissions! I'm here to help you with the application process. What can I clarify for you today?"
            }
        }
    }

    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            Surface::General => &[],
            Surface::Admissions => ADMISSIONS_SUGGESTIONS,
        }
    }
}

impl FromStr for Surface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" | "chat" => Ok(Surface::General),
            "admissions" => Ok(Surface::Admissions),
            other => Err(format!(
                "Unknown surface '{other}' (expected 'general' or 'admissions')"
            )),
        }
    }
}
