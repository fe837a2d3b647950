//! Built-in catalogs: expert roles, prompt templates and writing tips
//!
//! These are read-only. The role list is a convenience for picking a role;
//! the role field itself stays free-form text.

use tracing::debug;

use super::FormState;

/// Expert role labels offered by the role selector
pub const EXPERT_ROLES: [&str; 20] = [
    "Expert Data Analyst",
    "Creative Writer",
    "Technical Consultant",
    "Marketing Strategist",
    "Research Scientist",
    "Software Engineer",
    "UX/UI Designer",
    "Business Consultant",
    "Content Creator",
    "Academic Researcher",
    "Financial Advisor",
    "Legal Expert",
    "Medical Professional",
    "Educational Tutor",
    "Project Manager",
    "Social Media Specialist",
    "Sales Professional",
    "HR Specialist",
    "Customer Service Expert",
    "Innovation Strategist",
];

/// A pre-built prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub role: &'static str,
    pub task: &'static str,
    pub context: &'static str,
    pub reasoning: &'static str,
    pub format: &'static str,
}

impl Template {
    /// The five section values of this template (the name is not part of the form)
    pub fn form(&self) -> FormState {
        FormState::new(self.role, self.task, self.context, self.reasoning, self.format)
    }
}

/// Built-in templates
pub const TEMPLATES: [Template; 5] = [
    Template {
        name: "Essay Helper",
        role: "Academic Writing Expert",
        task: "Help me write a well-structured essay on the given topic",
        context: "This is for an academic assignment that requires proper citation and argumentation",
        reasoning: "Break down the essay structure, provide key points, and suggest supporting evidence",
        format: "Outline with introduction, body paragraphs, and conclusion structure",
    },
    Template {
        name: "Business Email",
        role: "Professional Communication Expert",
        task: "Draft a professional business email",
        context: "Corporate environment requiring clear, concise, and appropriate tone",
        reasoning: "Consider the recipient, purpose, and desired outcome of the communication",
        format: "Standard business email format with subject line, greeting, body, and closing",
    },
    Template {
        name: "Story Writer",
        role: "Creative Writing Expert",
        task: "Create an engaging story based on the provided premise",
        context: "Fiction writing that should captivate readers and maintain narrative flow",
        reasoning: "Develop compelling characters, plot structure, and descriptive scenes",
        format: "Narrative prose with dialogue, scene descriptions, and character development",
    },
    Template {
        name: "Code Review",
        role: "Senior Software Engineer",
        task: "Review the provided code and suggest improvements",
        context: "Code quality assessment focusing on best practices, performance, and maintainability",
        reasoning: "Analyze code structure, identify potential issues, and suggest optimizations",
        format: "Structured feedback with specific line comments and improvement suggestions",
    },
    Template {
        name: "Market Analysis",
        role: "Business Intelligence Analyst",
        task: "Analyze the market trends and provide strategic insights",
        context: "Business decision-making requiring data-driven recommendations",
        reasoning: "Examine market data, identify patterns, and assess competitive landscape",
        format: "Executive summary with key findings, charts, and actionable recommendations",
    },
];

/// Prompt-writing best practices
pub const TIPS: [&str; 7] = [
    "Be specific about expertise level and domain knowledge",
    "Include constraints, requirements, and success criteria",
    "Ask for step-by-step reasoning for complex tasks",
    "Specify exact output format (JSON, table, bullets, etc.)",
    "Provide relevant context and background information",
    "Use examples to clarify expectations",
    "Break complex tasks into smaller components",
];

/// Look up a template by name (case-insensitive)
pub fn find_template(name: &str) -> Option<&'static Template> {
    debug!(%name, "find_template: called");
    let wanted = name.trim();
    TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(EXPERT_ROLES.len(), 20);
        assert_eq!(TEMPLATES.len(), 5);
        assert_eq!(TIPS.len(), 7);
    }

    #[test]
    fn test_roles_are_unique() {
        let unique: HashSet<_> = EXPERT_ROLES.iter().collect();
        assert_eq!(unique.len(), EXPERT_ROLES.len());
    }

    #[test]
    fn test_templates_are_complete() {
        for template in TEMPLATES.iter() {
            assert!(template.form().is_complete(), "{} should fill every field", template.name);
        }
    }

    #[test]
    fn test_template_form_excludes_name() {
        let form = TEMPLATES[3].form();
        assert_eq!(form.role, "Senior Software Engineer");
        assert!(!form.render().contains("Code Review"));
    }

    #[test]
    fn test_find_template() {
        assert_eq!(find_template("code review").map(|t| t.name), Some("Code Review"));
        assert_eq!(find_template(" Business Email ").map(|t| t.name), Some("Business Email"));
        assert!(find_template("Haiku").is_none());
    }
}
