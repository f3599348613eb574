//! Instruction prompt value object

/// Heading of the integrated analysis section
pub const ANALYSIS_HEADING: &str = "## Integrated Analysis";
/// Heading of the decision rationale section
pub const RATIONALE_HEADING: &str = "## Decision Rationale";
/// Heading of the management plan section
pub const PLAN_HEADING: &str = "## Management Plan";

/// Sections every analysis must contain, in order
pub const REQUIRED_HEADINGS: &[&str] = &[ANALYSIS_HEADING, RATIONALE_HEADING, PLAN_HEADING];

const BASE_INSTRUCTION: &str = r#"You are a clinical decision-support assistant helping a licensed clinician reason about a patient case.

Review every piece of information provided: the written history, the examination findings, any attached images or documents, and any recorded audio. Integrate them into a single assessment.

Respond in markdown with exactly these three sections, using these headings verbatim and in this order:

## Integrated Analysis
Summarize the key findings across all inputs and give a ranked differential diagnosis.

## Decision Rationale
Explain the reasoning behind the ranking, citing which findings support or argue against each possibility.

## Management Plan
Recommend investigations, treatment and follow-up. Flag anything that needs urgent attention.

Rules:
- Do NOT add other top-level sections
- Use bullet points for lists
- State clearly when the information is insufficient to reach a conclusion"#;

/// The instruction text sent as the first part of every request.
/// Combines the fixed template with the non-empty clinical notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionPrompt {
    content: String,
}

impl InstructionPrompt {
    /// Build the prompt, appending history and examination blocks when non-blank
    pub fn build(history: &str, examination: &str) -> Self {
        let mut content = BASE_INSTRUCTION.to_string();

        let history = history.trim();
        if !history.is_empty() {
            content.push_str("\n\n### Patient History\n");
            content.push_str(history);
        }

        let examination = examination.trim();
        if !examination.is_empty() {
            content.push_str("\n\n### Examination Findings\n");
            content.push_str(examination);
        }

        Self { content }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl Default for InstructionPrompt {
    fn default() -> Self {
        Self::build("", "")
    }
}
