//! Prompt templates for the collaboration flows.
//!
//! Templates never invent content: they interpolate the original query,
//! an agent's declared purpose, and (for chain steps) the verbatim
//! content of the previous step's response.

use crate::collab::AgentResponse;
use crate::plan::{AgentRole, RoleKind};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a specialist agent
    pub fn specialist_system() -> &'static str {
        r#"You are a domain specialist contributing one focused piece of a larger answer.
Stay strictly within your stated purpose. Be precise and factual.
Prefer structured, unambiguous output that another expert can build on."#
    }

    /// System prompt for a generalist agent
    pub fn generalist_system() -> &'static str {
        r#"You are a communicator producing the final, audience-facing answer.
Be clear, well-organized and accurate. Do not add facts that are not
supported by the material you are given."#
    }

    /// System prompt for the synthesizer
    pub fn synthesizer_system() -> &'static str {
        r#"You are a moderator merging several independent expert answers into one.
Weigh well-supported points over confident phrasing. Be explicit about
where the experts disagree."#
    }

    /// System prompt for an agent role
    pub fn system_for(role: &AgentRole) -> &'static str {
        match role.kind {
            RoleKind::Specialist => Self::specialist_system(),
            RoleKind::Generalist => Self::generalist_system(),
            RoleKind::Synthesizer => Self::synthesizer_system(),
        }
    }

    /// Prompt for a single-agent plan or the first step of a chain
    pub fn direct_prompt(query: &str, purpose: &str) -> String {
        format!(
            r#"Your purpose: {}

Request:
{}

Provide a clear, well-structured response."#,
            purpose, query
        )
    }

    /// Prompt for one agent of an ensemble: same query, role-specific framing
    pub fn ensemble_prompt(query: &str, purpose: &str) -> String {
        format!(
            r#"You are one of several experts answering this request independently.
Your angle: {}

Request:
{}

Answer from your angle only. Do not speculate about what the other experts might say."#,
            purpose, query
        )
    }

    /// Prompt for step i > 0 of a sequential chain.
    ///
    /// Interpolates the original query and the previous step's verbatim
    /// content. A generalist step is asked to translate; any other step is
    /// asked to build on the previous output.
    pub fn chain_step_prompt(role: &AgentRole, query: &str, previous_content: &str) -> String {
        match role.kind {
            RoleKind::Generalist => format!(
                r#"Original request:
{}

A specialist produced the following structured output:

{}

Your purpose: {}

Translate the specialist's output into a clear explanation appropriate for the
person who asked the original request. Preserve every factual point; do not add new ones."#,
                query, previous_content, role.purpose
            ),
            _ => format!(
                r#"Original request:
{}

Output of the previous step:

{}

Your purpose: {}

Build directly on the previous output to fulfil your purpose."#,
                query, previous_content, role.purpose
            ),
        }
    }

    /// Prompt for the synthesis pass over gathered ensemble responses.
    ///
    /// Responses are labelled by their agent's purpose. The synthesizer is
    /// instructed to produce a consensus statement, disagreements, a final
    /// recommendation, and a self-reported confidence figure.
    pub fn synthesis_prompt(query: &str, responses: &[&AgentResponse]) -> String {
        let mut prompt = format!(
            r#"Original request:
{}

Independent expert answers:
"#,
            query
        );

        for response in responses {
            prompt.push_str(&format!(
                "\n--- {} ---\n{}\n",
                response.role.purpose, response.content
            ));
        }

        prompt.push_str(
            r#"
Based on all answers above, produce:

1. **Consensus**: what the experts agree on
2. **Disagreements**: where they differ and which position is better supported
3. **Recommendation**: the single final answer to the original request
4. A final line of the form `Confidence: <number between 0 and 1>`"#,
        );

        prompt
    }
}
