//! Console output formatter for routed results

use concierge_application::HandleRequestOutput;
use serde_json::json;

/// Formats routed results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result: triage, plan, agents, final answer
    pub fn format(output: &HandleRequestOutput) -> String {
        let mut out = String::new();

        out.push_str(&Self::header("llm-concierge"));
        out.push('\n');

        out.push_str(&Self::section_header("Triage"));
        let tone = output
            .triage
            .emotional_tone
            .map(|t| t.to_string())
            .unwrap_or_else(|| "none".to_string());
        out.push_str(&format!(
            "complexity: {} | domain: {} | urgency: {} | shape: {} | tone: {}\n",
            output.triage.complexity,
            output.triage.domain,
            output.triage.urgency,
            output.triage.output_shape,
            tone,
        ));
        out.push_str(&format!("confidence: {:.2}\n", output.triage.confidence));
        if !output.triage.keywords.is_empty() {
            out.push_str(&format!("keywords: {}\n", output.triage.keywords.join(", ")));
        }

        out.push_str(&Self::section_header("Plan"));
        out.push_str(&format!(
            "strategy: {} | mode: {}\n",
            output.plan.strategy, output.plan.mode
        ));
        for agent in &output.plan.agents {
            out.push_str(&format!(
                "  {} ({}): {}\n",
                agent.backend, agent.kind, agent.purpose
            ));
        }

        out.push_str(&Self::section_header("Agent Responses"));
        for response in &output.result.agent_responses {
            match &response.error {
                None => out.push_str(&format!(
                    "\n-- {} --\n{}\n",
                    response.role.backend, response.content
                )),
                Some(error) => out.push_str(&format!(
                    "\n-- {} --\nError: {}\n",
                    response.role.backend, error
                )),
            }
        }

        if let Some(synthesized) = &output.result.synthesized_response {
            out.push_str(&Self::section_header("Synthesis"));
            out.push_str(&format!("\n{}\n", synthesized));
        }
        if let Some(score) = output.result.consensus_score {
            out.push_str(&format!("\nConsensus score: {:.2}\n", score));
        }

        out.push_str(&Self::section_header("Answer"));
        out.push_str(&format!("\n{}\n", Self::answer_text(output)));

        out.push_str(&format!(
            "\n{}\ncost: ${:.4} | latency: {} ms\n",
            output.result.reasoning, output.result.total_cost, output.result.total_latency_ms
        ));

        if !output.suggestions.is_empty() {
            out.push_str("\nYou might also ask:\n");
            for suggestion in &output.suggestions {
                out.push_str(&format!("  * {}\n", suggestion));
            }
        }

        out
    }

    /// Format only the final answer
    pub fn format_answer_only(output: &HandleRequestOutput) -> String {
        let mut out = Self::answer_text(output).to_string();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        for suggestion in &output.suggestions {
            out.push_str(&format!("\n* {}", suggestion));
        }
        out
    }

    /// Format as JSON
    pub fn format_json(output: &HandleRequestOutput) -> String {
        let value = json!({
            "triage": output.triage,
            "plan": output.plan,
            "result": output.result,
            "answer": Self::answer_text(output),
            "suggestions": output.suggestions,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn answer_text(output: &HandleRequestOutput) -> &str {
        if output.result.is_success() {
            output.display_text()
        } else {
            &output.result.reasoning
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line, title, line)
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title, "-".repeat(40))
    }
}
