//! Execute Plan use case
//!
//! Drives a [`CollaborationPlan`] against the backend invoker port:
//! single calls, sequential chains, and parallel ensembles with a
//! synthesis barrier. This is the only component that performs
//! concurrent I/O.
//!
//! The caller-visible surface is infallible: whatever happens, the caller
//! receives a complete [`CollaborationResult`]. Backend failures are
//! retried and rerouted locally, and only after local recovery is
//! exhausted are they folded into `reasoning`, with an empty
//! `primary_response` signalling failure.

use crate::config::ExecutionParams;
use crate::ports::backend_invoker::{BackendInvoker, Invocation, InvokerError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use concierge_domain::{
    AgentResponse, AgentRole, Backend, CollaborationPlan, CollaborationResult, ExecutionMode,
    PromptTemplate, Query, RoutingTable, consensus_score, parse_confidence,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Input for the ExecutePlan use case
#[derive(Debug, Clone)]
pub struct ExecutePlanInput {
    /// The plan to drive
    pub plan: CollaborationPlan,
    /// The original request
    pub query: Query,
    /// Whether the request needs vision-capable fallbacks
    pub requires_vision: bool,
}

impl ExecutePlanInput {
    pub fn new(plan: CollaborationPlan, query: impl Into<Query>) -> Self {
        Self {
            plan,
            query: query.into(),
            requires_vision: false,
        }
    }

    pub fn with_vision(mut self) -> Self {
        self.requires_vision = true;
        self
    }
}

/// Why a step gave up after local recovery
enum StepError {
    /// The request was cancelled by the caller
    Cancelled,
    /// Retry and fallback were exhausted
    Exhausted(String),
}

impl StepError {
    fn message(&self) -> String {
        match self {
            StepError::Cancelled => "cancelled".to_string(),
            StepError::Exhausted(msg) => msg.clone(),
        }
    }
}

/// Use case for executing a collaboration plan
pub struct ExecutePlanUseCase<I: BackendInvoker + 'static> {
    invoker: Arc<I>,
    table: Arc<RoutingTable>,
    params: ExecutionParams,
}

impl<I: BackendInvoker + 'static> ExecutePlanUseCase<I> {
    pub fn new(invoker: Arc<I>, table: Arc<RoutingTable>, params: ExecutionParams) -> Self {
        Self {
            invoker,
            table,
            params,
        }
    }

    /// Execute the plan with default (no-op) progress
    pub async fn execute(
        &self,
        input: ExecutePlanInput,
        cancel: &CancellationToken,
    ) -> CollaborationResult {
        self.execute_with_progress(input, cancel, &NoProgress).await
    }

    /// Execute the plan with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: ExecutePlanInput,
        cancel: &CancellationToken,
        progress: &dyn ProgressNotifier,
    ) -> CollaborationResult {
        info!(
            strategy = %input.plan.strategy,
            mode = %input.plan.mode,
            agents = input.plan.agents.len(),
            "Executing collaboration plan"
        );
        progress.on_plan_start(input.plan.mode, input.plan.agents.len());

        let result = match input.plan.mode {
            ExecutionMode::Single => self.execute_single(&input, cancel).await,
            ExecutionMode::Sequential => self.execute_sequential(&input, cancel, progress).await,
            ExecutionMode::Ensemble => self.execute_ensemble(&input, cancel, progress).await,
        };

        progress.on_plan_complete(result.is_success());
        result
    }

    /// Single mode: one backend call, its content is the answer
    async fn execute_single(
        &self,
        input: &ExecutePlanInput,
        cancel: &CancellationToken,
    ) -> CollaborationResult {
        let role = &input.plan.agents[0];
        let prompt = PromptTemplate::direct_prompt(input.query.content(), &role.purpose);

        match self
            .invoke_with_policy(role, &prompt, self.params.call_deadline, input, cancel)
            .await
        {
            Ok(invocation) => {
                let response = AgentResponse::success(
                    role.clone(),
                    invocation.content.clone(),
                    invocation.elapsed_ms,
                    invocation.estimated_cost,
                );
                CollaborationResult::new(
                    invocation.content,
                    format!(
                        "Strategy '{}': answered by {} in a single call",
                        input.plan.strategy, role.backend
                    ),
                )
                .with_agent_responses(vec![response])
                .with_totals(invocation.estimated_cost, invocation.elapsed_ms)
            }
            Err(err) => CollaborationResult::failed(
                format!(
                    "Strategy '{}': the single call to {} failed after retry: {}",
                    input.plan.strategy,
                    role.backend,
                    err.message()
                ),
                vec![AgentResponse::failure(role.clone(), err.message(), 0)],
            ),
        }
    }

    /// Sequential mode: each step's verbatim output feeds the next prompt
    async fn execute_sequential(
        &self,
        input: &ExecutePlanInput,
        cancel: &CancellationToken,
        progress: &dyn ProgressNotifier,
    ) -> CollaborationResult {
        let query = input.query.content();
        let mut responses: Vec<AgentResponse> = Vec::with_capacity(input.plan.agents.len());
        let mut total_cost = 0.0;
        let mut total_latency = 0u64;

        for (step, role) in input.plan.agents.iter().enumerate() {
            let prompt = match responses.last() {
                None => PromptTemplate::direct_prompt(query, &role.purpose),
                Some(previous) => PromptTemplate::chain_step_prompt(role, query, &previous.content),
            };

            match self
                .invoke_with_policy(role, &prompt, self.params.call_deadline, input, cancel)
                .await
            {
                Ok(invocation) => {
                    debug!(step, backend = %role.backend, "Chain step completed");
                    progress.on_agent_complete(role, true);
                    total_cost += invocation.estimated_cost;
                    total_latency += invocation.elapsed_ms;
                    responses.push(AgentResponse::success(
                        role.clone(),
                        invocation.content,
                        invocation.elapsed_ms,
                        invocation.estimated_cost,
                    ));
                }
                Err(err) => {
                    warn!(step, backend = %role.backend, "Chain step failed, aborting chain");
                    progress.on_agent_complete(role, false);
                    responses.push(AgentResponse::failure(role.clone(), err.message(), 0));
                    return CollaborationResult::failed(
                        format!(
                            "Strategy '{}': chain aborted at step {} ({}): {}",
                            input.plan.strategy,
                            step + 1,
                            role.backend,
                            err.message()
                        ),
                        responses,
                    )
                    .with_totals(total_cost, total_latency);
                }
            }
        }

        let primary = responses
            .last()
            .map(|r| r.content.clone())
            .unwrap_or_default();
        let chain: Vec<String> = input
            .plan
            .agents
            .iter()
            .map(|a| a.backend.to_string())
            .collect();

        CollaborationResult::new(
            primary,
            format!(
                "Strategy '{}': {}-step chain ({})",
                input.plan.strategy,
                responses.len(),
                chain.join(" -> ")
            ),
        )
        .with_agent_responses(responses)
        .with_totals(total_cost, total_latency)
    }

    /// Ensemble mode: concurrent specialists under one shared deadline,
    /// then a synthesis barrier
    async fn execute_ensemble(
        &self,
        input: &ExecutePlanInput,
        cancel: &CancellationToken,
        progress: &dyn ProgressNotifier,
    ) -> CollaborationResult {
        let specialists: Vec<AgentRole> = input.plan.specialists().cloned().collect();
        let deadline = self.params.ensemble_deadline;

        let mut join_set = JoinSet::new();
        for (idx, role) in specialists.iter().enumerate() {
            let prompt = PromptTemplate::ensemble_prompt(input.query.content(), &role.purpose);
            let this = self.clone_for_task();
            let role = role.clone();
            let input = input.clone();
            let cancel = cancel.clone();

            join_set.spawn(async move {
                let outcome = this
                    .invoke_with_policy(&role, &prompt, deadline, &input, &cancel)
                    .await;
                (idx, role, outcome)
            });
        }

        // Gather all specialists; one failing or timing out never cancels
        // its siblings.
        let mut slots: Vec<Option<AgentResponse>> = vec![None; specialists.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, role, Ok(invocation))) => {
                    info!(backend = %role.backend, "Ensemble specialist responded");
                    progress.on_agent_complete(&role, true);
                    slots[idx] = Some(AgentResponse::success(
                        role,
                        invocation.content,
                        invocation.elapsed_ms,
                        invocation.estimated_cost,
                    ));
                }
                Ok((idx, role, Err(err))) => {
                    warn!(backend = %role.backend, "Ensemble specialist failed: {}", err.message());
                    progress.on_agent_complete(&role, false);
                    slots[idx] = Some(AgentResponse::failure(role, err.message(), 0));
                }
                Err(e) => {
                    warn!("Ensemble task join error: {}", e);
                }
            }
        }

        let responses: Vec<AgentResponse> = slots.into_iter().flatten().collect();
        let successes: Vec<&AgentResponse> = responses.iter().filter(|r| r.is_success()).collect();
        let failure_count = responses.len() - successes.len();

        if successes.is_empty() {
            return CollaborationResult::failed(
                format!(
                    "Strategy '{}': ensemble failed, every specialist failed or timed out; \
                     synthesis was not attempted",
                    input.plan.strategy
                ),
                responses,
            );
        }

        let mut total_cost: f64 = responses.iter().map(|r| r.estimated_cost).sum();
        // Concurrent calls overlap: latency is the slowest specialist,
        // plus the synthesis call below.
        let mut total_latency = responses.iter().map(|r| r.elapsed_ms).max().unwrap_or(0);
        let score = consensus_score(
            &successes.iter().map(|r| (*r).clone()).collect::<Vec<_>>(),
        );

        let mut reasoning = format!(
            "Strategy '{}': {} of {} specialists answered",
            input.plan.strategy,
            successes.len(),
            responses.len()
        );
        if failure_count > 0 {
            reasoning.push_str(&format!(" ({} failed or timed out)", failure_count));
        }

        // Synthesis barrier: runs only after every specialist has settled.
        let mut synthesized: Option<String> = None;
        if input.plan.synthesis_required {
            if let Some(synth_role) = input.plan.synthesizer() {
                progress.on_synthesis_start();
                let prompt = PromptTemplate::synthesis_prompt(input.query.content(), &successes);
                match self
                    .invoke_with_policy(
                        synth_role,
                        &prompt,
                        self.params.call_deadline,
                        input,
                        cancel,
                    )
                    .await
                {
                    Ok(invocation) => {
                        total_cost += invocation.estimated_cost;
                        total_latency += invocation.elapsed_ms;
                        if let Some(confidence) = parse_confidence(&invocation.content) {
                            debug!(confidence, "Synthesizer self-reported confidence");
                        }
                        reasoning.push_str(&format!(
                            "; synthesized by {}",
                            synth_role.backend
                        ));
                        synthesized = Some(invocation.content);
                    }
                    Err(err) => {
                        warn!("Synthesis failed: {}", err.message());
                        reasoning.push_str(&format!(
                            "; synthesis by {} failed ({}), falling back to the strongest specialist answer",
                            synth_role.backend,
                            err.message()
                        ));
                    }
                }
            }
        }

        let primary = synthesized
            .clone()
            .unwrap_or_else(|| successes[0].content.clone());

        let mut result = CollaborationResult::new(primary, reasoning)
            .with_agent_responses(responses)
            .with_totals(total_cost, total_latency);
        result.consensus_score = Some(score);
        result.synthesized_response = synthesized;
        result
    }

    /// One backend call with the local recovery policy applied:
    /// retry once on the same backend, then for rate limiting fall back
    /// once to the next-cheapest compatible backend.
    async fn invoke_with_policy(
        &self,
        role: &AgentRole,
        prompt: &str,
        deadline: Duration,
        input: &ExecutePlanInput,
        cancel: &CancellationToken,
    ) -> Result<Invocation, StepError> {
        let system = PromptTemplate::system_for(role);
        let mut last_error = match self
            .attempt(&role.backend, system, prompt, deadline, cancel)
            .await
        {
            Ok(invocation) => return Ok(invocation),
            Err(e) => e,
        };

        for _ in 0..self.params.max_retries {
            if cancel.is_cancelled() {
                return Err(StepError::Cancelled);
            }
            debug!(backend = %role.backend, error = %last_error, "Retrying backend call");
            match self
                .attempt(&role.backend, system, prompt, deadline, cancel)
                .await
            {
                Ok(invocation) => return Ok(invocation),
                Err(e) => last_error = e,
            }
        }

        if matches!(last_error, InvokerError::RateLimited) && self.params.rate_limit_fallback {
            if let Some(fallback) = self
                .table
                .fallback_for(&role.backend, input.requires_vision)
            {
                info!(from = %role.backend, to = %fallback, "Rate limited, rerouting to fallback backend");
                match self.attempt(&fallback, system, prompt, deadline, cancel).await {
                    Ok(invocation) => return Ok(invocation),
                    Err(e) => last_error = e,
                }
            }
        }

        if cancel.is_cancelled() {
            Err(StepError::Cancelled)
        } else {
            Err(StepError::Exhausted(last_error.to_string()))
        }
    }

    /// One raw attempt, racing the caller's cancellation token
    async fn attempt(
        &self,
        backend: &Backend,
        system: &str,
        prompt: &str,
        deadline: Duration,
        cancel: &CancellationToken,
    ) -> Result<Invocation, InvokerError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(InvokerError::Unavailable("cancelled".to_string())),
            result = self.invoker.invoke(backend, system, prompt, deadline) => result,
        }
    }

    /// Cheap handle for spawned ensemble tasks
    fn clone_for_task(&self) -> Self {
        Self {
            invoker: Arc::clone(&self.invoker),
            table: Arc::clone(&self.table),
            params: self.params.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::rules;
    use std::collections::HashMap;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted invoker: per-backend queues of canned outcomes, plus a
    /// record of every prompt it saw.
    struct MockInvoker {
        script: Mutex<HashMap<String, VecDeque<Result<Invocation, InvokerError>>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockInvoker {
        fn new() -> Self {
            Self {
                script: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn respond(self, backend: &Backend, outcome: Result<Invocation, InvokerError>) -> Self {
            self.script
                .lock()
                .unwrap()
                .entry(backend.to_string())
                .or_default()
                .push_back(outcome);
            self
        }

        fn calls_to(&self, backend: &Backend) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(b, _)| b == backend.as_str())
                .map(|(_, prompt)| prompt.clone())
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl BackendInvoker for MockInvoker {
        async fn invoke(
            &self,
            backend: &Backend,
            _system_prompt: &str,
            prompt: &str,
            _deadline: Duration,
        ) -> Result<Invocation, InvokerError> {
            self.calls
                .lock()
                .unwrap()
                .push((backend.to_string(), prompt.to_string()));
            self.script
                .lock()
                .unwrap()
                .get_mut(backend.as_str())
                .and_then(|queue| queue.pop_front())
                .unwrap_or(Err(InvokerError::Unavailable("unscripted".to_string())))
        }
    }

    fn ok(content: &str) -> Result<Invocation, InvokerError> {
        Ok(Invocation::new(content, 100, 0.01))
    }

    fn use_case(invoker: MockInvoker) -> ExecutePlanUseCase<MockInvoker> {
        ExecutePlanUseCase::new(
            Arc::new(invoker),
            Arc::new(RoutingTable::default()),
            ExecutionParams::default(),
        )
    }

    fn single_plan(backend: Backend) -> CollaborationPlan {
        CollaborationPlan::single(
            AgentRole::generalist(backend, "Answer the request directly"),
            rules::SINGLE,
        )
    }

    fn chain_plan(first: Backend, second: Backend) -> CollaborationPlan {
        CollaborationPlan::sequential(
            vec![
                AgentRole::specialist(first, "Extract the findings"),
                AgentRole::generalist(second, "Explain the findings"),
            ],
            rules::SPECIALIST_CHAIN,
        )
        .unwrap()
    }

    fn ensemble_plan() -> CollaborationPlan {
        CollaborationPlan::ensemble(
            vec![
                AgentRole::specialist(Backend::ClaudeOpus46, "Assess the risks"),
                AgentRole::specialist(Backend::Gpt52, "Recommend next actions"),
                AgentRole::specialist(Backend::ClaudeSonnet45, "Consider alternatives"),
                AgentRole::synthesizer(Backend::ClaudeOpus46, "Merge the assessments"),
            ],
            rules::CRITICAL_ENSEMBLE,
        )
    }

    #[tokio::test]
    async fn test_single_call_success() {
        let invoker = MockInvoker::new().respond(&Backend::ClaudeSonnet45, ok("the answer"));
        let result = use_case(invoker)
            .execute(
                ExecutePlanInput::new(single_plan(Backend::ClaudeSonnet45), "a question"),
                &CancellationToken::new(),
            )
            .await;

        assert!(result.is_success());
        assert_eq!(result.primary_response, "the answer");
        assert_eq!(result.agent_responses.len(), 1);
        assert!(result.synthesized_response.is_none());
        assert!((result.total_cost - 0.01).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_sequential_chain_threads_content_through() {
        let invoker = MockInvoker::new()
            .respond(&Backend::MedGemma27b, ok("FINDING: elevated troponin"))
            .respond(&Backend::ClaudeOpus46, ok("Plain-language explanation"));
        let uc = use_case(invoker);

        let result = uc
            .execute(
                ExecutePlanInput::new(
                    chain_plan(Backend::MedGemma27b, Backend::ClaudeOpus46),
                    "chest discomfort after exercise",
                ),
                &CancellationToken::new(),
            )
            .await;

        assert!(result.is_success());
        assert_eq!(result.primary_response, "Plain-language explanation");
        // Step 2's prompt must contain step 1's verbatim content
        let step2_prompts = uc.invoker.calls_to(&Backend::ClaudeOpus46);
        assert_eq!(step2_prompts.len(), 1);
        assert!(step2_prompts[0].contains("FINDING: elevated troponin"));
        assert!(step2_prompts[0].contains("chest discomfort after exercise"));
        // Sequential latency sums across steps
        assert_eq!(result.total_latency_ms, 200);
    }

    #[tokio::test]
    async fn test_chain_abort_returns_partial_responses() {
        let invoker = MockInvoker::new()
            .respond(&Backend::MedGemma27b, ok("step one output"))
            .respond(&Backend::ClaudeOpus46, Err(InvokerError::Timeout))
            .respond(&Backend::ClaudeOpus46, Err(InvokerError::Timeout));
        let result = use_case(invoker)
            .execute(
                ExecutePlanInput::new(
                    chain_plan(Backend::MedGemma27b, Backend::ClaudeOpus46),
                    "a question",
                ),
                &CancellationToken::new(),
            )
            .await;

        assert!(!result.is_success());
        assert!(result.primary_response.is_empty());
        assert_eq!(result.agent_responses.len(), 2);
        assert!(result.agent_responses[0].is_success());
        assert!(!result.agent_responses[1].is_success());
        assert!(result.reasoning.contains("chain aborted at step 2"));
    }

    #[tokio::test]
    async fn test_retry_once_recovers_transient_failure() {
        let invoker = MockInvoker::new()
            .respond(
                &Backend::ClaudeSonnet45,
                Err(InvokerError::Unavailable("blip".to_string())),
            )
            .respond(&Backend::ClaudeSonnet45, ok("recovered"));
        let uc = use_case(invoker);

        let result = uc
            .execute(
                ExecutePlanInput::new(single_plan(Backend::ClaudeSonnet45), "q"),
                &CancellationToken::new(),
            )
            .await;

        assert!(result.is_success());
        assert_eq!(uc.invoker.calls_to(&Backend::ClaudeSonnet45).len(), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_falls_back_to_cheapest_compatible_backend() {
        // Both the call and its retry are rate limited; the cheapest other
        // backend in the default table is gpt-5-mini.
        let invoker = MockInvoker::new()
            .respond(&Backend::ClaudeSonnet45, Err(InvokerError::RateLimited))
            .respond(&Backend::ClaudeSonnet45, Err(InvokerError::RateLimited))
            .respond(&Backend::Gpt5Mini, ok("from fallback"));
        let uc = use_case(invoker);

        let result = uc
            .execute(
                ExecutePlanInput::new(single_plan(Backend::ClaudeSonnet45), "q"),
                &CancellationToken::new(),
            )
            .await;

        assert!(result.is_success());
        assert_eq!(result.primary_response, "from fallback");
        assert_eq!(uc.invoker.calls_to(&Backend::Gpt5Mini).len(), 1);
    }

    #[tokio::test]
    async fn test_ensemble_partial_failure_still_synthesizes() {
        let invoker = MockInvoker::new()
            .respond(&Backend::ClaudeOpus46, ok("risk assessment"))
            .respond(&Backend::Gpt52, Err(InvokerError::Timeout))
            .respond(&Backend::Gpt52, Err(InvokerError::Timeout))
            .respond(&Backend::ClaudeSonnet45, ok("alternative view"))
            // Synthesizer call (claude-opus-4.6, second scripted entry)
            .respond(&Backend::ClaudeOpus46, ok("merged answer\nConfidence: 0.8"));
        let result = use_case(invoker)
            .execute(
                ExecutePlanInput::new(ensemble_plan(), "urgent question"),
                &CancellationToken::new(),
            )
            .await;

        assert!(result.is_success());
        // All three specialists reported, one marked failed
        assert_eq!(result.agent_responses.len(), 3);
        assert_eq!(result.failed_responses().count(), 1);
        // Synthesis still ran over the two successes
        assert_eq!(
            result.synthesized_response.as_deref(),
            Some("merged answer\nConfidence: 0.8")
        );
        assert_eq!(result.primary_response, "merged answer\nConfidence: 0.8");
        let score = result.consensus_score.unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[tokio::test]
    async fn test_ensemble_all_failed_skips_synthesis() {
        let invoker = MockInvoker::new();
        // Nothing scripted: every specialist call fails as unscripted
        let uc = use_case(invoker);

        let result = uc
            .execute(
                ExecutePlanInput::new(ensemble_plan(), "urgent question"),
                &CancellationToken::new(),
            )
            .await;

        assert!(!result.is_success());
        assert!(result.primary_response.is_empty());
        assert_eq!(result.agent_responses.len(), 3);
        assert!(result.reasoning.contains("every specialist failed"));
        // The synthesizer was never invoked: only specialist prompts were
        // recorded for its backend, no synthesis prompt
        let synth_calls = uc.invoker.calls_to(&Backend::ClaudeOpus46);
        assert!(synth_calls.iter().all(|p| !p.contains("Independent expert answers")));
    }

    #[tokio::test]
    async fn test_synthesis_failure_falls_back_to_specialist_answer() {
        let invoker = MockInvoker::new()
            .respond(&Backend::ClaudeOpus46, ok("first specialist"))
            .respond(&Backend::Gpt52, ok("second specialist"))
            .respond(&Backend::ClaudeSonnet45, ok("third specialist"))
            .respond(&Backend::ClaudeOpus46, Err(InvokerError::Timeout))
            .respond(&Backend::ClaudeOpus46, Err(InvokerError::Timeout));
        let result = use_case(invoker)
            .execute(
                ExecutePlanInput::new(ensemble_plan(), "urgent question"),
                &CancellationToken::new(),
            )
            .await;

        assert!(result.is_success());
        assert!(result.synthesized_response.is_none());
        assert_eq!(result.primary_response, "first specialist");
        assert!(result.reasoning.contains("synthesis"));
    }

    #[tokio::test]
    async fn test_cancellation_yields_best_effort_result() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let invoker = MockInvoker::new();
        let result = use_case(invoker)
            .execute(ExecutePlanInput::new(ensemble_plan(), "q"), &cancel)
            .await;

        // Never panics, never hangs: a complete result with every agent
        // marked failed
        assert!(!result.is_success());
        assert_eq!(result.agent_responses.len(), 3);
        assert!(result.agent_responses.iter().all(|r| !r.is_success()));
    }

    #[tokio::test]
    async fn test_ensemble_latency_is_max_plus_synthesis() {
        let invoker = MockInvoker::new()
            .respond(&Backend::ClaudeOpus46, Ok(Invocation::new("a", 300, 0.01)))
            .respond(&Backend::Gpt52, Ok(Invocation::new("b", 500, 0.01)))
            .respond(&Backend::ClaudeSonnet45, Ok(Invocation::new("c", 200, 0.01)))
            .respond(
                &Backend::ClaudeOpus46,
                Ok(Invocation::new("merged", 400, 0.02)),
            );
        let result = use_case(invoker)
            .execute(
                ExecutePlanInput::new(ensemble_plan(), "q"),
                &CancellationToken::new(),
            )
            .await;

        // max(300, 500, 200) + 400
        assert_eq!(result.total_latency_ms, 900);
        // Costs always sum across every call
        assert!((result.total_cost - 0.05).abs() < 1e-9);
    }
}
