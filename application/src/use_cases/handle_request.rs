//! Handle Request use case
//!
//! The end-to-end pipeline for one user request: classify, select a
//! collaboration strategy, execute it, then apply presentation
//! enhancement to the final answer. Each stage consumes only the
//! previous stage's output.

use crate::config::ExecutionParams;
use crate::ports::backend_invoker::BackendInvoker;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::execute_plan::{ExecutePlanInput, ExecutePlanUseCase};
use concierge_domain::{
    Classifier, CollaborationPlan, CollaborationResult, Enhanced, Query, ResponseEnhancer,
    RoutingTable, StrategySelector, Triage, Turn, milestone_suggestions,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Input for the HandleRequest use case
#[derive(Debug, Clone, Default)]
pub struct HandleRequestInput {
    /// The user's request
    pub query: Query,
    /// Optional free-text hint about the operating context
    pub context: Option<String>,
    /// Prior turns of the conversation, oldest first
    pub history: Vec<Turn>,
}

impl HandleRequestInput {
    pub fn new(query: impl Into<Query>) -> Self {
        Self {
            query: query.into(),
            context: None,
            history: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }
}

/// Everything one routed request produced, for presentation and audit
#[derive(Debug, Clone)]
pub struct HandleRequestOutput {
    pub triage: Triage,
    pub plan: CollaborationPlan,
    pub result: CollaborationResult,
    /// Present only when the request produced an answer
    pub enhanced: Option<Enhanced>,
    /// Conversation-milestone follow-up prompts
    pub suggestions: Vec<String>,
}

impl HandleRequestOutput {
    /// The text to show the user, enhanced when available
    pub fn display_text(&self) -> &str {
        match &self.enhanced {
            Some(enhanced) => &enhanced.text,
            None => &self.result.primary_response,
        }
    }
}

/// Use case orchestrating the full triage and collaboration pipeline
pub struct HandleRequestUseCase<I: BackendInvoker + 'static> {
    classifier: Classifier,
    selector: StrategySelector,
    executor: ExecutePlanUseCase<I>,
    enhancer: ResponseEnhancer,
}

impl<I: BackendInvoker + 'static> HandleRequestUseCase<I> {
    pub fn new(invoker: Arc<I>, table: Arc<RoutingTable>, params: ExecutionParams) -> Self {
        Self {
            classifier: Classifier::new(Arc::clone(&table)),
            selector: StrategySelector::new(table.clone()),
            executor: ExecutePlanUseCase::new(invoker, table, params),
            enhancer: ResponseEnhancer,
        }
    }

    /// Run the pipeline with default (no-op) progress
    pub async fn handle(
        &self,
        input: HandleRequestInput,
        cancel: &CancellationToken,
    ) -> HandleRequestOutput {
        self.handle_with_progress(input, cancel, &NoProgress).await
    }

    /// Run the pipeline with progress callbacks
    pub async fn handle_with_progress(
        &self,
        input: HandleRequestInput,
        cancel: &CancellationToken,
        progress: &dyn ProgressNotifier,
    ) -> HandleRequestOutput {
        let triage = self
            .classifier
            .classify(&input.query, input.context.as_deref(), &input.history);
        info!(
            complexity = %triage.complexity,
            domain = %triage.domain,
            urgency = %triage.urgency,
            confidence = triage.confidence,
            "Request classified"
        );

        let plan = self.selector.select(&triage);
        debug!(strategy = %plan.strategy, mode = %plan.mode, "Strategy selected");

        let mut exec_input = ExecutePlanInput::new(plan.clone(), input.query.clone());
        if triage.requires_vision {
            exec_input = exec_input.with_vision();
        }
        let result = self
            .executor
            .execute_with_progress(exec_input, cancel, progress)
            .await;

        let enhanced = if result.is_success() {
            Some(self.enhancer.enhance(&result.primary_response, &triage))
        } else {
            None
        };

        // Current exchange counts as a turn on top of the recorded history
        let turn_count = input.history.iter().filter(|t| t.is_user()).count() + 1;
        let suggestions = milestone_suggestions(turn_count, &input.history, &triage);

        HandleRequestOutput {
            triage,
            plan,
            result,
            enhanced,
            suggestions,
        }
    }
}
