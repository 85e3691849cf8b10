use crate::{
    controller::{Command, GenerationOutcome, GenerationRequest, SessionController},
    generation::GenerationClient,
};

/// Performs one generation request and returns the command that resolves it.
pub async fn run_generation(
    generation: &dyn GenerationClient,
    request: GenerationRequest,
) -> Command {
    let outcome = match generation.generate(&request.prompt).await {
        Ok(url) => GenerationOutcome::Image(url),
        Err(err) => GenerationOutcome::Failed(err.to_string()),
    };
    Command::GenerationFinished {
        tag: request.tag,
        outcome,
    }
}

/// Submits `text` and waits for the generation to resolve. Returns whether a
/// request was issued.
pub async fn submit_and_wait(
    controller: &mut SessionController,
    generation: &dyn GenerationClient,
    text: impl Into<String>,
) -> bool {
    let Some(request) = controller.dispatch(Command::SubmitPrompt { text: text.into() }) else {
        return false;
    };
    let finished = run_generation(generation, request).await;
    controller.dispatch(finished);
    true
}
