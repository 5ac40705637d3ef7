//! End-to-end interview scenarios driven through the public controller API.

use std::sync::{Arc, Mutex};

use intake_core::chat::controller::SessionController;
use intake_core::chat::session::Session;
use intake_core::llm::box_model::BoxLanguageModel;
use intake_core::llm::model::LanguageModel;
use intake_types::config::EngineConfig;
use intake_types::error::{SessionError, ValidationError};
use intake_types::interview::{InterviewState, InterviewStep};
use intake_types::llm::{ModelError, PromptPayload};

/// Answers with a canned reply unless switched into a failure mode.
struct StubModel {
    failure: Mutex<Option<ModelError>>,
}

impl StubModel {
    fn new() -> Self {
        Self {
            failure: Mutex::new(None),
        }
    }
}

impl LanguageModel for StubModel {
    fn name(&self) -> &str {
        "stub"
    }

    async fn send(&self, payload: &PromptPayload) -> Result<String, ModelError> {
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(format!(
            "Thanks. You said: {}",
            payload.latest_user_text().unwrap_or_default()
        ))
    }
}

fn setup() -> (SessionController, Session) {
    let controller = SessionController::from_config(&EngineConfig::default());
    let session = Session::new(Arc::new(BoxLanguageModel::new(StubModel::new())));
    (controller, session)
}

#[tokio::test]
async fn scenario_a_full_interview_reaches_dialogue() {
    let (controller, mut session) = setup();

    controller.handle(&mut session, "yes").await.unwrap();
    controller.handle(&mut session, "Abdomen").await.unwrap();
    let outcome = controller
        .handle(&mut session, "sharp pain on standing")
        .await
        .unwrap();

    assert_eq!(outcome.step, InterviewStep::OpenDialogue);
    assert_eq!(session.step(), InterviewStep::OpenDialogue);
    assert_eq!(session.transcript().len(), 2);
    assert_eq!(
        session.state().initial_detail(),
        Some("sharp pain on standing")
    );
}

#[tokio::test]
async fn scenario_b_declined_session_rejects_further_input() {
    let (controller, mut session) = setup();

    let outcome = controller.handle(&mut session, "no").await.unwrap();
    assert_eq!(outcome.step, InterviewStep::Declined);
    assert_eq!(session.transcript().len(), 0);

    let err = controller
        .handle(&mut session, "I still have pain in my abdomen")
        .await
        .unwrap_err();
    assert_eq!(err, SessionError::Validation(ValidationError::SessionDeclined));
    assert_eq!(session.step(), InterviewStep::Declined);
    assert_eq!(session.transcript().len(), 0);

    // Only a reset leaves the terminal state.
    controller.reset(&mut session);
    assert_eq!(session.state(), &InterviewState::AwaitingConfirmation);
    controller.handle(&mut session, "yes").await.unwrap();
    assert_eq!(session.step(), InterviewStep::CategorySelection);
}

#[tokio::test]
async fn scenario_c_rate_limit_in_dialogue_keeps_transcript() {
    let stub = Arc::new(StubModel::new());
    let controller = SessionController::from_config(&EngineConfig::default());
    let mut session = Session::new(Arc::new(BoxLanguageModel::new(SharedStub(Arc::clone(&stub)))));

    controller.handle(&mut session, "yes").await.unwrap();
    controller.handle(&mut session, "Pelvis").await.unwrap();
    controller.handle(&mut session, "dull ache").await.unwrap();
    controller.handle(&mut session, "does it get worse?").await.unwrap();
    let before = session.transcript().len();

    *stub.failure.lock().unwrap() = Some(ModelError::RateLimited {
        retry_after_ms: Some(2000),
    });
    let err = controller
        .handle(&mut session, "should I call my surgeon?")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Model(ModelError::RateLimited { .. })
    ));
    assert_eq!(session.transcript().len(), before);
    assert_eq!(session.step(), InterviewStep::OpenDialogue);
}

#[tokio::test]
async fn independent_sessions_share_one_model() {
    let controller = SessionController::from_config(&EngineConfig::default());
    let model = Arc::new(BoxLanguageModel::new(StubModel::new()));

    let mut first = Session::new(Arc::clone(&model));
    let mut second = Session::new(Arc::clone(&model));

    let (a, b) = tokio::join!(
        async {
            controller.handle(&mut first, "yes").await.unwrap();
            controller.handle(&mut first, "Other").await.unwrap();
            controller.handle(&mut first, "headache").await.unwrap()
        },
        async { controller.handle(&mut second, "no").await.unwrap() },
    );

    assert_eq!(a.step, InterviewStep::OpenDialogue);
    assert_eq!(b.step, InterviewStep::Declined);
    assert_eq!(first.transcript().len(), 2);
    assert!(second.transcript().is_empty());
    assert_ne!(first.id(), second.id());
}

/// Lets a test flip the stub's failure mode after the session owns it.
struct SharedStub(Arc<StubModel>);

impl LanguageModel for SharedStub {
    fn name(&self) -> &str {
        self.0.name()
    }

    async fn send(&self, payload: &PromptPayload) -> Result<String, ModelError> {
        self.0.send(payload).await
    }
}
