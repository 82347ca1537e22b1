// Integration tests for the chatbot
//
// Tests cover:
// - Loading the bundled intents corpus
// - Pattern self-matching and no-match policies
// - Form gate and session lifecycle through the public service API

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use enrollease::config::config::NoMatchPolicy;
use enrollease::error::AppError;
use enrollease::models::intent::IntentCorpus;
use enrollease::observability::AppMetrics;
use enrollease::services::{
    DEFAULT_IDLE_TIMEOUT, EnrollmentForm, FormGate, GreetingShortcut, Responder,
    ResponderOptions, TurnStatus, create_chat_session_service,
};

fn corpus() -> IntentCorpus {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/intents.json");
    IntentCorpus::load(path).expect("bundled corpus loads")
}

fn responder(policy: NoMatchPolicy) -> Responder {
    let options = ResponderOptions {
        no_match_policy: policy,
        ..ResponderOptions::default()
    };
    Responder::from_corpus(&corpus(), options).expect("index fits")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

// ============ Corpus & Matching ============

#[test]
fn test_every_content_pattern_matches_its_own_response() {
    let corpus = corpus();
    let responder = responder(NoMatchPolicy::FirstPattern);

    for intent in &corpus.intents {
        for pattern in &intent.patterns {
            let best = responder.best_match(pattern).unwrap();
            if best.score <= 0.0 {
                // made only of stop words
                continue;
            }
            assert_eq!(
                responder.respond(pattern).unwrap(),
                intent.responses[0],
                "pattern '{}' matched '{}'",
                pattern,
                best.pattern
            );
        }
    }
}

#[test]
fn test_suggested_location_question() {
    let responder = responder(NoMatchPolicy::FirstPattern);
    let reply = responder.respond("where is your college located").unwrap();
    assert_eq!(
        reply,
        "LSPU Los Baños is located in Malinta, Los Baños, Laguna."
    );
}

#[test]
fn test_gibberish_follows_no_match_policy() {
    let corpus = corpus();
    let first = responder(NoMatchPolicy::FirstPattern)
        .respond("asdkjasd nonsense gibberish")
        .unwrap();
    assert_eq!(first, corpus.intents[0].responses[0]);

    let fallback = responder(NoMatchPolicy::Fallback)
        .respond("asdkjasd nonsense gibberish")
        .unwrap();
    assert_eq!(
        fallback,
        "I'm sorry, I didn't understand that. Could you please rephrase your question?"
    );
}

#[test]
fn test_respond_is_deterministic() {
    let responder = responder(NoMatchPolicy::FirstPattern);
    let query = "how much are the fees for tuition";
    let first = responder.respond(query).unwrap();
    for _ in 0..5 {
        assert_eq!(responder.respond(query).unwrap(), first);
    }
}

// ============ Sessions ============

fn service(greeter: Option<Arc<GreetingShortcut>>) -> Box<dyn enrollease::services::ChatSessionService> {
    create_chat_session_service(
        Arc::new(responder(NoMatchPolicy::FirstPattern)),
        greeter,
        FormGate::default(),
        Arc::new(AppMetrics::default()),
        DEFAULT_IDLE_TIMEOUT,
    )
}

fn form(age: u32, birthdate: NaiveDate) -> EnrollmentForm {
    EnrollmentForm {
        name: "Ana".into(),
        age,
        course: Some("College of Business and Administration".into()),
        birthdate: Some(birthdate),
    }
}

#[tokio::test]
async fn test_underage_birthdate_rejected_regardless_of_stated_age() {
    let service = service(None);
    let birthdate = NaiveDate::from_ymd_opt(2008, 1, 1).unwrap();

    let err = service.start_on(form(18, birthdate), today()).await.unwrap_err();
    match err {
        AppError::Validation(message) => {
            assert_eq!(message, "You must be 17 years or older to use this chatbot.")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_stated_age_must_match_birthdate() {
    let service = service(None);
    let birthdate = NaiveDate::from_ymd_opt(2004, 12, 1).unwrap();

    let err = service.start_on(form(20, birthdate), today()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "The entered age does not match with the birthdate."
    );

    let session = service.start_on(form(19, birthdate), today()).await.unwrap();
    assert_eq!(session.profile.name, "Ana");
}

#[tokio::test]
async fn test_full_conversation() {
    let service = service(Some(Arc::new(GreetingShortcut::new(Some(7)))));
    let birthdate = NaiveDate::from_ymd_opt(2000, 3, 10).unwrap();
    let session = service.start_on(form(24, birthdate), today()).await.unwrap();

    let greeted = service.send(&session.id, "hello there").await.unwrap();
    assert_eq!(greeted.status, TurnStatus::Greeted);

    let answered = service
        .send(&session.id, "What are the enrollment requirements?")
        .await
        .unwrap();
    assert_eq!(answered.status, TurnStatus::Answered);
    assert!(answered.reply.starts_with("Freshmen need"));

    let suggested = service.ask_suggested(&session.id, 4).await.unwrap();
    assert_eq!(
        suggested.reply,
        "The campus offices are open Monday to Friday, 8:00 AM to 5:00 PM."
    );

    assert_eq!(service.transcript(&session.id).await.unwrap().len(), 6);

    let ended = service.send(&session.id, "bye").await.unwrap();
    assert_eq!(ended.status, TurnStatus::Ended);
    assert_eq!(service.count().await.unwrap(), 0);
}
