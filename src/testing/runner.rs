//! Suite runner implementation
//!
//! Executes scenarios strictly in order against one authenticated session,
//! threading the created story id from step to step. A failing scenario is
//! recorded and the run moves on to the next one.

use colored::Colorize;
use tracing::{debug, info};

use crate::api::protocol::{ApiResponse, MessageResponse};
use crate::api::{Session, Transport};
use crate::common::config::Credentials;
use crate::common::{Error, Result};

use super::config::{Expectation, Scenario, ScenarioStep};
use super::context::FixtureState;
use super::report::{ScenarioOutcome, SuiteReport};
use super::suite::Suite;

/// Authenticate, run the whole suite, then release the session
///
/// Scenario failures never cut the run short, so the session is always
/// closed after the last scenario.
pub async fn run_suite<T: Transport>(
    transport: T,
    credentials: &Credentials,
    suite: &Suite,
    verbose: bool,
) -> SuiteReport {
    println!(
        "\n{} {}",
        "Running Suite:".blue().bold(),
        suite.name.white().bold()
    );
    if let Some(desc) = &suite.description {
        println!("  {}", desc.dimmed());
    }

    println!("\n{}", "Setup:".cyan());
    let session = Session::open(transport, credentials).await;
    if session.is_authenticated() {
        println!("  {} Authenticated as {}", "✓".green(), credentials.username.dimmed());
    } else {
        println!(
            "  {} No token for {}, continuing unauthenticated",
            "!".yellow(),
            credentials.username.dimmed()
        );
    }

    let mut state = FixtureState::new();
    let report = run_scenarios(&session, suite, &mut state, verbose).await;

    session.close();
    print_summary(&report);
    report
}

/// Run every scenario of `suite` in order against an open session
pub async fn run_scenarios<T: Transport>(
    session: &Session<T>,
    suite: &Suite,
    state: &mut FixtureState,
    verbose: bool,
) -> SuiteReport {
    info!(suite = %suite.name, scenarios = suite.len(), "running suite");
    println!("\n{}", "Scenarios:".cyan());

    let mut outcomes = Vec::with_capacity(suite.len());
    for scenario in suite.scenarios() {
        let (status, result) = execute_scenario(session, scenario, state).await;

        match &result {
            Ok(()) => {
                println!(
                    "  {} {}: {}",
                    "✓".green(),
                    scenario.order,
                    scenario.name.dimmed()
                );
            }
            Err(e) => {
                println!("  {} {}: {}", "✗".red(), scenario.order, scenario.name);
                println!("      {}", e.to_string().red());
            }
        }
        if verbose {
            if let Some(status) = status {
                println!("      status {}", status.to_string().dimmed());
            }
        }

        outcomes.push(ScenarioOutcome {
            order: scenario.order,
            name: scenario.name.clone(),
            passed: result.is_ok(),
            status,
            error: result.err().map(|e| e.to_string()),
        });
    }

    SuiteReport {
        suite: suite.name.clone(),
        base_url: session.base_url().to_string(),
        authenticated: session.is_authenticated(),
        outcomes,
    }
}

/// Execute one scenario, returning the observed status alongside the verdict
pub async fn execute_scenario<T: Transport>(
    session: &Session<T>,
    scenario: &Scenario,
    state: &mut FixtureState,
) -> (Option<u16>, Result<()>) {
    debug!(order = scenario.order, name = %scenario.name, action = scenario.step.action(), "executing scenario");

    let response = match send_step(session, &scenario.step, state).await {
        Ok(response) => response,
        Err(e) => return (None, Err(e)),
    };

    let verdict = verify_step(&scenario.step, &scenario.expect, &response, state);
    (Some(response.status), verdict)
}

/// Issue the request for a step
async fn send_step<T: Transport>(
    session: &Session<T>,
    step: &ScenarioStep,
    state: &FixtureState,
) -> Result<ApiResponse> {
    match step {
        ScenarioStep::CreateStory { story, .. } => session.create_story(story).await,
        ScenarioStep::EditStory { target, story } => {
            let id = state.resolve(target)?;
            session.edit_story(&id, story).await
        }
        ScenarioStep::ListStories { .. } => session.list_stories().await,
        ScenarioStep::DeleteStory { target } => {
            let id = state.resolve(target)?;
            session.delete_story(&id).await
        }
    }
}

/// Check a response against the step's contract, capturing ids on the way
fn verify_step(
    step: &ScenarioStep,
    expect: &Expectation,
    response: &ApiResponse,
    state: &mut FixtureState,
) -> Result<()> {
    check_status(expect, response)?;

    match step {
        ScenarioStep::CreateStory {
            capture_id: true, ..
        } => {
            let message: MessageResponse = response.json()?;
            match message.story_id.filter(|id| !id.is_empty()) {
                Some(id) => state.record_created(id),
                None => {
                    return Err(Error::TestAssertion(
                        "The story id should not be null or empty".to_string(),
                    ))
                }
            }
        }
        ScenarioStep::ListStories { require_non_empty } => {
            let stories: Vec<serde_json::Value> = response.json().map_err(|e| {
                Error::TestAssertion(format!("Expected a JSON list of stories: {}", e))
            })?;
            if *require_non_empty && stories.is_empty() {
                return Err(Error::TestAssertion(
                    "The list of stories should not be empty".to_string(),
                ));
            }
        }
        _ => {}
    }

    check_contains(expect, response)
}

fn check_status(expect: &Expectation, response: &ApiResponse) -> Result<()> {
    if response.status != expect.status {
        return Err(Error::TestAssertion(format!(
            "Expected status {}, got {}. Body: '{}'",
            expect.status,
            response.status,
            response.excerpt()
        )));
    }
    Ok(())
}

fn check_contains(expect: &Expectation, response: &ApiResponse) -> Result<()> {
    for fragment in &expect.contains {
        if !response.contains(fragment) {
            return Err(Error::TestAssertion(format!(
                "Response does not contain '{}'. Got: '{}'",
                fragment,
                response.excerpt()
            )));
        }
    }
    Ok(())
}

fn print_summary(report: &SuiteReport) {
    let total = report.outcomes.len();
    if report.all_passed() {
        println!(
            "\n{} {}\n",
            "✓".green().bold(),
            format!("{} of {} scenarios passed", total, total).green().bold()
        );
    } else {
        println!(
            "\n{} {}\n",
            "✗".red().bold(),
            format!("{} of {} scenarios failed", report.failed_count(), total)
                .red()
                .bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::protocol::{ApiRequest, Method, StoryPayload};
    use crate::testing::config::StoryTarget;
    use crate::testing::suite::default_suite;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses in order and records what was sent
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<ApiResponse>>>,
        sent: Mutex<Vec<(Method, String, Option<String>)>>,
    }

    impl ScriptedTransport {
        fn with(responses: Vec<Result<ApiResponse>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                sent: Mutex::default(),
            }
        }

        fn sent(&self) -> Vec<(Method, String, Option<String>)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        fn base_url(&self) -> &str {
            "http://scripted"
        }

        async fn execute(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<ApiResponse> {
            self.sent.lock().unwrap().push((
                request.method,
                request.path.clone(),
                bearer.map(str::to_string),
            ));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ApiResponse::new(500, "no scripted response")))
        }
    }

    fn ok(status: u16, body: &str) -> Result<ApiResponse> {
        Ok(ApiResponse::new(status, body))
    }

    fn create_scenario() -> Scenario {
        default_suite().scenarios()[0].clone()
    }

    #[tokio::test]
    async fn test_create_captures_camel_case_id() {
        let session = Session::with_token(
            ScriptedTransport::with(vec![ok(
                201,
                r#"{"msg":"Successfully created!","storyId":"abc-123"}"#,
            )]),
            "tok",
        );
        let mut state = FixtureState::new();

        let (status, result) = execute_scenario(&session, &create_scenario(), &mut state).await;

        assert_eq!(status, Some(201));
        result.unwrap();
        assert_eq!(state.created_story_id(), Some("abc-123"));
    }

    #[tokio::test]
    async fn test_create_with_empty_id_fails_and_stores_nothing() {
        let session = Session::with_token(
            ScriptedTransport::with(vec![ok(201, r#"{"msg":"Successfully created!","storyId":""}"#)]),
            "tok",
        );
        let mut state = FixtureState::new();

        let (_, result) = execute_scenario(&session, &create_scenario(), &mut state).await;

        assert!(result.unwrap_err().is_assertion());
        assert!(state.created_story_id().is_none());
    }

    #[tokio::test]
    async fn test_wrong_status_is_assertion_failure() {
        let session = Session::with_token(
            ScriptedTransport::with(vec![ok(401, "Unauthorized")]),
            "",
        );
        let mut state = FixtureState::new();

        let (status, result) = execute_scenario(&session, &create_scenario(), &mut state).await;

        assert_eq!(status, Some(401));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Expected status 201, got 401"));
    }

    #[tokio::test]
    async fn test_missing_fragment_fails() {
        let scenario = Scenario {
            order: 1,
            name: "edit".into(),
            step: ScenarioStep::EditStory {
                target: StoryTarget::id("non-existing-id"),
                story: StoryPayload::new("a", "b", ""),
            },
            expect: Expectation::status(404).containing("No spoilers..."),
        };
        let session = Session::with_token(ScriptedTransport::with(vec![ok(404, "{}")]), "tok");

        let (_, result) = execute_scenario(&session, &scenario, &mut FixtureState::new()).await;

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("does not contain 'No spoilers...'"));
    }

    #[tokio::test]
    async fn test_created_target_without_capture_sends_nothing() {
        let suite = default_suite();
        let scenario = &suite.scenarios()[1];
        let transport = ScriptedTransport::with(Vec::new());
        let session = Session::with_token(transport, "tok");

        let (status, result) = execute_scenario(&session, scenario, &mut FixtureState::new()).await;

        assert_eq!(status, None);
        assert!(matches!(result, Err(Error::MissingStoryId)));
        assert!(session.close().sent().is_empty());
    }

    #[tokio::test]
    async fn test_list_requires_json_array() {
        let suite = default_suite();
        let scenario = &suite.scenarios()[2];
        let session = Session::with_token(
            ScriptedTransport::with(vec![ok(200, r#"{"not":"a list"}"#), ok(200, "[]")]),
            "tok",
        );
        let mut state = FixtureState::new();

        let (_, first) = execute_scenario(&session, scenario, &mut state).await;
        assert!(first.unwrap_err().to_string().contains("JSON list"));

        let (_, second) = execute_scenario(&session, scenario, &mut state).await;
        assert!(second.unwrap_err().to_string().contains("should not be empty"));
    }

    #[tokio::test]
    async fn test_transport_error_recorded_and_run_continues() {
        let transport = ScriptedTransport::with(vec![
            // login
            ok(200, r#"{"accessToken":"jwt"}"#),
            // create
            Err(Error::transport("POST", "/api/Story/Create", "connection reset")),
        ]);
        let credentials = Credentials::default();

        let report = run_suite(transport, &credentials, &default_suite(), false).await;

        assert!(report.authenticated);
        assert_eq!(report.outcomes.len(), 7);
        let create = &report.outcomes[0];
        assert!(!create.passed);
        assert_eq!(create.status, None);
        assert!(create.error.as_deref().unwrap().contains("connection reset"));
        // edit and delete of the created story cannot run without an id
        assert!(report.outcomes[1]
            .error
            .as_deref()
            .unwrap()
            .contains("No story id captured"));
        assert!(report.outcomes[3]
            .error
            .as_deref()
            .unwrap()
            .contains("No story id captured"));
    }

    #[tokio::test]
    async fn test_requests_carry_bearer_token_in_order() {
        let transport = ScriptedTransport::with(vec![
            ok(200, r#"{"accessToken":"jwt"}"#),
            ok(201, r#"{"msg":"Successfully created!","storyId":"s1"}"#),
            ok(200, r#"{"msg":"Successfully edited"}"#),
            ok(200, r#"[{"id":"s1"}]"#),
            ok(200, r#"{"msg":"Deleted successfully!"}"#),
            ok(400, r#"{"errors":{}}"#),
            ok(404, r#"{"msg":"No spoilers..."}"#),
            ok(400, r#"{"msg":"Unable to delete this story spoiler!"}"#),
        ]);
        let credentials = Credentials::default();
        let session = Session::open(transport, &credentials).await;
        let mut state = FixtureState::new();

        let report = run_scenarios(&session, &default_suite(), &mut state, true).await;
        assert!(report.all_passed(), "{:?}", report.outcomes);

        let sent = session.close().sent();
        let paths: Vec<&str> = sent.iter().map(|(_, p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/api/User/Authentication",
                "/api/Story/Create",
                "/api/Story/Edit/s1",
                "/api/Story/All",
                "/api/Story/Delete/s1",
                "/api/Story/Create",
                "/api/Story/Edit/non-existing-id",
                "/api/Story/Delete/non-existing-id",
            ]
        );
        assert_eq!(sent[0].2, None);
        assert!(sent[1..].iter().all(|(_, _, b)| b.as_deref() == Some("jwt")));
        assert_eq!(sent[4].0, Method::Delete);
    }

    #[tokio::test]
    async fn test_login_without_token_degrades_to_empty() {
        let transport = ScriptedTransport::with(vec![ok(401, r#"{"message":"invalid"}"#)]);
        let session = Session::open(transport, &Credentials::default()).await;
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), "");
    }

    #[tokio::test]
    async fn test_unreachable_login_degrades_to_empty() {
        let transport = ScriptedTransport::with(vec![Err(Error::transport(
            "POST",
            "/api/User/Authentication",
            "dns error: no such host",
        ))]);
        let session = Session::open(transport, &Credentials::default()).await;
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), "");
    }

    #[tokio::test]
    async fn test_unreachable_api_still_reports_every_scenario() {
        let transport = ScriptedTransport::with(
            (0..8)
                .map(|_| Err(Error::transport("POST", "/", "connection refused")))
                .collect(),
        );

        let report = run_suite(transport, &Credentials::default(), &default_suite(), false).await;

        assert!(!report.authenticated);
        assert_eq!(report.outcomes.len(), 7);
        assert_eq!(report.failed_count(), 7);
        assert!(report.outcomes.iter().all(|o| o.status.is_none()));
    }

    #[tokio::test]
    async fn test_login_with_unparseable_body_degrades_to_empty() {
        let transport = ScriptedTransport::with(vec![ok(502, "<html>Bad Gateway</html>")]);
        let session = Session::open(transport, &Credentials::default()).await;
        assert!(!session.is_authenticated());
    }
}
