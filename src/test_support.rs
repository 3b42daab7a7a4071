use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::core::credentials::AuthContext;
use crate::schemas::{
    Challenge, ChallengeCategory, ChallengeDifficulty, Submission, SubmissionCreate, User,
    UserCreate, UserLogin,
};

pub(crate) const TEST_TOKEN: &str = "test-access-token";

/// Serializes tests that mutate process environment variables.
pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct BackendState {
    challenges: HashMap<Uuid, Challenge>,
    submissions: HashMap<Uuid, Submission>,
    user: Option<User>,
    hits: HashMap<&'static str, usize>,
}

type SharedState = Arc<Mutex<BackendState>>;

/// In-process stand-in for the CodeCraft backend, implementing the REST
/// surface the client consumes with per-endpoint hit counters.
pub(crate) struct TestBackend {
    base_url: String,
    state: SharedState,
}

impl TestBackend {
    pub(crate) async fn spawn() -> Self {
        let state: SharedState = Arc::default();
        let app = router(state.clone());

        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test backend");
        });

        Self { base_url: format!("http://{addr}"), state }
    }

    /// Client whose auth context already holds a valid token.
    pub(crate) fn client(&self) -> ApiClient {
        let auth = AuthContext::in_memory();
        auth.store_token(TEST_TOKEN).expect("store token");
        ApiClient::for_base_url(&self.base_url, auth).expect("client")
    }

    pub(crate) fn anonymous_client(&self) -> ApiClient {
        ApiClient::for_base_url(&self.base_url, AuthContext::in_memory()).expect("client")
    }

    pub(crate) fn seed_challenge(
        &self,
        title: &str,
        category: ChallengeCategory,
        difficulty: ChallengeDifficulty,
    ) -> Challenge {
        let challenge = Challenge {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("{title} description"),
            category,
            difficulty,
            code_snippet: Some("fn main() { println!(\"hi\"); }".to_string()),
            language: Some("rust".to_string()),
            time_limit: 30,
            points: 100,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        };
        self.state
            .lock()
            .expect("state lock")
            .challenges
            .insert(challenge.id, challenge.clone());
        challenge
    }

    /// Inserts an already-graded submission directly, bypassing create.
    pub(crate) fn seed_submission(&self, submission: Submission) {
        self.state.lock().expect("state lock").submissions.insert(submission.id, submission);
    }

    pub(crate) fn remove_challenge(&self, id: Uuid) {
        self.state.lock().expect("state lock").challenges.remove(&id);
    }

    pub(crate) fn hits(&self, endpoint: &'static str) -> usize {
        self.state.lock().expect("state lock").hits.get(endpoint).copied().unwrap_or(0)
    }
}

pub(crate) fn graded_submission(
    challenge_id: Uuid,
    score: Option<f64>,
    max_score: Option<f64>,
) -> Submission {
    Submission {
        id: Uuid::new_v4(),
        challenge_id,
        user_id: Uuid::new_v4(),
        code: None,
        explanation: Some("Because the loop never terminates.".to_string()),
        score,
        max_score,
        is_correct: score.unwrap_or(0.0) >= 80.0,
        feedback: Some("Well reasoned.\nWatch the edge cases.".to_string()),
        grading_details: None,
        time_taken: Some(240),
        submitted_at: OffsetDateTime::now_utc(),
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(current_user))
        .route("/challenges", get(list_challenges))
        .route("/challenges/", get(list_challenges))
        .route("/challenges/:id", get(get_challenge))
        .route("/challenges/:id/", get(get_challenge))
        .route("/submissions", get(list_submissions).post(create_submission))
        .route("/submissions/:id", get(get_submission))
        .with_state(state)
}

fn count_hit(state: &SharedState, endpoint: &'static str) {
    *state.lock().expect("state lock").hits.entry(endpoint).or_insert(0) += 1;
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {TEST_TOKEN}"))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Not authenticated"}))).into_response()
}

async fn register(State(state): State<SharedState>, Json(payload): Json<UserCreate>) -> Response {
    count_hit(&state, "POST /auth/register");
    let user = User {
        id: Uuid::new_v4(),
        username: payload.username,
        email: payload.email,
        full_name: payload.full_name,
        skill_level: 1,
        is_active: true,
        is_verified: false,
        created_at: OffsetDateTime::now_utc(),
    };
    state.lock().expect("state lock").user = Some(user.clone());
    Json(user).into_response()
}

async fn login(State(state): State<SharedState>, Json(payload): Json<UserLogin>) -> Response {
    count_hit(&state, "POST /auth/login");
    if payload.password == "wrong-password" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Incorrect username or password"})))
            .into_response();
    }
    let mut locked = state.lock().expect("state lock");
    if locked.user.is_none() {
        locked.user = Some(User {
            id: Uuid::new_v4(),
            username: payload.username,
            email: "user@example.com".to_string(),
            full_name: None,
            skill_level: 1,
            is_active: true,
            is_verified: true,
            created_at: OffsetDateTime::now_utc(),
        });
    }
    Json(json!({"access_token": TEST_TOKEN, "token_type": "bearer"})).into_response()
}

async fn current_user(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    count_hit(&state, "GET /auth/me");
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    match state.lock().expect("state lock").user.clone() {
        Some(user) => Json(user).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "User not found"}))).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    category: Option<String>,
    difficulty: Option<String>,
}

async fn list_challenges(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Response {
    count_hit(&state, "GET /challenges");
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let mut challenges: Vec<Challenge> = state
        .lock()
        .expect("state lock")
        .challenges
        .values()
        .filter(|challenge| {
            params
                .category
                .as_deref()
                .map_or(true, |category| challenge.category.as_str() == category)
                && params
                    .difficulty
                    .as_deref()
                    .map_or(true, |difficulty| challenge.difficulty.as_str() == difficulty)
        })
        .cloned()
        .collect();
    challenges.sort_by(|a, b| a.title.cmp(&b.title));
    Json(challenges).into_response()
}

async fn get_challenge(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    count_hit(&state, "GET /challenges/{id}");
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    match state.lock().expect("state lock").challenges.get(&id).cloned() {
        Some(challenge) => Json(challenge).into_response(),
        None => {
            (StatusCode::NOT_FOUND, Json(json!({"detail": "Challenge not found"}))).into_response()
        }
    }
}

async fn create_submission(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<SubmissionCreate>,
) -> Response {
    count_hit(&state, "POST /submissions");
    if !bearer_ok(&headers) {
        return unauthorized();
    }

    let mut locked = state.lock().expect("state lock");
    let challenge = match locked.challenges.get(&payload.challenge_id).cloned() {
        Some(challenge) => challenge,
        None => {
            return (StatusCode::NOT_FOUND, Json(json!({"detail": "Challenge not found"})))
                .into_response()
        }
    };

    let already_submitted =
        locked.submissions.values().any(|existing| existing.challenge_id == challenge.id);
    if already_submitted {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "detail": "You have already submitted this challenge. Each challenge can only be attempted once."
            })),
        )
            .into_response();
    }

    let submission = Submission {
        id: Uuid::new_v4(),
        challenge_id: challenge.id,
        user_id: locked.user.as_ref().map(|user| user.id).unwrap_or_else(Uuid::new_v4),
        code: payload.code,
        explanation: payload.explanation,
        score: Some(85.0),
        max_score: Some(100.0),
        is_correct: true,
        feedback: Some("Solid analysis.\nCovers the main issues.".to_string()),
        grading_details: Some(
            [
                ("accuracy".to_string(), json!(34)),
                ("completeness".to_string(), json!(26)),
                ("clarity".to_string(), json!(15)),
                ("depth".to_string(), json!(10)),
            ]
            .into_iter()
            .collect(),
        ),
        time_taken: None,
        submitted_at: OffsetDateTime::now_utc(),
    };
    locked.submissions.insert(submission.id, submission.clone());
    Json(submission).into_response()
}

async fn list_submissions(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    count_hit(&state, "GET /submissions");
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let mut submissions: Vec<Submission> =
        state.lock().expect("state lock").submissions.values().cloned().collect();
    submissions.sort_by_key(|submission| submission.submitted_at);
    Json(submissions).into_response()
}

async fn get_submission(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    count_hit(&state, "GET /submissions/{id}");
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    match state.lock().expect("state lock").submissions.get(&id).cloned() {
        Some(submission) => Json(submission).into_response(),
        None => {
            (StatusCode::NOT_FOUND, Json(json!({"detail": "Submission not found"}))).into_response()
        }
    }
}
