// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process fake of the task-board REST API.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::{Arc, Mutex};
use taskboard_client::models::{Category, LoginUser, PostTask, Profile, ReadTask, User};
use taskboard_client::services::ApiClient;
use taskboard_client::storage::MemoryStorage;
use taskboard_client::Session;

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";
pub const ACCESS_TOKEN: &str = "access-token-1";

/// Mutable server-side data of the fake.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeData {
    pub tasks: Vec<ReadTask>,
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub profiles: Vec<Profile>,
    pub next_id: u64,
    /// Access token handed out on login
    pub issued_access: String,
    /// When set, every `/api/` route answers with this status.
    pub fail_with: Option<StatusCode>,
    /// Authorization headers seen, in order
    pub auth_headers: Vec<String>,
    /// Body of the last profile creation request
    pub last_profile_body: Option<serde_json::Value>,
    /// Body of the last category creation request
    pub last_category_body: Option<serde_json::Value>,
    /// Content type of the last uploaded profile image
    pub last_upload_type: Option<String>,
    pub registered: Vec<String>,
}

pub type FakeApi = Arc<Mutex<FakeData>>;

/// Build a task record as the server would return it.
#[allow(dead_code)]
pub fn read_task(id: u64, title: &str) -> ReadTask {
    ReadTask {
        id,
        title: title.to_string(),
        description: format!("{} description", title),
        acceptance_criteria: "done when done".to_string(),
        owner_id: 1,
        owner_name: USERNAME.to_string(),
        responsible_id: 2,
        responsible_name: "bob".to_string(),
        estimate: 3,
        category_id: 1,
        category_name: "dev".to_string(),
        status: "1".to_string(),
        status_name: "Not started".to_string(),
        created_at: "2024-01-15 10:00".to_string(),
        updated_at: "2024-01-15 10:00".to_string(),
    }
}

/// Draft for a new task.
#[allow(dead_code)]
pub fn draft(title: &str) -> PostTask {
    PostTask {
        id: 0,
        title: title.to_string(),
        description: format!("{} description", title),
        acceptance_criteria: "done when done".to_string(),
        responsible_id: 2,
        estimate: 5,
        category_id: 1,
        status: "1".to_string(),
    }
}

/// Fake seeded with three tasks, two users, one category and one profile.
pub fn seeded() -> FakeApi {
    Arc::new(Mutex::new(FakeData {
        tasks: vec![read_task(1, "one"), read_task(2, "two"), read_task(3, "three")],
        users: vec![
            User {
                id: 1,
                username: USERNAME.to_string(),
            },
            User {
                id: 2,
                username: "bob".to_string(),
            },
        ],
        categories: vec![Category {
            id: 1,
            item: "dev".to_string(),
        }],
        profiles: vec![Profile {
            id: 1,
            owner_user_id: 1,
            image: None,
        }],
        next_id: 100,
        issued_access: ACCESS_TOKEN.to_string(),
        ..Default::default()
    }))
}

/// Router implementing the API endpoints over `api`.
#[allow(dead_code)]
pub fn router(api: FakeApi) -> Router {
    Router::new()
        .route("/authen/jwt/create", post(create_token))
        .route("/api/create/", post(create_user))
        .route("/api/loginuser/", get(login_user))
        .route("/api/profile/", get(list_profiles).post(create_profile))
        .route("/api/profile/{id}/", put(update_profile))
        .route("/api/tasks/", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}/", put(update_task).delete(delete_task))
        .route("/api/users/", get(list_users))
        .route("/api/category/", get(list_categories).post(create_category))
        .with_state(api)
}

/// Serve the fake on an ephemeral port and return its base URL.
pub async fn spawn(api: FakeApi) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake API");
    let addr = listener.local_addr().unwrap();
    let app = router(api);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Seeded fake plus a client pointed at it.
#[allow(dead_code)]
pub async fn client() -> (ApiClient, FakeApi) {
    let api = seeded();
    let url = spawn(api.clone()).await;
    (ApiClient::new(url), api)
}

/// Seeded fake plus a session over in-memory storage.
#[allow(dead_code)]
pub async fn session(storage: MemoryStorage) -> (Session<MemoryStorage>, FakeApi) {
    let (client, api) = client().await;
    (Session::new(client, storage), api)
}

/// Make every `/api/` route fail with `status`.
#[allow(dead_code)]
pub fn fail_with(api: &FakeApi, status: StatusCode) {
    api.lock().unwrap().fail_with = Some(status);
}

// ─── Handlers ────────────────────────────────────────────────────────────────

type HandlerResult<T> = Result<Json<T>, StatusCode>;

fn authorize(api: &FakeApi, headers: &HeaderMap) -> Result<(), StatusCode> {
    let mut data = api.lock().unwrap();
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    data.auth_headers.push(value.clone());

    if let Some(status) = data.fail_with {
        return Err(status);
    }
    if value != format!("JWT {}", ACCESS_TOKEN) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

fn next_id(data: &mut FakeData) -> u64 {
    data.next_id += 1;
    data.next_id
}

fn to_read_task(data: &FakeData, id: u64, draft: &PostTask) -> ReadTask {
    let responsible_name = data
        .users
        .iter()
        .find(|u| u.id == draft.responsible_id)
        .map(|u| u.username.clone())
        .unwrap_or_default();
    let category_name = data
        .categories
        .iter()
        .find(|c| c.id == draft.category_id)
        .map(|c| c.item.clone())
        .unwrap_or_default();

    ReadTask {
        id,
        title: draft.title.clone(),
        description: draft.description.clone(),
        acceptance_criteria: draft.acceptance_criteria.clone(),
        owner_id: 1,
        owner_name: USERNAME.to_string(),
        responsible_id: draft.responsible_id,
        responsible_name,
        estimate: draft.estimate,
        category_id: draft.category_id,
        category_name,
        status: draft.status.clone(),
        status_name: format!("status {}", draft.status),
        created_at: "2024-02-01 08:00".to_string(),
        updated_at: "2024-02-01 08:00".to_string(),
    }
}

async fn create_token(
    State(api): State<FakeApi>,
    Json(body): Json<serde_json::Value>,
) -> HandlerResult<serde_json::Value> {
    if body["username"] != USERNAME || body["password"] != PASSWORD {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let access = api.lock().unwrap().issued_access.clone();
    Ok(Json(serde_json::json!({ "refresh": "refresh-token", "access": access })))
}

async fn create_user(
    State(api): State<FakeApi>,
    Json(body): Json<serde_json::Value>,
) -> HandlerResult<User> {
    let username = body["username"].as_str().unwrap_or_default().to_string();
    if username.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut data = api.lock().unwrap();
    data.registered.push(username.clone());
    let id = next_id(&mut data);
    Ok(Json(User { id, username }))
}

async fn login_user(State(api): State<FakeApi>, headers: HeaderMap) -> HandlerResult<LoginUser> {
    authorize(&api, &headers)?;
    Ok(Json(LoginUser {
        id: 1,
        username: USERNAME.to_string(),
    }))
}

async fn list_profiles(State(api): State<FakeApi>, headers: HeaderMap) -> HandlerResult<Vec<Profile>> {
    authorize(&api, &headers)?;
    Ok(Json(api.lock().unwrap().profiles.clone()))
}

async fn create_profile(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> HandlerResult<Profile> {
    authorize(&api, &headers)?;
    let mut data = api.lock().unwrap();
    data.last_profile_body = Some(body);
    let profile = Profile {
        id: next_id(&mut data),
        owner_user_id: 1,
        image: None,
    };
    data.profiles.push(profile.clone());
    Ok(Json(profile))
}

async fn update_profile(
    State(api): State<FakeApi>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> HandlerResult<Profile> {
    authorize(&api, &headers)?;

    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("img") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            if bytes.is_empty() {
                return Err(StatusCode::BAD_REQUEST);
            }
            image = Some(format!("/media/avatars/{}", file_name));
            api.lock().unwrap().last_upload_type = content_type;
        }
    }

    let mut data = api.lock().unwrap();
    let profile = data
        .profiles
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    profile.image = image;
    Ok(Json(profile.clone()))
}

async fn list_tasks(State(api): State<FakeApi>, headers: HeaderMap) -> HandlerResult<Vec<ReadTask>> {
    authorize(&api, &headers)?;
    Ok(Json(api.lock().unwrap().tasks.clone()))
}

async fn create_task(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(draft): Json<PostTask>,
) -> HandlerResult<ReadTask> {
    authorize(&api, &headers)?;
    let mut data = api.lock().unwrap();
    let id = next_id(&mut data);
    let task = to_read_task(&data, id, &draft);
    data.tasks.push(task.clone());
    Ok(Json(task))
}

async fn update_task(
    State(api): State<FakeApi>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(draft): Json<PostTask>,
) -> HandlerResult<ReadTask> {
    authorize(&api, &headers)?;
    let mut data = api.lock().unwrap();
    let task = to_read_task(&data, id, &draft);
    let slot = data
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = task.clone();
    Ok(Json(task))
}

async fn delete_task(
    State(api): State<FakeApi>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    authorize(&api, &headers)?;
    let mut data = api.lock().unwrap();
    let before = data.tasks.len();
    data.tasks.retain(|t| t.id != id);
    if data.tasks.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_users(State(api): State<FakeApi>, headers: HeaderMap) -> HandlerResult<Vec<User>> {
    authorize(&api, &headers)?;
    Ok(Json(api.lock().unwrap().users.clone()))
}

async fn list_categories(
    State(api): State<FakeApi>,
    headers: HeaderMap,
) -> HandlerResult<Vec<Category>> {
    authorize(&api, &headers)?;
    Ok(Json(api.lock().unwrap().categories.clone()))
}

async fn create_category(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> HandlerResult<Category> {
    authorize(&api, &headers)?;
    let item = body["item"].as_str().unwrap_or_default().to_string();
    let mut data = api.lock().unwrap();
    data.last_category_body = Some(body);
    let category = Category {
        id: next_id(&mut data),
        item,
    };
    data.categories.push(category.clone());
    Ok(Json(category))
}
