use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const USERS_PATH: &str = "/api/users";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "adminpass";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Deserialize)]
pub struct UserUpdate {
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    users: BTreeMap<u64, User>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    accounts: Arc<Vec<(String, String)>>,
}

pub fn app() -> Router {
    app_with_accounts(vec![(ADMIN_USERNAME.to_string(), ADMIN_PASSWORD.to_string())])
}

/// Router accepting HTTP Basic credentials for any of `accounts`.
pub fn app_with_accounts(accounts: Vec<(String, String)>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        accounts: Arc::new(accounts),
    };
    Router::new()
        .route(
            USERS_PATH,
            get(list_users).post(create_user).put(update_user),
        )
        .route("/api/users/{id}", get(get_user).delete(delete_user))
        .layer(middleware::from_fn_with_state(state.clone(), require_basic_auth))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(decode_basic)
        .is_some_and(|(username, password)| {
            state
                .accounts
                .iter()
                .any(|(u, p)| *u == username && *p == password)
        });
    if !authorized {
        tracing::debug!(uri = %request.uri(), "rejected unauthenticated request");
        return (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"users\"")],
        )
            .into_response();
    }
    next.run(request).await
}

fn decode_basic(value: &str) -> Option<(String, String)> {
    let token = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(BASE64_STANDARD.decode(token.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ListQuery {
    filters: Vec<(String, String)>,
    page: Option<(usize, usize)>,
    sort_by: Option<String>,
    descending: bool,
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}

fn parse_count(key: &str, value: &str) -> Result<usize, Response> {
    value
        .parse()
        .map_err(|_| bad_request(format!("bad {key}: {value}")))
}

fn parse_list_query(params: Vec<(String, String)>) -> Result<ListQuery, Response> {
    let mut query = ListQuery::default();
    let (mut page, mut size) = (None, None);
    let mut sort_order = None;

    for (key, value) in params {
        match key.as_str() {
            "page" => page = Some(parse_count("page", &value)?),
            "size" => size = Some(parse_count("size", &value)?),
            "sortBy" => {
                if !matches!(value.as_str(), "id" | "name" | "email") {
                    return Err(bad_request(format!("cannot sort by {value}")));
                }
                query.sort_by = Some(value);
            }
            "sortOrder" => sort_order = Some(value),
            "name" | "email" => query.filters.push((key, value)),
            _ => return Err(bad_request(format!("unknown filter: {key}"))),
        }
    }

    query.page = match (page, size) {
        (None, None) => None,
        (Some(_), Some(0)) => return Err(bad_request("size must be positive".to_string())),
        (Some(page), Some(size)) => Some((page, size)),
        _ => return Err(bad_request("page and size go together".to_string())),
    };

    query.descending = match sort_order.as_deref() {
        None | Some("asc") => false,
        Some("desc") => true,
        Some(other) => return Err(bad_request(format!("bad sort order: {other}"))),
    };
    if query.sort_by.is_none() && sort_order.is_some() {
        return Err(bad_request("sortOrder requires sortBy".to_string()));
    }

    Ok(query)
}

fn matches_filters(user: &User, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(field, value)| match field.as_str() {
        "name" => user.name == *value,
        "email" => user.email == *value,
        _ => false,
    })
}

async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    // A lone `name` parameter is the by-name lookup and answers with one user.
    if let [(key, name)] = params.as_slice() {
        if key == "name" {
            let store = state.db.read().await;
            return match store.users.values().find(|u| u.name == *name) {
                Some(user) => Json(user.clone()).into_response(),
                None => StatusCode::NOT_FOUND.into_response(),
            };
        }
    }

    let query = match parse_list_query(params) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let store = state.db.read().await;
    let mut users: Vec<User> = store
        .users
        .values()
        .filter(|u| matches_filters(u, &query.filters))
        .cloned()
        .collect();

    match query.sort_by.as_deref() {
        Some("name") => users.sort_by(|a, b| a.name.cmp(&b.name)),
        Some("email") => users.sort_by(|a, b| a.email.cmp(&b.email)),
        _ => users.sort_by_key(|u| u.id),
    }
    if query.descending {
        users.reverse();
    }

    if let Some((page, size)) = query.page {
        users = users.into_iter().skip(page.saturating_mul(size)).take(size).collect();
    }

    Json(users).into_response()
}

async fn create_user(State(state): State<AppState>, Json(input): Json<NewUser>) -> Response {
    if input.name.trim().is_empty() {
        return bad_request("name is required".to_string());
    }
    let mut store = state.db.write().await;
    if store.users.values().any(|u| u.name == input.name) {
        return (StatusCode::CONFLICT, format!("name taken: {}", input.name)).into_response();
    }
    store.next_id += 1;
    let user = User {
        id: store.next_id,
        name: input.name,
        email: input.email,
        roles: input.roles,
    };
    let location = format!("{USERS_PATH}/{}", user.id);
    tracing::debug!(id = user.id, "user created");
    store.users.insert(user.id, user);
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}

async fn update_user(State(state): State<AppState>, Json(input): Json<UserUpdate>) -> Response {
    let Some(id) = input.id else {
        return bad_request("id is required".to_string());
    };
    if input.name.trim().is_empty() {
        return bad_request("name is required".to_string());
    }
    let mut store = state.db.write().await;
    let Some(user) = store.users.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    user.name = input.name;
    user.email = input.email;
    user.roles = input.roles;
    Json(user.clone()).into_response()
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, StatusCode> {
    let store = state.db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    let mut store = state.db.write().await;
    match store.users.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
