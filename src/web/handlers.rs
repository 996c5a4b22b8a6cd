//! HTTP handlers for the JSON API

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{DomainError, Tweet, User};
use crate::service::{FollowService, TweetService};
use crate::store::MemoryStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tweets: Arc<TweetService>,
    pub follows: Arc<FollowService>,
    pub store: Arc<MemoryStore>,
}

// Request/response bodies

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTweetRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    pub followee_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TweetResponse {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FollowersResponse {
    pub followers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FollowingResponse {
    pub following: Vec<String>,
}

impl From<&Tweet> for TweetResponse {
    fn from(tweet: &Tweet) -> Self {
        TweetResponse {
            id: tweet.id.clone(),
            user_id: tweet.user_id.clone(),
            content: tweet.content.clone(),
            created_at: format_timestamp(&tweet.created_at),
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id.clone(),
            username: user.username.clone(),
            created_at: format_timestamp(&user.created_at),
        }
    }
}

/// UTC ISO-8601 with seconds precision
fn format_timestamp(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Map a domain error to a status code and JSON body
fn error_response(err: &DomainError) -> Response {
    let status = match err {
        DomainError::InvalidUserId
        | DomainError::EmptyContent
        | DomainError::ContentTooLong
        | DomainError::CannotFollowSelf => StatusCode::BAD_REQUEST,
        DomainError::UserNotFound | DomainError::TweetNotFound | DomainError::NotFollowing => {
            StatusCode::NOT_FOUND
        }
        DomainError::AlreadyFollowing => StatusCode::CONFLICT,
    };
    (status, Json(ErrorResponse { error: err.to_string() })).into_response()
}

/// Extract the authenticated-by-convention user id from `X-User-ID`
fn require_user_header(headers: &HeaderMap) -> Result<String, Response> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "X-User-ID header is required".to_string(),
                }),
            )
                .into_response()
        })
}

// Handlers

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Response {
    let user = match User::new(req.id, req.username) {
        Ok(user) => user,
        Err(err) => return error_response(&err),
    };

    state.store.create_user(user.clone()).await;
    (StatusCode::CREATED, Json(UserResponse::from(&user))).into_response()
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get_user_by_id(&id).await {
        Ok(user) => Json(UserResponse::from(&user)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn create_tweet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateTweetRequest>,
) -> Response {
    let user_id = match require_user_header(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    match state.tweets.create_tweet(&user_id, &req.content).await {
        Ok(tweet) => (StatusCode::CREATED, Json(TweetResponse::from(&tweet))).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn get_tweet(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.tweets.get_tweet(&id).await {
        Ok(tweet) => Json(TweetResponse::from(&tweet)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn delete_tweet(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.tweets.delete_tweet(&id).await {
        Ok(()) => Json(MessageResponse {
            message: "tweet deleted".to_string(),
        })
        .into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn get_user_tweets(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.tweets.get_user_tweets(&id).await {
        Ok(tweets) => {
            let body: Vec<TweetResponse> = tweets.iter().map(TweetResponse::from).collect();
            Json(body).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub async fn get_timeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TimelineQuery>,
) -> Response {
    // Negative limits behave like "unset" and fall back to the maximum.
    let limit = query.limit.unwrap_or(0).max(0) as usize;

    match state.tweets.get_timeline(&id, limit).await {
        Ok(tweets) => {
            let body: Vec<TweetResponse> = tweets.iter().map(TweetResponse::from).collect();
            Json(body).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub async fn follow_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<FollowRequest>,
) -> Response {
    let follower_id = match require_user_header(&headers) {
        Ok(follower_id) => follower_id,
        Err(response) => return response,
    };

    match state.follows.follow_user(&follower_id, &req.followee_id).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "followed".to_string(),
            }),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(followee_id): Path<String>,
) -> Response {
    let follower_id = match require_user_header(&headers) {
        Ok(follower_id) => follower_id,
        Err(response) => return response,
    };

    match state.follows.unfollow_user(&follower_id, &followee_id).await {
        Ok(()) => Json(MessageResponse {
            message: "unfollowed".to_string(),
        })
        .into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn get_followers(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.follows.get_followers(&id).await {
        Ok(followers) => Json(FollowersResponse { followers }).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn get_following(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.follows.get_following(&id).await {
        Ok(following) => Json(FollowingResponse { following }).into_response(),
        Err(err) => error_response(&err),
    }
}
