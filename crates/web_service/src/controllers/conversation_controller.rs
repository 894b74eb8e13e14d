use crate::error::Result;
use crate::identity::AuthenticatedUser;
use crate::server::AppState;
use actix_web::{
    web::{self, Data, Json, Path},
    HttpResponse,
};
use chat_core::Turn;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Request: create a conversation from its first user message
#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    pub text: String,
}

/// Request: append an exchange (optional user question + model answer)
#[derive(Debug, Deserialize)]
pub struct AppendTurnsRequest {
    pub question: Option<String>,
    pub answer: String,
    /// Opaque attachment reference for the question turn.
    pub img: Option<String>,
}

/// Request: edit a past turn in place on the origin timeline
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTurnRequest {
    pub message_index: usize,
    pub new_text: String,
}

/// Response: success message
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/chats", web::post().to(create_conversation))
        .route("/userchats", web::get().to(list_conversations))
        .route("/chats/{id}", web::get().to(get_conversation))
        .route("/chats/{id}", web::put().to(append_turns))
        .route("/chats/{id}/edit", web::put().to(edit_turn));
}

/// POST /api/chats
pub async fn create_conversation(
    user: AuthenticatedUser,
    app_state: Data<AppState>,
    req: Json<CreateConversationRequest>,
) -> Result<HttpResponse> {
    let conversation = app_state.conversations.create(user.id(), &req.text).await?;
    info!("Created conversation {}", conversation.id);
    Ok(HttpResponse::Created().json(json!({ "conversationId": conversation.id })))
}

/// GET /api/userchats
pub async fn list_conversations(
    user: AuthenticatedUser,
    app_state: Data<AppState>,
) -> Result<HttpResponse> {
    let summaries = app_state.conversations.list(user.id()).await?;
    Ok(HttpResponse::Ok().json(summaries))
}

/// GET /api/chats/{id}
pub async fn get_conversation(
    user: AuthenticatedUser,
    app_state: Data<AppState>,
    path: Path<Uuid>,
) -> Result<HttpResponse> {
    let conversation = app_state
        .conversations
        .get(path.into_inner(), user.id())
        .await?;
    Ok(HttpResponse::Ok().json(conversation))
}

/// PUT /api/chats/{id}
///
/// Appends the next exchange: an optional user question (with optional
/// attachment reference) followed by the model answer.
pub async fn append_turns(
    user: AuthenticatedUser,
    app_state: Data<AppState>,
    path: Path<Uuid>,
    req: Json<AppendTurnsRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();

    let mut turns = Vec::new();
    if let Some(question) = req.question {
        turns.push(match req.img {
            Some(img) => Turn::user_with_attachment(question, img),
            None => Turn::user(question),
        });
    }
    turns.push(Turn::model(req.answer));

    app_state
        .conversations
        .append_turns(path.into_inner(), user.id(), turns)
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse {
        message: "Conversation updated".to_string(),
    }))
}

/// PUT /api/chats/{id}/edit
pub async fn edit_turn(
    user: AuthenticatedUser,
    app_state: Data<AppState>,
    path: Path<Uuid>,
    req: Json<EditTurnRequest>,
) -> Result<HttpResponse> {
    app_state
        .conversations
        .edit_turn_text(path.into_inner(), user.id(), req.message_index, &req.new_text)
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse {
        message: "Turn edited".to_string(),
    }))
}
