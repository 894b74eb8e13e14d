use crate::error::Result;
use crate::identity::AuthenticatedUser;
use crate::server::AppState;
use actix_web::{
    web::{self, Data, Json, Path},
    HttpResponse,
};
use log::info;
use serde::Deserialize;
use uuid::Uuid;

/// Request: fork the conversation by editing a past turn
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    pub message_index: usize,
    pub new_text: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/chats/{id}/branch", web::post().to(create_branch))
        .route("/chats/{id}/branches", web::get().to(list_branches));
}

/// POST /api/chats/{id}/branch
pub async fn create_branch(
    user: AuthenticatedUser,
    app_state: Data<AppState>,
    path: Path<Uuid>,
    req: Json<CreateBranchRequest>,
) -> Result<HttpResponse> {
    let branch = app_state
        .branches
        .create(path.into_inner(), user.id(), req.message_index, &req.new_text)
        .await?;
    info!(
        "Created branch {} from conversation {}",
        branch.id, branch.origin_conversation_id
    );
    Ok(HttpResponse::Created().json(branch))
}

/// GET /api/chats/{id}/branches
///
/// The branch listing itself applies no ownership filter, so the handler
/// proves ownership first by loading the origin conversation as the caller.
pub async fn list_branches(
    user: AuthenticatedUser,
    app_state: Data<AppState>,
    path: Path<Uuid>,
) -> Result<HttpResponse> {
    let origin_id = path.into_inner();
    app_state.conversations.get(origin_id, user.id()).await?;

    let branches = app_state.branches.list_by_origin(origin_id).await?;
    Ok(HttpResponse::Ok().json(branches))
}
