use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::shared::{AppError, AppState};
use crate::websockets::MemberView;

/// Response for a room membership query
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomMembersResponse {
    pub room: String,
    pub members: Vec<MemberView>,
}

/// HTTP handler for reading a room's current members
///
/// GET /rooms/:room_id/members
#[instrument(name = "room_members", skip(state))]
pub async fn room_members(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomMembersResponse>, AppError> {
    let Some(members) = state.hub.members(&room_id).await else {
        warn!(room_id = %room_id, "Room not found");
        return Err(AppError::NotFound(format!("Room {} not found", room_id)));
    };

    info!(
        room_id = %room_id,
        member_count = members.len(),
        "Room members listed"
    );

    Ok(Json(RoomMembersResponse {
        room: room_id,
        members,
    }))
}
