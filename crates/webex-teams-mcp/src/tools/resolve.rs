//! Space title → id resolution for tools that accept a space name.

use webex_teams::{resolve_room_title, TitleMatch, WebexApi};

use crate::types::{McpError, McpResult};

/// Return `space_id` as is, or resolve `space_title` to exactly one space.
///
/// Several candidates is an error that lists them all, so the caller can
/// retry with an explicit id.
pub async fn space_id(
    api: &dyn WebexApi,
    space_id: Option<String>,
    space_title: Option<String>,
) -> McpResult<String> {
    if let Some(id) = space_id.filter(|id| !id.trim().is_empty()) {
        return Ok(id);
    }
    let title = space_title.map(|t| t.trim().to_string());
    let Some(title) = title.filter(|t| !t.is_empty()) else {
        return Err(McpError::InvalidParams(
            "either `spaceId` or `spaceTitle` is required".to_string(),
        ));
    };

    let candidates = api.search_rooms(&title).await?;
    match resolve_room_title(candidates, &title) {
        TitleMatch::Unique(room) => {
            tracing::debug!("Resolved space \"{title}\" to {}", room.id);
            Ok(room.id)
        }
        TitleMatch::NotFound => Err(McpError::InvalidParams(format!(
            "no space with a title matching \"{title}\""
        ))),
        TitleMatch::Ambiguous(rooms) => {
            let listing: Vec<String> = rooms
                .iter()
                .map(|r| format!("- {} (id: {})", r.title, r.id))
                .collect();
            Err(McpError::InvalidParams(format!(
                "\"{title}\" matches {} spaces; pass `spaceId` instead:\n{}",
                rooms.len(),
                listing.join("\n")
            )))
        }
    }
}
