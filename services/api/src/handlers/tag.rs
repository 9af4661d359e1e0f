use axum::{Json, extract::State};
use serde::Serialize;

use foodgram_core::extract::PathParam;

use crate::domain::types::Tag;
use crate::error::FoodgramError;
use crate::state::AppState;
use crate::usecase::tag::{GetTagUseCase, ListTagsUseCase};

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub color: Option<String>,
    pub slug: Option<String>,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

// ── GET /api/tags/ ───────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, FoodgramError> {
    let uc = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = uc.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /api/tags/{id}/ ──────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<TagResponse>, FoodgramError> {
    let uc = GetTagUseCase {
        repo: state.tag_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}
