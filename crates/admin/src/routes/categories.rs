//! Category route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use reeldeal_core::{Category, CategoryId};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    db::RepositoryError,
    error::AppError,
    middleware::{Flash, RequireAdminAuth, flash},
    state::AppState,
};

use super::{AdminUserView, render};

/// Category row for templates.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_at: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            created_at: category.created_at.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Categories page template.
#[derive(Template)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub categories: Vec<CategoryView>,
}

/// Add-category form.
#[derive(Debug, Deserialize)]
pub struct NewCategoryForm {
    pub name: String,
}

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(index).post(create))
        .route("/categories/{id}/delete", post(delete))
}

/// Category listing.
///
/// GET /categories
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let categories: Vec<Category> = state.store().list().await?;

    let template = CategoriesIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/categories".to_string(),
        flashes: flash::take(&session).await,
        categories: categories.iter().map(CategoryView::from).collect(),
    };

    Ok(render(&template))
}

/// Add a category.
///
/// POST /categories
#[tracing::instrument(skip_all)]
async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NewCategoryForm>,
) -> Result<Redirect, AppError> {
    match state.store().add_category(&form.name).await {
        Ok(category) => {
            tracing::info!(slug = %category.slug, "Category added");
            flash::success(&session, "Category added successfully").await;
        }
        Err(RepositoryError::Validation(msg) | RepositoryError::Conflict(msg)) => {
            flash::error(&session, msg).await;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/categories"))
}

/// Delete a category.
///
/// POST /categories/{id}/delete
#[tracing::instrument(skip_all, fields(category_id = %id))]
async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    match state.store().delete_category(&CategoryId::new(id)).await {
        Ok(()) => flash::success(&session, "Category deleted successfully").await,
        Err(RepositoryError::NotFound(_)) => {
            flash::error(&session, "Category not found").await;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/categories"))
}
