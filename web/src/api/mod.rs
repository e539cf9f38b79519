use std::sync::Arc;

use advocacy_site_client::{BlogPost, Publication};
use advocacy_site_core::dictionary::alphabet;
use advocacy_site_core::{ContentDocument, DictionaryEntry, Language, LocaleTag, MatchMode, SearchState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::{Result, WebError};
use crate::pages;
use crate::state::AppState;

/// Common response type that can be either data or an error
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success(T),
    Error { error: String },
}

/// Create the service router with the specified state
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(status))
        .route("/api/v1/content/:locale/:slug", get(get_content))
        .route("/api/v1/blog/:locale/:slug", get(get_blog_post))
        .route("/api/v1/dictionary", get(search_dictionary))
        .route("/api/v1/dictionary/alphabet/:lang", get(get_alphabet))
        .route("/api/v1/publications", get(list_publications))
        .route("/:locale/:slug", get(pages::content_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "advocacy-site",
        "locales": {
            "default": state.default_locale,
            "supported": state.supported_locales
        },
        "features": {
            "cms": state.cms_enabled,
            "blog": state.blog.is_some(),
            "publications": state.storage.is_some(),
            "dictionary_entries": state.dictionary.len()
        }
    }))
}

/// Resolve a content document for a locale
async fn get_content(
    State(state): State<Arc<AppState>>,
    Path((locale, slug)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ContentDocument>>> {
    let locale = LocaleTag::new(locale)?;
    let document = state.resolver.resolve(&locale, &slug).await?;
    Ok(Json(ApiResponse::Success(document)))
}

/// Fetch a legacy blog post for a locale
async fn get_blog_post(
    State(state): State<Arc<AppState>>,
    Path((locale, slug)): Path<(String, String)>,
) -> Result<Json<ApiResponse<BlogPost>>> {
    let blog = state
        .blog
        .as_ref()
        .ok_or_else(|| WebError::Unavailable("blog is not configured".to_string()))?;
    let locale = LocaleTag::new(locale)?;
    let post = blog.fetch_localized_post(&locale, &slug).await?;
    Ok(Json(ApiResponse::Success(post)))
}

/// Query parameters of the dictionary search
#[derive(Debug, Default, Deserialize)]
struct DictionaryParams {
    q: Option<String>,
    mode: Option<String>,
    letter: Option<String>,
    lang: Option<String>,
}

impl DictionaryParams {
    fn into_state(self) -> Result<SearchState> {
        let language = match self.lang.as_deref() {
            Some(lang) => lang.parse::<Language>()?,
            None => Language::default(),
        };
        let mut state = SearchState::new(language);
        if let Some(mode) = self.mode.as_deref() {
            state.set_match_mode(mode.parse::<MatchMode>()?);
        }
        if let Some(query) = self.q {
            state.set_query(query);
        }
        if let Some(letter) = self.letter.as_deref() {
            state.toggle_letter(letter);
        }
        Ok(state)
    }
}

/// Response for the dictionary search
#[derive(Debug, Serialize)]
struct DictionaryResponse<'a> {
    query: &'a str,
    mode: MatchMode,
    letter: Option<&'a str>,
    language: Language,
    count: usize,
    total: usize,
    entries: Vec<&'a DictionaryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

async fn search_dictionary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DictionaryParams>,
) -> Result<impl IntoResponse> {
    let search = params.into_state()?;
    let outcome = state.dictionary.search(&search);

    let data = DictionaryResponse {
        query: &search.query,
        mode: search.match_mode,
        letter: search.active_letter.as_deref(),
        language: search.language,
        count: outcome.entries.len(),
        total: outcome.total,
        entries: outcome.entries,
        message: outcome.message,
    };

    Ok((StatusCode::OK, Json(ApiResponse::Success(data))).into_response())
}

/// Response for the alphabet endpoint
#[derive(Debug, Serialize)]
struct AlphabetResponse {
    language: Language,
    letters: &'static [&'static str],
}

async fn get_alphabet(Path(lang): Path<String>) -> Result<Json<ApiResponse<AlphabetResponse>>> {
    let language: Language = lang.parse()?;
    Ok(Json(ApiResponse::Success(AlphabetResponse {
        language,
        letters: alphabet(language),
    })))
}

async fn list_publications(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse<Vec<Publication>>>> {
    let storage = state
        .storage
        .as_ref()
        .ok_or_else(|| WebError::Unavailable("file storage is not configured".to_string()))?;
    let publications = storage.publications().await?;
    Ok(Json(ApiResponse::Success(publications)))
}
