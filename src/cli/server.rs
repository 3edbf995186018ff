//! HTTP server exposing artist listings

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::gateway::{Gateway, ListQuery, Listing};
use crate::types::ResourceKind;

/// Response wrapper
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub(crate) fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Public shape of a song
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SongSummary {
    music_id: String,
}

/// Public shape of an album
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlbumSummary {
    album_id: String,
    name: String,
}

/// `data` payload of a listing response
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum ListingBody {
    Songs {
        total: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        songs: Vec<SongSummary>,
    },
    Albums {
        total: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        albums: Vec<AlbumSummary>,
    },
}

impl ListingBody {
    /// Project a listing onto the public shape for its kind
    pub(crate) fn project(kind: ResourceKind, listing: Listing) -> Self {
        let Listing { total, page, items } = listing;
        match kind {
            ResourceKind::Songs => Self::Songs {
                total,
                page,
                songs: items
                    .into_iter()
                    .map(|item| SongSummary { music_id: item.id })
                    .collect(),
            },
            ResourceKind::Albums => Self::Albums {
                total,
                page,
                albums: items
                    .into_iter()
                    .map(|item| AlbumSummary {
                        album_id: item.id,
                        name: item.name,
                    })
                    .collect(),
            },
        }
    }
}

/// Build the application router
pub fn router(gateway: Arc<Gateway>) -> Router {
    // Allow all origins, the API is read-only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/artists/:id/songs", get(artist_songs))
        .route("/artists/:id/albums", get(artist_albums))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(gateway)
}

/// Start the HTTP server and run until Ctrl-C
pub async fn serve(gateway: Gateway, addr: SocketAddr) -> Result<()> {
    let app = router(Arc::new(gateway));

    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn artist_songs(
    State(gateway): State<Arc<Gateway>>,
    Path(id): Path<String>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    list(&gateway, ResourceKind::Songs, &id, query).await
}

async fn artist_albums(
    State(gateway): State<Arc<Gateway>>,
    Path(id): Path<String>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    list(&gateway, ResourceKind::Albums, &id, query).await
}

async fn list(
    gateway: &Gateway,
    kind: ResourceKind,
    id: &str,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(rejection.body_text())),
            )
                .into_response();
        }
    };

    match gateway.list(kind, id, query).await {
        Ok(listing) => {
            Json(ApiResponse::success(ListingBody::project(kind, listing))).into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::warn!("Listing {kind} for {id} failed: {e}");
            }
            (status, Json(ApiResponse::<()>::error(e.to_string()))).into_response()
        }
    }
}

/// Map an error onto the HTTP status returned to clients
pub(crate) fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        Error::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        Error::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        Error::UpstreamShapeMismatch { .. } | Error::PageLimitExceeded { .. } => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&Error::not_found(ResourceKind::Songs, "x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&Error::invalid_request("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&Error::unavailable("timed out")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&Error::shape_mismatch("bad body")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&Error::config("oops")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_project_songs() {
        let listing = Listing {
            total: 2,
            page: None,
            items: vec![Item::new("s1", "One"), Item::new("s2", "Two")],
        };

        let body = serde_json::to_value(ApiResponse::success(ListingBody::project(
            ResourceKind::Songs,
            listing,
        )))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "success": true,
                "data": {
                    "total": 2,
                    "songs": [{"musicId": "s1"}, {"musicId": "s2"}]
                }
            })
        );
    }

    #[test]
    fn test_project_albums_single_page() {
        let listing = Listing {
            total: 40,
            page: Some(2),
            items: vec![Item::new("al-9", "Rockstar")],
        };

        let body = serde_json::to_value(ListingBody::project(ResourceKind::Albums, listing))
            .unwrap();

        assert_eq!(
            body,
            json!({
                "total": 40,
                "page": 2,
                "albums": [{"albumId": "al-9", "name": "Rockstar"}]
            })
        );
    }

    #[test]
    fn test_error_envelope() {
        let body = serde_json::to_value(ApiResponse::<()>::error("artist songs not found"))
            .unwrap();
        assert_eq!(
            body,
            json!({"success": false, "error": "artist songs not found"})
        );
    }
}
