//! Blog HTTP server
//!
//! Serves the listing and post pages from the revalidation cache,
//! re-rendering them from the content store when their staleness window
//! has passed. Also exposes the JSON pagination endpoint used by the
//! listing page's load-more script.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::cache::PageCache;
use crate::cms::CmsClient;
use crate::comments::CommentWidget;
use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::pipeline;
use crate::templates::TemplateRenderer;
use crate::App;

/// Preview-session cookie set by the content store's preview flow
const PREVIEW_COOKIE: &str = "io.prismic.preview";

/// Server state
struct ServerState {
    config: SiteConfig,
    client: CmsClient,
    cache: PageCache,
    templates: TemplateRenderer,
}

/// Start the blog server
pub async fn start(app: &App, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        config: app.config.clone(),
        client: app.client.clone(),
        cache: PageCache::new(),
        templates: TemplateRenderer::new()?,
    });

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/post/:slug", get(post_handler))
        .route("/api/posts", get(api_posts_handler))
        .route("/preview/exit", get(preview_exit_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Listing page, revalidated on a short window
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    if let Some(html) = state.cache.get_fresh("/").await {
        return Html(html).into_response();
    }

    let feed = match pipeline::listing::build(&state.client, &state.config).await {
        Ok(feed) => feed,
        Err(e) => return render_failure("listing", e),
    };
    let html = match state
        .templates
        .render_index(&state.config, feed.posts(), feed.next_page())
    {
        Ok(html) => html,
        Err(e) => return render_failure("listing", e),
    };

    let ttl = Duration::from_secs(state.config.revalidate.index_secs);
    state.cache.insert("/", html.clone(), ttl).await;
    Html(html).into_response()
}

/// Post detail page; unknown slugs become a 404
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    // A preview session pins the store revision and is rendered per
    // request; previewed HTML never enters the shared cache.
    let preview_ref = preview_ref(&headers);

    let path = format!("/post/{}", slug);
    if preview_ref.is_none() {
        if let Some(html) = state.cache.get_fresh(&path).await {
            return Html(html).into_response();
        }
    }

    let view = match pipeline::detail::build(
        &state.client,
        &state.config,
        &slug,
        preview_ref.as_deref(),
    )
    .await
    {
        Ok(Some(view)) => view,
        Ok(None) => return not_found(),
        Err(e) => return render_failure(&path, e),
    };

    let mut widget = CommentWidget::new(&state.config.comments);
    let comments_script = widget.mount().unwrap_or_default();

    let html = match state
        .templates
        .render_post(&state.config, &view, &comments_script)
    {
        Ok(html) => html,
        Err(e) => return render_failure(&path, e),
    };

    if preview_ref.is_none() {
        let ttl = Duration::from_secs(state.config.revalidate.post_secs);
        state.cache.insert(&path, html.clone(), ttl).await;
    }
    Html(html).into_response()
}

/// Preview revision pinned by the store's preview cookie, if any
fn preview_ref(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == PREVIEW_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

#[derive(Debug, Deserialize)]
struct PostsQuery {
    /// Cursor URL returned by an earlier page
    page: String,
}

/// JSON pagination endpoint backing the load-more script
async fn api_posts_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PostsQuery>,
) -> Response {
    // The cursor comes from the client; only follow it back into the
    // configured store, never to an arbitrary host.
    if !query.page.starts_with(&state.config.cms.api_url) {
        tracing::warn!("rejected pagination cursor outside the content store");
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "invalid pagination cursor"})),
        )
            .into_response();
    }

    let response = match state.client.fetch_page(&query.page).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("pagination fetch failed: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": "content store unreachable"})),
            )
                .into_response();
        }
    };

    let fmt = state.config.date_format();
    let results = match response
        .results
        .iter()
        .map(|doc| PostSummary::from_document(doc, &fmt))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(results) => results,
        Err(e) => {
            tracing::warn!("pagination projection failed: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": "malformed content store response"})),
            )
                .into_response();
        }
    };

    Json(serde_json::json!({
        "results": results,
        "next_page": response.next_page,
    }))
    .into_response()
}

/// Clear the preview session and go back to the listing
async fn preview_exit_handler() -> Response {
    let clear = format!("{}=; Max-Age=0; Path=/", PREVIEW_COOKIE);
    (
        [(header::SET_COOKIE, clear)],
        Redirect::to("/"),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html("<h1>404</h1><p>Post não encontrado.</p><a href=\"/\">Voltar para a home</a>".to_string()),
    )
        .into_response()
}

fn render_failure(path: &str, e: anyhow::Error) -> Response {
    tracing::error!("failed to render {}: {:#}", path, e);
    (
        StatusCode::BAD_GATEWAY,
        Html("<h1>Erro</h1><p>Não foi possível carregar o conteúdo.</p>".to_string()),
    )
        .into_response()
}
