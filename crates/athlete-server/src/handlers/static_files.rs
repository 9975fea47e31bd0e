//! Static file serving with SPA fallback
//!
//! Any non-API path is looked up under the public directory. Paths that
//! would leave that directory are refused with 403; paths that simply do
//! not exist get `index.html` so the frontend router can take over.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::{Component, Path, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, warn};

const INDEX_FILE: &str = "index.html";

#[derive(Debug, PartialEq, Eq)]
enum Resolved {
    File(PathBuf),
    Fallback,
    Forbidden,
}

pub async fn serve(State(state): State<AppState>, req: Request) -> Response {
    let public_dir = state.public_dir.as_path();

    let resolved = resolve(public_dir, req.uri().path()).await;

    match resolved {
        Resolved::File(path) => {
            debug!("Serving static file {}", path.display());
            ServeFile::new(path).oneshot(req).await.into_response()
        }
        Resolved::Fallback => ServeFile::new(public_dir.join(INDEX_FILE))
            .oneshot(req)
            .await
            .into_response(),
        Resolved::Forbidden => {
            warn!("Rejected static path outside public dir: {}", req.uri().path());
            (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "forbidden",
                    "message": "Path is outside the public directory",
                })),
            )
                .into_response()
        }
    }
}

async fn resolve(public_dir: &Path, uri_path: &str) -> Resolved {
    // Escapes that are not UTF-8 cannot name any file we serve
    let Ok(decoded) = urlencoding::decode(uri_path) else {
        return Resolved::Fallback;
    };
    let Some(candidate) = join_relative(public_dir, &decoded) else {
        return Resolved::Forbidden;
    };

    match tokio::fs::metadata(&candidate).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Resolved::Fallback,
    }

    // Symlinks may still point elsewhere; compare the real locations
    let (Ok(root), Ok(real)) = (
        tokio::fs::canonicalize(public_dir).await,
        tokio::fs::canonicalize(&candidate).await,
    ) else {
        return Resolved::Fallback;
    };

    if real.starts_with(&root) {
        Resolved::File(real)
    } else {
        Resolved::Forbidden
    }
}

/// Append the segments of an already decoded URI path to `public_dir`.
/// Returns `None` when any segment climbs upward or is absolute.
fn join_relative(public_dir: &Path, decoded: &str) -> Option<PathBuf> {
    if decoded.contains('\\') || decoded.contains('\0') {
        return None;
    }

    let mut path = public_dir.to_path_buf();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => path.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(root: &Path, uri_path: &str) -> Option<PathBuf> {
        join_relative(root, &urlencoding::decode(uri_path).unwrap())
    }

    #[test]
    fn test_join_relative_rejects_traversal() {
        let root = Path::new("/srv/public");

        assert_eq!(
            join(root, "/css/site.css"),
            Some(PathBuf::from("/srv/public/css/site.css"))
        );
        assert_eq!(join(root, "/"), Some(PathBuf::from("/srv/public")));
        assert_eq!(join(root, "/../../etc/passwd"), None);
        assert_eq!(join(root, "/css/../../secret"), None);
        assert_eq!(join(root, "/%2e%2e/%2e%2e/etc/passwd"), None);
        assert_eq!(join(root, "/..%2f..%2fetc%2fpasswd"), None);
        assert_eq!(join(root, "/..%5c..%5cwindows"), None);
    }

    #[tokio::test]
    async fn test_resolve() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let public = temp_dir.path().join("public");
        std::fs::create_dir_all(public.join("js"))?;
        std::fs::write(public.join("js/app.js"), b"console.log(1)")?;
        std::fs::write(temp_dir.path().join("secret.txt"), b"nope")?;

        let real_public = std::fs::canonicalize(&public)?;
        assert_eq!(
            resolve(&public, "/js/app.js").await,
            Resolved::File(real_public.join("js/app.js"))
        );
        assert_eq!(resolve(&public, "/athletes/12").await, Resolved::Fallback);
        assert_eq!(resolve(&public, "/js").await, Resolved::Fallback);
        assert_eq!(resolve(&public, "/../secret.txt").await, Resolved::Forbidden);

        // Escapes that do not decode to UTF-8 name no file and get the SPA page
        assert_eq!(resolve(&public, "/%FF").await, Resolved::Fallback);
        assert_eq!(resolve(&public, "/caf%E9").await, Resolved::Fallback);

        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_resolve_rejects_symlink_escape() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let public = temp_dir.path().join("public");
        std::fs::create_dir_all(&public)?;
        std::fs::write(temp_dir.path().join("secret.txt"), b"nope")?;
        std::os::unix::fs::symlink(temp_dir.path().join("secret.txt"), public.join("leak.txt"))?;

        assert_eq!(resolve(&public, "/leak.txt").await, Resolved::Forbidden);
        Ok(())
    }
}
