use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use log::debug;
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Default service: serves the embedded frontend build.
pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    serve_from(&STATIC_DIR, req.path())
}

/// Looks `path` up in `dir`; unknown paths get `index.html` so the
/// single-page application can handle them.
fn serve_from(dir: &Dir<'_>, path: &str) -> HttpResponse {
    let path = path.trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match dir.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match dir.get_file("index.html") {
            Some(index) => {
                debug!("{} not embedded, serving index.html", file_path);
                HttpResponse::Ok()
                    .content_type("text/html; charset=utf-8")
                    .body(index.contents().to_vec())
            }
            None => HttpResponse::NotFound().body("Console frontend has not been built"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::{header, StatusCode};
    use include_dir::{DirEntry, File};

    static ENTRIES: [DirEntry<'static>; 2] = [
        DirEntry::File(File::new("index.html", b"<html>console</html>")),
        DirEntry::File(File::new("app.js", b"run()")),
    ];
    static SITE: Dir<'static> = Dir::new("", &ENTRIES);
    static EMPTY: Dir<'static> = Dir::new("", &[]);

    fn content_type(resp: &HttpResponse) -> String {
        resp.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[actix_web::test]
    async fn known_files_get_their_mime_type() {
        let resp = serve_from(&SITE, "/app.js");
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(content_type(&resp).contains("javascript"));
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], b"run()");
    }

    #[actix_web::test]
    async fn client_routes_fall_back_to_index() {
        let resp = serve_from(&SITE, "/projects/p1");
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(content_type(&resp).starts_with("text/html"));
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], b"<html>console</html>");
    }

    #[actix_web::test]
    async fn missing_build_is_a_404() {
        let resp = serve_from(&EMPTY, "/");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
