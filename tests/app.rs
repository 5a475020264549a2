use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use chanarchive::{archive::Archive, config::Config};
use scraper::{Html, Selector};
use tower::ServiceExt;

const ARCHIVE: &str = r#"{
    "metadata": {
        "siteName": "KitobLab",
        "tagline": "Kitoblar haqida",
        "bio": "Archive of the channel.",
        "links": {
            "website": "https://kitoblab.uz",
            "telegram": "https://t.me/kitoblab",
            "instagram": "https://instagram.com/kitoblab",
            "youtube": "https://youtube.com/@kitoblab",
            "linkedin": "https://linkedin.com/company/kitoblab"
        }
    },
    "messages": [
        {"id": "service1", "type": "service", "text": "January 5, 2024", "date": null},
        {"id": "message1", "type": "message", "text": "<b>Hello</b>", "author": "kitoblab.uz", "time": "10:00",
         "media": {"type": "photo", "src": "photos/a.jpg"}},
        {"id": "message2", "type": "message", "text": "", "author": "kitoblab.uz", "time": "10:01", "isJoined": true,
         "media": {"type": "file", "src": "files/talk.mp3", "title": "Talk"}}
    ]
}"#;

fn app(assets: &Path) -> Router {
    let config = Config {
        assets_dir: assets.to_path_buf(),
        ..Config::default()
    };
    chanarchive::app(Archive::from_json(ARCHIVE).unwrap(), &config)
}

fn assets() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("photos")).unwrap();
    std::fs::write(dir.path().join("photos/a.jpg"), b"jpeg").unwrap();
    std::fs::write(dir.path().join("profile_pic.jpg"), b"jpeg").unwrap();
    dir
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_theme(form: &'static str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri("/theme")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(form)).unwrap()
}

async fn body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn theme_of(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.select(&Selector::parse("html").unwrap())
        .next()
        .and_then(|el| el.value().attr("data-theme"))
        .unwrap()
        .to_owned()
}

fn theme_cookie(response: &Response) -> String {
    response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_owned()
}

#[tokio::test]
async fn renders_archive_page() {
    let assets = assets();
    let response = app(assets.path()).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body(response).await;
    assert_eq!(theme_of(&html), "light");

    let doc = Html::parse_document(&html);
    let ids: Vec<_> = doc
        .select(&Selector::parse(".chat-container > div").unwrap())
        .filter_map(|el| el.value().attr("id"))
        .collect();
    assert_eq!(ids, ["message2", "message1", "service1"]);

    // the channel itself never gets an author header
    assert_eq!(doc.select(&Selector::parse(".message-author").unwrap()).count(), 0);
    assert_eq!(doc.select(&Selector::parse(".message-row.joined audio").unwrap()).count(), 1);
    assert_eq!(doc.select(&Selector::parse(".message-text b").unwrap()).count(), 1);
    assert_eq!(doc.select(&Selector::parse(".social-link-btn").unwrap()).count(), 4);
}

#[tokio::test]
async fn theme_toggle_persists_for_visitor() {
    let assets = assets();
    let app = app(assets.path());

    let response = app
        .clone()
        .oneshot(post_theme("current=light&sidebar=closed", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    let cookie = theme_cookie(&response);
    assert_eq!(cookie, "theme=dark");

    let html = body(app.clone().oneshot(get_with_cookie("/", &cookie)).await.unwrap()).await;
    assert_eq!(theme_of(&html), "dark");

    // a fresh visitor still starts light
    let html = body(app.clone().oneshot(get("/")).await.unwrap()).await;
    assert_eq!(theme_of(&html), "light");

    let response = app
        .clone()
        .oneshot(post_theme("current=dark&sidebar=open", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.headers()[header::LOCATION], "/?sidebar=open");
    let cookie = theme_cookie(&response);
    assert_eq!(cookie, "theme=light");

    let html = body(
        app.oneshot(get_with_cookie("/?sidebar=open", &cookie))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(theme_of(&html), "light");
    let doc = Html::parse_document(&html);
    assert_eq!(doc.select(&Selector::parse("aside.sidebar.open").unwrap()).count(), 1);
}

#[tokio::test]
async fn saved_theme_survives_restart() {
    let assets = assets();

    let response = app(assets.path())
        .oneshot(post_theme("current=light", None))
        .await
        .unwrap();
    let cookie = theme_cookie(&response);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age="));

    // nothing is kept server side; a new router reads the visitor's cookie
    let html = body(
        app(assets.path())
            .oneshot(get_with_cookie("/", &cookie))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(theme_of(&html), "dark");
}

#[tokio::test]
async fn pinned_theme_carries_through_links() {
    let assets = assets();
    let html = body(
        app(assets.path())
            .oneshot(get("/?sidebar=open&theme=dark"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(theme_of(&html), "dark");

    let doc = Html::parse_document(&html);
    for css in ["a.menu-toggle", ".sidebar-overlay", "a.close-sidebar"] {
        let link = doc.select(&Selector::parse(css).unwrap()).next().unwrap();
        assert_eq!(link.value().attr("href"), Some("/?theme=dark"), "{css}");
    }
}

#[tokio::test]
async fn theme_query_overrides_saved_value() {
    let assets = assets();
    let html = body(app(assets.path()).oneshot(get("/?theme=dark")).await.unwrap()).await;
    assert_eq!(theme_of(&html), "dark");
}

#[tokio::test]
async fn rejects_unknown_sidebar_state() {
    let assets = assets();
    let response = app(assets.path()).oneshot(get("/?sidebar=sideways")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn serves_stylesheet_and_assets() {
    let assets = assets();
    let app = app(assets.path());

    let response = app.clone().oneshot(get("/style.css")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );

    let response = app.clone().oneshot(get("/photos/a.jpg")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await, "jpeg");

    let response = app.clone().oneshot(get("/profile_pic.jpg")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/photos/missing.jpg")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
