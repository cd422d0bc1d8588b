//! HTTP routes of the development server

use std::fs;
use std::net::SocketAddr;

use noteme::Blog;

async fn serve_site(posts_json: Option<&str>) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("posts")).unwrap();
    if let Some(json) = posts_json {
        fs::write(dir.path().join("posts/posts.json"), json).unwrap();
    }
    fs::write(
        dir.path().join("posts/ssh-hardening.md"),
        "---\ntitle: SSH Hardening\ncategory: linux\n---\nUse keys.\n",
    )
    .unwrap();

    let blog = Blog::new(dir.path()).unwrap();
    let app = noteme::server::router(blog).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (dir, format!("http://{}", addr))
}

const POSTS: &str = r#"{"posts": [
    {"id": "ssh-hardening", "title": "SSH Hardening", "excerpt": "Keys only.", "category": "linux", "date": "2025-01-12", "readTime": "4 min read"},
    {"id": "nginx-tuning", "title": "Tuning Nginx", "excerpt": "Workers.", "category": "linux", "date": "2025-01-10"},
    {"id": "gh-actions", "title": "GitHub Actions", "excerpt": "CI.", "category": "devops", "date": "2025-01-08"},
    {"id": "iam-basics", "title": "IAM Basics", "excerpt": "Policies.", "category": "aws", "date": "2025-01-06"}
]}"#;

#[tokio::test]
async fn home_shows_latest_three() {
    let (_dir, base) = serve_site(Some(POSTS)).await;

    let body = reqwest::get(format!("{base}/")).await.unwrap().text().await.unwrap();
    assert_eq!(body.matches(r#"class="blog-card""#).count(), 3);
    assert!(body.contains("SSH Hardening"));
    assert!(!body.contains("IAM Basics"));
}

#[tokio::test]
async fn home_uses_default_posts_when_metadata_missing() {
    let (_dir, base) = serve_site(None).await;

    let body = reqwest::get(format!("{base}/index.html"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Getting Started with AWS EC2: A Complete Guide"));
}

#[tokio::test]
async fn listing_filters_by_category() {
    let (_dir, base) = serve_site(Some(POSTS)).await;

    let response = reqwest::get(format!("{base}/blog.html?category=linux"))
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Showing 1-2 of 2 posts"));
    assert!(body.contains("animation-delay: 0.1s"));
    assert!(body.contains(r#"<span class="read-time">4 min read</span>"#));
}

#[tokio::test]
async fn listing_without_metadata_shows_no_results() {
    let (_dir, base) = serve_site(None).await;

    let body = reqwest::get(format!("{base}/blog.html"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#"id="no-results""#));
    assert!(!body.contains(r#"id="pagination""#));
}

#[tokio::test]
async fn api_returns_render_instruction() {
    let (_dir, base) = serve_site(Some(POSTS)).await;

    let json: serde_json::Value = reqwest::get(format!("{base}/api/posts?q=NGINX&page=4"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["totalFiltered"], 1);
    assert_eq!(json["currentPage"], 1);
    assert_eq!(json["query"], "nginx");
    assert_eq!(json["posts"][0]["id"], "nginx-tuning");
    assert_eq!(json["pagination"]["visible"], false);
    assert_eq!(json["showClearSearch"], true);
}

#[tokio::test]
async fn post_page_and_not_found() {
    let (_dir, base) = serve_site(Some(POSTS)).await;

    let response = reqwest::get(format!("{base}/post.html?id=ssh-hardening"))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("<title>SSH Hardening | NoteMe</title>"));
    assert!(body.contains("Tuning Nginx"));

    let response = reqwest::get(format!("{base}/post.html")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body = response.text().await.unwrap();
    assert!(body.contains("Post not found."));
    assert!(body.contains(r#"<a href="blog.html">Return to blog listing</a>"#));
}

#[tokio::test]
async fn other_paths_are_static_files() {
    let (_dir, base) = serve_site(Some(POSTS)).await;

    let response = reqwest::get(format!("{base}/posts/posts.json")).await.unwrap();
    assert!(response.status().is_success());
    assert!(response.text().await.unwrap().contains("gh-actions"));
}
