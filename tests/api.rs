use actix_session::SessionMiddleware;
use actix_web::{
    cookie::{Cookie, Key},
    http::{header, StatusCode},
    test, web, App,
};
use serde_json::{json, Value};

use notepad::{
    handlers,
    store::{notes::NoteStore, sessions::MemorySessionStore, users::UserStore},
};

/// Builds the same service tree the binary serves, minus the static files,
/// backed by memory-only stores.
macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(UserStore::in_memory()))
                .app_data(web::Data::new(NoteStore::in_memory()))
                .wrap(
                    SessionMiddleware::builder(MemorySessionStore::new(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .configure(handlers::routes),
        )
        .await
    };
}

/// Registers a user and returns the session cookie from the redirect response.
macro_rules! register {
    ($app:expr, $username:expr, $password:expr) => {{
        let resp = test::call_service(
            $app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([("username", $username), ("password", $password)])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        session_cookie(resp.response())
    }};
}

fn session_cookie<B>(resp: &actix_web::HttpResponse<B>) -> Cookie<'static> {
    resp.cookies()
        .find(|c| c.name() == "id")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn api_routes_require_a_session() {
    let app = test_app!();

    for uri in ["/api/notes", "/api/user"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "GET {}", uri);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/notes")
            .set_json(json!({ "title": "T", "content": "C" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn register_create_and_list() {
    let app = test_app!();
    let cookie = register!(&app, "alice", "pw1");

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/notes")
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Shopping", "content": "milk" }))
            .to_request(),
    )
    .await;
    let id = created["id"].as_str().expect("id in response").to_owned();

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/notes")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(
        listed,
        json!([{ "id": id, "owner": "alice", "title": "Shopping", "content": "milk" }])
    );

    let user: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/user")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(user, json!({ "username": "alice" }));
}

#[actix_web::test]
async fn login_rejects_bad_credentials_and_duplicate_registration() {
    let app = test_app!();
    register!(&app, "alice", "pw1");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "wrong")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form([("username", "alice"), ("password", "pw2")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The original password still works.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "pw1")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn rename_changes_the_title_only() {
    let app = test_app!();
    let cookie = register!(&app, "alice", "pw1");

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/notes")
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Shopping", "content": "milk" }))
            .to_request(),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_owned();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/notes/rename")
            .cookie(cookie.clone())
            .set_json(json!({ "id": id, "title": "Groceries" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/notes")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(listed[0]["title"], "Groceries");
    assert_eq!(listed[0]["content"], "milk");
}

#[actix_web::test]
async fn foreign_notes_are_unreachable() {
    let app = test_app!();
    let alice = register!(&app, "alice", "pw1");
    let bob = register!(&app, "bob", "pw2");

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/notes")
            .cookie(alice.clone())
            .set_json(json!({ "title": "Shopping", "content": "milk" }))
            .to_request(),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_owned();

    // Bob cannot update Alice's note, even knowing its id.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/notes/{}", id))
            .cookie(bob.clone())
            .set_json(json!({ "title": "stolen", "content": "gone" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Deleting it is a no-op for Bob.
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/notes/{}", id))
            .cookie(bob.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let bobs: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/notes")
            .cookie(bob)
            .to_request(),
    )
    .await;
    assert_eq!(bobs, json!([]));

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/notes")
            .cookie(alice)
            .to_request(),
    )
    .await;
    assert_eq!(listed[0]["title"], "Shopping");
    assert_eq!(listed[0]["content"], "milk");
}

#[actix_web::test]
async fn delete_removes_the_note_and_stays_idempotent() {
    let app = test_app!();
    let cookie = register!(&app, "alice", "pw1");

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/notes")
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Shopping", "content": "milk" }))
            .to_request(),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_owned();

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/notes/{}", id))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/notes")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn notepad_page_redirects_unauthenticated_browsers_to_login() {
    let app = test_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/notepad").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/login"
    );
}

#[actix_web::test]
async fn logout_invalidates_a_replayed_cookie() {
    let app = test_app!();
    let cookie = register!(&app, "alice", "pw1");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    // A copy of the pre-logout cookie must fail too: the session entry is
    // gone server-side, not just cleared from the browser.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/user")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/notes")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_clears_the_browser_session() {
    let app = test_app!();
    let cookie = register!(&app, "alice", "pw1");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    // Logout answers with a removal cookie; a browser carrying it is no
    // longer authenticated.
    let cleared = session_cookie(resp.response());
    assert!(cleared.value().is_empty());

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/user")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
