use actix_web::{http::header, web, HttpResponse};

pub mod note;
pub mod pages;
pub mod session;

pub async fn index() -> impl actix_web::Responder {
    redirect("/login")
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Route table, shared by the binary and the integration tests. The rename
/// route is registered before `/notes/{id}` so it is not captured as an id.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/login", web::get().to(pages::login))
        .route("/login", web::post().to(session::login))
        .route("/register", web::post().to(session::register))
        .route("/logout", web::get().to(session::logout))
        .route("/notepad", web::get().to(pages::notepad))
        .service(
            web::scope("/api")
                .route("/user", web::get().to(session::current_user))
                .route("/notes", web::get().to(note::list))
                .route("/notes", web::post().to(note::new))
                .route("/notes/rename", web::post().to(note::rename))
                .route("/notes/{id}", web::put().to(note::update))
                .route("/notes/{id}", web::delete().to(note::del)),
        );
}
