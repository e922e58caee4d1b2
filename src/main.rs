use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_session::SessionMiddleware;
use actix_web::{cookie::Key, middleware::Logger, web, App, HttpServer};

use notepad::{
    handlers,
    store::{notes::NoteStore, sessions::MemorySessionStore, users::UserStore},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let port = std::env::var("PORT").unwrap_or("3000".to_string());
    let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or(".".to_string()));

    // The cookie only carries a signed session key; session state itself is
    // held server-side and dies with the process.
    let session_key = match std::env::var("SECRET_KEY") {
        Ok(secret) => Key::derive_from(secret.as_bytes()),
        Err(_) => {
            log::warn!("SECRET_KEY not set, using a generated cookie signing key");
            Key::generate()
        }
    };
    let sessions = MemorySessionStore::new();

    let users = web::Data::new(
        UserStore::open(data_dir.join("users.json")).expect("failed to load users.json"),
    );
    let notes = web::Data::new(
        NoteStore::open(data_dir.join("notes.json")).expect("failed to load notes.json"),
    );

    HttpServer::new(move || {
        App::new()
            .app_data(users.clone())
            .app_data(notes.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(
                SessionMiddleware::builder(sessions.clone(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .configure(handlers::routes)
            .service(Files::new("/public", "./public"))
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}
