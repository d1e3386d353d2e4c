use std::error::Error;
use std::sync::Arc;

mod config;
mod data;
mod error;
mod summary;
mod todos;


use config::AiConfig;
use data::DBConnection;
use summary::client::{OpenAiGenerator, TextGenerator};

#[macro_use]
extern crate rocket;

use rocket::serde::json::{json, Value};
use rocket::{catch, get, Build, Rocket};

#[get("/")]
fn index() -> Value {
    json!({ "Hello": "World" })
}

#[catch(404)]
fn not_found() -> Value {
    json!({ "detail": "Resource not found" })
}

#[catch(422)]
fn unprocessable_entity() -> Value {
    json!({ "detail": "Request body failed validation" })
}

#[catch(500)]
fn internal_server_error() -> Value {
    json!({ "detail": "Internal server error" })
}

fn build_rocket(connection: DBConnection, generator: Arc<dyn TextGenerator>) -> Rocket<Build> {
    rocket::build()
        .manage(connection)
        .manage(generator)
        .mount("/", routes![index])
        .mount(
            "/todos",
            routes![
                todos::endpoints::create_todo,
                todos::endpoints::get_todos,
                todos::endpoints::get_todo,
                todos::endpoints::update_todo,
                todos::endpoints::delete_todo,
                summary::endpoints::get_summary,
            ],
        )
        .register(
            "/",
            catchers![not_found, unprocessable_entity, internal_server_error],
        )
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let ai_config = AiConfig::from_env();
    let connection = data::open_database("rtasks.db")?;
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiGenerator::new(&ai_config));

    build_rocket(connection, generator).launch().await?;

    Ok(())
}
