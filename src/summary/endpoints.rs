use rocket::serde::json::Json;
use rocket::{get, State};

use std::sync::Arc;

use crate::data::DBConnection;
use crate::error::ApiResult;
use crate::todos::helpers::get_all_todos_from_db;

use super::client::TextGenerator;
use super::helpers::generate_summary;

#[get("/summary")]
pub async fn get_summary(
    db_connection: &State<DBConnection>,
    generator: &State<Arc<dyn TextGenerator>>,
) -> ApiResult<Json<String>> {
    // The lock must be released before awaiting the external call.
    let todos = {
        let db_connection = db_connection.lock()?;
        get_all_todos_from_db(&db_connection)?
    };

    let summary = generate_summary(&todos, generator.inner().as_ref()).await;

    Ok(Json(summary))
}
