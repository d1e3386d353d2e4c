use rocket::serde::json::{self, Json};
use rocket::{delete, get, post, put, State};

use crate::data::DBConnection;
use crate::error::{ApiError, ApiResult};

use super::data::*;
use super::helpers::*;

// Path ids arrive as `Result` so a non-integer segment maps to a 422
// instead of falling through to the 404 catcher.
fn parse_id(id: Result<TodoID, &str>) -> ApiResult<TodoID> {
    id.map_err(|raw| ApiError::Validation(format!("id must be an integer, got '{raw}'")))
}

#[post("/", format = "json", data = "<todo>")]
pub fn create_todo(
    todo: Result<Json<TodoCreate>, json::Error<'_>>,
    db_connection: &State<DBConnection>,
) -> ApiResult<Json<Todo>> {
    let todo = todo.map_err(ApiError::from_json_error)?;

    let mut db_connection = db_connection.lock()?;
    let transaction = db_connection.transaction()?;

    let created = add_todo_to_db(todo.into_inner(), &transaction)?;
    transaction.commit()?;

    Ok(Json(created))
}

#[get("/")]
pub fn get_todos(db_connection: &State<DBConnection>) -> ApiResult<Json<Vec<Todo>>> {
    let db_connection = db_connection.lock()?;

    let todos = get_all_todos_from_db(&db_connection)?;

    Ok(Json(todos))
}

#[get("/<id>")]
pub fn get_todo(
    id: Result<TodoID, &str>,
    db_connection: &State<DBConnection>,
) -> ApiResult<Json<Todo>> {
    let id = parse_id(id)?;
    let db_connection = db_connection.lock()?;

    get_todo_from_db(id, &db_connection).map(Json)
}

#[put("/<id>", format = "json", data = "<patch>")]
pub fn update_todo(
    id: Result<TodoID, &str>,
    patch: Result<Json<TodoUpdate>, json::Error<'_>>,
    db_connection: &State<DBConnection>,
) -> ApiResult<Json<Todo>> {
    let id = parse_id(id)?;
    let patch = patch.map_err(ApiError::from_json_error)?.into_inner();
    patch.validate()?;

    let mut db_connection = db_connection.lock()?;
    let transaction = db_connection.transaction()?;

    let updated = update_todo_in_db(id, patch, &transaction)?;
    transaction.commit()?;

    Ok(Json(updated))
}

#[delete("/<id>")]
pub fn delete_todo(
    id: Result<TodoID, &str>,
    db_connection: &State<DBConnection>,
) -> ApiResult<Json<Todo>> {
    let id = parse_id(id)?;

    let mut db_connection = db_connection.lock()?;
    let transaction = db_connection.transaction()?;

    let deleted = delete_todo_from_db(id, &transaction)?;
    transaction.commit()?;

    Ok(Json(deleted))
}
