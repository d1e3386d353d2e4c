use chrono::Utc;
use rusqlite::{params, Connection, Row};

use crate::error::{ApiError, ApiResult};

use super::data::*;

fn todo_from_row(row: &Row) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        created_at: row.get(4)?,
        due_date: row.get(5)?,
    })
}

const TODO_COLUMNS: &str = "id, title, description, completed, created_at, due_date";

pub fn add_todo_to_db(todo: TodoCreate, db_connection: &Connection) -> ApiResult<Todo> {
    db_connection.execute(
        "INSERT INTO todos (title, description, completed, created_at, due_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            todo.title,
            todo.description,
            todo.completed,
            Utc::now(),
            todo.due_date
        ],
    )?;

    get_todo_from_db(db_connection.last_insert_rowid(), db_connection)
}

pub fn get_all_todos_from_db(db_connection: &Connection) -> ApiResult<Vec<Todo>> {
    let mut statement =
        db_connection.prepare(&format!("SELECT {TODO_COLUMNS} FROM todos"))?;

    let mut todos = vec![];
    let mut rows = statement.query([])?;

    while let Some(row) = rows.next()? {
        todos.push(todo_from_row(row)?);
    }

    Ok(todos)
}

pub fn get_todo_from_db(todo_id: TodoID, db_connection: &Connection) -> ApiResult<Todo> {
    let mut statement =
        db_connection.prepare(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"))?;

    let mut rows = statement.query(params![todo_id])?;

    match rows.next()? {
        Some(row) => Ok(todo_from_row(row)?),
        None => Err(ApiError::NotFound),
    }
}

/// Merges the supplied patch fields over the stored row. `id` and
/// `created_at` are immutable; absent fields keep their values.
pub fn update_todo_in_db(
    todo_id: TodoID,
    patch: TodoUpdate,
    db_connection: &Connection,
) -> ApiResult<Todo> {
    let existing = get_todo_from_db(todo_id, db_connection)?;

    let updated = Todo {
        id: existing.id,
        title: match patch.title {
            Some(Some(title)) => title,
            _ => existing.title,
        },
        description: match patch.description {
            Some(description) => description,
            None => existing.description,
        },
        completed: match patch.completed {
            Some(Some(completed)) => completed,
            _ => existing.completed,
        },
        created_at: existing.created_at,
        due_date: match patch.due_date {
            Some(due_date) => due_date,
            None => existing.due_date,
        },
    };

    db_connection.execute(
        "UPDATE todos SET title = ?1, description = ?2, completed = ?3, due_date = ?4
         WHERE id = ?5",
        params![
            updated.title,
            updated.description,
            updated.completed,
            updated.due_date,
            todo_id
        ],
    )?;

    Ok(updated)
}

/// Removes the row and returns it as it existed just before deletion.
pub fn delete_todo_from_db(todo_id: TodoID, db_connection: &Connection) -> ApiResult<Todo> {
    let todo = get_todo_from_db(todo_id, db_connection)?;

    db_connection.execute("DELETE FROM todos WHERE id = ?1", params![todo_id])?;

    Ok(todo)
}
