use crate::todos::data::Todo;

use super::client::TextGenerator;

pub const NO_TASKS_MESSAGE: &str = "You have no tasks. Enjoy your day!";

pub const FALLBACK_MESSAGE: &str =
    "Sorry, I couldn't generate a summary at the moment. Please check your AI configuration.";

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

fn render_task_line(todo: &Todo) -> String {
    let due = match todo.due_date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "No due date".to_string(),
    };
    let status = if todo.completed { "Completed" } else { "Pending" };

    format!("- {} (Due: {}, Status: {})", todo.title, due, status)
}

fn build_prompt(todos: &[Todo]) -> String {
    let task_lines = todos
        .iter()
        .map(render_task_line)
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "You are a helpful assistant. Please provide a brief, friendly, and encouraging summary \
         of the following tasks. Mention any overdue tasks first, then tasks due today, \
         and finally any upcoming tasks. Keep the summary to a maximum of 3-4 sentences.\n\n\
         Here are the tasks:\n{task_lines}"
    )
}

/// Produces the natural-language summary for the given todo list.
///
/// Failures of the external call are logged and replaced by
/// [`FALLBACK_MESSAGE`]; callers always get a usable string back.
pub async fn generate_summary(todos: &[Todo], generator: &dyn TextGenerator) -> String {
    if todos.is_empty() {
        return NO_TASKS_MESSAGE.to_string();
    }

    match generator.generate(SYSTEM_PROMPT, &build_prompt(todos)).await {
        Ok(reply) => reply.trim().to_string(),
        Err(e) => {
            log::warn!("summary generation failed: {}", e);
            FALLBACK_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::client::GenerationError;
    use async_trait::async_trait;

    struct StubGenerator {
        reply: Result<&'static str, ()>,
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &self,
            _system_prompt: &str,
            _user_prompt: &str,
        ) -> Result<String, GenerationError> {
            match self.reply {
                Ok(reply) => Ok(reply.to_string()),
                Err(()) => Err(GenerationError::EmptyResponse),
            }
        }
    }

    struct UnreachableGenerator;

    #[async_trait]
    impl TextGenerator for UnreachableGenerator {
        async fn generate(
            &self,
            _system_prompt: &str,
            _user_prompt: &str,
        ) -> Result<String, GenerationError> {
            panic!("no external call expected for an empty todo list");
        }
    }

    fn todo(title: &str, completed: bool, due_date: Option<&str>) -> Todo {
        Todo {
            id: 1,
            title: title.to_string(),
            description: None,
            completed,
            created_at: "2025-01-01T00:00:00Z".parse().unwrap(),
            due_date: due_date.map(|d| d.parse().unwrap()),
        }
    }

    #[test]
    fn task_lines_render_date_status_and_placeholder() {
        let with_date = todo("Ship release", false, Some("2025-12-31T15:30:00Z"));
        assert_eq!(
            render_task_line(&with_date),
            "- Ship release (Due: 2025-12-31, Status: Pending)"
        );

        let without_date = todo("Water plants", true, None);
        assert_eq!(
            render_task_line(&without_date),
            "- Water plants (Due: No due date, Status: Completed)"
        );
    }

    #[test]
    fn prompt_contains_instructions_and_every_task() {
        let todos = vec![
            todo("Task with date", false, Some("2025-12-31T00:00:00Z")),
            todo("Task without date", false, None),
            todo("Completed task", true, Some("2025-11-30T00:00:00Z")),
        ];

        let prompt = build_prompt(&todos);

        assert!(prompt.contains("overdue tasks first"));
        assert!(prompt.contains("maximum of 3-4 sentences"));
        assert!(prompt.contains("Task with date"));
        assert!(prompt.contains("Task without date"));
        assert!(prompt.contains("No due date"));
        assert!(prompt.contains("2025-12-31"));
        assert!(prompt.contains("Status: Completed"));
        assert!(prompt.contains("Status: Pending"));
    }

    #[rocket::async_test]
    async fn empty_list_short_circuits_without_calling_out() {
        let summary = generate_summary(&[], &UnreachableGenerator).await;
        assert_eq!(summary, NO_TASKS_MESSAGE);
    }

    #[rocket::async_test]
    async fn reply_text_is_trimmed() {
        let generator = StubGenerator {
            reply: Ok("  You have 2 tasks pending. Keep up the good work!\n"),
        };
        let todos = vec![todo("Task 1", false, None)];

        let summary = generate_summary(&todos, &generator).await;
        assert_eq!(summary, "You have 2 tasks pending. Keep up the good work!");
    }

    #[rocket::async_test]
    async fn failure_yields_fallback_message() {
        let generator = StubGenerator { reply: Err(()) };
        let todos = vec![todo("Test Task", false, None)];

        let summary = generate_summary(&todos, &generator).await;
        assert_eq!(summary, FALLBACK_MESSAGE);
    }
}
