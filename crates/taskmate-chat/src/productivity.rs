/// Productivity summary prepended to the user's message.
///
/// Returns `None` when both task lists are empty, so no summary (not even
/// a 0% line) is sent in that case.
pub fn productivity_context(active: &[String], completed: &[String]) -> Option<String> {
    if active.is_empty() && completed.is_empty() {
        return None;
    }

    let total = active.len() + completed.len();
    let productivity = completed.len() as f64 / total as f64 * 100.0;

    Some(format!(
        "Current productivity: {:.0}%\nActive tasks: {}\nCompleted tasks: {}",
        productivity,
        active.join(", "),
        completed.join(", "),
    ))
}

/// Content of the stored and outbound user turn: productivity summary, then the message
pub fn compose_user_message(context: Option<&str>, message: &str) -> String {
    format!("{}\n{}", context.unwrap_or_default(), message)
        .trim()
        .to_string()
}
