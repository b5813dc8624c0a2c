pub mod activity;
pub mod user;

use validator::ValidationErrors;

/// Flatten validator output into one sorted, human-readable line.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid ({})", e.code),
            })
        })
        .collect();
    parts.sort();
    parts.dedup();
    parts.join("; ")
}
