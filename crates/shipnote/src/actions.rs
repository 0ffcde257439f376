//! Glue for the CI platform's runner protocol: declared inputs arrive as
//! `INPUT_<NAME>` variables and annotations are written to stdout as
//! workflow commands.

/// Environment variable carrying a declared input, e.g. `job-status` ->
/// `INPUT_JOB-STATUS`.
pub fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Read a declared input, trimmed. Unset inputs read as an empty string.
pub fn input(name: &str) -> String {
    std::env::var(input_var(name))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Escape message data for a workflow command.
pub fn escape_data(msg: &str) -> String {
    msg.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn error_command(msg: &str) -> String {
    format!("::error::{}", escape_data(msg))
}

/// Emit an error annotation on the job.
pub fn error(msg: &str) {
    println!("{}", error_command(msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_names_follow_runner_convention() {
        assert_eq!(input_var("webhook"), "INPUT_WEBHOOK");
        assert_eq!(input_var("job-status"), "INPUT_JOB-STATUS");
        assert_eq!(input_var("custom text"), "INPUT_CUSTOM_TEXT");
    }

    #[test]
    fn error_annotation_escapes_newlines_and_percent() {
        assert_eq!(
            error_command("100% broken\r\nsee log"),
            "::error::100%25 broken%0D%0Asee log"
        );
    }
}
