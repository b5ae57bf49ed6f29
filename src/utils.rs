//! Utility functions shared across the crate.

/// Formats captured command output for appending to an error message.
///
/// Returns an empty string when there is no output, so the message ends
/// right after the error itself.
///
/// # Arguments
///
/// * `output` - Combined stdout and stderr of the command
pub fn output_details(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!("; output:\n{}", output)
    }
}
