//! Formatting functions for console output.
//!
//! Status lines of the release workflow are not routed through here: they are
//! plain text written to the workflow's writer.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Describe the account an env file belongs to, for the success lines.
pub fn account_summary(uid: u64, login: Option<&str>) -> String {
    match login {
        Some(login) => format!("account {} ({})", uid, login),
        None => format!("account {}", uid),
    }
}
