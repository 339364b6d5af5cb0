//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::authenticator::EntryCode;

/// Shown in place of a code that could not be generated.
const CODE_PLACEHOLDER: &str = "------";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Render a table of entries and their codes (Title, Code, Encoding).
///
/// Entries whose code failed get a placeholder and a warning line; the
/// remaining rows are unaffected.
pub fn codes_table(codes: &[EntryCode<'_>]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Title", "Code", "Encoding"]);

    for row in codes {
        let code = match &row.code {
            Ok(code) => format_code(code),
            Err(_) => CODE_PLACEHOLDER.to_string(),
        };
        table.add_row(vec![
            row.entry.title.clone(),
            code,
            row.entry.encoding.as_str().to_string(),
        ]);
    }

    table
}

/// Print the codes table, or a hint when the vault is empty.
pub fn print_codes_table(codes: &[EntryCode<'_>]) {
    if codes.is_empty() {
        info("No authenticator entries yet.");
        tip("Run `totpvault add <TITLE>` to add your first seed.");
        return;
    }

    println!("{}", codes_table(codes));

    for row in codes {
        if let Err(e) = &row.code {
            warning(&format!("'{}': {e}", row.entry.title));
        }
    }
}

/// Split a 6-digit code into two groups for readability ("123 456").
pub fn format_code(code: &str) -> String {
    if code.len() == 6 {
        format!("{} {}", &code[..3], &code[3..])
    } else {
        code.to_string()
    }
}
