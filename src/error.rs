pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create file write error
pub fn file_write_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to write file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Format SQL error with position highlighting
pub fn format_sql_error(prefix: &str, message: &str) -> String {
    // sqlparser format: "... at Line: X, Column: Y" (older releases omit the
    // colon after Column)
    if let Some(pos) = extract_position(message) {
        format!(
            "{} at line {}, column {}:\n  {}",
            prefix, pos.line, pos.column, message
        )
    } else {
        format!("{}:\n  {}", prefix, message)
    }
}

struct SqlPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<SqlPosition> {
    let line_marker = "Line: ";
    let col_marker = ", Column";

    let line_start = message.find(line_marker)?;
    let line_num_start = line_start + line_marker.len();
    let col_start = message[line_num_start..].find(col_marker)?;
    let line_str = &message[line_num_start..line_num_start + col_start];

    let after_marker = &message[line_num_start + col_start + col_marker.len()..];
    let col_digits = after_marker.trim_start_matches([':', ' ']);
    let col_end = col_digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(col_digits.len());

    let line = line_str.trim().parse().ok()?;
    let column = col_digits[..col_end].parse().ok()?;
    Some(SqlPosition { line, column })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_with_colon() {
        let msg = format_sql_error("P", "Expected end of statement at Line: 2, Column: 14");
        assert!(msg.starts_with("P at line 2, column 14:"));
    }

    #[test]
    fn test_position_without_colon() {
        let msg = format_sql_error("P", "Unexpected token at Line: 7, Column 3");
        assert!(msg.starts_with("P at line 7, column 3:"));
    }

    #[test]
    fn test_no_position() {
        let msg = format_sql_error("P", "something odd");
        assert_eq!(msg, "P:\n  something odd");
    }

    #[test]
    fn test_garbage_position_falls_back() {
        let msg = format_sql_error("P", "at Line: x, Column: y");
        assert_eq!(msg, "P:\n  at Line: x, Column: y");
    }
}
