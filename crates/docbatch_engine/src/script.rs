use std::io;

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("script exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Runs `script` through an `osascript`-compatible program and returns stdout
/// without its final line break.
pub(crate) async fn run_osascript(program: &str, script: &str) -> Result<String, ScriptError> {
    let output = Command::new(program)
        .arg("-e")
        .arg(script)
        .output()
        .await
        .map_err(|source| ScriptError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(strip_line_break(&stdout).to_string())
    } else {
        Err(ScriptError::Failed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

fn strip_line_break(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}

/// AppleScript string literal for `text`, with quotes and backslashes escaped.
pub fn quote_applescript(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_paths_verbatim() {
        assert_eq!(quote_applescript("/Users/me/a b.pdf"), "\"/Users/me/a b.pdf\"");
    }

    #[test]
    fn only_the_final_line_break_is_removed() {
        assert_eq!(strip_line_break("/a/b.pdf \n"), "/a/b.pdf ");
        assert_eq!(strip_line_break(" x\r\n"), " x");
        assert_eq!(strip_line_break("plain"), "plain");
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(quote_applescript(r#"say "hi"\now"#), r#""say \"hi\"\\now""#);
    }
}
