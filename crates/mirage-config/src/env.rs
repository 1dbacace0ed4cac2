use std::sync::OnceLock;

use regex::Regex;

/// Placeholder pattern: `{{ env.VAR }}` or `{{ env.VAR | default("value") }}`
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// Runs before deserialization so the config structs hold plain values.
/// A placeholder with a `default("...")` falls back to the default when the
/// variable is unset; one without a default makes the load fail. TOML
/// comment lines are left untouched so commented-out credentials do not
/// have to exist in the environment.
pub fn expand(input: &str) -> Result<String, String> {
    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            output.push_str(&expand_line(line)?);
        }
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut result = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in placeholder_re().captures_iter(line) {
        let span = captures.get(0).expect("capture 0 always present");
        let var = &captures[1];
        let fallback = captures.get(2).map(|m| m.as_str());

        result.push_str(&line[cursor..span.start()]);

        match (std::env::var(var), fallback) {
            (Ok(value), _) => result.push_str(&value),
            (Err(_), Some(default)) => result.push_str(default),
            (Err(_), None) => {
                return Err(format!("environment variable not found: `{var}`"));
            }
        }

        cursor = span.end();
    }

    result.push_str(&line[cursor..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let input = "listen_address = \"127.0.0.1:3000\"";
        assert_eq!(expand(input).unwrap(), input);
    }

    #[test]
    fn set_variable_is_substituted() {
        temp_env::with_var("MIRAGE_TEST_KEY", Some("sk-123"), || {
            let result = expand("api_key = \"{{ env.MIRAGE_TEST_KEY }}\"").unwrap();
            assert_eq!(result, "api_key = \"sk-123\"");
        });
    }

    #[test]
    fn missing_variable_fails_without_default() {
        temp_env::with_var_unset("MIRAGE_MISSING", || {
            let err = expand("api_key = \"{{ env.MIRAGE_MISSING }}\"").unwrap_err();
            assert!(err.contains("MIRAGE_MISSING"));
        });
    }

    #[test]
    fn missing_variable_uses_default() {
        temp_env::with_var_unset("MIRAGE_MISSING", || {
            let result = expand("api_key = \"{{ env.MIRAGE_MISSING | default(\"\") }}\"").unwrap();
            assert_eq!(result, "api_key = \"\"");
        });
    }

    #[test]
    fn set_variable_wins_over_default() {
        temp_env::with_var("MIRAGE_TEST_KEY", Some("real"), || {
            let result = expand("key = \"{{ env.MIRAGE_TEST_KEY | default(\"fallback\") }}\"").unwrap();
            assert_eq!(result, "key = \"real\"");
        });
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("MIRAGE_MISSING", || {
            let input = "# api_key = \"{{ env.MIRAGE_MISSING }}\"\nname = \"x\"";
            assert_eq!(expand(input).unwrap(), input);
        });
    }

    #[test]
    fn trailing_newline_preserved() {
        let input = "a = 1\n";
        assert_eq!(expand(input).unwrap(), input);
    }
}
