//! File system path utilities

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, ScranError};

/// Expands `$VAR`, `${VAR}` and a leading `~` in a user-supplied path
///
/// Variables are expanded first, so `$HOME/shots` and `~/shots` resolve alike.
/// An unset variable is a configuration error rather than an empty string.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = expand_vars(raw)?;

    if expanded == "~" {
        return home_dir();
    }
    if let Some(rest) = expanded.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(expanded))
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| ScranError::Config("could not determine home directory".to_string()))
}

fn expand_vars(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            let end = braced.find('}').ok_or_else(|| {
                ScranError::Config(format!("unterminated '${{' in path '{raw}'"))
            })?;
            if end == 0 {
                return Err(ScranError::Config(format!("empty '${{}}' in path '{raw}'")));
            }
            (&braced[..end], end + 2)
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        // A lone '$' is kept as is
        if name.is_empty() {
            out.push('$');
            rest = after;
            continue;
        }

        let value = std::env::var(name).map_err(|_| {
            ScranError::Config(format!("environment variable ${name} is not set (in path '{raw}')"))
        })?;
        out.push_str(&value);
        rest = &after[consumed..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Shortens long paths for display
pub fn shorten_path(path: &Path, max_length: usize) -> String {
    let display = path.display().to_string();
    if display.len() <= max_length {
        return display;
    }

    let names: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect();
    if names.len() <= 2 {
        // Too few components to shorten meaningfully
        return display;
    }

    // Keep last 2 components with ellipsis prefix
    format!(".../{}/{}", names[names.len() - 2], names[names.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_untouched() {
        assert_eq!(expand_path("/tmp/shots").unwrap(), PathBuf::from("/tmp/shots"));
    }

    #[test]
    fn test_expands_braced_and_bare_vars() {
        // Only read the environment; tests run on parallel threads
        let Ok(home) = std::env::var("HOME") else {
            return;
        };
        assert_eq!(expand_path("$HOME/shots").unwrap(), PathBuf::from(&home).join("shots"));
        assert_eq!(
            expand_path("${HOME}shots").unwrap(),
            PathBuf::from(format!("{home}shots"))
        );
    }

    #[test]
    fn test_unset_var_is_config_error() {
        let err = expand_path("$SCRANAGEMENT_DEFINITELY_UNSET/x").unwrap_err();
        assert!(matches!(err, ScranError::Config(_)));
    }

    #[test]
    fn test_unterminated_brace_is_config_error() {
        assert!(expand_path("${HOME/x").is_err());
        assert!(expand_path("${}/x").is_err());
    }

    #[test]
    fn test_lone_dollar_kept() {
        assert_eq!(expand_path("/tmp/$/x").unwrap(), PathBuf::from("/tmp/$/x"));
        assert_eq!(expand_path("/tmp/cost$").unwrap(), PathBuf::from("/tmp/cost$"));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~").unwrap(), home);
            assert_eq!(expand_path("~/shots").unwrap(), home.join("shots"));
        }
        // Only a leading tilde is special
        assert_eq!(expand_path("/a/~/b").unwrap(), PathBuf::from("/a/~/b"));
    }

    #[test]
    fn test_shorten_path() {
        let path = Path::new("/home/someone/pictures/screenshots/2026/shot.png");
        assert_eq!(shorten_path(path, 20), ".../2026/shot.png");
        assert_eq!(shorten_path(path, 200), path.display().to_string());
        assert_eq!(shorten_path(Path::new("/averyveryverylongname"), 5), "/averyveryverylongname");
    }
}
