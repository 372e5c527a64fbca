//! Rank-based link name templates

use std::fmt;
use std::str::FromStr;

use crate::core::RANK_TOKEN;
use crate::error::{Result, ScranError};

/// A link name template holding exactly one `{rank}` token
///
/// The template is split once at parse time, so rendering and matching never
/// have to look for the token again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFormat {
    prefix: String,
    suffix: String,
}

impl NameFormat {
    /// Parses and validates a template such as `latest-{rank}` or `shot-{rank}.png`
    pub fn parse(template: &str) -> Result<Self> {
        let occurrences = template.matches(RANK_TOKEN).count();
        if occurrences != 1 {
            return Err(ScranError::InvalidArgument(format!(
                "name format '{template}' must contain {RANK_TOKEN} exactly once (found {occurrences})"
            )));
        }

        let (prefix, suffix) = template
            .split_once(RANK_TOKEN)
            .ok_or_else(|| ScranError::InvalidArgument(format!("name format '{template}' has no {RANK_TOKEN}")))?;

        if prefix.contains(['{', '}']) || suffix.contains(['{', '}']) {
            return Err(ScranError::InvalidArgument(format!(
                "name format '{template}' may not contain placeholders other than {RANK_TOKEN}"
            )));
        }

        if template.contains(['/', '\\']) {
            return Err(ScranError::InvalidArgument(format!(
                "name format '{template}' must be a file name, not a path"
            )));
        }

        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// Renders the link name for a 1-based rank
    pub fn render(&self, rank: usize) -> String {
        format!("{}{}{}", self.prefix, rank, self.suffix)
    }

    /// Recovers the rank from a file name, if the name is an exact rendering of this format
    ///
    /// `latest-03` does not match `latest-{rank}`, since `render` never produces it.
    pub fn parse_rank(&self, name: &str) -> Option<usize> {
        let digits = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let rank: usize = digits.parse().ok()?;
        (rank.to_string() == digits).then_some(rank)
    }
}

impl fmt::Display for NameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, RANK_TOKEN, self.suffix)
    }
}

impl FromStr for NameFormat {
    type Err = ScranError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_format() {
        let format = NameFormat::parse("latest-{rank}").unwrap();
        assert_eq!(format.render(1), "latest-1");
        assert_eq!(format.render(12), "latest-12");
        assert_eq!(format.to_string(), "latest-{rank}");
    }

    #[test]
    fn test_render_with_suffix() {
        let format = NameFormat::parse("shot-{rank}.png").unwrap();
        assert_eq!(format.render(3), "shot-3.png");
    }

    #[test]
    fn test_missing_token_rejected() {
        let err = NameFormat::parse("latest").unwrap_err();
        assert!(matches!(err, ScranError::InvalidArgument(_)));
    }

    #[test]
    fn test_repeated_token_rejected() {
        assert!(NameFormat::parse("{rank}-{rank}").is_err());
    }

    #[test]
    fn test_other_placeholders_rejected() {
        assert!(NameFormat::parse("{date}-{rank}").is_err());
        assert!(NameFormat::parse("latest-{rank}}").is_err());
    }

    #[test]
    fn test_path_separators_rejected() {
        assert!(NameFormat::parse("../latest-{rank}").is_err());
        assert!(NameFormat::parse("sub\\{rank}").is_err());
    }

    #[test]
    fn test_parse_rank_exact_renderings_only() {
        let format = NameFormat::parse("latest-{rank}.png").unwrap();
        assert_eq!(format.parse_rank("latest-4.png"), Some(4));
        assert_eq!(format.parse_rank("latest-04.png"), None);
        assert_eq!(format.parse_rank("latest-.png"), None);
        assert_eq!(format.parse_rank("latest-4"), None);
        assert_eq!(format.parse_rank("latest-x.png"), None);
        assert_eq!(format.parse_rank("other-4.png"), None);
    }

    #[test]
    fn test_from_str() {
        let format: NameFormat = "{rank}".parse().unwrap();
        assert_eq!(format.render(2), "2");
        assert_eq!(format.parse_rank("2"), Some(2));
    }
}
