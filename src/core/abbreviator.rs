//! Logger name abbreviation
//!
//! Shortens dotted logger names such as `org.apache.commons.Foo`. Supported
//! patterns:
//! - `N`: keep the rightmost N segments (`1` -> `Foo`)
//! - `-N`: drop the leftmost N segments (`-1` -> `apache.commons.Foo`)
//! - fragment list: one rule per segment, the last rule repeating
//!   (`1.` -> `o.a.c.Foo`, `1.1.~.~` -> `o.a.~.Foo`, `3*.` -> `org.apa*.com*.Foo`)
//!
//! The final segment is never shortened by a fragment list.

use super::error::{LayoutError, Result};
use std::borrow::Cow;
use std::str::FromStr;

/// Width rule for one name segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    /// Characters kept; `None` keeps the whole segment
    width: Option<usize>,
    /// Appended when the segment was actually shortened
    marker: Option<char>,
}

impl Fragment {
    fn apply(&self, segment: &str, out: &mut String) {
        match self.width {
            Some(width) if segment.chars().count() > width => {
                out.extend(segment.chars().take(width));
                if let Some(marker) = self.marker {
                    out.push(marker);
                }
            }
            _ => out.push_str(segment),
        }
    }
}

/// Compiled abbreviation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerNameAbbreviator {
    /// Keep the rightmost N segments
    KeepRight(usize),
    /// Drop the leftmost N segments
    DropLeft(usize),
    /// Per-segment width rules
    Fragments(Vec<Fragment>),
}

impl LoggerNameAbbreviator {
    /// Compile an optional pattern, degrading to `None` when it is absent,
    /// blank or malformed
    ///
    /// # Examples
    ///
    /// ```
    /// use json_event_layout::LoggerNameAbbreviator;
    ///
    /// let rule = LoggerNameAbbreviator::from_pattern(Some("1.")).unwrap();
    /// assert_eq!(rule.abbreviate("com.acme.billing.Invoice"), "c.a.b.Invoice");
    ///
    /// assert!(LoggerNameAbbreviator::from_pattern(Some("")).is_none());
    /// assert!(LoggerNameAbbreviator::from_pattern(None).is_none());
    /// ```
    #[must_use]
    pub fn from_pattern(pattern: Option<&str>) -> Option<Self> {
        let pattern = pattern?;
        if pattern.trim().is_empty() {
            return None;
        }
        match pattern.parse() {
            Ok(abbreviator) => Some(abbreviator),
            Err(e) => {
                eprintln!(
                    "[LAYOUT WARNING] {}. Logger names will not be abbreviated.",
                    e
                );
                None
            }
        }
    }

    /// Abbreviate a dotted logger name
    pub fn abbreviate<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            LoggerNameAbbreviator::KeepRight(count) => {
                match name.rmatch_indices('.').nth(count.saturating_sub(1)) {
                    Some((idx, _)) => Cow::Borrowed(&name[idx + 1..]),
                    None => Cow::Borrowed(name),
                }
            }
            LoggerNameAbbreviator::DropLeft(count) => {
                match name.match_indices('.').nth(count.saturating_sub(1)) {
                    Some((idx, _)) => Cow::Borrowed(&name[idx + 1..]),
                    None => Cow::Borrowed(name),
                }
            }
            LoggerNameAbbreviator::Fragments(fragments) => {
                Cow::Owned(Self::apply_fragments(fragments, name))
            }
        }
    }

    fn apply_fragments(fragments: &[Fragment], name: &str) -> String {
        let segment_count = name.split('.').count();
        let mut out = String::with_capacity(name.len());

        for (i, segment) in name.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }
            if i + 1 == segment_count {
                out.push_str(segment);
                break;
            }
            match fragments.get(i).or_else(|| fragments.last()) {
                Some(fragment) => fragment.apply(segment, &mut out),
                None => out.push_str(segment),
            }
        }

        out
    }
}

fn parse_fragment(pattern: &str, fragment: &str) -> Result<Fragment> {
    let (width, rest) = match fragment.strip_prefix('*') {
        Some(rest) => (None, rest),
        None => {
            let digits_end = fragment
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(fragment.len());
            let (digits, rest) = fragment.split_at(digits_end);
            let width = if digits.is_empty() {
                0
            } else {
                digits.parse::<usize>().map_err(|_| {
                    LayoutError::pattern(pattern, format!("width '{}' is out of range", digits))
                })?
            };
            (Some(width), rest)
        }
    };

    let mut chars = rest.chars();
    let marker = chars.next();
    if chars.next().is_some() {
        return Err(LayoutError::pattern(
            pattern,
            format!("marker '{}' must be a single character", rest),
        ));
    }

    Ok(Fragment { width, marker })
}

impl FromStr for LoggerNameAbbreviator {
    type Err = LayoutError;

    fn from_str(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(LayoutError::pattern(pattern, "pattern is empty"));
        }

        if let Ok(count) = trimmed.parse::<i64>() {
            let segments = usize::try_from(count.unsigned_abs()).map_err(|_| {
                LayoutError::pattern(pattern, "segment count is out of range")
            })?;
            return match count {
                0 => Err(LayoutError::pattern(pattern, "segment count must not be zero")),
                c if c > 0 => Ok(LoggerNameAbbreviator::KeepRight(segments)),
                _ => Ok(LoggerNameAbbreviator::DropLeft(segments)),
            };
        }

        let body = trimmed.strip_suffix('.').unwrap_or(trimmed);
        let fragments = body
            .split('.')
            .map(|fragment| parse_fragment(pattern, fragment))
            .collect::<Result<Vec<_>>>()?;

        Ok(LoggerNameAbbreviator::Fragments(fragments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abbreviate(pattern: &str, name: &str) -> String {
        pattern
            .parse::<LoggerNameAbbreviator>()
            .expect("valid pattern")
            .abbreviate(name)
            .into_owned()
    }

    #[test]
    fn test_keep_right_segments() {
        assert_eq!(abbreviate("1", "org.apache.commons.Foo"), "Foo");
        assert_eq!(abbreviate("2", "org.apache.commons.Foo"), "commons.Foo");
        assert_eq!(abbreviate("10", "org.apache.commons.Foo"), "org.apache.commons.Foo");
        assert_eq!(abbreviate("1", "Foo"), "Foo");
    }

    #[test]
    fn test_drop_left_segments() {
        assert_eq!(abbreviate("-1", "org.apache.commons.Foo"), "apache.commons.Foo");
        assert_eq!(abbreviate("-3", "org.apache.commons.Foo"), "Foo");
        assert_eq!(abbreviate("-4", "org.apache.commons.Foo"), "org.apache.commons.Foo");
    }

    #[test]
    fn test_single_char_fragments() {
        assert_eq!(abbreviate("1.", "org.apache.commons.Foo"), "o.a.c.Foo");
        assert_eq!(abbreviate("1", "org.apache.commons.Foo"), "Foo");
        assert_eq!(abbreviate("1.", "Foo"), "Foo");
    }

    #[test]
    fn test_marker_fragments() {
        assert_eq!(abbreviate("1.1.~.~", "org.apache.commons.test.Foo"), "o.a.~.~.Foo");
        assert_eq!(abbreviate("3*.", "org.apache.commons.Foo"), "org.apa*.com*.Foo");
    }

    #[test]
    fn test_full_length_fragment() {
        assert_eq!(abbreviate("1.*.", "org.apache.commons.Foo"), "o.apache.commons.Foo");
        assert_eq!(abbreviate("*.1", "org.apache.commons.Foo"), "org.a.c.Foo");
    }

    #[test]
    fn test_multibyte_segments() {
        assert_eq!(abbreviate("2.", "überwachung.ärger.Dienst"), "üb.är.Dienst");
    }

    #[test]
    fn test_malformed_patterns() {
        assert!("".parse::<LoggerNameAbbreviator>().is_err());
        assert!("0".parse::<LoggerNameAbbreviator>().is_err());
        assert!("1ab.".parse::<LoggerNameAbbreviator>().is_err());
        assert!("99999999999999999999999.".parse::<LoggerNameAbbreviator>().is_err());
    }

    #[test]
    fn test_from_pattern_degrades() {
        assert!(LoggerNameAbbreviator::from_pattern(None).is_none());
        assert!(LoggerNameAbbreviator::from_pattern(Some("   ")).is_none());
        assert!(LoggerNameAbbreviator::from_pattern(Some("1xyz")).is_none());
        assert!(LoggerNameAbbreviator::from_pattern(Some("1.")).is_some());
    }

    #[test]
    fn test_keep_right_borrows() {
        let rule = LoggerNameAbbreviator::KeepRight(1);
        assert!(matches!(rule.abbreviate("a.b.C"), Cow::Borrowed("C")));
    }
}
