//! Package description synthesis shared by the platform generators.
//!
//! A generic one-liner is always available. When the project ships an HTML
//! front page, its first emphasized paragraph becomes the long description,
//! word-wrapped with the platform's continuation-line prefix.

use crate::packager::error::Result;
use regex::Regex;
use std::path::Path;

/// Vendor string used across generated metadata.
pub const VENDOR: &str = "beatniksoftware.com";

/// Column at which long descriptions are wrapped.
const WRAP_WIDTH: usize = 76;

/// Generic one-line description, always available.
pub fn generic_description(human_name: &str) -> String {
    format!("{}'s {}", VENDOR, human_name)
}

/// Extracts the first emphasized paragraph from `www/index.html`.
///
/// Returns an empty string when the file is absent or holds no
/// `<p><strong>...</strong>` paragraph; an absent front page is an optional
/// input, not an error.
pub fn description_from_html(project_root: &Path) -> Result<String> {
    let html_filename = project_root.join("www/index.html");
    if !html_filename.is_file() {
        return Ok(String::new());
    }

    let html = std::fs::read_to_string(&html_filename)?.replace('\n', " ");
    let pattern = Regex::new(r"<p><strong>(.*?)</strong>")?;
    Ok(match pattern.captures(&html) {
        Some(captures) => captures[1].replace("&nbsp;", " "),
        None => String::new(),
    })
}

/// Multi-line Debian description: the generic line, then the HTML paragraph
/// wrapped with the control-file continuation prefix.
///
/// With apt-get(1) nobody sees this; gdebi(1) shows it right next to the
/// Install button, so it's worth a little effort.
pub fn debian_description(project_root: &Path, human_name: &str) -> Result<String> {
    let mut description = generic_description(human_name);
    let extracted = description_from_html(project_root)?;
    if !extracted.is_empty() {
        description.push_str("\n ");
        description.push_str(&wrap(&extracted, WRAP_WIDTH, "\n "));
    }
    Ok(description)
}

/// Returns a copy of `s` wrapped to the given width using the given
/// separator. Breaks at the last whitespace at or before the width.
pub fn wrap(s: &str, width: usize, separator: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() < width {
        return s.to_string();
    }
    let search_end = width.min(chars.len() - 1);
    match chars[..=search_end].iter().rposition(|c| c.is_whitespace()) {
        None => s.to_string(),
        Some(i) => {
            let head: String = chars[..i].iter().collect();
            let tail: String = chars[i + 1..].iter().collect();
            format!("{}{}{}", head, separator, wrap(&tail, width, separator))
        }
    }
}
