const MAX_SLUG_LEN: usize = 120;

pub fn slugify(input: &str) -> String {
    let mut slug = String::new();
    let mut last_was_dash = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if ch.is_ascii() && !slug.is_empty() && !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}

/// Uses the explicit slug when one was given, otherwise derives it from `name`.
pub fn resolve_slug(explicit: Option<&str>, name: &str) -> Option<String> {
    let slug = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(given) => slugify(given),
        None => slugify(name),
    };

    if slug.is_empty() { None } else { Some(slug) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_punctuation_and_case() {
        assert_eq!(slugify("Nitrile Gloves (Box of 100)"), "nitrile-gloves-box-of-100");
        assert_eq!(slugify("  --Scalpel #10--  "), "scalpel-10");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(slugify("Gaze stérile"), "gaze-strile");
    }

    #[test]
    fn explicit_slug_wins_and_blank_falls_back() {
        assert_eq!(
            resolve_slug(Some("Custom Slug"), "Ignored"),
            Some("custom-slug".to_string())
        );
        assert_eq!(
            resolve_slug(Some("   "), "Suture Kit"),
            Some("suture-kit".to_string())
        );
        assert_eq!(resolve_slug(None, "!!!"), None);
    }
}
