//! Slug generation for issue ids.

/// Derive a slug from a human issue name: lowercase, alphanumerics kept,
/// runs of anything else collapsed to single dashes.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("issue");
    }
    slug
}

/// Derive a vault-unique slug, disambiguating collisions with a numeric
/// suffix (`name`, `name-2`, `name-3`, ...).
pub fn unique_slug<F>(name: &str, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base = slugify(name);
    if !exists(&base) {
        return base;
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !exists(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// File stem of a vault path ("Issues/Active/fix-login.md" -> "fix-login").
#[must_use]
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}
