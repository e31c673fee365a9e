//! Department name lists assigned to staff profiles.

/// Trim names, drop blanks and duplicates. Order of first occurrence is kept.
pub fn normalize_departments<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if !name.is_empty() && !out.iter().any(|d| d == name) {
            out.push(name.to_owned());
        }
    }
    out
}

/// Split a comma-separated list as entered in the admin form.
pub fn parse_department_list(raw: &str) -> Vec<String> {
    normalize_departments(raw.split(','))
}
