//! Header normalization

use rustc_hash::FxHashSet;

/// A header cell that had to be renamed to keep column names unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRename {
    /// Column position (0-based)
    pub index: usize,
    /// Name as it appeared in the source
    pub original: String,
    /// Name the column was given
    pub renamed: String,
}

/// Turn raw header cells into unique, non-empty column names.
///
/// Empty names become `Unnamed: <index>`. A name that was already taken gets
/// the first free `.1`, `.2`, ... suffix. Names are otherwise kept verbatim,
/// including surrounding whitespace.
pub fn normalize_headers<I, S>(raw: I) -> (Vec<String>, Vec<HeaderRename>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let raw: Vec<String> = raw.into_iter().map(|s| s.as_ref().to_string()).collect();

    let mut taken: FxHashSet<String> = FxHashSet::default();
    let mut names = Vec::with_capacity(raw.len());
    let mut renames = Vec::new();

    for (index, original) in raw.iter().enumerate() {
        let mut name = if original.is_empty() {
            format!("Unnamed: {}", index)
        } else {
            original.clone()
        };

        if taken.contains(&name) {
            let base = name.clone();
            let mut suffix = 1;
            loop {
                let candidate = format!("{}.{}", base, suffix);
                if !taken.contains(&candidate) && !raw.contains(&candidate) {
                    name = candidate;
                    break;
                }
                suffix += 1;
            }
        }

        if &name != original {
            renames.push(HeaderRename {
                index,
                original: original.clone(),
                renamed: name.clone(),
            });
        }

        taken.insert(name.clone());
        names.push(name);
    }

    (names, renames)
}
