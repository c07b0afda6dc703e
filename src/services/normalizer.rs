//! Prefix normalizer: strips an enclosing folder shared by every name in a batch.

use crate::models::entry::NamedItem;

pub const PATH_DELIMITER: char = '/';

/// Split a name into its first segment and the remainder.
fn split_first_segment(name: &str) -> (&str, &str) {
    name.split_once(PATH_DELIMITER).unwrap_or((name, ""))
}

/// Remove leading path segments shared by all names, one segment at a time.
///
/// Does nothing for batches of fewer than two items. Stripping stops as soon as any name would
/// be left without a remainder, any name is missing, or the first segments differ. Segments
/// stripped in earlier rounds are kept. Returns the number of segments removed.
pub fn remove_common_prefix(items: &mut [NamedItem]) -> usize {
    if items.len() < 2 {
        return 0;
    }

    let mut stripped = 0;
    loop {
        let Some(prefix) = common_first_segment(items) else {
            return stripped;
        };
        for item in items.iter_mut() {
            if let Some(name) = item.name.as_mut() {
                let rest = name[prefix.len() + PATH_DELIMITER.len_utf8()..].to_string();
                *name = rest;
            }
        }
        stripped += 1;
    }
}

/// The first segment every name shares, provided every name has a non-empty remainder.
fn common_first_segment(items: &[NamedItem]) -> Option<String> {
    let mut shared: Option<&str> = None;
    for item in items {
        let name = item.name.as_deref()?;
        let (first, rest) = split_first_segment(name);
        if rest.is_empty() {
            return None;
        }
        match shared {
            None => shared = Some(first),
            Some(s) if s == first => {}
            Some(_) => return None,
        }
    }
    shared.map(str::to_string)
}
