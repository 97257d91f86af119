/// Canonicalize a reference path for comparison.
///
/// Strips every leading `/` and collapses runs of `/` into one. No case
/// folding and no `.`/`..` resolution.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    let mut out = String::with_capacity(trimmed.len());
    let mut prev_slash = false;

    for c in trimmed.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }

    out
}
