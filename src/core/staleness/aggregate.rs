use std::collections::HashMap;

use super::types::StaleReference;

/// Keep one entry per document: the one with the strictly greatest
/// `staleness_days`, first seen on ties. Documents keep first-seen order.
pub fn dedupe_by_doc(refs: Vec<StaleReference>) -> Vec<StaleReference> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<StaleReference> = Vec::new();

    for stale in refs {
        match slots.get(&stale.doc_path) {
            Some(&slot) => {
                if stale.staleness_days > kept[slot].staleness_days {
                    kept[slot] = stale;
                }
            }
            None => {
                slots.insert(stale.doc_path.clone(), kept.len());
                kept.push(stale);
            }
        }
    }

    kept
}

/// Sort most-stale first. Stable, so equal entries keep their order.
pub fn sort_by_staleness(refs: &mut [StaleReference]) {
    refs.sort_by(|a, b| b.staleness_days.cmp(&a.staleness_days));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stale(doc: &str, source: &str, days: u64) -> StaleReference {
        StaleReference {
            doc_path: doc.to_string(),
            source_file: source.to_string(),
            last_doc_update: None,
            recent_source_changes: Vec::new(),
            staleness_days: days,
        }
    }

    #[test]
    fn keeps_most_stale_entry_per_doc() {
        let kept = dedupe_by_doc(vec![
            stale("docs/a.md", "src/x.ts", 3),
            stale("docs/b.md", "src/y.ts", 1),
            stale("docs/a.md", "src/z.ts", 9),
        ]);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].doc_path, "docs/a.md");
        assert_eq!(kept[0].source_file, "src/z.ts");
        assert_eq!(kept[1].doc_path, "docs/b.md");
    }

    #[test]
    fn first_seen_wins_ties() {
        let kept = dedupe_by_doc(vec![
            stale("docs/a.md", "src/first.ts", 4),
            stale("docs/a.md", "src/second.ts", 4),
        ]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_file, "src/first.ts");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(dedupe_by_doc(Vec::new()).is_empty());
    }

    #[test]
    fn sorts_descending() {
        let mut refs = vec![
            stale("a.md", "x", 1),
            stale("b.md", "x", 10),
            stale("c.md", "x", 0),
            stale("d.md", "x", 5),
        ];
        sort_by_staleness(&mut refs);

        let days: Vec<u64> = refs.iter().map(|r| r.staleness_days).collect();
        assert_eq!(days, vec![10, 5, 1, 0]);
    }
}
