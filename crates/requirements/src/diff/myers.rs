//! Character-level shortest edit script
//!
//! Implements Myers' O(ND) algorithm over `char`s. The common prefix and
//! suffix are stripped before the search, and every changed region is
//! normalized to "deleted text, then inserted text" so that the writer
//! sees at most one deletion and one insertion between equal runs.

/// Edit distances beyond this fall back to replacing the whole changed
/// region.
const MAX_EDIT_DISTANCE: usize = 1024;

/// The operation of an [`Edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Text present in both values.
    Equal,
    /// Text present only in the actual value.
    Delete,
    /// Text present only in the expected value.
    Insert,
}

/// A run of characters sharing one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The operation.
    pub kind: EditKind,
    /// The characters affected.
    pub text: String,
}

impl Edit {
    fn new(kind: EditKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Computes the edits that turn `actual` into `expected`.
pub fn edit_script(actual: &str, expected: &str) -> Vec<Edit> {
    let actual: Vec<char> = actual.chars().collect();
    let expected: Vec<char> = expected.chars().collect();

    let prefix = actual
        .iter()
        .zip(&expected)
        .take_while(|(a, e)| a == e)
        .count();
    let suffix = actual[prefix..]
        .iter()
        .rev()
        .zip(expected[prefix..].iter().rev())
        .take_while(|(a, e)| a == e)
        .count();

    let actual_middle = &actual[prefix..actual.len() - suffix];
    let expected_middle = &expected[prefix..expected.len() - suffix];

    let mut steps = Vec::with_capacity(actual.len().max(expected.len()));
    steps.extend(actual[..prefix].iter().map(|c| (EditKind::Equal, *c)));
    match shortest_edit(actual_middle, expected_middle) {
        Some(middle) => steps.extend(middle),
        None => {
            steps.extend(actual_middle.iter().map(|c| (EditKind::Delete, *c)));
            steps.extend(expected_middle.iter().map(|c| (EditKind::Insert, *c)));
        }
    }
    steps.extend(actual[actual.len() - suffix..].iter().map(|c| (EditKind::Equal, *c)));

    coalesce(&steps)
}

/// Groups single-character steps into runs, emitting every changed region
/// as one deletion followed by one insertion.
fn coalesce(steps: &[(EditKind, char)]) -> Vec<Edit> {
    let mut edits = Vec::new();
    let mut equal = String::new();
    let mut deleted = String::new();
    let mut inserted = String::new();

    let flush_changes = |edits: &mut Vec<Edit>, deleted: &mut String, inserted: &mut String| {
        if !deleted.is_empty() {
            edits.push(Edit::new(EditKind::Delete, std::mem::take(deleted)));
        }
        if !inserted.is_empty() {
            edits.push(Edit::new(EditKind::Insert, std::mem::take(inserted)));
        }
    };

    for (kind, c) in steps {
        match kind {
            EditKind::Equal => {
                flush_changes(&mut edits, &mut deleted, &mut inserted);
                equal.push(*c);
            }
            EditKind::Delete | EditKind::Insert => {
                if !equal.is_empty() {
                    edits.push(Edit::new(EditKind::Equal, std::mem::take(&mut equal)));
                }
                if *kind == EditKind::Delete {
                    deleted.push(*c);
                } else {
                    inserted.push(*c);
                }
            }
        }
    }
    flush_changes(&mut edits, &mut deleted, &mut inserted);
    if !equal.is_empty() {
        edits.push(Edit::new(EditKind::Equal, equal));
    }
    edits
}

/// The furthest-reaching x on each diagonal at the start of one round,
/// restricted to the diagonals that round can read.
struct Frontier {
    radius: isize,
    values: Vec<isize>,
}

impl Frontier {
    fn get(&self, diagonal: isize) -> isize {
        self.values[(diagonal + self.radius) as usize]
    }
}

/// Myers' greedy forward search followed by a backtrack over the recorded
/// frontiers. Returns `None` when the edit distance exceeds
/// [`MAX_EDIT_DISTANCE`].
fn shortest_edit(actual: &[char], expected: &[char]) -> Option<Vec<(EditKind, char)>> {
    let n = actual.len() as isize;
    let m = expected.len() as isize;
    let max = n + m;
    if max == 0 {
        return Some(Vec::new());
    }

    let offset = max + 1;
    let mut v = vec![0_isize; (2 * max + 3) as usize];
    let mut trace: Vec<Frontier> = Vec::new();
    let limit = max.min(MAX_EDIT_DISTANCE as isize);

    let mut found = false;
    'search: for d in 0..=limit {
        let radius = d + 1;
        trace.push(Frontier {
            radius,
            values: v[(offset - radius) as usize..=(offset + radius) as usize].to_vec(),
        });

        let mut k = -d;
        while k <= d {
            let index = (k + offset) as usize;
            let mut x = if k == -d || (k != d && v[index - 1] < v[index + 1]) {
                v[index + 1]
            } else {
                v[index - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && actual[x as usize] == expected[y as usize] {
                x += 1;
                y += 1;
            }
            v[index] = x;
            if x >= n && y >= m {
                found = true;
                break 'search;
            }
            k += 2;
        }
    }
    if !found {
        return None;
    }

    let mut steps = Vec::new();
    let (mut x, mut y) = (n, m);
    for (d, frontier) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;
        let previous_k = if k == -d || (k != d && frontier.get(k - 1) < frontier.get(k + 1)) {
            k + 1
        } else {
            k - 1
        };
        let previous_x = frontier.get(previous_k);
        let previous_y = previous_x - previous_k;

        while x > previous_x && y > previous_y {
            steps.push((EditKind::Equal, actual[(x - 1) as usize]));
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if x == previous_x {
                steps.push((EditKind::Insert, expected[(y - 1) as usize]));
            } else {
                steps.push((EditKind::Delete, actual[(x - 1) as usize]));
            }
        }
        x = previous_x;
        y = previous_y;
    }
    steps.reverse();
    Some(steps)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn script(actual: &str, expected: &str) -> Vec<(EditKind, String)> {
        edit_script(actual, expected)
            .into_iter()
            .map(|edit| (edit.kind, edit.text))
            .collect()
    }

    #[test]
    fn test_foosball_ballroom() {
        assert_eq!(
            script("foosball", "ballroom"),
            vec![
                (EditKind::Delete, "foos".to_owned()),
                (EditKind::Equal, "ball".to_owned()),
                (EditKind::Insert, "room".to_owned()),
            ]
        );
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(script("", "text"), vec![(EditKind::Insert, "text".to_owned())]);
        assert_eq!(script("text", ""), vec![(EditKind::Delete, "text".to_owned())]);
        assert!(script("", "").is_empty());
    }

    #[test]
    fn test_equal_strings() {
        assert_eq!(script("same", "same"), vec![(EditKind::Equal, "same".to_owned())]);
    }

    #[test]
    fn test_change_region_is_delete_then_insert() {
        assert_eq!(
            script("abc", "axc"),
            vec![
                (EditKind::Equal, "a".to_owned()),
                (EditKind::Delete, "b".to_owned()),
                (EditKind::Insert, "x".to_owned()),
                (EditKind::Equal, "c".to_owned()),
            ]
        );
    }

    #[test]
    fn test_falls_back_beyond_distance_limit() {
        let actual = "a".repeat(MAX_EDIT_DISTANCE);
        let expected = "b".repeat(MAX_EDIT_DISTANCE);
        assert_eq!(
            script(&actual, &expected),
            vec![(EditKind::Delete, actual.clone()), (EditKind::Insert, expected.clone())]
        );
    }

    fn rebuild(edits: &[Edit], keep: EditKind) -> String {
        edits
            .iter()
            .filter(|edit| edit.kind == EditKind::Equal || edit.kind == keep)
            .map(|edit| edit.text.as_str())
            .collect()
    }

    proptest! {
        #[test]
        fn prop_script_reconstructs_both_sides(actual in "[a-c\n]{0,24}", expected in "[a-c\n]{0,24}") {
            let edits = edit_script(&actual, &expected);
            prop_assert_eq!(rebuild(&edits, EditKind::Delete), actual);
            prop_assert_eq!(rebuild(&edits, EditKind::Insert), expected);
        }

        #[test]
        fn prop_runs_never_repeat_a_kind(actual in "[ab]{0,16}", expected in "[ab]{0,16}") {
            let edits = edit_script(&actual, &expected);
            for pair in edits.windows(2) {
                prop_assert_ne!(pair[0].kind, pair[1].kind);
                prop_assert!(!(pair[0].kind == EditKind::Insert && pair[1].kind == EditKind::Delete));
            }
        }
    }
}
