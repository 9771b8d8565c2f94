use arrayvec::ArrayVec;
use pathfinding::prelude::astar;

/// The number of single character insertions, deletions and substitutions that turn `a` into `b`.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Box<[char]> = a.chars().collect();
    let b: Box<[char]> = b.chars().collect();

    astar(
        &(0, 0),
        |&(i, j)| {
            let mut successors = ArrayVec::<_, 3>::new();

            if i < a.len() {
                successors.push(((i + 1, j), 1));
            }

            if j < b.len() {
                successors.push(((i, j + 1), 1));
            }

            if i < a.len() && j < b.len() {
                successors.push(((i + 1, j + 1), usize::from(a[i] != b[j])));
            }

            successors
        },
        // At least the difference in length must still be inserted or deleted.
        |&(i, j)| (a.len() - i).abs_diff(b.len() - j),
        |&p| p == (a.len(), b.len()),
    )
    .map_or_else(|| a.len().max(b.len()), |(_, cost)| cost)
}
