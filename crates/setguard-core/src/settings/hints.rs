//! "Maybe you meant" suggestions for unknown setting names

const MAX_HINTS: usize = 3;
const MAX_DISTANCE: usize = 2;

/// Known names close to `name`, best matches first
pub fn similar_names<'a>(name: &str, known: impl Iterator<Item = &'a str>) -> Vec<String> {
	let needle = name.to_lowercase();
	let mut scored: Vec<(usize, &str)> = known
		.filter(|candidate| !candidate.ends_with(".*"))
		.filter_map(|candidate| {
			let lower = candidate.to_lowercase();
			let distance = edit_distance(&needle, &lower);
			if distance <= MAX_DISTANCE {
				Some((distance, candidate))
			} else if needle.len() >= 3 && lower.starts_with(&needle) {
				Some((MAX_DISTANCE + 1, candidate))
			} else {
				None
			}
		})
		.collect();

	scored.sort_unstable();
	scored.into_iter().take(MAX_HINTS).map(|(_, candidate)| candidate.to_string()).collect()
}

/// Levenshtein distance over chars
fn edit_distance(a: &str, b: &str) -> usize {
	let b: Vec<char> = b.chars().collect();
	let mut prev: Vec<usize> = (0..=b.len()).collect();
	let mut cur = vec![0; b.len() + 1];

	for (i, ca) in a.chars().enumerate() {
		cur[0] = i + 1;
		for (j, cb) in b.iter().enumerate() {
			let subst = prev[j] + usize::from(ca != *cb);
			cur[j + 1] = subst.min(prev[j + 1] + 1).min(cur[j] + 1);
		}
		std::mem::swap(&mut prev, &mut cur);
	}

	prev[b.len()]
}


// vim: ts=4
