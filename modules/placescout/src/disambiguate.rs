use std::collections::{HashMap, HashSet};

/// Give every place a unique display name, keeping input order.
///
/// The first occurrence of a name is kept as-is; later occurrences get the
/// occurrence number appended (`"Cafe 2"`, `"Cafe 3"`, ...). If a generated
/// name is already taken by an earlier output, the counter keeps going.
pub fn disambiguate_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut emitted: HashSet<String> = HashSet::with_capacity(names.len());
    let mut unique = Vec::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();
        let count = counts.entry(name).or_insert(0);
        *count += 1;

        let mut candidate = if *count == 1 {
            name.to_string()
        } else {
            format!("{name} {count}")
        };
        while emitted.contains(&candidate) {
            *count += 1;
            candidate = format!("{name} {count}");
        }

        emitted.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}
