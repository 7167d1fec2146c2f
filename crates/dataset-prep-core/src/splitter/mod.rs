//! Deterministic partitioning of a file list into named subsets.
//!
//! The shuffle is a seeded Fisher-Yates (`SliceRandom::shuffle` over
//! `StdRng`), so the same seed, input order, and list length always produce
//! the same ordering. Subsets are then sliced in configuration order: every
//! subset takes `floor(n * ratio)` items except the last, which absorbs the
//! rounding remainder. The result is a strict disjoint cover of the input.

use crate::error::Error;
use crate::scanner::FileEntry;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

const RATIO_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct SubsetAssignment {
    pub name: String,
    pub files: Vec<FileEntry>,
}

/// Mapping from every input file to exactly one named subset, in the order
/// the subsets were configured.
#[derive(Debug, Clone)]
pub struct SplitAssignment {
    pub subsets: Vec<SubsetAssignment>,
}

impl SplitAssignment {
    /// Per-subset counts, used by the preview mode.
    pub fn counts(&self) -> Vec<(String, usize)> {
        self.subsets
            .iter()
            .map(|s| (s.name.clone(), s.files.len()))
            .collect()
    }

    pub fn total_files(&self) -> usize {
        self.subsets.iter().map(|s| s.files.len()).sum()
    }
}

/// Fail fast with `InvalidRatio` unless the ratios are non-negative and sum
/// to 1.0 within epsilon. Runs before any file is touched.
pub fn validate_ratios(subsets: &[(String, f64)]) -> Result<(), Error> {
    if let Some((_, ratio)) = subsets.iter().find(|(_, r)| *r < 0.0) {
        return Err(Error::InvalidRatio(*ratio));
    }
    let total: f64 = subsets.iter().map(|(_, r)| r).sum();
    if (total - 1.0).abs() >= RATIO_EPSILON {
        return Err(Error::InvalidRatio(total));
    }
    Ok(())
}

/// Shuffle `files` with the seeded generator and slice into the named
/// subsets. Subset order in `subsets` determines slice order; the last
/// subset takes all remaining items.
pub fn partition(
    mut files: Vec<FileEntry>,
    seed: u64,
    subsets: &[(String, f64)],
) -> Result<SplitAssignment, Error> {
    validate_ratios(subsets)?;
    if files.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    files.shuffle(&mut rng);

    let n = files.len();
    let mut assigned = Vec::with_capacity(subsets.len());
    let mut cursor = 0usize;

    for (i, (name, ratio)) in subsets.iter().enumerate() {
        let take = if i == subsets.len() - 1 {
            n - cursor
        } else {
            (((n as f64) * ratio).floor() as usize).min(n - cursor)
        };
        assigned.push(SubsetAssignment {
            name: name.clone(),
            files: files[cursor..cursor + take].to_vec(),
        });
        cursor += take;
    }

    debug!(
        "Partitioned {} files with seed {}: {:?}",
        n,
        seed,
        assigned
            .iter()
            .map(|s| (s.name.as_str(), s.files.len()))
            .collect::<Vec<_>>(),
    );

    Ok(SplitAssignment { subsets: assigned })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn entries(n: usize) -> Vec<FileEntry> {
        (0..n)
            .map(|i| FileEntry {
                path: PathBuf::from(format!("file_{:03}.jpg", i)),
                file_size: 1,
                extension: "jpg".to_string(),
            })
            .collect()
    }

    fn train_val_test() -> Vec<(String, f64)> {
        vec![
            ("train".to_string(), 0.7),
            ("val".to_string(), 0.2),
            ("test".to_string(), 0.1),
        ]
    }

    #[test]
    fn test_rounding_even_division() {
        let assignment = partition(entries(10), 42, &train_val_test()).unwrap();
        assert_eq!(
            assignment.counts(),
            vec![
                ("train".to_string(), 7),
                ("val".to_string(), 2),
                ("test".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_last_subset_absorbs_remainder() {
        // n=7: floor(4.9)=4, floor(1.4)=1, test takes the remaining 2
        let assignment = partition(entries(7), 42, &train_val_test()).unwrap();
        assert_eq!(
            assignment.counts(),
            vec![
                ("train".to_string(), 4),
                ("val".to_string(), 1),
                ("test".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_disjoint_cover() {
        let input = entries(23);
        let expected: HashSet<PathBuf> = input.iter().map(|f| f.path.clone()).collect();

        let assignment = partition(input, 7, &train_val_test()).unwrap();
        let mut seen = HashSet::new();
        for subset in &assignment.subsets {
            for file in &subset.files {
                assert!(seen.insert(file.path.clone()), "file assigned twice");
            }
        }
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_same_seed_same_assignment() {
        let a = partition(entries(50), 1234, &train_val_test()).unwrap();
        let b = partition(entries(50), 1234, &train_val_test()).unwrap();
        for (sa, sb) in a.subsets.iter().zip(b.subsets.iter()) {
            assert_eq!(sa.files, sb.files);
        }
    }

    #[test]
    fn test_different_seed_shuffles_differently() {
        let a = partition(entries(50), 1, &train_val_test()).unwrap();
        let b = partition(entries(50), 2, &train_val_test()).unwrap();
        let flat = |s: &SplitAssignment| -> Vec<PathBuf> {
            s.subsets
                .iter()
                .flat_map(|sub| sub.files.iter().map(|f| f.path.clone()))
                .collect()
        };
        assert_ne!(flat(&a), flat(&b));
    }

    #[test]
    fn test_invalid_ratio_sum_fails_fast() {
        let subsets = vec![
            ("train".to_string(), 0.7),
            ("val".to_string(), 0.2),
            ("test".to_string(), 0.15),
        ];
        assert!(matches!(
            partition(entries(10), 42, &subsets),
            Err(Error::InvalidRatio(_))
        ));
    }

    #[test]
    fn test_negative_ratio_fails() {
        let subsets = vec![("train".to_string(), 1.2), ("val".to_string(), -0.2)];
        assert!(matches!(
            validate_ratios(&subsets),
            Err(Error::InvalidRatio(_))
        ));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            partition(Vec::new(), 42, &train_val_test()),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_single_subset_takes_everything() {
        let subsets = vec![("all".to_string(), 1.0)];
        let assignment = partition(entries(5), 9, &subsets).unwrap();
        assert_eq!(assignment.counts(), vec![("all".to_string(), 5)]);
    }
}
