use ed_community::AbundanceVector;

/// Preston octave binning of a species abundance distribution.
///
/// Bin k counts the species whose abundance falls in [2^k, 2^(k+1)),
/// i.e. bin 0 holds singletons, bin 1 the counts 2-3, bin 2 the counts
/// 4-7, and so on. The returned vector ends at the last occupied bin.
pub fn preston_octaves(sample: &AbundanceVector) -> Vec<u32> {
    let mut bins = Vec::new();
    for (_, n) in sample.iter_present() {
        let octave = n.ilog2() as usize;
        if bins.len() <= octave {
            bins.resize(octave + 1, 0);
        }
        bins[octave] += 1;
    }
    bins
}

/// Lower bound of octave k, for labelling plots and tables.
pub fn octave_lower_bound(octave: usize) -> u32 {
    1u32 << octave
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octave_boundaries() {
        // counts 1 | 2,3 | 4..7 | 8..15
        let av = AbundanceVector::from(vec![1, 2, 3, 4, 7, 8, 15]);
        assert_eq!(preston_octaves(&av), vec![1, 2, 2, 2]);
    }

    #[test]
    fn test_octaves_ignore_absent_species() {
        let av = AbundanceVector::from(vec![0, 1, 0, 1]);
        assert_eq!(preston_octaves(&av), vec![2]);
    }

    #[test]
    fn test_empty_sample_has_no_bins() {
        let av = AbundanceVector::from(vec![0, 0]);
        assert!(preston_octaves(&av).is_empty());
    }

    #[test]
    fn test_lower_bounds() {
        assert_eq!(octave_lower_bound(0), 1);
        assert_eq!(octave_lower_bound(3), 8);
    }
}
