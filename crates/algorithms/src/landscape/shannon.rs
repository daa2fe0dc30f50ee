//! Shannon entropy and evenness of a class tally

use focalscape_core::{Error, Result};

/// Shannon entropy `H = -sum(p_c * ln(p_c))` with `p_c = tally[c] / denominator`.
///
/// Empty classes contribute nothing. The denominator is taken as given and
/// need not equal the tally total.
pub fn shannon_entropy(tally: &[usize], denominator: usize) -> Result<f64> {
    if denominator == 0 {
        return Err(Error::EmptyNeighborhood);
    }

    let n = denominator as f64;
    let h: f64 = tally
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / n;
            -p * p.ln()
        })
        .sum();

    Ok(h)
}

/// Shannon evenness `H / ln(num_classes)`.
///
/// 1 when every class is equally represented, 0 when a single class fills
/// the whole denominator.
pub fn shannon_evenness_score(tally: &[usize], denominator: usize, num_classes: usize) -> Result<f64> {
    if num_classes < 2 {
        return Err(Error::DegenerateClassSet {
            classes: num_classes,
        });
    }
    Ok(shannon_entropy(tally, denominator)? / (num_classes as f64).ln())
}
