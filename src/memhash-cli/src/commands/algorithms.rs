//! Algorithms command handler

use memhash::Algorithm;

/// Handle the Algorithms command
pub fn handle(default: Algorithm) {
    for algorithm in Algorithm::ALL {
        let marker = if algorithm == default { " (default)" } else { "" };
        println!(
            "{:>2}  {:<8} {} bytes{}",
            algorithm.id(),
            algorithm.name(),
            algorithm.digest_len(),
            marker
        );
    }
}
