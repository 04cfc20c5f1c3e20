//! Tests for best-fit search, its early-exit bound and tie breaking

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tilemosaic::algorithm::best_fit::{best_fit, sum_of_squared_differences};

    fn solid(pixels: usize, rgb: [u8; 3]) -> Vec<u8> {
        rgb.iter().copied().cycle().take(pixels * 3).collect()
    }

    fn random_pixels(rng: &mut StdRng, pixels: usize) -> Vec<u8> {
        (0..pixels * 3).map(|_| rng.random::<u8>()).collect()
    }

    // Brute force reference without early exit
    fn brute_force_minimum(cell: &[u8], candidates: &[Vec<u8>]) -> u64 {
        candidates
            .iter()
            .map(|candidate| sum_of_squared_differences(cell, candidate))
            .min()
            .unwrap_or(u64::MAX)
    }

    // Tests squared difference sums every channel
    // Verified by summing absolute differences instead
    #[test]
    fn test_sum_of_squared_differences() {
        let a = vec![10, 20, 30, 0, 0, 0];
        let b = vec![13, 16, 30, 1, 2, 3];

        assert_eq!(sum_of_squared_differences(&a, &b), 9 + 16 + 1 + 4 + 9);
        assert_eq!(sum_of_squared_differences(&a, &a), 0);
    }

    // Tests extreme channel values do not overflow
    // Verified by accumulating in u16
    #[test]
    fn test_sum_of_squared_differences_extremes() {
        let black = solid(25, [0, 0, 0]);
        let white = solid(25, [255, 255, 255]);

        assert_eq!(
            sum_of_squared_differences(&black, &white),
            25 * 3 * 255 * 255
        );
    }

    // Tests empty candidate list yields no match
    // Verified by defaulting to index zero
    #[test]
    fn test_best_fit_no_candidates() {
        let cell = solid(4, [1, 2, 3]);
        let candidates: Vec<Vec<u8>> = Vec::new();

        assert_eq!(best_fit(&cell, &candidates), None);
    }

    // Tests closest candidate is selected
    // Verified by picking the maximum difference
    #[test]
    fn test_best_fit_picks_closest() {
        let cell = solid(4, [200, 10, 10]);
        let candidates = vec![
            solid(4, [0, 0, 255]),
            solid(4, [255, 0, 0]),
            solid(4, [0, 255, 0]),
        ];

        assert_eq!(best_fit(&cell, &candidates), Some(1));
    }

    // Tests equal differences keep the earliest candidate
    // Verified by using <= when updating the best index
    #[test]
    fn test_best_fit_tie_keeps_lowest_index() {
        let cell = solid(4, [100, 100, 100]);
        let candidates = vec![
            solid(4, [0, 0, 0]),
            solid(4, [110, 100, 100]),
            solid(4, [90, 100, 100]),
            solid(4, [100, 110, 100]),
        ];

        assert_eq!(best_fit(&cell, &candidates), Some(1));
    }

    // Tests identical candidates later in the list do not displace an exact match
    // Verified by resetting the bound after an exact match
    #[test]
    fn test_best_fit_exact_match_duplicates() {
        let cell = solid(9, [42, 42, 42]);
        let candidates = vec![solid(9, [0, 0, 0]), cell.clone(), cell.clone()];

        assert_eq!(best_fit(&cell, &candidates), Some(1));
    }

    // Tests early exit never changes the winner compared to full evaluation
    // Verified by returning the bail-out value instead of the partial sum
    #[test]
    fn test_best_fit_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let pixels = rng.random_range(1..=16);
            let candidate_count = rng.random_range(1..=12);
            let cell = random_pixels(&mut rng, pixels);
            let candidates: Vec<Vec<u8>> = (0..candidate_count)
                .map(|_| random_pixels(&mut rng, pixels))
                .collect();

            let index = best_fit(&cell, &candidates).unwrap();
            let chosen = sum_of_squared_differences(&cell, &candidates[index]);
            let minimum = brute_force_minimum(&cell, &candidates);

            assert_eq!(chosen, minimum);
            // Lowest index among the minima
            let first_minimum = candidates
                .iter()
                .position(|c| sum_of_squared_differences(&cell, c) == minimum)
                .unwrap();
            assert_eq!(index, first_minimum);
        }
    }

    // Tests repeated searches agree
    // Verified by shuffling candidates between calls
    #[test]
    fn test_best_fit_deterministic() {
        let mut rng = StdRng::seed_from_u64(99);
        let cell = random_pixels(&mut rng, 25);
        let candidates: Vec<Vec<u8>> = (0..50).map(|_| random_pixels(&mut rng, 25)).collect();

        let first = best_fit(&cell, &candidates);
        for _ in 0..10 {
            assert_eq!(best_fit(&cell, &candidates), first);
        }
    }

    // Tests image buffers can be used directly as candidates
    // Verified by restricting candidates to byte vectors
    #[test]
    fn test_best_fit_accepts_images() {
        let candidates = vec![
            RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])),
            RgbImage::from_pixel(2, 2, Rgb([250, 250, 250])),
        ];
        let cell = solid(4, [240, 240, 240]);

        assert_eq!(best_fit(&cell, &candidates), Some(1));
    }
}
