//! Tests for progress bar bookkeeping

#[cfg(test)]
mod tests {
    use std::path::Path;
    use tilemosaic::io::progress::ProgressManager;

    // Tests updates before a bar is started are ignored
    // Verified by creating bars lazily on first update
    #[test]
    fn test_updates_without_bars() {
        let progress = ProgressManager::default();

        progress.tile_processed(Path::new("tile.png"));
        progress.cell_placed();
        progress.finish_tiles(0);
        progress.finish();

        assert_eq!(progress.cells_placed(), 0);
    }

    // Tests the placement bar counts every placed cell
    // Verified by incrementing by two
    #[test]
    fn test_cells_placed_counts() {
        let mut progress = ProgressManager::new();
        progress.start_tiles(3);
        for name in ["a.png", "b.jpg", "c.gif"] {
            progress.tile_processed(Path::new(name));
        }
        progress.finish_tiles(2);

        progress.start_cells(10);
        for _ in 0..4 {
            progress.cell_placed();
        }

        assert_eq!(progress.cells_placed(), 4);

        // A partial run keeps its count instead of jumping to the total
        progress.finish();
        assert_eq!(progress.cells_placed(), 4);
    }

    // Tests the placement bar can be shared with another thread
    // Verified by requiring mutable access to record placements
    #[test]
    fn test_cells_placed_across_threads() {
        let mut progress = ProgressManager::new();
        progress.start_cells(100);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        progress.cell_placed();
                    }
                });
            }
        });

        assert_eq!(progress.cells_placed(), 100);
    }
}
