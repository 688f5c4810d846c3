//! Tests for canvas assembly from a color grid

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::algorithm::builder::BuildObserver;
    use photomosaic::algorithm::compositor::Compositor;
    use photomosaic::algorithm::library::{ElementImage, ElementLibrary};
    use photomosaic::algorithm::matcher::Matcher;
    use photomosaic::color::Rgb;
    use photomosaic::spatial::{Canvas, ColorGrid};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BLACK: Rgb = Rgb::new(0, 0, 0);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    fn library_of(size: usize, colors: &[Rgb]) -> ElementLibrary {
        let elements = colors
            .iter()
            .map(|&color| ElementImage::solid(size, color).unwrap())
            .collect();
        ElementLibrary::from_elements(size, elements).unwrap()
    }

    fn assert_tile(canvas: &Canvas, x0: usize, y0: usize, size: usize, color: Rgb) {
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                assert_eq!(canvas.pixel(x, y), Some(color), "pixel ({x}, {y})");
            }
        }
    }

    #[derive(Default)]
    struct RowCounter {
        rows: AtomicUsize,
        seen: Mutex<Vec<usize>>,
    }

    impl BuildObserver for RowCounter {
        fn row_completed(&self, y: usize) {
            self.rows.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(y);
            }
        }
    }

    struct OutOfRange;

    impl Matcher for OutOfRange {
        fn best_match(&self, library: &ElementLibrary, _target: Rgb) -> photomosaic::Result<usize> {
            Ok(library.len())
        }
    }

    // Tests tiles land at their cell offsets
    #[test]
    fn test_build_places_tiles() {
        let library = library_of(4, &[BLACK, WHITE]);
        let grid = ColorGrid::from_rows(&[vec![Rgb::new(10, 10, 10), Rgb::new(200, 200, 200)]])
            .unwrap();

        let canvas = Compositor::new(&library).build(&grid).unwrap();

        assert_eq!((canvas.width(), canvas.height()), (8, 4));
        assert_tile(&canvas, 0, 0, 4, BLACK);
        assert_tile(&canvas, 4, 0, 4, WHITE);
    }

    // Tests multi-row grids fill every band
    #[test]
    fn test_build_multiple_rows() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        let library = library_of(3, &[red, blue]);
        let grid = ColorGrid::from_rows(&[
            vec![red, blue, red],
            vec![blue, blue, red],
        ])
        .unwrap();

        let canvas = Compositor::new(&library).build(&grid).unwrap();

        assert_eq!((canvas.width(), canvas.height()), (9, 6));
        assert_tile(&canvas, 0, 0, 3, red);
        assert_tile(&canvas, 3, 0, 3, blue);
        assert_tile(&canvas, 6, 0, 3, red);
        assert_tile(&canvas, 0, 3, 3, blue);
        assert_tile(&canvas, 3, 3, 3, blue);
        assert_tile(&canvas, 6, 3, 3, red);
    }

    // Tests tile pixels are copied byte for byte
    #[test]
    fn test_build_copies_raster_verbatim() {
        let raster =
            ndarray::Array3::from_shape_fn((2, 2, 3), |(y, x, c)| (y * 6 + x * 3 + c) as u8);
        let element = ElementImage::new(raster.clone(), Rgb::new(50, 50, 50)).unwrap();
        let library = ElementLibrary::from_elements(2, vec![element]).unwrap();
        let grid = ColorGrid::filled(2, 1, Rgb::default()).unwrap();

        let canvas = Compositor::new(&library).build(&grid).unwrap();

        let left = canvas.pixels().slice(ndarray::s![.., 0..2, ..]).to_owned();
        let right = canvas.pixels().slice(ndarray::s![.., 2..4, ..]).to_owned();
        assert_eq!(left, raster);
        assert_eq!(right, raster);
    }

    // Tests parallel composition produces the same bytes as sequential
    #[test]
    fn test_parallel_matches_sequential() {
        let colors: Vec<Rgb> = (0u8..12)
            .map(|i| Rgb::new(i * 20, 255 - i * 20, (i * 7) % 255))
            .collect();
        let library = library_of(3, &colors);
        let rows: Vec<Vec<Rgb>> = (0u8..9)
            .map(|y| {
                (0u8..11)
                    .map(|x| Rgb::new(x * 23, y * 28, x.wrapping_mul(y)))
                    .collect()
            })
            .collect();
        let grid = ColorGrid::from_rows(&rows).unwrap();

        let sequential = Compositor::new(&library).build(&grid).unwrap();
        let parallel = Compositor::new(&library).parallel(true).build(&grid).unwrap();

        assert_eq!(sequential, parallel);
    }

    // Tests the observer sees every row exactly once
    #[test]
    fn test_compose_reports_rows() {
        let library = library_of(1, &[BLACK]);
        let grid = ColorGrid::filled(3, 5, BLACK).unwrap();

        for parallel in [false, true] {
            let observer = RowCounter::default();
            Compositor::new(&library)
                .parallel(parallel)
                .compose(&grid, &observer)
                .unwrap();

            assert_eq!(observer.rows.load(Ordering::SeqCst), 5);
            let mut seen = observer.seen.lock().unwrap().clone();
            seen.sort_unstable();
            assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        }
    }

    // Tests repeated cell colors are matched once per build
    #[test]
    fn test_compose_cache_stats() {
        let library = library_of(1, &[BLACK, WHITE]);
        let grid = ColorGrid::from_rows(&[vec![BLACK, BLACK, WHITE, BLACK]]).unwrap();

        let composition = Compositor::new(&library).compose(&grid, &()).unwrap();

        assert_eq!(composition.stats.misses, 2);
        assert_eq!(composition.stats.hits, 2);
    }

    // Tests an empty library fails before anything is composed
    #[test]
    fn test_build_empty_library() {
        let library = ElementLibrary::new(4).unwrap();
        let grid = ColorGrid::filled(2, 2, BLACK).unwrap();

        for parallel in [false, true] {
            let observer = RowCounter::default();
            let result = Compositor::new(&library)
                .parallel(parallel)
                .compose(&grid, &observer);
            assert!(matches!(result, Err(MosaicError::EmptyLibrary)));
            assert_eq!(observer.rows.load(Ordering::SeqCst), 0);
        }
    }

    // Tests a matcher returning a bad index is reported as an error
    #[test]
    fn test_custom_matcher_out_of_range() {
        let library = library_of(1, &[BLACK]);
        let grid = ColorGrid::filled(1, 1, BLACK).unwrap();

        let result = Compositor::with_matcher(&library, OutOfRange).build(&grid);
        assert!(matches!(result, Err(MosaicError::Computation { .. })));
    }
}
