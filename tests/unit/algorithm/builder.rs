//! Tests for build orchestration with stand-in collaborators

#[cfg(test)]
mod tests {
    use photomosaic::algorithm::builder::{
        BuildObserver, CanvasPersister, ElementDecoder, MosaicBuilder, MosaicConfig,
        TemplateDecoder, TemplateSample,
    };
    use photomosaic::algorithm::library::{ElementImage, ElementLibrary};
    use photomosaic::color::Rgb;
    use photomosaic::spatial::{Canvas, ColorGrid};
    use photomosaic::{MosaicError, Result};
    use std::cell::{Cell, RefCell};
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedTemplate {
        sample: TemplateSample,
        calls: Cell<usize>,
    }

    impl FixedTemplate {
        fn new(width: usize, height: usize, rows: &[Vec<Rgb>]) -> Self {
            Self {
                sample: TemplateSample {
                    width,
                    height,
                    grid: ColorGrid::from_rows(rows).unwrap(),
                },
                calls: Cell::new(0),
            }
        }
    }

    impl TemplateDecoder for FixedTemplate {
        fn decode_template(&self, _path: &Path, _resolution: usize) -> Result<TemplateSample> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.sample.clone())
        }
    }

    struct FixedElements(Vec<Rgb>);

    impl ElementDecoder for FixedElements {
        fn decode_elements(
            &self,
            _directory: &Path,
            element_size: usize,
        ) -> Result<ElementLibrary> {
            let elements = self
                .0
                .iter()
                .map(|&color| ElementImage::solid(element_size, color))
                .collect::<Result<Vec<_>>>()?;
            ElementLibrary::from_elements(element_size, elements)
        }
    }

    struct WrongSizeElements;

    impl ElementDecoder for WrongSizeElements {
        fn decode_elements(
            &self,
            _directory: &Path,
            element_size: usize,
        ) -> Result<ElementLibrary> {
            let size = element_size + 1;
            ElementLibrary::from_elements(size, vec![ElementImage::solid(size, Rgb::default())?])
        }
    }

    #[derive(Default)]
    struct RecordingPersister {
        saved: RefCell<Vec<(PathBuf, usize, usize)>>,
    }

    impl CanvasPersister for RecordingPersister {
        fn persist(&self, canvas: &Canvas, path: &Path) -> Result<()> {
            self.saved
                .borrow_mut()
                .push((path.to_path_buf(), canvas.width(), canvas.height()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct Events {
        elements: AtomicUsize,
        grid_cells: AtomicUsize,
        rows: AtomicUsize,
    }

    impl BuildObserver for Events {
        fn elements_loaded(&self, count: usize) {
            self.elements.store(count, Ordering::SeqCst);
        }

        fn template_sampled(&self, grid_width: usize, grid_height: usize) {
            self.grid_cells
                .store(grid_width * grid_height, Ordering::SeqCst);
        }

        fn row_completed(&self, _y: usize) {
            self.rows.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config(resolution: usize, element_size: usize) -> MosaicConfig {
        MosaicConfig::new("template.png", resolution, "elements", element_size).unwrap()
    }

    // Tests configuration keeps its four parameters
    #[test]
    fn test_config_accessors() {
        let config = config(5, 12);
        assert_eq!(config.template_path(), Path::new("template.png"));
        assert_eq!(config.resolution(), 5);
        assert_eq!(config.element_directory(), Path::new("elements"));
        assert_eq!(config.element_size(), 12);
    }

    // Tests zero resolution and element size are rejected
    #[test]
    fn test_config_validation() {
        let zero_resolution = MosaicConfig::new("t.png", 0, "e", 10).unwrap_err();
        assert!(matches!(
            zero_resolution,
            MosaicError::InvalidParameter {
                parameter: "resolution",
                ..
            }
        ));

        let zero_size = MosaicConfig::new("t.png", 10, "e", 0).unwrap_err();
        assert!(matches!(
            zero_size,
            MosaicError::InvalidParameter {
                parameter: "element_size",
                ..
            }
        ));
    }

    // Tests a full build with stand-in decoders
    #[test]
    fn test_build_mosaic() {
        let template = FixedTemplate::new(
            20,
            10,
            &[vec![Rgb::new(250, 250, 250), Rgb::new(5, 5, 5)]],
        );
        let builder = MosaicBuilder::with_decoders(
            template,
            FixedElements(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]),
        );

        let canvas = builder.build_mosaic(&config(10, 3)).unwrap();

        assert_eq!((canvas.width(), canvas.height()), (6, 3));
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(255, 255, 255)));
        assert_eq!(canvas.pixel(5, 2), Some(Rgb::new(0, 0, 0)));
    }

    // Tests an empty element directory fails before the template is decoded
    #[test]
    fn test_build_empty_library() {
        let template = FixedTemplate::new(1, 1, &[vec![Rgb::default()]]);
        let builder = MosaicBuilder::with_decoders(template, FixedElements(Vec::new()));

        let result = builder.build_mosaic(&config(1, 4));

        assert!(matches!(result, Err(MosaicError::EmptyLibrary)));
    }

    // Tests the template decoder is skipped when the library is empty
    #[test]
    fn test_empty_library_skips_template() {
        let template = FixedTemplate::new(1, 1, &[vec![Rgb::default()]]);
        let elements = FixedElements(Vec::new());
        let builder = MosaicBuilder::with_decoders(&template, &elements);

        assert!(builder.build_mosaic(&config(1, 4)).is_err());
        assert_eq!(template.calls.get(), 0);
    }

    // Tests tiles of the wrong size are refused
    #[test]
    fn test_build_element_size_mismatch() {
        let template = FixedTemplate::new(1, 1, &[vec![Rgb::default()]]);
        let builder = MosaicBuilder::with_decoders(template, WrongSizeElements);

        let result = builder.build_mosaic(&config(1, 4));

        assert!(matches!(result, Err(MosaicError::InvalidSourceData { .. })));
    }

    // Tests a grid that does not cover the template is refused
    #[test]
    fn test_build_grid_shape_mismatch() {
        // 25 pixels at resolution 10 needs 3 columns, not 2
        let template = FixedTemplate::new(25, 10, &[vec![Rgb::default(), Rgb::default()]]);
        let builder = MosaicBuilder::with_decoders(template, FixedElements(vec![Rgb::default()]));

        let result = builder.build_mosaic(&config(10, 2));

        assert!(matches!(result, Err(MosaicError::InvalidSourceData { .. })));
    }

    // Tests observer notifications and persistence of the finished canvas
    #[test]
    fn test_build_and_save() {
        let template = FixedTemplate::new(
            4,
            4,
            &[
                vec![Rgb::new(10, 0, 0), Rgb::new(0, 10, 0)],
                vec![Rgb::new(0, 0, 10), Rgb::new(10, 10, 10)],
            ],
        );
        let builder = MosaicBuilder::with_decoders(
            template,
            FixedElements(vec![Rgb::new(0, 0, 0), Rgb::new(9, 9, 9), Rgb::new(1, 1, 1)]),
        )
        .parallel(true);
        let persister = RecordingPersister::default();
        let events = Events::default();

        let composition = builder
            .build_and_save(&config(2, 5), Path::new("out/mosaic.png"), &persister, &events)
            .unwrap();

        assert_eq!((composition.canvas.width(), composition.canvas.height()), (10, 10));
        assert_eq!(
            persister.saved.borrow().as_slice(),
            &[(PathBuf::from("out/mosaic.png"), 10, 10)]
        );
        assert_eq!(events.elements.load(Ordering::SeqCst), 3);
        assert_eq!(events.grid_cells.load(Ordering::SeqCst), 4);
        assert_eq!(events.rows.load(Ordering::SeqCst), 2);
    }

    // Tests nothing is persisted when the build fails
    #[test]
    fn test_build_and_save_failure_writes_nothing() {
        let template = FixedTemplate::new(1, 1, &[vec![Rgb::default()]]);
        let builder = MosaicBuilder::with_decoders(template, FixedElements(Vec::new()));
        let persister = RecordingPersister::default();

        let result = builder.build_and_save(&config(1, 2), Path::new("x.png"), &persister, &());

        assert!(result.is_err());
        assert!(persister.saved.borrow().is_empty());
    }
}
