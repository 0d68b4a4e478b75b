//! Tests for the PNG layer-sheet preview

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use wfc3d::algorithm::bitset::ModuleSet;
    use wfc3d::algorithm::solution::Solution;
    use wfc3d::io::configuration::PREVIEW_CELL_PIXELS;
    use wfc3d::io::image::{export_layers_as_png, module_color, render_layers};
    use wfc3d::rules::{ConstraintRegistry, Module};
    use wfc3d::spatial::{Grid, GridSize};

    fn solution() -> Solution {
        let registry = ConstraintRegistry::unconstrained(&Module::from_names(&["A", "B"])).unwrap();
        let mut grid = Grid::new(GridSize::new(3, 2, 2).unwrap(), 2);
        grid.set_domain([0, 0, 0], ModuleSet::singleton(2, 0));
        grid.set_domain([2, 1, 1], ModuleSet::singleton(2, 1));
        for cell in GridSize::new(3, 2, 2).unwrap().coordinates() {
            if cell != [0, 0, 0] && cell != [2, 1, 1] {
                grid.set_domain(cell, ModuleSet::new(2));
            }
        }
        Solution::from_grid(&grid, &registry)
    }

    // Tests module colors are opaque and distinct for nearby indices
    // Verified by using a constant hue
    #[test]
    fn test_module_colors_distinct() {
        let colors: Vec<[u8; 4]> = (0..8).map(module_color).collect();
        for (i, a) in colors.iter().enumerate() {
            assert_eq!(a[3], 255);
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    // Tests the sheet places layers side by side with a one-cell gap
    // Verified by dropping the gap between layers
    #[test]
    fn test_sheet_dimensions() {
        let image = render_layers(&solution());
        let cell = PREVIEW_CELL_PIXELS;
        assert_eq!(image.width(), (3 * cell + cell) * 2 - cell);
        assert_eq!(image.height(), 2 * cell);
    }

    // Tests assigned cells are painted and empty cells stay transparent
    // Verified by drawing y without flipping it
    #[test]
    fn test_cells_painted_with_y_flipped() {
        let image = render_layers(&solution());
        let cell = PREVIEW_CELL_PIXELS;

        // [0, 0, 0]: first layer, bottom row
        assert_eq!(image.get_pixel(0, cell).0, module_color(0));
        // [2, 1, 1]: second layer, top row
        let x = (3 * cell + cell) + 2 * cell;
        assert_eq!(image.get_pixel(x, 0).0, module_color(1));
        // [1, 0, 0] is empty
        assert_eq!(image.get_pixel(cell, cell).0, [0, 0, 0, 0]);
    }

    // Tests the preview is written to disk as a PNG
    // Verified by skipping the save call
    #[test]
    fn test_export_layers_as_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("previews").join("tower_layers.png");
        export_layers_as_png(&solution(), &path).expect("preview written");

        let loaded = image::open(&path).expect("png readable").to_rgba8();
        assert_eq!(loaded, render_layers(&solution()));
    }
}
