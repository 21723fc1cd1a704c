//! Renders activation snapshots as grayscale PNG frames.
//!
//! Two layouts are supported:
//! - `Grid` — square input and output layers of equal size are drawn side by
//!   side as `side × side` cell grids (input left, output right).
//! - `Bars` — everything else: the canvas is filled with the first output's
//!   intensity and each input becomes a horizontal bar across the middle.

use std::path::{Path, PathBuf};

use image::{GrayImage, ImageResult, Luma};

use ferrite_backprop::{Snapshot, Topology};

/// Maps an activation in [0, 1] to a gray level; out-of-range values are
/// clamped and NaN renders black.
pub fn intensity(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Grid { side: usize },
    Bars,
}

impl Layout {
    pub fn for_topology(topology: &Topology) -> Layout {
        let n = topology.input_count;
        let side = (n as f64).sqrt().round() as usize;
        if n == topology.output_count && side * side == n {
            Layout::Grid { side }
        } else {
            Layout::Bars
        }
    }
}

pub struct FrameRenderer {
    topology: Topology,
    layout: Layout,
    canvas: u32,
}

impl FrameRenderer {
    pub fn new(topology: Topology, canvas: u32) -> FrameRenderer {
        FrameRenderer { layout: Layout::for_topology(&topology), topology, canvas }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn render(&self, snapshot: &Snapshot) -> GrayImage {
        match self.layout {
            Layout::Grid { side } => self.render_grid(snapshot, side),
            Layout::Bars => self.render_bars(snapshot),
        }
    }

    /// Renders `snapshot` into `dir/{iteration:06}.png` and returns the path.
    pub fn save(&self, snapshot: &Snapshot, dir: &Path) -> ImageResult<PathBuf> {
        let path = dir.join(format!("{:06}.png", snapshot.iteration));
        self.render(snapshot).save(&path)?;
        Ok(path)
    }

    // -----------------------------------------------------------------------
    // Layouts
    // -----------------------------------------------------------------------

    fn render_grid(&self, snapshot: &Snapshot, side: usize) -> GrayImage {
        let c = self.canvas;
        let cell = c / side as u32;
        let mut img = GrayImage::from_pixel(c * 2, c, Luma([255]));
        let inputs = self.topology.inputs().start;
        let outputs = self.topology.outputs().start;

        for x in 0..side {
            for y in 0..side {
                let node = x * side + y;
                let (x0, y0) = (x as u32 * cell, y as u32 * cell);
                let (x1, y1) = (x0 + cell, y0 + cell);

                let shade = intensity(snapshot.values[inputs + node]);
                fill_rect(&mut img, x0, y0, x1, y1, shade);
                stroke_rect(&mut img, x0, y0, x1, y1, 0);

                let shade = intensity(snapshot.values[outputs + node]);
                fill_rect(&mut img, x0 + c, y0, x1 + c, y1, shade);
                stroke_rect(&mut img, x0 + c, y0, x1 + c, y1, 0);
            }
        }
        img
    }

    fn render_bars(&self, snapshot: &Snapshot) -> GrayImage {
        let c = self.canvas;
        let background = intensity(snapshot.values[self.topology.outputs().start]);
        let mut img = GrayImage::from_pixel(c, c, Luma([background]));

        let (left, right) = (c / 5, c * 4 / 5);
        let inputs = self.topology.inputs();
        let band = (right - left) / inputs.len() as u32;
        let gap = band / 6;

        for (i, node) in inputs.enumerate() {
            let top = left + i as u32 * band + gap / 2;
            let bottom = top + band - gap;
            fill_rect(&mut img, left, top, right, bottom, intensity(snapshot.values[node]));
        }
        img
    }
}

// ---------------------------------------------------------------------------
// Drawing helpers (half-open rectangles, clipped to the image)
// ---------------------------------------------------------------------------

fn fill_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, shade: u8) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, Luma([shade]));
        }
    }
}

fn stroke_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, shade: u8) {
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    fill_rect(img, x0, y0, x1, y0 + 1, shade);
    fill_rect(img, x0, y1 - 1, x1, y1, shade);
    fill_rect(img, x0, y0, x0 + 1, y1, shade);
    fill_rect(img, x1 - 1, y0, x1, y1, shade);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_snapshot(topology: &Topology) -> Snapshot {
        let mut values = vec![0.0; topology.node_count()];
        // first input on, its output half lit, everything else dark
        values[topology.inputs().start] = 1.0;
        values[topology.outputs().start] = 0.5;
        Snapshot { iteration: 42, values, sse: 0.0 }
    }

    #[test]
    fn intensity_maps_and_clamps() {
        assert_eq!(intensity(0.0), 0);
        assert_eq!(intensity(1.0), 255);
        assert_eq!(intensity(0.5), 127);
        assert_eq!(intensity(2.0), 255);
        assert_eq!(intensity(-1.0), 0);
    }

    #[test]
    fn picks_layout_from_topology() {
        let grid = Topology::new(16, 5, 16).unwrap();
        assert_eq!(Layout::for_topology(&grid), Layout::Grid { side: 4 });
        let xor = Topology::new(2, 2, 1).unwrap().with_sentinel();
        assert_eq!(Layout::for_topology(&xor), Layout::Bars);
        let lopsided = Topology::new(9, 3, 4).unwrap();
        assert_eq!(Layout::for_topology(&lopsided), Layout::Bars);
    }

    #[test]
    fn grid_frame_shows_inputs_left_and_outputs_right() {
        let topology = Topology::new(4, 2, 4).unwrap();
        let renderer = FrameRenderer::new(topology, 100);
        let img = renderer.render(&grid_snapshot(&topology));

        assert_eq!(img.dimensions(), (200, 100));
        // cell centres: node 0 at column 0 row 0, node 1 at column 0 row 1
        assert_eq!(img.get_pixel(25, 25)[0], 255);
        assert_eq!(img.get_pixel(25, 75)[0], 0);
        assert_eq!(img.get_pixel(125, 25)[0], 127);
        assert_eq!(img.get_pixel(125, 75)[0], 0);
        // border
        assert_eq!(img.get_pixel(0, 10)[0], 0);
    }

    #[test]
    fn bar_frame_uses_output_as_background() {
        let topology = Topology::new(2, 2, 1).unwrap().with_sentinel();
        let renderer = FrameRenderer::new(topology, 500);
        let mut values = vec![0.0; topology.node_count()];
        values[1] = 1.0;
        values[2] = 0.0;
        values[5] = 1.0;
        let img = renderer.render(&Snapshot { iteration: 0, values, sse: 0.0 });

        assert_eq!(img.dimensions(), (500, 500));
        assert_eq!(img.get_pixel(10, 10)[0], 255);
        // first bar spans y 112..237, second 262..387
        assert_eq!(img.get_pixel(250, 150)[0], 255);
        assert_eq!(img.get_pixel(250, 300)[0], 0);
    }

    #[test]
    fn save_writes_numbered_png() {
        let dir = tempfile::tempdir().unwrap();
        let topology = Topology::new(4, 2, 4).unwrap();
        let renderer = FrameRenderer::new(topology, 40);

        let path = renderer.save(&grid_snapshot(&topology), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "000042.png");

        let back = image::open(&path).unwrap().to_luma8();
        assert_eq!(back.dimensions(), (80, 40));
    }
}
