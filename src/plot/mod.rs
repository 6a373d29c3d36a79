//! A small figure model (stacked panels of line plots) built from recorded
//! traces, which can be inspected directly or rendered to SVG.

use std::{ops::Range, path::Path};
use plotters::prelude::*;
use crate::error::PlotError;


/// Default figure size in pixels
pub const DEFAULT_FIGSIZE: (u32, u32) = (800, 900);

/// Named line colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineColor {
    Black,
    Yellow,
    Red,
    Orange,
    Brown,
    Pink,
    Green,
    Cyan,
    Blue,
}

impl LineColor {
    /// Red, green and blue components
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            LineColor::Black => (0, 0, 0),
            LineColor::Yellow => (191, 191, 0),
            LineColor::Red => (255, 0, 0),
            LineColor::Orange => (255, 165, 0),
            LineColor::Brown => (165, 42, 42),
            LineColor::Pink => (255, 192, 203),
            LineColor::Green => (0, 128, 0),
            LineColor::Cyan => (0, 191, 191),
            LineColor::Blue => (0, 0, 255),
        }
    }

    fn to_rgb_color(self) -> RGBColor {
        let (r, g, b) = self.rgb();

        RGBColor(r, g, b)
    }
}

/// Corner a legend is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLocation {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl LegendLocation {
    fn to_series_label_position(self) -> SeriesLabelPosition {
        match self {
            LegendLocation::UpperRight => SeriesLabelPosition::UpperRight,
            LegendLocation::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendLocation::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendLocation::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// One plotted trace
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: LineColor,
    /// Legend label, unlabeled lines are left out of the legend
    pub label: Option<String>,
}

/// A single panel of a figure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axes {
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    /// Fixed x range, fitted to the data when absent
    pub xlim: Option<(f64, f64)>,
    /// Fixed y range, fitted to the data when absent
    pub ylim: Option<(f64, f64)>,
    pub lines: Vec<Line>,
    pub legend: Option<LegendLocation>,
}

impl Axes {
    pub fn plot(&mut self, x: &[f64], y: &[f64], color: LineColor, label: Option<&str>) {
        self.lines.push(Line {
            x: x.to_vec(),
            y: y.to_vec(),
            color,
            label: label.map(String::from),
        });
    }

    /// Labels of the plotted lines in drawing order
    pub fn labels(&self) -> Vec<&str> {
        self.lines.iter()
            .filter_map(|line| line.label.as_deref())
            .collect()
    }

    fn data_range(&self, values: impl Fn(&Line) -> &[f64]) -> Option<(f64, f64)> {
        self.lines.iter()
            .flat_map(|line| values(line).iter().copied())
            .filter(|value| value.is_finite())
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((low, high)) => Some((low.min(value), high.max(value))),
            })
    }

    fn x_range(&self) -> Range<f64> {
        padded(self.xlim.or_else(|| self.data_range(|line| line.x.as_slice())))
    }

    fn y_range(&self) -> Range<f64> {
        padded(self.ylim.or_else(|| self.data_range(|line| line.y.as_slice())))
    }
}

// plotters cannot draw an empty range
fn padded(range: Option<(f64, f64)>) -> Range<f64> {
    match range {
        Some((low, high)) if high > low => low..high,
        Some((low, _)) => (low - 1.)..(low + 1.),
        None => 0.0..1.0,
    }
}

/// Panels stacked vertically and sharing an x axis
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Width and height in pixels
    pub size: (u32, u32),
    pub axes: Vec<Axes>,
}

impl Figure {
    /// Creates a figure with `rows` empty panels
    pub fn with_rows(rows: usize, size: Option<(u32, u32)>) -> Self {
        Figure {
            size: size.unwrap_or(DEFAULT_FIGSIZE),
            axes: vec![Axes::default(); rows],
        }
    }

    /// Sets the same x range on every panel
    pub fn share_xlim(&mut self, xlim: (f64, f64)) {
        self.axes.iter_mut().for_each(|axes| axes.xlim = Some(xlim));
    }

    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, plotters::coord::Shift>) -> Result<(), PlotError> {
        root.fill(&WHITE).map_err(backend_error)?;

        let panels = root.split_evenly((self.axes.len().max(1), 1));
        for (area, axes) in panels.iter().zip(self.axes.iter()) {
            let mut builder = ChartBuilder::on(area);
            builder.margin(8u32)
                .x_label_area_size(30u32)
                .y_label_area_size(60u32);
            if let Some(title) = &axes.title {
                builder.caption(title, ("sans-serif", 18).into_font());
            }

            let mut chart = builder
                .build_cartesian_2d(axes.x_range(), axes.y_range())
                .map_err(backend_error)?;

            let mut mesh = chart.configure_mesh();
            if let Some(xlabel) = &axes.xlabel {
                mesh.x_desc(xlabel.as_str());
            }
            if let Some(ylabel) = &axes.ylabel {
                mesh.y_desc(ylabel.as_str());
            }
            mesh.draw().map_err(backend_error)?;

            for line in axes.lines.iter() {
                let color = line.color.to_rgb_color();
                let points = line.x.iter().copied().zip(line.y.iter().copied());
                let series = chart.draw_series(LineSeries::new(points, &color))
                    .map_err(backend_error)?;

                if let Some(label) = &line.label {
                    series.label(label.as_str())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
                }
            }

            if let Some(location) = axes.legend {
                if !axes.labels().is_empty() {
                    chart.configure_series_labels()
                        .position(location.to_series_label_position())
                        .background_style(WHITE.mix(0.8))
                        .border_style(BLACK)
                        .draw()
                        .map_err(backend_error)?;
                }
            }
        }

        root.present().map_err(backend_error)?;

        Ok(())
    }

    /// Renders the figure as an SVG document
    pub fn to_svg_string(&self) -> Result<String, PlotError> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, self.size).into_drawing_area();
            self.draw(root)?;
        }

        Ok(buffer)
    }

    /// Renders the figure into an SVG file
    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> Result<(), PlotError> {
        let root = SVGBackend::new(path.as_ref(), self.size).into_drawing_area();

        self.draw(root)
    }
}

fn backend_error<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Backend(err.to_string())
}
