//! PNG chart rendering

mod box_plot;
mod font;
mod histogram;

pub(crate) use self::{box_plot::BoxPlotChart, font::load_font, histogram::HistogramChart};
use self::font::FONT_FAMILY;

/// Pixel size of every chart image.
const CHART_SIZE: (u32, u32) = (1000, 1000);

const USERS_AXIS_LABEL: &str = "Num of Users";
