use plotters::prelude::*;

pub static FONT_SIZE: i32 = 20;
pub static LABEL_FONT_SIZE: i32 = 16;
pub static STROKE_WIDTH: u32 = 3;

/// Panel fill colors, keyed by metric or by CSS color name.
pub fn get_color_from_label(label: &str) -> RGBColor {
    match label {
        "light-blue" | "init" => RGBColor(173, 216, 230),
        "light-green" | "execution" => RGBColor(144, 238, 144),
        "light-yellow" | "memory" => RGBColor(255, 255, 224),
        "navajo-white" | "cost" => RGBColor(255, 222, 173),
        _ => panic!("lambench: unrecognised label: {label}"),
    }
}
