/* Copyright 2020 @TwoCookingMice */

use exr::prelude::*;

use crate::io::TableIoError;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector3f};

// Read a coefficient table stored as an RGB EXR image
pub fn read_table_exr(file_path: &str) -> std::result::Result<Bitmap, TableIoError> {
    log::info!("Starting reading OpenEXR table from: {}.", file_path);

    let image = read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |resolution, _| Bitmap::new(resolution.width(), resolution.height()),
            |table: &mut Bitmap, position, (r, g, b, _a): (f32, f32, f32, f32)| {
                table[(position.x(), position.y())] = Vector3f::new(r as Float, g as Float, b as Float);
            },
        )
        .first_valid_layer()
        .all_attributes()
        .from_file(file_path)?;

    let table = image.layer_data.channel_data.pixels;
    log::info!("OpenEXR loaded, width = {}, height = {}.", table.width(), table.height());
    Ok(table)
}

// Write a coefficient table as an RGB EXR image, one channel per coefficient
pub fn write_table_exr(table: &Bitmap, file_path: &str) -> std::result::Result<(), TableIoError> {
    if table.width() == 0 || table.height() == 0 {
        return Err(TableIoError::Shape(format!("{}x{}", table.width(), table.height())));
    }

    log::info!("Starting writing openexr table: {}.", file_path);
    write_rgb_file(file_path, table.width(), table.height(), |x, y| {
        let v = table[(x, y)];
        (v.x as f32, v.y as f32, v.z as f32)
    })?;
    log::info!("EXR written to: {}.", file_path);
    Ok(())
}
