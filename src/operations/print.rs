use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{ImageOutputFormat, ImageResult};
use serde_json::json;

use crate::models::PrintSettings;

/// Print job JSON with the bitmap embedded as a PNG data URI
pub(super) fn encode_request(settings: &PrintSettings) -> ImageResult<Vec<u8>> {
    let mut png = Vec::new();
    settings
        .image
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;

    let request = json!({
        "NumberOfCopies": settings.copies,
        "PrintPriority": settings.priority,
        "MediumType": settings.medium,
        "FilmDestination": settings.film_destination,
        "FilmOrientation": settings.film_orientation,
        "FilmSizeID": settings.film_size_id,
        "MagnificationType": settings.magnification,
        "SmoothingType": settings.smoothing,
        "Trim": settings.trim,
        "Image": format!("data:image/png;base64,{}", general_purpose::STANDARD.encode(&png)),
    });
    Ok(request.to_string().into_bytes())
}
