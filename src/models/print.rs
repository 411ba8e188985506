use image::DynamicImage;

/// Film session and box parameters for a print job, plus the bitmap to print
#[derive(Debug, Clone)]
pub struct PrintSettings {
    pub copies: i32,
    pub priority: String,
    pub medium: String,
    pub film_destination: String,
    pub film_orientation: String,
    pub film_size_id: String,
    pub magnification: String,
    pub smoothing: String,
    pub trim: String,
    pub image: DynamicImage,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            copies: 1,
            priority: String::new(),
            medium: String::new(),
            film_destination: String::new(),
            film_orientation: String::new(),
            film_size_id: String::new(),
            magnification: String::new(),
            smoothing: String::new(),
            trim: String::new(),
            image: DynamicImage::new_rgb8(1, 1),
        }
    }
}
