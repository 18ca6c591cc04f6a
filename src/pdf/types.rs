//! PDF data types

/// Points per inch in PDF user space
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Request to rasterize a single page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRenderRequest {
    /// Page number (1-indexed)
    pub page: usize,
    /// Scale factor (1.0 = 72 DPI, 2.0 = 144 DPI)
    pub scale: f32,
}

impl PageRenderRequest {
    /// Render request at a target resolution
    pub fn at_dpi(page: usize, dpi: u32) -> Self {
        Self {
            page,
            scale: dpi as f32 / PDF_POINTS_PER_INCH,
        }
    }
}
