//! Template rendering engine.
//!
//! Maps a template's positioned elements onto a single generated PDF
//! page: resolves `${variable}` placeholders, places text and image
//! elements at their absolute coordinates, and falls back to a minimal
//! title/description layout for templates without an element schema.

use std::collections::HashMap;
use std::path::PathBuf;

use lazy_static::lazy_static;
use printpdf::*;
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::storage::resolve_asset_path;
use crate::template::models::{Element, ElementKind, Template};

/// US Letter page, in millimeters and PDF points.
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const PAGE_HEIGHT_PT: f32 = 792.0;

const TITLE_FONT_SIZE: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 12.0;
/// Baseline step for text with embedded newlines, in points.
const LINE_HEIGHT_PT: f32 = 14.4;

/// Legacy layout offsets, in points from the top-left corner. These match
/// the historical fixed layout used before templates carried elements.
const LEGACY_MARGIN_X_PT: f32 = 50.0;
const LEGACY_TITLE_Y_PT: f32 = 50.0;
const LEGACY_DESCRIPTION_Y_PT: f32 = 80.0;
const LEGACY_VALUES_START_Y_PT: f32 = 120.0;
const LEGACY_VALUES_STEP_PT: f32 = 20.0;

/// Reference DPI for computing image scale factors.
const IMAGE_BASE_DPI: f32 = 96.0;

/// Errors that can occur while producing a rendered document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template {0} not found")]
    TemplateNotFound(Uuid),
    #[error("failed to build PDF document: {0}")]
    Pdf(String),
    #[error("failed to persist rendered document: {0}")]
    Io(#[from] std::io::Error),
}

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex");
}

/// Substitute `${name}` placeholders from the supplied values map.
///
/// Placeholders without a matching value stay literal. A variable's
/// declared `defaultValue` is never consulted here: callers supply fully
/// resolved values, defaults are editor-side information only.
pub fn substitute_placeholders(content: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(content, |caps: &regex::Captures| {
            match values.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

/// Draw text whose (x, y) is the top-left corner in point coordinates,
/// converting to the PDF's bottom-left origin. Embedded newlines step the
/// baseline; there is no width-based line breaking.
fn draw_text_lines(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    content: &str,
    x_pt: f32,
    y_pt: f32,
    font_size: f32,
) {
    for (i, line) in content.split('\n').enumerate() {
        let baseline_pt = y_pt + font_size + i as f32 * LINE_HEIGHT_PT;
        layer.use_text(
            line,
            font_size,
            Mm(pt_to_mm(x_pt)),
            Mm(pt_to_mm(PAGE_HEIGHT_PT - baseline_pt)),
            font,
        );
    }
}

/// Stateless renderer turning one template plus caller-supplied variable
/// values into a single-page PDF byte stream. Safe to share across
/// concurrent requests: every call is an independent transformation.
pub struct TemplateRenderer {
    upload_root: PathBuf,
}

impl TemplateRenderer {
    pub fn new(upload_root: PathBuf) -> Self {
        TemplateRenderer { upload_root }
    }

    /// Render `template` with `values`. Elements draw in array order, so
    /// later elements overlay earlier ones. Missing or unreadable image
    /// assets are skipped without failing the render.
    pub fn render(
        &self,
        template: &Template,
        values: &HashMap<String, String>,
    ) -> Result<Vec<u8>, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            template.title.clone(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let layer = doc.get_page(page).get_layer(layer);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        if template.elements.is_empty() {
            self.draw_legacy_page(&layer, &font, template, values);
        } else {
            for element in &template.elements {
                let content = substitute_placeholders(&element.content, values);
                match element.kind {
                    ElementKind::Text => draw_text_lines(
                        &layer,
                        &font,
                        &content,
                        element.position.x,
                        element.position.y,
                        BODY_FONT_SIZE,
                    ),
                    ElementKind::Image => self.draw_image(&layer, element, &content),
                }
            }
        }

        doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
    }

    /// Minimal fallback layout for templates that predate the element
    /// schema: title heading, description line, then the supplied values
    /// as a `name: value` listing.
    fn draw_legacy_page(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        template: &Template,
        values: &HashMap<String, String>,
    ) {
        draw_text_lines(
            layer,
            font,
            &template.title,
            LEGACY_MARGIN_X_PT,
            LEGACY_TITLE_Y_PT,
            TITLE_FONT_SIZE,
        );
        draw_text_lines(
            layer,
            font,
            &format!("Description: {}", template.description),
            LEGACY_MARGIN_X_PT,
            LEGACY_DESCRIPTION_Y_PT,
            BODY_FONT_SIZE,
        );

        // Sorted for a stable layout; map iteration order is not.
        let mut pairs: Vec<(&String, &String)> = values.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let mut y_pt = LEGACY_VALUES_START_Y_PT;
        for (name, value) in pairs {
            draw_text_lines(
                layer,
                font,
                &format!("{}: {}", name, value),
                LEGACY_MARGIN_X_PT,
                y_pt,
                BODY_FONT_SIZE,
            );
            y_pt += LEGACY_VALUES_STEP_PT;
        }
    }

    /// Best-effort image placement: a reference that escapes the upload
    /// root, points at a missing file, or fails to decode is skipped and
    /// the rest of the page still renders.
    fn draw_image(&self, layer: &PdfLayerReference, element: &Element, reference: &str) {
        let Some(path) = resolve_asset_path(&self.upload_root, reference) else {
            log::debug!("image reference {:?} escapes the upload root, skipping", reference);
            return;
        };
        if !path.exists() {
            log::debug!("image asset {} missing, skipping", path.display());
            return;
        }
        let dynamic = match ::image::open(&path) {
            Ok(img) => img,
            Err(e) => {
                log::debug!("failed to decode image {}: {}", path.display(), e);
                return;
            }
        };

        // Composite alpha over white; PDF RGB images carry no transparency.
        let rgba = dynamic.to_rgba8();
        let (width_px, height_px) = rgba.dimensions();
        let mut rgb = ::image::RgbImage::new(width_px, height_px);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let ::image::Rgba([r, g, b, a]) = *pixel;
            let alpha = a as f32 / 255.0;
            let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
            rgb.put_pixel(x, y, ::image::Rgb([blend(r), blend(g), blend(b)]));
        }
        let raw_pixels = rgb.into_raw();

        let pdf_image = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: raw_pixels,
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // Scale the image into the element box, anchored at its top-left.
        let native_w_mm = width_px as f32 * 25.4 / IMAGE_BASE_DPI;
        let native_h_mm = height_px as f32 * 25.4 / IMAGE_BASE_DPI;
        let target_w_mm = pt_to_mm(element.size.w);
        let target_h_mm = pt_to_mm(element.size.h);

        pdf_image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(pt_to_mm(element.position.x))),
                translate_y: Some(Mm(pt_to_mm(
                    PAGE_HEIGHT_PT - element.position.y - element.size.h,
                ))),
                scale_x: Some(target_w_mm / native_w_mm),
                scale_y: Some(target_h_mm / native_h_mm),
                dpi: Some(IMAGE_BASE_DPI),
                ..Default::default()
            },
        );
    }
}
