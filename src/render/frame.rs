use crate::core::PixelSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one chart draw pass.
///
/// A frame is always built from scratch, which gives draw passes their clear
/// semantics: nothing from a previous pass can leak into the next one.
/// `device_scale` carries the device pixel ratio as an absolute factor;
/// backends apply it once per frame, so repeated resizes can never compound
/// scale transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: PixelSize,
    pub device_scale: f64,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: PixelSize, device_scale: f64) -> Self {
        Self {
            viewport,
            device_scale,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidPixelSize {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.device_scale.is_finite() || self.device_scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "frame device scale must be finite and > 0".to_owned(),
            ));
        }

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }
}
