use crate::generator::ShapeParams;
use crate::types::PrimitiveKind;

/// Coerce free-form field text into a number
///
/// Surrounding whitespace is ignored and empty text reads as 0. Of the
/// non-finite spellings only `Infinity` (optionally signed) is accepted;
/// `inf`, `nan` and anything else that does not parse becomes NaN. The value
/// is kept, not rejected.
pub fn coerce_number(text: &str) -> f32 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let negative = trimmed.starts_with('-');
    let unsigned = trimmed.strip_prefix(|c| c == '+' || c == '-').unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return if negative { f32::NEG_INFINITY } else { f32::INFINITY };
    }
    // Rust also reads "inf" and "nan"; exponents are the only letters allowed
    if unsigned.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f32::NAN;
    }
    trimmed.parse::<f32>().unwrap_or(f32::NAN)
}

/// Turn a coerced number into a batch length: NaN and negatives give 0,
/// fractions truncate toward zero. Out-of-range values saturate, and the
/// batch generator rejects them.
pub fn to_count(value: f32) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    // Saturating float-to-int cast
    value.trunc() as usize
}

/// Form contents as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct DraftConfig {
    pub kind: PrimitiveKind,
    pub width: String,
    pub height: String,
    pub depth: String,
    pub count: String,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            kind: PrimitiveKind::Box,
            width: "1".to_string(),
            height: "1".to_string(),
            depth: "1".to_string(),
            count: "1".to_string(),
        }
    }
}

/// Resolved draft ready for generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchRequest {
    pub shape: ShapeParams,
    pub count: usize,
}

impl DraftConfig {
    pub fn shape(&self) -> ShapeParams {
        ShapeParams {
            kind: self.kind,
            width: coerce_number(&self.width),
            height: coerce_number(&self.height),
            depth: coerce_number(&self.depth),
        }
    }

    pub fn count(&self) -> usize {
        to_count(coerce_number(&self.count))
    }

    pub fn request(&self) -> BatchRequest {
        BatchRequest {
            shape: self.shape(),
            count: self.count(),
        }
    }
}

/// Add Primitive dialog: visibility plus a draft that survives closing
#[derive(Debug, Clone, Default)]
pub struct AddDialog {
    open: bool,
    pub draft: DraftConfig,
}

impl AddDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close without touching the draft
    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Resolve the draft and close; the draft is kept for the next open
    pub fn confirm(&mut self) -> BatchRequest {
        self.open = false;
        self.draft.request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_plain_numbers() {
        assert_eq!(coerce_number("2"), 2.0);
        assert_eq!(coerce_number(" 1.5 "), 1.5);
        assert_eq!(coerce_number("-3"), -3.0);
        assert_eq!(coerce_number("1e2"), 100.0);
    }

    #[test]
    fn test_coerce_empty_is_zero() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
    }

    #[test]
    fn test_coerce_garbage_is_nan() {
        assert!(coerce_number("abc").is_nan());
        assert!(coerce_number("1,5").is_nan());
        assert!(coerce_number("2x").is_nan());
    }

    #[test]
    fn test_coerce_non_finite_spellings() {
        assert_eq!(coerce_number("Infinity"), f32::INFINITY);
        assert_eq!(coerce_number(" -Infinity"), f32::NEG_INFINITY);
        assert_eq!(coerce_number("1E3"), 1000.0);
        for text in ["inf", "-inf", "infinity", "INF", "nan", "NaN"] {
            assert!(coerce_number(text).is_nan(), "{text:?} should coerce to NaN");
        }
    }

    #[test]
    fn test_to_count() {
        assert_eq!(to_count(3.0), 3);
        assert_eq!(to_count(2.9), 2);
        assert_eq!(to_count(0.0), 0);
        assert_eq!(to_count(-4.0), 0);
        assert_eq!(to_count(f32::NAN), 0);
        assert_eq!(to_count(f32::INFINITY), usize::MAX);
        assert_eq!(to_count(4_294_967_296.0) as u64, 1 << 32);
    }

    #[test]
    fn test_default_draft() {
        let req = DraftConfig::default().request();
        assert_eq!(req.count, 1);
        assert_eq!(req.shape, ShapeParams::default());
    }

    #[test]
    fn test_confirm_closes_and_keeps_draft() {
        let mut dialog = AddDialog::new();
        dialog.open();
        dialog.draft.width = "2".to_string();
        dialog.draft.count = "3".to_string();

        let req = dialog.confirm();
        assert!(!dialog.is_open());
        assert_eq!(req.count, 3);
        assert_eq!(req.shape.width, 2.0);
        assert_eq!(dialog.draft.width, "2");

        dialog.open();
        assert_eq!(dialog.draft.count, "3");
    }

    #[test]
    fn test_cancel_keeps_draft() {
        let mut dialog = AddDialog::new();
        dialog.open();
        dialog.draft.kind = PrimitiveKind::Pyramid;
        dialog.cancel();
        assert!(!dialog.is_open());
        assert_eq!(dialog.draft.kind, PrimitiveKind::Pyramid);
    }

    #[test]
    fn test_nan_dimension_passes_through() {
        let draft = DraftConfig {
            height: "tall".to_string(),
            ..DraftConfig::default()
        };
        assert!(draft.shape().height.is_nan());
    }
}
