//! QR code rendering with half-block characters.
//!
//! Two module rows fit in one terminal row: `▀` paints the top module,
//! `▄` the bottom one and `█` both. Dark modules are painted; the caller
//! draws the lines dark-on-light.

use qrcode::{types::QrError, EcLevel, QrCode};
use vrlab_core::qr::{QrLevel, QrRequest};

/// Modules of light border around the code when a quiet zone is requested.
const QUIET_ZONE: usize = 2;

fn ec_level(level: QrLevel) -> EcLevel {
    match level {
        QrLevel::L => EcLevel::L,
        QrLevel::M => EcLevel::M,
        QrLevel::Q => EcLevel::Q,
        QrLevel::H => EcLevel::H,
    }
}

/// Render `request` to lines of equal width.
pub fn generate_qr_code_lines(request: &QrRequest) -> Result<Vec<String>, QrError> {
    let code =
        QrCode::with_error_correction_level(request.payload.as_bytes(), ec_level(request.level))?;
    let width = code.width();
    let pad = if request.quiet_zone { QUIET_ZONE } else { 0 };
    let size = width + pad * 2;

    let dark = |x: usize, y: usize| -> bool {
        if x < pad || y < pad || x >= pad + width || y >= pad + width {
            return false;
        }
        code[(x - pad, y - pad)] == qrcode::Color::Dark
    };

    let mut lines = Vec::with_capacity(size.div_ceil(2));
    for y in (0..size).step_by(2) {
        let line: String = (0..size)
            .map(|x| match (dark(x, y), dark(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            })
            .collect();
        lines.push(line);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrlab_core::config::QrConfig;

    #[test]
    fn test_lines_are_square_in_modules() {
        let request = QrRequest::new("https://example.org", &QrConfig::default());
        let lines = generate_qr_code_lines(&request).unwrap();
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert_eq!(lines.len(), width.div_ceil(2));
    }

    #[test]
    fn test_quiet_zone_adds_border() {
        let mut config = QrConfig::default();
        let with = generate_qr_code_lines(&QrRequest::new("hi", &config)).unwrap();
        config.quiet_zone = false;
        let without = generate_qr_code_lines(&QrRequest::new("hi", &config)).unwrap();
        assert_eq!(
            with[0].chars().count(),
            without[0].chars().count() + QUIET_ZONE * 2
        );
        assert!(with[0].chars().all(|c| c == ' '));
    }

    #[test]
    fn test_higher_level_is_not_smaller() {
        let url = "https://www.spatial.io/s/YCCC_VR_Labs-Home";
        let mut config = QrConfig::default();
        config.level = QrLevel::L;
        let low = generate_qr_code_lines(&QrRequest::new(url, &config)).unwrap();
        config.level = QrLevel::H;
        let high = generate_qr_code_lines(&QrRequest::new(url, &config)).unwrap();
        assert!(high[0].chars().count() >= low[0].chars().count());
    }
}
