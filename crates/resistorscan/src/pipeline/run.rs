//! Per-image orchestration: segment → canonical view → band runs → decode.

use image::RgbImage;

use super::config::ReaderConfig;
use super::result::{RejectReason, ResistorReading, ScanResult};
use crate::bands::{decode, extract_bands, BandColor, DecodeError, MAX_BANDS, MIN_BANDS};
use crate::geometry::canonical_view;
use crate::segment::{segment, Region};

fn reject_for(err: &DecodeError) -> RejectReason {
    match err {
        DecodeError::BandCount { got } if *got < MIN_BANDS => RejectReason::TooFewBands,
        DecodeError::BandCount { .. } => RejectReason::TooManyBands,
        DecodeError::NotADigit { .. } | DecodeError::NotAMultiplier { .. } => {
            RejectReason::InvalidBand
        }
    }
}

/// Read one region. Failures are recorded on the reading, never propagated.
pub fn read_region(region: &Region, config: &ReaderConfig) -> ResistorReading {
    let mut reading = ResistorReading {
        label: region.label,
        bbox: region.bbox,
        pixel_count: region.pixel_count,
        centroid: None,
        axis_angle_deg: None,
        rotation_deg: None,
        bands: Vec::new(),
        value: None,
        reject: None,
        reject_detail: None,
    };

    let view = match canonical_view(region, &config.canonical) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("region {}: {}", region.label, e);
            reading.reject = Some(RejectReason::DegenerateRegion);
            reading.reject_detail = Some(e.to_string());
            return reading;
        }
    };
    reading.centroid = Some(
        view.centroid
            .offset(region.bbox.left as f64, region.bbox.top as f64),
    );
    reading.axis_angle_deg = Some(view.axis.angle_deg());
    reading.rotation_deg = Some(view.rotation_deg);

    reading.bands = extract_bands(
        &view.image,
        Some(&view.mask),
        &config.colors,
        &config.profile,
    );
    let colors: Vec<BandColor> = reading.band_colors();
    tracing::debug!(
        "region {}: rotation {:.1} deg, bands {:?}",
        region.label,
        view.rotation_deg,
        colors
    );

    match decode(&colors) {
        Ok(value) => reading.value = Some(value),
        Err(e) => {
            let reason = reject_for(&e);
            tracing::debug!("region {}: {} ({})", region.label, reason, e);
            reading.reject = Some(reason);
            reading.reject_detail = Some(e.to_string());
        }
    }
    reading
}

/// Segment `image` and read every kept region.
pub fn read_image(image: &RgbImage, config: &ReaderConfig) -> ScanResult {
    let (w, h) = image.dimensions();
    let mut result = ScanResult::empty(w, h);

    let regions = segment(image, &config.segment);
    tracing::info!("{} regions found", regions.len());

    result.readings = regions.iter().map(|r| read_region(r, config)).collect();

    let n_decoded = result.decoded().count();
    tracing::info!(
        "{} of {} regions decoded ({}-{} bands accepted)",
        n_decoded,
        result.readings.len(),
        MIN_BANDS,
        MAX_BANDS
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{draw_resistor, ResistorDrawing};
    use approx::assert_abs_diff_eq;
    use image::Rgb;

    const BROWN: [u8; 3] = [130, 85, 60];
    const BLACK: [u8; 3] = [20, 20, 20];
    const RED: [u8; 3] = [219, 76, 84];
    const GOLD: [u8; 3] = [180, 150, 60];

    fn drawing(tilt_deg: f64) -> ResistorDrawing {
        ResistorDrawing {
            center: [120.0, 120.0],
            length: 151.0,
            width: 37.0,
            tilt_deg,
            body: [205, 205, 195],
            band_width: 12.0,
            bands: vec![(-45.5, BROWN), (-25.5, BLACK), (-5.5, RED), (45.5, GOLD)],
        }
    }

    #[test]
    fn tilted_resistor_reads_painted_value() {
        for tilt in [0.0, 30.0, 90.0, 125.0] {
            let mut img = RgbImage::from_pixel(240, 240, Rgb([255, 255, 255]));
            draw_resistor(&mut img, &drawing(tilt));
            let result = read_image(&img, &ReaderConfig::default());

            assert_eq!(result.readings.len(), 1, "tilt {tilt}");
            let reading = &result.readings[0];
            let value = reading
                .value
                .unwrap_or_else(|| panic!("tilt {tilt}: {:?}", reading.band_colors()));
            assert_abs_diff_eq!(value.ohms, 1000.0, epsilon = 1e-9);
            assert_abs_diff_eq!(value.tolerance_percent, 5.0);

            let c = reading.centroid.unwrap();
            assert_abs_diff_eq!(c.x, 120.0, epsilon = 1.0);
            assert_abs_diff_eq!(c.y, 120.0, epsilon = 1.0);
        }
    }

    #[test]
    fn plain_body_is_rejected_for_too_few_bands() {
        let mut img = RgbImage::from_pixel(240, 240, Rgb([255, 255, 255]));
        let mut plain = drawing(20.0);
        plain.bands.clear();
        draw_resistor(&mut img, &plain);
        let result = read_image(&img, &ReaderConfig::default());
        assert_eq!(result.readings.len(), 1);
        assert_eq!(result.readings[0].reject, Some(RejectReason::TooFewBands));
        assert!(result.readings[0].value.is_none());
    }

    #[test]
    fn failures_do_not_affect_other_regions() {
        let mut img = RgbImage::from_pixel(480, 240, Rgb([255, 255, 255]));
        draw_resistor(&mut img, &drawing(30.0));
        let mut plain = drawing(60.0);
        plain.center = [360.0, 120.0];
        plain.bands.clear();
        draw_resistor(&mut img, &plain);

        let result = read_image(&img, &ReaderConfig::default());
        assert_eq!(result.readings.len(), 2);
        assert_eq!(result.decoded().count(), 1);
        assert!(result.readings.iter().any(|r| r.reject.is_some()));
    }

    #[test]
    fn decode_errors_map_to_reject_codes() {
        assert_eq!(
            reject_for(&DecodeError::BandCount { got: 1 }),
            RejectReason::TooFewBands
        );
        assert_eq!(
            reject_for(&DecodeError::BandCount { got: 8 }),
            RejectReason::TooManyBands
        );
        assert_eq!(
            reject_for(&DecodeError::NotADigit {
                position: 0,
                color: BandColor::Gold
            }),
            RejectReason::InvalidBand
        );
    }
}
