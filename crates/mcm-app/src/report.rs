// ABOUTME: Text reports printed by the mcm commands.
// ABOUTME: Formats colour readings, mixtures, series listings and saved sessions.

use std::fmt::Write;

use mcm_core::{Hcv, Rgb16, Rgb8};
use mcm_paint::{MixedColour, MixingSession, Paint, PaintSeries};

fn hue_label(hcv: &Hcv<u16>) -> String {
    match hcv.hue.angle() {
        Some(angle) => format!("{:.1}°", angle.to_degrees()),
        None => "grey".to_string(),
    }
}

fn web_hex(rgb: Rgb16) -> String {
    let rgb: Rgb8 = rgb.convert();
    format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
}

pub fn describe(rgb: Rgb16) -> String {
    let hcv = Hcv::new(rgb);
    let mut out = String::new();
    let _ = writeln!(out, "RGB:        {} {}", rgb, web_hex(rgb));
    let _ = writeln!(out, "Hue:        {} {}", hue_label(&hcv), hcv.hue.rgb());
    let _ = writeln!(out, "Value:      {:.4}", hcv.value);
    let _ = writeln!(out, "Chroma:     {:.4}", hcv.chroma);
    let _ = writeln!(out, "Greyness:   {:.4}", hcv.greyness());
    let _ = writeln!(out, "Value grey: {}", hcv.value_rgb());
    let _ = writeln!(out, "Pure hue:   {}", hcv.hue_rgb_for_value(None));
    let _ = writeln!(
        out,
        "Zero chroma: {} ({:?} side)",
        hcv.zero_chroma_rgb(),
        hcv.chroma_side()
    );
    out
}

pub fn mixture<P: Paint>(mix: &MixedColour<P>) -> String {
    let colour = mix.colour();
    let mut out = String::new();
    let _ = writeln!(out, "Mixed colour: {} {}", colour.rgb(), web_hex(colour.rgb()));
    let _ = writeln!(
        out,
        "Transparency: {} ({:.2})",
        colour.transparency(),
        colour.transparency().value()
    );
    let _ = writeln!(
        out,
        "Finish:       {} ({:.2})",
        colour.finish(),
        colour.finish().value()
    );
    let _ = writeln!(
        out,
        "Metallic:     {} ({:.2})",
        colour.metallic(),
        colour.metallic().value()
    );
    let _ = writeln!(
        out,
        "Fluorescence: {} ({:.2})",
        colour.fluorescence(),
        colour.fluorescence().value()
    );
    let _ = writeln!(
        out,
        "Hue {} value {:.4} chroma {:.4}",
        hue_label(colour.hcv()),
        colour.value(),
        colour.chroma()
    );
    let _ = writeln!(out, "Components ({} parts):", mix.total_parts());
    for blob in mix.blobs() {
        let _ = writeln!(out, "  {:>4} x {}", blob.parts, blob.paint.name());
    }
    out
}

pub fn series(series: &PaintSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} paints)", series.id(), series.len());
    for paint in series.paints() {
        let colour = paint.colour();
        let _ = writeln!(
            out,
            "  {:<32} {} {:>2} {:>2} {:>2} {:>2} value {:.3} chroma {:.3}",
            paint.name(),
            web_hex(colour.rgb()),
            colour.transparency(),
            colour.finish(),
            colour.metallic(),
            colour.fluorescence(),
            colour.value(),
            colour.chroma()
        );
    }
    out
}

pub fn session(session: &MixingSession) -> String {
    let mut out = String::new();
    if let Some(target) = session.target {
        let _ = writeln!(out, "Target: {} {}", target, web_hex(target));
    }
    for file in &session.series_files {
        let _ = writeln!(out, "Series file: {}", file.display());
    }
    for mixture in &session.mixtures {
        let _ = writeln!(out, "{}: {}", mixture.name, mixture.notes);
        for component in &mixture.components {
            let _ = writeln!(
                out,
                "  {:>4} x {} ({})",
                component.parts, component.paint, component.series
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcm_paint::PaintBlob;

    #[test]
    fn test_describe_red() {
        let text = describe(Rgb16::RED);
        assert!(text.contains("#FF0000"));
        assert!(text.contains("Hue:        0.0°"));
        assert!(text.contains("Chroma:     1.0000"));
        assert!(text.contains("Value:      0.3333"));
    }

    #[test]
    fn test_describe_grey() {
        let text = describe(Rgb16::grey(0x8000));
        assert!(text.contains("Hue:        grey"));
        assert!(text.contains("Greyness:   1.0000"));
    }

    #[test]
    fn test_mixture_report() {
        let ideal = PaintSeries::ideal();
        let mix = MixedColour::new(vec![
            PaintBlob::new(ideal.get("Red").unwrap().clone(), 2),
            PaintBlob::new(ideal.get("Yellow").unwrap().clone(), 1),
        ]);
        let text = mixture(&mix);
        assert!(text.contains("Components (3 parts):"));
        assert!(text.contains("2 x Red"));
        assert!(text.contains("Transparency: O"));
        assert!(text.contains("Finish:       G"));
        assert!(text.contains("Metallic:     NM"));
    }

    #[test]
    fn test_series_listing() {
        let text = series(&PaintSeries::ideal());
        assert!(text.starts_with("Imaginary: Ideal Paint Colours Series (8 paints)"));
        assert!(text.contains("#00FFFF"));
    }
}
