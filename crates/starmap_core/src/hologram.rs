//! Hologram preview of a system
//!
//! Lays out the star, orbit rings and planets of a [`SystemDetails`] in a
//! square canvas. The same layout is painted in the side panel and written
//! out as SVG.

use std::fmt::Write as _;

use crate::details::{PlanetType, StarKind, SystemDetails};

/// Edge length of the square preview canvas
pub const HOLOGRAM_SIZE: f32 = 320.0;

const MARGIN: f32 = 18.0;
const STAR_RADIUS: f32 = 14.0;
const MIN_ORBIT: f32 = STAR_RADIUS + 10.0;

/// A planet placed on its orbit ring
#[derive(Clone, Debug, PartialEq)]
pub struct HologramBody {
    pub name: String,
    pub planet_type: PlanetType,
    pub orbit_radius: f32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Layout of a system for drawing
#[derive(Clone, Debug, PartialEq)]
pub struct HologramLayout {
    pub size: f32,
    pub star: StarKind,
    pub star_radius: f32,
    pub bodies: Vec<HologramBody>,
}

impl HologramLayout {
    /// Place every planet on a ring proportional to `sqrt(AU)`
    ///
    /// Planets with an unknown orbit go on the outermost ring. Angles are
    /// spread with the golden angle so neighbours rarely overlap.
    pub fn from_details(details: &SystemDetails) -> Self {
        let center = HOLOGRAM_SIZE / 2.0;
        let max_orbit = center - MARGIN;

        let max_au = details
            .planets
            .iter()
            .filter_map(|p| p.semi_major_au)
            .fold(0.0f64, f64::max)
            .max(1.0);

        let bodies = details
            .planets
            .iter()
            .enumerate()
            .map(|(i, planet)| {
                let t = planet
                    .semi_major_au
                    .map(|au| (au.max(0.0) / max_au).sqrt() as f32)
                    .unwrap_or(1.0);
                let orbit_radius = MIN_ORBIT + t * (max_orbit - MIN_ORBIT);
                let angle = i as f32 * 2.399_963;
                let radius = match planet.planet_type {
                    PlanetType::Gas => 6.0,
                    PlanetType::Ice | PlanetType::Ocean => 4.5,
                    PlanetType::Rocky | PlanetType::Desert | PlanetType::Other(_) => 3.5,
                };
                HologramBody {
                    name: planet.name.clone(),
                    planet_type: planet.planet_type.clone(),
                    orbit_radius,
                    x: center + orbit_radius * angle.cos(),
                    y: center + orbit_radius * angle.sin(),
                    radius,
                }
            })
            .collect();

        Self {
            size: HOLOGRAM_SIZE,
            star: details.star.kind.clone(),
            star_radius: STAR_RADIUS,
            bodies,
        }
    }

    pub fn center(&self) -> f32 {
        self.size / 2.0
    }

    /// Render as a standalone SVG document
    pub fn to_svg(&self, title: &str) -> String {
        let c = self.center();
        let [sr, sg, sb] = self.star.color();
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
            s = self.size
        );
        let _ = writeln!(svg, "  <title>{}</title>", escape_xml(title));
        let _ = writeln!(
            svg,
            r#"  <defs><radialGradient id="glow"><stop offset="0" stop-color="rgb({sr},{sg},{sb})" stop-opacity="0.9"/><stop offset="1" stop-color="rgb({sr},{sg},{sb})" stop-opacity="0"/></radialGradient></defs>"#
        );
        let _ = writeln!(svg, r##"  <rect width="100%" height="100%" fill="#0b0f14"/>"##);

        for body in &self.bodies {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{c}" cy="{c}" r="{:.1}" fill="none" stroke="rgb(90,240,255)" stroke-opacity="0.35" stroke-dasharray="2 4"/>"#,
                body.orbit_radius
            );
        }

        let _ = writeln!(svg, r#"  <circle cx="{c}" cy="{c}" r="{:.1}" fill="url(#glow)"/>"#, self.star_radius * 2.2);
        let _ = writeln!(
            svg,
            r#"  <circle cx="{c}" cy="{c}" r="{:.1}" fill="rgb({sr},{sg},{sb})"/>"#,
            self.star_radius
        );

        for body in &self.bodies {
            let [r, g, b] = body.planet_type.color();
            let _ = writeln!(
                svg,
                r#"  <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="rgb({r},{g},{b})"/>"#,
                body.x, body.y, body.radius
            );
            let _ = writeln!(
                svg,
                r#"  <text x="{:.1}" y="{:.1}" fill="rgb(232,240,255)" font-family="sans-serif" font-size="9">{}</text>"#,
                body.x + body.radius + 2.0,
                body.y + 3.0,
                escape_xml(&body.name)
            );
        }

        let _ = writeln!(
            svg,
            r#"  <text x="8" y="{:.1}" fill="rgb(232,240,255)" font-family="sans-serif" font-size="11">{} · {}</text>"#,
            self.size - 8.0,
            escape_xml(title),
            escape_xml(self.star.label())
        );
        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::generate_details;

    #[test]
    fn test_layout_fits_canvas() {
        let details = generate_details("SOL");
        let layout = HologramLayout::from_details(&details);
        assert_eq!(layout.bodies.len(), details.planets.len());
        for body in &layout.bodies {
            assert!(body.orbit_radius >= MIN_ORBIT);
            assert!(body.x - body.radius >= 0.0 && body.x + body.radius <= HOLOGRAM_SIZE);
            assert!(body.y - body.radius >= 0.0 && body.y + body.radius <= HOLOGRAM_SIZE);
        }
    }

    #[test]
    fn test_outer_planet_on_outer_ring() {
        let mut details = generate_details("SOL");
        details.planets.truncate(1);
        details.planets[0].semi_major_au = None;
        let layout = HologramLayout::from_details(&details);
        assert_eq!(layout.bodies[0].orbit_radius, HOLOGRAM_SIZE / 2.0 - MARGIN);
    }

    #[test]
    fn test_svg_escapes_names() {
        let mut details = generate_details("SOL");
        details.planets[0].name = "<Tom & Jerry>".to_string();
        let svg = HologramLayout::from_details(&details).to_svg("Sol \"Prime\"");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("&lt;Tom &amp; Jerry&gt;"));
        assert!(svg.contains("Sol &quot;Prime&quot;"));
    }

    #[test]
    fn test_unknown_kinds_are_drawn() {
        let mut details = generate_details("SOL");
        details.star.kind = StarKind::Other("Red <Giant>".to_string());
        details.planets[0].planet_type = PlanetType::Other("Lava".to_string());
        let layout = HologramLayout::from_details(&details);
        assert_eq!(layout.bodies[0].radius, 3.5);
        let svg = layout.to_svg("Sol");
        assert!(svg.contains("Red &lt;Giant&gt;"));
    }
}
