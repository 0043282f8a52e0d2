//! Hologram painter for the side panel

use egui::{Align2, Color32, FontId, Stroke};
use starmap_core::HologramLayout;

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Paint the layout scaled to the available width
pub fn paint_hologram(ui: &mut egui::Ui, layout: &HologramLayout) {
    let side = ui.available_width().min(layout.size);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let scale = side / layout.size;
    let to_screen = |x: f32, y: f32| rect.min + egui::vec2(x * scale, y * scale);

    painter.rect_filled(rect, 6.0, Color32::from_rgb(0x0b, 0x0f, 0x14));

    let center = to_screen(layout.center(), layout.center());
    let ring = Stroke::new(1.0, Color32::from_rgba_unmultiplied(0x5a, 0xf2, 0xff, 60));
    for body in &layout.bodies {
        painter.circle_stroke(center, body.orbit_radius * scale, ring);
    }

    let [r, g, b] = layout.star.color();
    painter.circle_filled(
        center,
        layout.star_radius * scale * 1.8,
        Color32::from_rgba_unmultiplied(r, g, b, 50),
    );
    painter.circle_filled(center, layout.star_radius * scale, rgb(layout.star.color()));

    for body in &layout.bodies {
        let pos = to_screen(body.x, body.y);
        let radius = body.radius * scale;
        painter.circle_filled(pos, radius, rgb(body.planet_type.color()));
        painter.text(
            pos + egui::vec2(radius + 3.0, 0.0),
            Align2::LEFT_CENTER,
            &body.name,
            FontId::proportional(10.0),
            Color32::from_gray(200),
        );
    }
}
